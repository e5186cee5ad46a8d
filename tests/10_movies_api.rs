mod common;

use anyhow::Result;
use axum::http::Method;
use mongodb::bson::{doc, Document};

use common::{assert_envelope, inserted_id, TestApp, ABSENT_ID, MALFORMED_IDS};

fn movie(title: &str) -> Document {
    doc! {
        "title": title,
        "year": 1903,
        "director": "Edwin S. Porter",
        "genre": ["Short", "Western"],
        "plot": "A group of bandits stage a brazen train hold-up.",
    }
}

#[tokio::test]
async fn list_returns_movies_in_store_order() -> Result<()> {
    let app = TestApp::new();
    app.store.seed("movies", vec![movie("The Great Train Robbery"), movie("A Corner in Wheat")]);

    let (status, body) = app.get("/movies").await?;
    assert_envelope(status, &body, 200);

    let titles: Vec<&str> = body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .filter_map(|m| m["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["The Great Train Robbery", "A Corner in Wheat"]);
    Ok(())
}

#[tokio::test]
async fn list_on_empty_collection_is_an_empty_array() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/movies").await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn list_never_exceeds_the_cap() -> Result<()> {
    let app = TestApp::new();
    app.store.seed("movies", (0..25).map(|i| movie(&format!("Reel {i}"))));

    let (status, body) = app.get("/movies").await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));

    let small = TestApp::with_limit(3);
    small.store.seed("movies", (0..5).map(|i| movie(&format!("Reel {i}"))));
    let (_, body) = small.get("/movies").await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn get_returns_document_with_hex_id() -> Result<()> {
    let app = TestApp::new();
    let ids = app.store.seed("movies", vec![movie("The Great Train Robbery")]);
    let id = ids[0].to_hex();

    let (status, body) = app.get(&format!("/movies/{id}")).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["_id"], serde_json::json!(id));
    assert_eq!(body["data"]["genre"], serde_json::json!(["Short", "Western"]));
    Ok(())
}

#[tokio::test]
async fn get_missing_movie_is_404() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get(&format!("/movies/{ABSENT_ID}")).await?;
    assert_envelope(status, &body, 404);
    assert_eq!(body["message"], "Movie not found");
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_the_store() -> Result<()> {
    let app = TestApp::new();

    for id in MALFORMED_IDS {
        let uri = format!("/movies/{id}");
        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, None),
            (Method::DELETE, None),
        ] {
            let (status, body) = app.request(method.clone(), &uri, body).await?;
            assert_envelope(status, &body, 400);
            assert_eq!(body["message"], "Invalid movie ID", "{method} {uri}");
        }
    }

    assert_eq!(app.store.operation_count(), 0);
    Ok(())
}

#[tokio::test]
async fn undecodable_ids_still_get_the_envelope() -> Result<()> {
    let app = TestApp::new();

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = app.request(method.clone(), "/movies/%FF", None).await?;
        assert_envelope(status, &body, 400);
        assert_eq!(body["message"], "Invalid movie ID", "{method}");
    }
    assert_eq!(app.store.operation_count(), 0);

    // POST ignores the segment entirely
    let (status, body) = app.post("/movies/%FF").await?;
    assert_envelope(status, &body, 201);
    Ok(())
}

#[tokio::test]
async fn post_inserts_placeholder_regardless_of_path_id() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.post("/movies/not-even-an-id").await?;
    assert_envelope(status, &body, 201);
    let id = inserted_id(&body);
    assert_eq!(id.len(), 24);

    let (status, body) = app.post(&format!("/movies/{ABSENT_ID}")).await?;
    assert_envelope(status, &body, 201);
    assert_ne!(inserted_id(&body), id);
    assert_eq!(app.store.len("movies"), 2);

    let (status, body) = app.get(&format!("/movies/{id}")).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["title"], "Untitled Movie");
    Ok(())
}

#[tokio::test]
async fn put_replaces_fixed_fields() -> Result<()> {
    let app = TestApp::new();
    let ids = app.store.seed("movies", vec![movie("The Great Train Robbery")]);
    let uri = format!("/movies/{}", ids[0].to_hex());

    let (status, body) = app.put(&uri, Some(serde_json::json!({ "title": "ignored" }))).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["matchedCount"], 1);
    assert_eq!(body["data"]["modifiedCount"], 1);

    let (_, body) = app.get(&uri).await?;
    assert_eq!(body["data"]["title"], "Updated Movie Title");
    assert_eq!(body["data"]["genre"], serde_json::json!(["Action", "Adventure"]));

    // Same payload again matches without modifying
    let (status, body) = app.put(&uri, None).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["modifiedCount"], 0);
    Ok(())
}

#[tokio::test]
async fn put_missing_movie_is_404() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.put(&format!("/movies/{ABSENT_ID}"), None).await?;
    assert_envelope(status, &body, 404);
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_200_then_404() -> Result<()> {
    let app = TestApp::new();
    let ids = app.store.seed("movies", vec![movie("The Great Train Robbery")]);
    let uri = format!("/movies/{}", ids[0].to_hex());

    let (status, body) = app.delete(&uri).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["deletedCount"], 1);

    let (status, body) = app.delete(&uri).await?;
    assert_envelope(status, &body, 404);
    Ok(())
}

#[tokio::test]
async fn deleting_a_movie_leaves_its_comments() -> Result<()> {
    let app = TestApp::new();
    let ids = app.store.seed("movies", vec![movie("The Great Train Robbery")]);
    app.store.seed("comments", vec![doc! { "movie_id": ids[0], "text": "classic" }]);

    let (status, _) = app.delete(&format!("/movies/{}", ids[0].to_hex())).await?;
    assert_eq!(status.as_u16(), 200);
    assert_eq!(app.store.len("comments"), 1);
    Ok(())
}

#[tokio::test]
async fn collection_mutations_are_405() -> Result<()> {
    let app = TestApp::new();
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = app.request(method, "/movies", None).await?;
        assert_envelope(status, &body, 405);
        assert_eq!(body["message"], "Method not allowed on the movies collection");
    }
    assert_eq!(app.store.operation_count(), 0);
    Ok(())
}

#[tokio::test]
async fn store_failures_are_500_with_the_error_text() -> Result<()> {
    let app = TestApp::new();
    app.store.fail_with(Some("server selection timeout"));

    let (status, body) = app.get("/movies").await?;
    assert_envelope(status, &body, 500);
    assert_eq!(body["message"], "Internal server error");
    assert!(body["error"].is_string(), "missing error detail: {}", body);
    Ok(())
}
