mod common;

use anyhow::Result;
use axum::http::Method;
use mongodb::bson::doc;

use common::{assert_envelope, inserted_id, TestApp, ABSENT_ID, MALFORMED_IDS};

#[tokio::test]
async fn list_is_capped_and_ordered() -> Result<()> {
    let app = TestApp::new();
    app.store.seed("theaters", (1..=12).map(|n| doc! { "theaterId": n }));

    let (status, body) = app.get("/theaters").await?;
    assert_envelope(status, &body, 200);

    let ids: Vec<i64> = body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .filter_map(|t| t["theaterId"].as_i64())
        .collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    Ok(())
}

#[tokio::test]
async fn get_leaves_location_data_intact() -> Result<()> {
    let app = TestApp::new();
    let ids = app.store.seed(
        "theaters",
        vec![doc! {
            "theaterId": 1000,
            "location": { "address": { "city": "Bloomington", "state": "MN" } },
        }],
    );

    let (status, body) = app.get(&format!("/theaters/{}", ids[0].to_hex())).await?;
    assert_envelope(status, &body, 200);
    assert_eq!(body["data"]["theaterId"], 1000);
    assert_eq!(body["data"]["location"]["address"]["city"], "Bloomington");
    Ok(())
}

#[tokio::test]
async fn missing_theater_is_404_for_read_update_delete() -> Result<()> {
    let app = TestApp::new();
    let uri = format!("/theaters/{ABSENT_ID}");

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = app.request(method, &uri, None).await?;
        assert_envelope(status, &body, 404);
        assert_eq!(body["message"], "Theater not found");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_ids_never_reach_the_store() -> Result<()> {
    let app = TestApp::new();
    for id in MALFORMED_IDS {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (status, body) = app.request(method, &format!("/theaters/{id}"), None).await?;
            assert_envelope(status, &body, 400);
            assert_eq!(body["message"], "Invalid theater ID");
        }
    }

    let (status, body) = app.get("/theaters/%C3%28").await?;
    assert_envelope(status, &body, 400);
    assert_eq!(body["message"], "Invalid theater ID");

    assert_eq!(app.store.operation_count(), 0);
    Ok(())
}

#[tokio::test]
async fn post_then_put_then_delete_twice() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.post("/theaters/anything").await?;
    assert_envelope(status, &body, 201);
    let id = inserted_id(&body);
    let uri = format!("/theaters/{id}");

    let (_, body) = app.get(&uri).await?;
    assert_eq!(body["data"]["theaterId"], 9999);

    let (status, body) = app.put(&uri, None).await?;
    assert_envelope(status, &body, 200);
    let (_, body) = app.get(&uri).await?;
    assert_eq!(body["data"]["theaterId"], 10000);

    let (status, body) = app.delete(&uri).await?;
    assert_envelope(status, &body, 200);
    let (status, body) = app.delete(&uri).await?;
    assert_envelope(status, &body, 404);
    Ok(())
}

#[tokio::test]
async fn collection_mutations_are_405() -> Result<()> {
    let app = TestApp::new();
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = app.request(method, "/theaters", None).await?;
        assert_envelope(status, &body, 405);
        assert_eq!(body["message"], "Method not allowed on the theaters collection");
    }
    Ok(())
}
