// handlers/comments.rs - comments nested under a movie
//
// Every lookup matches on both the comment id and the parent movie id, so a
// comment is never reachable through a movie it does not belong to.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use crate::api::{document_to_api_value, documents_to_api_value};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::comment::{Comment, CommentUpdate, COLLECTION, CREATE_SENTINEL, MOVIE_REF};
use crate::server::AppState;

use super::utils::{
    collection_method_not_allowed, delete_body, inserted_id_body, parse_object_id, path_params,
    update_body,
};

fn composite_ids(id_movie: &str, id_comment: &str) -> Result<(ObjectId, ObjectId), ApiError> {
    let movie_id = parse_object_id(id_movie, "movie")?;
    let comment_id = parse_object_id(id_comment, "comment")?;
    Ok((movie_id, comment_id))
}

/// GET /movies/:idMovie/comments
pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id_movie = path_params(path, "movie")?;
    let movie_id = parse_object_id(&id_movie, "movie")?;
    let comments = state
        .store
        .find_many(COLLECTION, doc! { MOVIE_REF: movie_id }, state.list_limit)
        .await?;
    Ok(ApiResponse::success(documents_to_api_value(&comments)))
}

/// POST/PUT/DELETE /movies/:idMovie/comments
pub async fn collection_not_supported() -> ApiError {
    collection_method_not_allowed(COLLECTION)
}

/// GET /movies/:idMovie/comments/:idComment
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult {
    let (id_movie, id_comment) = path_params(path, "movie")?;
    let (movie_id, comment_id) = composite_ids(&id_movie, &id_comment)?;
    let comment = state
        .store
        .find_one(COLLECTION, doc! { "_id": comment_id, MOVIE_REF: movie_id })
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    Ok(ApiResponse::success(document_to_api_value(&comment)))
}

/// POST /movies/:idMovie/comments/null
///
/// The comment segment must be the literal `null`; the store assigns the id.
pub async fn post(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult {
    let (id_movie, id_comment) = path_params(path, "movie")?;
    let movie_id = parse_object_id(&id_movie, "movie")?;
    if id_comment != CREATE_SENTINEL {
        return Err(ApiError::bad_request(format!(
            "Comment ID must be \"{}\" when creating a comment",
            CREATE_SENTINEL
        )));
    }

    let inserted = state
        .store
        .insert_one(COLLECTION, Comment::placeholder(movie_id).to_document()?)
        .await?;
    tracing::info!(inserted_id = %inserted, %movie_id, "comment created");
    Ok(ApiResponse::created(inserted_id_body(&inserted)).message("Comment created"))
}

/// PUT /movies/:idMovie/comments/:idComment - replaces `text` from the JSON body
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    payload: Option<Json<CommentUpdate>>,
) -> ApiResult {
    let (id_movie, id_comment) = path_params(path, "movie")?;
    let (movie_id, comment_id) = composite_ids(&id_movie, &id_comment)?;
    let text = payload
        .and_then(|Json(update)| update.text)
        .ok_or_else(|| ApiError::bad_request("Comment text is required"))?;

    let outcome = state
        .store
        .update_one(
            COLLECTION,
            doc! { "_id": comment_id, MOVIE_REF: movie_id },
            doc! { "$set": { "text": text } },
        )
        .await?;

    if outcome.matched_count == 0 {
        return Err(ApiError::not_found("Comment not found"));
    }
    Ok(ApiResponse::success(update_body(outcome)).message("Comment updated"))
}

/// DELETE /movies/:idMovie/comments/:idComment
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult {
    let (id_movie, id_comment) = path_params(path, "movie")?;
    let (movie_id, comment_id) = composite_ids(&id_movie, &id_comment)?;
    let deleted = state
        .store
        .delete_one(COLLECTION, doc! { "_id": comment_id, MOVIE_REF: movie_id })
        .await?;

    if deleted == 0 {
        return Err(ApiError::not_found("Comment not found"));
    }
    tracing::info!(%comment_id, %movie_id, "comment deleted");
    Ok(ApiResponse::success(delete_body(deleted)).message("Comment deleted"))
}
