// handlers/theaters.rs - /theaters and /theaters/:id

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use mongodb::bson::doc;

use crate::api::{document_to_api_value, documents_to_api_value};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::theater::{Theater, COLLECTION};
use crate::server::AppState;

use super::utils::{
    collection_method_not_allowed, delete_body, inserted_id_body, parse_object_id, path_params,
    update_body,
};

/// GET /theaters
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let theaters = state
        .store
        .find_many(COLLECTION, doc! {}, state.list_limit)
        .await?;
    Ok(ApiResponse::success(documents_to_api_value(&theaters)))
}

/// POST/PUT/DELETE /theaters
pub async fn collection_not_supported() -> ApiError {
    collection_method_not_allowed(COLLECTION)
}

/// GET /theaters/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "theater")?;
    let id = parse_object_id(&id, "theater")?;
    let theater = state
        .store
        .find_one(COLLECTION, doc! { "_id": id })
        .await?
        .ok_or_else(|| ApiError::not_found("Theater not found"))?;
    Ok(ApiResponse::success(document_to_api_value(&theater)))
}

/// POST /theaters/:id - inserts the placeholder theater, path id unused
pub async fn post(State(state): State<AppState>) -> ApiResult {
    let inserted = state
        .store
        .insert_one(COLLECTION, Theater::placeholder().to_document()?)
        .await?;
    tracing::info!(inserted_id = %inserted, "theater created");
    Ok(ApiResponse::created(inserted_id_body(&inserted)).message("Theater created"))
}

/// PUT /theaters/:id
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "theater")?;
    let id = parse_object_id(&id, "theater")?;
    let replacement = Theater::replacement().to_document()?;
    let outcome = state
        .store
        .update_one(COLLECTION, doc! { "_id": id }, doc! { "$set": replacement })
        .await?;

    if outcome.matched_count == 0 {
        return Err(ApiError::not_found("Theater not found"));
    }
    Ok(ApiResponse::success(update_body(outcome)).message("Theater updated"))
}

/// DELETE /theaters/:id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "theater")?;
    let id = parse_object_id(&id, "theater")?;
    match state.store.delete_one(COLLECTION, doc! { "_id": id }).await? {
        0 => Err(ApiError::not_found("Theater not found")),
        deleted => {
            tracing::info!(%id, "theater deleted");
            Ok(ApiResponse::success(delete_body(deleted)).message("Theater deleted"))
        }
    }
}
