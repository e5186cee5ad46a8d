// handlers/movies.rs - /movies and /movies/:id

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use mongodb::bson::doc;

use crate::api::{document_to_api_value, documents_to_api_value};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::movie::{Movie, COLLECTION};
use crate::server::AppState;

use super::utils::{
    collection_method_not_allowed, delete_body, inserted_id_body, parse_object_id, path_params,
    update_body,
};

/// GET /movies - first page of movies in store order
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let movies = state
        .store
        .find_many(COLLECTION, doc! {}, state.list_limit)
        .await?;
    Ok(ApiResponse::success(documents_to_api_value(&movies)))
}

/// POST/PUT/DELETE /movies
pub async fn collection_not_supported() -> ApiError {
    collection_method_not_allowed(COLLECTION)
}

/// GET /movies/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "movie")?;
    let id = parse_object_id(&id, "movie")?;
    match state.store.find_one(COLLECTION, doc! { "_id": id }).await? {
        Some(movie) => Ok(ApiResponse::success(document_to_api_value(&movie))),
        None => Err(ApiError::not_found("Movie not found")),
    }
}

/// POST /movies/:id - the path id is accepted but not used
pub async fn post(State(state): State<AppState>) -> ApiResult {
    let inserted = state
        .store
        .insert_one(COLLECTION, Movie::placeholder().to_document()?)
        .await?;
    tracing::info!(inserted_id = %inserted, "movie created");
    Ok(ApiResponse::created(inserted_id_body(&inserted)).message("Movie created"))
}

/// PUT /movies/:id
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "movie")?;
    let id = parse_object_id(&id, "movie")?;
    let replacement = Movie::replacement().to_document()?;
    let outcome = state
        .store
        .update_one(COLLECTION, doc! { "_id": id }, doc! { "$set": replacement })
        .await?;

    if outcome.matched_count == 0 {
        return Err(ApiError::not_found("Movie not found"));
    }
    Ok(ApiResponse::success(update_body(outcome)).message("Movie updated"))
}

/// DELETE /movies/:id - comments referencing the movie are left in place
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_params(path, "movie")?;
    let id = parse_object_id(&id, "movie")?;
    let deleted = state.store.delete_one(COLLECTION, doc! { "_id": id }).await?;

    if deleted == 0 {
        return Err(ApiError::not_found("Movie not found"));
    }
    tracing::info!(%id, "movie deleted");
    Ok(ApiResponse::success(delete_body(deleted)).message("Movie deleted"))
}
