use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde_json::{json, Value};

use crate::api::bson_to_api_value;
use crate::database::UpdateOutcome;
use crate::error::ApiError;

/// True when `candidate` has the store's id shape: exactly 24 hex digits.
/// Says nothing about whether a document with that id exists.
pub fn is_valid_object_id(candidate: &str) -> bool {
    candidate.len() == 24 && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate and parse a path id, or fail with `Invalid <label> ID`
pub fn parse_object_id(raw: &str, label: &str) -> Result<ObjectId, ApiError> {
    if !is_valid_object_id(raw) {
        return Err(ApiError::bad_request(format!("Invalid {} ID", label)));
    }
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID", label)))
}

/// Unwrap extracted path params. A segment axum could not decode (invalid
/// UTF-8 after percent-decoding) is reported like any other malformed id.
/// `comment_id` failures are labelled as comments, everything else as `resource`.
pub fn path_params<T>(path: Result<Path<T>, PathRejection>, resource: &str) -> Result<T, ApiError> {
    let rejection = match path {
        Ok(Path(params)) => return Ok(params),
        Err(rejection) => rejection,
    };
    tracing::debug!(%rejection, "path extraction rejected");

    let label = match &rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } if key == "comment_id" => "comment",
            _ => resource,
        },
        _ => resource,
    };
    Err(ApiError::bad_request(format!("Invalid {} ID", label)))
}

pub fn inserted_id_body(id: &Bson) -> Value {
    json!({ "insertedId": bson_to_api_value(id) })
}

pub fn update_body(outcome: UpdateOutcome) -> Value {
    json!({
        "matchedCount": outcome.matched_count,
        "modifiedCount": outcome.modified_count,
    })
}

pub fn delete_body(deleted: u64) -> Value {
    json!({ "deletedCount": deleted })
}

/// Mutation verbs are only meaningful on individual items
pub fn collection_method_not_allowed(collection: &str) -> ApiError {
    ApiError::method_not_allowed(format!("Method not allowed on the {} collection", collection))
}
