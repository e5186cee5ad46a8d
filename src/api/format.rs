use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a stored document into the public wire format.
///
/// ObjectIds become their 24-char hex string and datetimes become RFC 3339
/// strings, matching what JSON clients of the collections expect. Everything
/// else uses relaxed extended JSON.
pub fn document_to_api_value(document: &Document) -> Value {
    let map: Map<String, Value> = document
        .iter()
        .map(|(key, value)| (key.clone(), bson_to_api_value(value)))
        .collect();
    Value::Object(map)
}

pub fn documents_to_api_value(documents: &[Document]) -> Value {
    Value::Array(documents.iter().map(document_to_api_value).collect())
}

pub fn bson_to_api_value(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_api_value(doc),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_api_value).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}
