use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseError;

pub const COLLECTION: &str = "theaters";

/// Only the identifier field is written; stored location data is left alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    #[serde(rename = "theaterId")]
    pub theater_id: i32,
}

impl Theater {
    pub fn placeholder() -> Self {
        Self { theater_id: 9999 }
    }

    pub fn replacement() -> Self {
        Self { theater_id: 10000 }
    }

    pub fn to_document(&self) -> Result<Document, DatabaseError> {
        Ok(bson::to_document(self)?)
    }
}
