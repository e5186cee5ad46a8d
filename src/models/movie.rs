use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseError;

pub const COLLECTION: &str = "movies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genre: Vec<String>,
    pub plot: String,
}

impl Movie {
    /// Document inserted by `POST /movies/:id`; the request body is not read
    pub fn placeholder() -> Self {
        Self {
            title: "Untitled Movie".to_string(),
            year: 2024,
            director: "Unknown Director".to_string(),
            genre: vec!["Drama".to_string()],
            plot: "Plot to be announced.".to_string(),
        }
    }

    /// Fields written by `PUT /movies/:id`
    pub fn replacement() -> Self {
        Self {
            title: "Updated Movie Title".to_string(),
            year: 2025,
            director: "Updated Director".to_string(),
            genre: vec!["Action".to_string(), "Adventure".to_string()],
            plot: "Updated plot summary.".to_string(),
        }
    }

    pub fn to_document(&self) -> Result<Document, DatabaseError> {
        Ok(bson::to_document(self)?)
    }
}
