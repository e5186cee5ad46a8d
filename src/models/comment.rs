use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseError;

pub const COLLECTION: &str = "comments";

/// Field holding the parent movie's id
pub const MOVIE_REF: &str = "movie_id";

/// Path value that must stand in for the comment id on create
pub const CREATE_SENTINEL: &str = "null";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub email: String,
    pub movie_id: ObjectId,
    pub text: String,
    pub date: DateTime,
}

impl Comment {
    /// Comment inserted by `POST /movies/:idMovie/comments/null`
    pub fn placeholder(movie_id: ObjectId) -> Self {
        Self {
            name: "Anonymous".to_string(),
            email: "anonymous@example.com".to_string(),
            movie_id,
            text: "This is a placeholder comment.".to_string(),
            date: DateTime::now(),
        }
    }

    pub fn to_document(&self) -> Result<Document, DatabaseError> {
        Ok(bson::to_document(self)?)
    }
}

/// Body accepted by `PUT /movies/:idMovie/comments/:idComment`
#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub text: Option<String>,
}
