//! Storage entities of the library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An author as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub genre: String,
}

crate::impl_resource!(Author, "author", {
    "id" => id,
    "firstName" => first_name,
    "lastName" => last_name,
    "dateOfBirth" => date_of_birth,
    "genre" => genre,
});

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            genre: genre.into(),
        }
    }
}

/// A book as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

crate::impl_resource!(Book, "book", {
    "id" => id,
    "title" => title,
    "description" => description,
    "authorId" => author_id,
});

impl Book {
    pub fn new(title: impl Into<String>, description: Option<String>, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            author_id,
        }
    }
}
