use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::search::{SearchField, Searchable};

pub const DEFAULT_CATEGORY: &str = "General";

/// A book in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    /// URL for the cover image
    pub cover_image: String,
    /// URL for the PDF, served through the relay
    pub pdf_url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Searchable for Book {
    fn search_id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
        }
    }
}

/// Create-book payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub pdf_url: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is required")]
pub struct ValidationError(pub &'static str);

impl NewBook {
    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("author", &self.author),
            ("description", &self.description),
            ("coverImage", &self.cover_image),
            ("pdfUrl", &self.pdf_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError(name));
            }
        }
        Ok(())
    }

    /// Validate and stamp identity and creation time
    pub fn into_book(self) -> Result<Book, ValidationError> {
        self.validate()?;
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Book {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            author: self.author,
            description: self.description,
            cover_image: self.cover_image,
            pdf_url: self.pdf_url,
            category,
            created_at: Utc::now(),
        })
    }
}

/// Per-author aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    /// Author name
    #[serde(rename = "_id")]
    pub name: String,
    pub count: i64,
    /// Cover of the author's first book
    pub image: Option<String>,
}
