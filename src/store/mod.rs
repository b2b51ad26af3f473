//! Record store - where books live
//!
//! Architecture principles:
//! - The store only exposes primitives: find, create, get, authors
//! - Search never filters inside the store; it reads the corpus in natural
//!   order and evaluates patterns itself
//! - Backends are interchangeable behind `RecordStore`

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AuthorSummary, Book, NewBook, ValidationError};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Result ordering for `find`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookOrder {
    /// Insertion order; stable across calls on an unmodified store
    #[default]
    Natural,
    /// Most recently created first
    NewestFirst,
}

/// Filter accepted by `RecordStore::find`
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Exact author match
    pub author: Option<String>,
    pub order: BookOrder,
}

impl BookFilter {
    pub fn by_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = BookOrder::NewestFirst;
        self
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Decode(String),
    #[error("invalid book: {0}")]
    Invalid(#[from] ValidationError),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend name, for logging
    fn name(&self) -> &str;

    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;

    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Book>, StoreError>;

    /// Books grouped by author, sorted by author name
    async fn authors(&self) -> Result<Vec<AuthorSummary>, StoreError>;
}
