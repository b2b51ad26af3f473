//! In-memory record store

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{BookFilter, BookOrder, RecordStore, StoreError};
use crate::models::{AuthorSummary, Book, NewBook};

/// Books kept in insertion order
#[derive(Default)]
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read();
        let mut found: Vec<Book> = books
            .iter()
            .filter(|b| filter.author.as_ref().map_or(true, |a| &b.author == a))
            .cloned()
            .collect();

        if filter.order == BookOrder::NewestFirst {
            // stable sort keeps later inserts first on equal timestamps
            found.reverse();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Ok(found)
    }

    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = book.into_book()?;
        self.books.write().push(book.clone());
        Ok(book)
    }

    async fn get(&self, id: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().iter().find(|b| b.id == id).cloned())
    }

    async fn authors(&self) -> Result<Vec<AuthorSummary>, StoreError> {
        let books = self.books.read();
        let mut grouped: BTreeMap<&str, AuthorSummary> = BTreeMap::new();

        for book in books.iter() {
            grouped
                .entry(book.author.as_str())
                .and_modify(|s| s.count += 1)
                .or_insert_with(|| AuthorSummary {
                    name: book.author.clone(),
                    count: 1,
                    image: Some(book.cover_image.clone()),
                });
        }

        Ok(grouped.into_values().collect())
    }
}
