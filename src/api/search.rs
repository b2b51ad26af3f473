use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{fail, ok, ApiReply};
use crate::state::AppState;
use boighor_backend::models::Book;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/books/search?q= - phonetic and literal match over title and author
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiReply<Vec<Book>> {
    match state.search.search(&query.q).await {
        Ok(books) => ok(StatusCode::OK, books),
        Err(e) => {
            tracing::error!("search_books {:?}: {}", query.q, e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Search failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{app, app_with, get, new_book};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use boighor_backend::models::{AuthorSummary, Book, NewBook};
    use boighor_backend::store::{BookFilter, RecordStore, StoreError};
    use std::sync::Arc;

    struct DownStore;

    #[async_trait]
    impl RecordStore for DownStore {
        fn name(&self) -> &str {
            "down"
        }

        async fn find(&self, _filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _book: NewBook) -> Result<Book, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn get(&self, _id: &str) -> Result<Option<Book>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn authors(&self) -> Result<Vec<AuthorSummary>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_romanized_query_finds_bengali_title() {
        let (app, store) = app();
        store.create(new_book("আরণ্যক", "বিভূতিভূষণ বন্দ্যোপাধ্যায়")).await.unwrap();
        store.create(new_book("The Hobbit", "J. R. R. Tolkien")).await.unwrap();

        let (status, body) = get(app.clone(), "/api/books/search?q=aranyak").await;
        assert_eq!(status, StatusCode::OK);
        let found = body["data"].as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["title"], "আরণ্যক");

        let (_, body) = get(app, "/api/books/search?q=HOBBIT").await;
        assert_eq!(body["data"][0]["title"], "The Hobbit");
    }

    #[tokio::test]
    async fn test_empty_query_returns_empty_list() {
        let (app, store) = app();
        store.create(new_book("আরণ্যক", "x")).await.unwrap();

        for uri in ["/api/books/search", "/api/books/search?q="] {
            let (status, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"], serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn test_whitespace_query_returns_first_books() {
        let (app, store) = app();
        for i in 0..25 {
            store.create(new_book(&format!("Book {}", i), "Author")).await.unwrap();
        }

        let (status, body) = get(app, "/api/books/search?q=%20%20").await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<_> = (0..20).map(|i| format!("Book {}", i)).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn test_results_capped() {
        let (app, store) = app();
        for i in 0..25 {
            store.create(new_book(&format!("Hobbit {}", i), "Tolkien")).await.unwrap();
        }
        let (_, body) = get(app, "/api/books/search?q=hobbit").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_backend_failure_is_500() {
        let app = app_with(Arc::new(DownStore));
        let (status, body) = get(app.clone(), "/api/books/search?q=aranyak").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Search failed");

        // blank queries never touch the store
        let (status, _) = get(app, "/api/books/search?q=").await;
        assert_eq!(status, StatusCode::OK);
    }
}
