use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{fail, ok, ApiReply};
use crate::state::AppState;
use boighor_backend::models::{Book, NewBook};
use boighor_backend::store::{BookFilter, StoreError};

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    #[serde(default)]
    pub author: Option<String>,
}

/// GET /api/books - newest first, optional exact author filter
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> ApiReply<Vec<Book>> {
    let mut filter = BookFilter::default().newest_first();
    if let Some(author) = query.author.filter(|a| !a.is_empty()) {
        filter = filter.by_author(author);
    }

    match state.store.find(&filter).await {
        Ok(books) => ok(StatusCode::OK, books),
        Err(e) => {
            tracing::error!("list_books: {}", e);
            fail(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

/// POST /api/books
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiReply<Book> {
    let Json(new_book) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return fail(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    match state.store.create(new_book).await {
        Ok(book) => {
            tracing::info!("Book added: {} by {}", book.title, book.author);
            ok(StatusCode::CREATED, book)
        }
        Err(StoreError::Invalid(e)) => fail(StatusCode::BAD_REQUEST, &e.to_string()),
        Err(e) => {
            tracing::error!("create_book: {}", e);
            fail(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

/// GET /api/books/:id
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiReply<Book> {
    if Uuid::parse_str(&id).is_err() {
        return fail(StatusCode::BAD_REQUEST, "Invalid book id");
    }

    match state.store.get(&id).await {
        Ok(Some(book)) => ok(StatusCode::OK, book),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Book not found"),
        Err(e) => {
            tracing::error!("get_book {}: {}", id, e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch book")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{app, get, new_book, send};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use boighor_backend::store::RecordStore;

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/api/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (app, _store) = app();
        let (status, body) = send(
            app.clone(),
            post_json(r#"{"title":"আরণ্যক","author":"বিভূতিভূষণ","description":"d","coverImage":"c","pdfUrl":"p"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["category"], "General");

        let id = body["data"]["_id"].as_str().unwrap().to_string();
        let (status, body) = get(app, &format!("/api/books/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "আরণ্যক");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_payloads() {
        let (app, store) = app();
        let (status, body) = send(app.clone(), post_json("{ nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send(app, post_json(r#"{"title":"t","author":"a"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "`description` is required");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_and_malformed_ids() {
        let (app, _store) = app();
        let (status, body) = get(app.clone(), "/api/books/7f0c3a52-8a53-4c1e-9d55-2f7f5b0f6a11").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Book not found");

        let (status, _) = get(app, "/api/books/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_author_filter() {
        let (app, store) = app();
        store.create(new_book("Pather Panchali", "Bibhutibhushan")).await.unwrap();
        store.create(new_book("Gitanjali", "Tagore")).await.unwrap();
        store.create(new_book("Aranyak", "Bibhutibhushan")).await.unwrap();

        let (status, body) = get(app.clone(), "/api/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"][0]["title"], "Aranyak");

        let (_, body) = get(app, "/api/books?author=Bibhutibhushan").await;
        let titles: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, ["Aranyak", "Pather Panchali"]);
    }
}
