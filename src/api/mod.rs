pub mod authors;
pub mod books;
pub mod proxy;
pub mod search;
pub mod server;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// Status plus envelope, the return type of every JSON handler
pub type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(status: StatusCode, data: T) -> ApiReply<T> {
    (status, Json(ApiResponse::success(data)))
}

pub fn fail<T>(status: StatusCode, message: &str) -> ApiReply<T> {
    (status, Json(ApiResponse::error(message)))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route("/api/books/search", get(search::search_books))
        .route("/api/books/:id", get(books::get_book))
        .route("/api/authors", get(authors::list_authors))
        .route("/api/proxy", get(proxy::relay_document))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::routes;
    use crate::state::AppState;
    use boighor_backend::config::RelayConfig;
    use boighor_backend::models::NewBook;
    use boighor_backend::relay::DocumentRelay;
    use boighor_backend::store::{MemoryStore, RecordStore};

    pub fn app_with(store: Arc<dyn RecordStore>) -> Router {
        let relay = DocumentRelay::new(&RelayConfig::default()).unwrap();
        routes(Arc::new(AppState::new(store, relay)))
    }

    pub fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (app_with(store.clone()), store)
    }

    pub fn new_book(title: &str, author: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            description: "d".to_string(),
            cover_image: format!("https://covers.test/{}.jpg", author),
            pdf_url: "https://files.test/book.pdf".to_string(),
            category: None,
        }
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }
}
