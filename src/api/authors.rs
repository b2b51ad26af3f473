use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use super::{fail, ok, ApiReply};
use crate::state::AppState;
use boighor_backend::models::AuthorSummary;

/// GET /api/authors - book count and first cover per author
pub async fn list_authors(State(state): State<Arc<AppState>>) -> ApiReply<Vec<AuthorSummary>> {
    match state.store.authors().await {
        Ok(authors) => ok(StatusCode::OK, authors),
        Err(e) => {
            tracing::error!("list_authors: {}", e);
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch authors")
        }
    }
}
