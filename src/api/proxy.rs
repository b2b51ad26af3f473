use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::fail;
use crate::state::AppState;
use boighor_backend::relay::RelayError;

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// GET /api/proxy?url= - stream an external document with permissive CORS
pub async fn relay_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return fail::<()>(StatusCode::BAD_REQUEST, "Missing URL parameter").into_response();
    };

    let doc = match state.relay.fetch(&url).await {
        Ok(doc) => doc,
        Err(e) => return relay_error(&url, e),
    };

    let mut response = Response::new(Body::from_stream(doc.body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    for (name, value) in &doc.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.append(name, value);
        }
    }
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    let content_type = HeaderValue::from_str(&doc.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    headers.insert(header::CONTENT_TYPE, content_type);

    response
}

fn relay_error(url: &str, error: RelayError) -> Response {
    let (status, message) = match &error {
        RelayError::InvalidUrl(_) | RelayError::UnsupportedScheme(_) => {
            (StatusCode::BAD_REQUEST, format!("Invalid URL: {}", error))
        }
        RelayError::Upstream { status, reason } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            format!("Failed to fetch external resource: {}", reason),
        ),
        RelayError::Transport(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch external resource: {}", e),
        ),
    };
    tracing::error!("Proxy error for {}: {}", url, error);
    fail::<()>(status, &message).into_response()
}
