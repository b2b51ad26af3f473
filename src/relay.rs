//! Document relay - streams external documents to clients
//!
//! Fetches a remote resource with a single shared client and hands back the
//! body as a stream; the document is never loaded into memory whole.

use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::RelayConfig;

/// Upstream headers never forwarded to the client
const DROPPED_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-type",
    "content-length",
    "access-control-allow-origin",
    "access-control-allow-credentials",
    "access-control-allow-headers",
    "access-control-allow-methods",
    "access-control-expose-headers",
];

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("{reason}")]
    Upstream { status: u16, reason: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// A fetched document, body still in flight
pub struct RelayedDocument {
    /// Upstream headers minus hop-by-hop, content-type and CORS headers
    pub headers: Vec<(String, String)>,
    pub content_type: String,
    pub body: BoxStream<'static, Result<Bytes, std::io::Error>>,
}

impl std::fmt::Debug for RelayedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayedDocument")
            .field("headers", &self.headers)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

pub struct DocumentRelay {
    client: Client,
    default_content_type: String,
}

impl DocumentRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            default_content_type: config.default_content_type.clone(),
        })
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<RelayedDocument, RelayError> {
        let url = Url::parse(raw_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RelayError::UnsupportedScheme(url.scheme().to_string()));
        }

        tracing::debug!("Relay fetch: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Relay upstream returned {} for {}", status, url);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                reason: format!("Request failed with status code {}", status.as_u16()),
            });
        }

        let upstream_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string);
        let content_type = upstream_type.unwrap_or_else(|| self.guess_content_type(&url));

        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !DROPPED_HEADERS.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .boxed();

        Ok(RelayedDocument {
            headers,
            content_type,
            body,
        })
    }

    /// Content type from the URL path, else the configured default
    fn guess_content_type(&self, url: &Url) -> String {
        mime_guess::from_path(url.path())
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| self.default_content_type.clone())
    }
}
