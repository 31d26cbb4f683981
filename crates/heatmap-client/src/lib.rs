//! # heatmap-client
//!
//! HTTP data access for the heatmap: endpoint configuration, the fetcher,
//! the load orchestrator that drives loading/error state, and the debouncer
//! used by filter controls.
//! Uses Strategy pattern for the HTTP transport and the timer scheduler.

pub mod client;
pub mod debounce;
pub mod transport;

pub use client::*;
pub use debounce::*;
pub use transport::*;

use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Backend origin used when the frontend runs on the local dev server
pub const DEV_API_ORIGIN: &str = "http://localhost:8080";

/// Port of the local frontend dev server
pub const DEV_FRONTEND_PORT: &str = "3000";

// ============================================================================
// ERRORS
// ============================================================================

/// Failure of a heatmap data request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP response
    #[error("API error: {status} {status_text}")]
    Http { status: u16, status_text: String },
    /// Transport failure, message passed through unchanged
    #[error("{0}")]
    Network(String),
    /// Response body was not valid JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// STRATEGY PATTERN: HTTP Transport
// ============================================================================

/// Raw HTTP response as seen by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn error(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    /// The fetch API's `ok` flag: status in 200..=299
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Strategy trait for issuing GET requests
pub trait HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, FetchError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Rc<T> {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, FetchError>> {
        (**self).get(url)
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// Heatmap API endpoint configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin prefixed to the API path; empty means same-origin
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Same-origin requests
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Pick the base URL for a page served from `hostname:port`: the dev
    /// backend when on the local dev server, same-origin otherwise
    pub fn for_location(hostname: &str, port: &str) -> Self {
        let local = hostname == "localhost" || hostname == "127.0.0.1";
        if local && port == DEV_FRONTEND_PORT {
            Self::new(DEV_API_ORIGIN)
        } else {
            Self::same_origin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_selection() {
        assert_eq!(ApiConfig::for_location("localhost", "3000").base_url, DEV_API_ORIGIN);
        assert_eq!(ApiConfig::for_location("127.0.0.1", "3000").base_url, DEV_API_ORIGIN);
        assert_eq!(ApiConfig::for_location("localhost", "8080").base_url, "");
        assert_eq!(ApiConfig::for_location("heatmap.example.com", "3000").base_url, "");
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Http {
            status: 400,
            status_text: "Bad Request".into(),
        };
        assert_eq!(err.to_string(), "API error: 400 Bad Request");
        assert_eq!(err.status(), Some(400));
        assert_eq!(FetchError::Network("Failed to fetch".into()).to_string(), "Failed to fetch");
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::ok_json("[]").is_success());
        assert!(!HttpResponse::error(404, "Not Found").is_success());
        assert!(!HttpResponse::error(302, "Found").is_success());
    }
}
