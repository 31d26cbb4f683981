//! Browser HTTP transport backed by gloo-net

use crate::{ApiConfig, FetchError, HttpResponse, HttpTransport};
use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;

/// `fetch`-based transport for the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, FetchError>> {
        async move {
            let response = Request::get(url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            let status_text = response.status_text();
            let body = if response.ok() {
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::Network(e.to_string()))?
            } else {
                String::new()
            };

            Ok(HttpResponse {
                status,
                status_text,
                body,
            })
        }
        .boxed_local()
    }
}

impl ApiConfig {
    /// Configuration for the page's current `window.location`
    pub fn from_window() -> Self {
        let location = web_sys::window().map(|w| w.location());
        let hostname = location
            .as_ref()
            .and_then(|l| l.hostname().ok())
            .unwrap_or_default();
        let port = location
            .as_ref()
            .and_then(|l| l.port().ok())
            .unwrap_or_default();
        let config = Self::for_location(&hostname, &port);
        tracing::info!("Heatmap API base: {:?}", config.base_url);
        config
    }
}
