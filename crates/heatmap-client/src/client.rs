//! Heatmap fetcher and load orchestration

use crate::{ApiConfig, FetchError, GlooTransport, HttpTransport};
use heatmap_core::{map_payload, FilterParams, HeatmapPayload, TreemapNode};
use heatmap_state::{AppState, DEFAULT_ERROR};
use leptos::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use wasm_bindgen_futures::spawn_local;

// ============================================================================
// FETCHER
// ============================================================================

/// Client for `GET /api/heatmap-data`
#[derive(Debug, Clone)]
pub struct HeatmapClient<T> {
    config: ApiConfig,
    transport: T,
}

impl HeatmapClient<GlooTransport> {
    /// Browser client configured from `window.location`
    pub fn from_window() -> Self {
        Self::new(ApiConfig::from_window(), GlooTransport)
    }
}

impl<T: HttpTransport> HeatmapClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch heatmap data for the given filters
    pub async fn fetch(&self, params: &FilterParams) -> Result<HeatmapPayload, FetchError> {
        let url = params.url(&self.config.base_url);
        tracing::debug!("GET {}", url);

        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// ============================================================================
// VIEW SINK
// ============================================================================

/// Everything a load is allowed to touch on screen
pub trait HeatmapView {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn render(&self, ticket: u64, nodes: Vec<TreemapNode>, note: Option<String>);
}

impl HeatmapView for AppState {
    fn show_loading(&self) {
        self.set_loading(true);
    }

    fn hide_loading(&self) {
        self.set_loading(false);
    }

    fn show_error(&self, message: &str) {
        self.set_error(message);
    }

    fn hide_error(&self) {
        self.clear_error();
    }

    fn render(&self, ticket: u64, nodes: Vec<TreemapNode>, note: Option<String>) {
        self.heatmap.render(ticket, nodes, note);
    }
}

// ============================================================================
// REQUEST FENCE (Send + Sync)
// ============================================================================

/// Hands out increasing tickets; only the newest ticket may touch the view
#[derive(Debug, Clone, Default)]
pub struct RequestFence {
    latest: Arc<AtomicU64>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding all earlier ones
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

// ============================================================================
// LOADER
// ============================================================================

/// A settled load
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub ticket: u64,
    pub payload: HeatmapPayload,
}

/// Result of [`HeatmapLoader::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Rendered this many nodes
    Rendered(usize),
    /// A newer load was issued before this one settled
    Stale,
}

/// Wraps the fetcher with loading/error handling.
///
/// Each call hides the error and shows the spinner, then on settlement
/// hides the spinner and shows the error message on failure. Calls that
/// were superseded by a newer one leave the view alone when they settle.
#[derive(Clone)]
pub struct HeatmapLoader<T, V> {
    client: HeatmapClient<T>,
    view: V,
    fence: RequestFence,
}

impl<T: HttpTransport, V: HeatmapView> HeatmapLoader<T, V> {
    pub fn new(client: HeatmapClient<T>, view: V) -> Self {
        Self {
            client,
            view,
            fence: RequestFence::new(),
        }
    }

    /// Fetch with spinner and error handling; errors are shown, then returned
    pub async fn load(&self, params: &FilterParams) -> Result<Loaded, FetchError> {
        let ticket = self.fence.issue();
        self.view.hide_error();
        self.view.show_loading();

        let result = self.client.fetch(params).await;

        if !self.fence.is_current(ticket) {
            tracing::debug!(ticket, "load superseded");
            return result.map(|payload| Loaded { ticket, payload });
        }

        self.view.hide_loading();
        match result {
            Ok(payload) => Ok(Loaded { ticket, payload }),
            Err(e) => {
                tracing::warn!("Heatmap load failed: {}", e);
                let message = e.to_string();
                self.view
                    .show_error(if message.is_empty() { DEFAULT_ERROR } else { &message });
                Err(e)
            }
        }
    }

    /// Load, map, and render the result if it is still the newest
    pub async fn refresh(&self, params: &FilterParams) -> Result<RefreshOutcome, FetchError> {
        let Loaded { ticket, payload } = self.load(params).await?;
        if !self.fence.is_current(ticket) {
            return Ok(RefreshOutcome::Stale);
        }

        let nodes = map_payload(&payload);
        let count = nodes.len();
        self.view.render(ticket, nodes, payload.note().map(str::to_string));
        Ok(RefreshOutcome::Rendered(count))
    }
}

impl<T, V> HeatmapLoader<T, V>
where
    T: HttpTransport + Clone + 'static,
    V: HeatmapView + Clone + 'static,
{
    /// Fire-and-forget refresh; failures are already on screen
    pub fn spawn_refresh(&self, params: FilterParams) {
        let loader = self.clone();
        spawn_local(async move {
            if let Err(e) = loader.refresh(&params).await {
                tracing::debug!("refresh for {:?} failed: {}", params, e);
            }
        });
    }
}

// ============================================================================
// LEPTOS INTEGRATION
// ============================================================================

/// Loader used by the dashboard components
pub type AppLoader = HeatmapLoader<GlooTransport, AppState>;

/// Provide a shared loader so every control fences against the same tickets
pub fn provide_heatmap_loader(state: AppState) -> AppLoader {
    let loader = HeatmapLoader::new(HeatmapClient::from_window(), state);
    provide_context(loader.clone());
    loader
}

pub fn use_heatmap_loader() -> AppLoader {
    expect_context::<AppLoader>()
}

// ============================================================================
// TESTS
// ============================================================================
