//! HTTP routes for the mock heatmap API

use std::path::Path;

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use heatmap_core::{parse_trade_date, DATE_FORMAT, HEATMAP_PATH};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::mock::{self, Category, Quote};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidParam(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Server error")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParam(_) => "INVALID_PARAM",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParam(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal) {
            tracing::error!("{}: {}", self.code(), self);
        } else {
            tracing::warn!("{}: {}", self.code(), self);
        }
        let body = json!({ "error": { "code": self.code(), "message": self.to_string() } });
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HeatmapQuery {
    pub index: Option<String>,
    pub sector: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    /// Forces a 500 so clients can exercise their error path
    pub force_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub index: String,
    pub sector: Option<String>,
    pub date: String,
    pub note: String,
    pub data: Vec<Quote>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn heatmap_data(Query(query): Query<HeatmapQuery>) -> Result<Json<HeatmapResponse>, ApiError> {
    if non_empty(query.force_error).is_some() {
        return Err(ApiError::Internal);
    }

    let index = non_empty(query.index)
        .ok_or_else(|| ApiError::InvalidParam("Missing required parameter: index".into()))?
        .to_ascii_uppercase();

    let date = match non_empty(query.date) {
        Some(raw) => parse_trade_date(&raw).ok_or_else(|| {
            ApiError::InvalidParam(format!("Invalid date '{}': expected YYYY-MM-DD", raw))
        })?,
        None => Local::now().date_naive(),
    };

    let sector = non_empty(query.sector).map(|s| s.to_ascii_uppercase());
    let category = Category::parse(query.category.as_deref());

    let data = mock::snapshot(&index, sector.as_deref(), category, date)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown index: {}", index)))?;

    let note = if data.is_empty() {
        format!(
            "No data available for {} / {}",
            index,
            sector.as_deref().unwrap_or("ALL")
        )
    } else {
        "Mock data".to_string()
    };

    tracing::info!(%index, ?sector, ?category, %date, rows = data.len(), "heatmap-data");

    Ok(Json(HeatmapResponse {
        index,
        sector,
        date: date.format(DATE_FORMAT).to_string(),
        note,
        data,
    }))
}

/// API router; serves `static_dir` for everything else when given
pub fn router(static_dir: Option<&Path>) -> Router {
    let api = Router::new().route(HEATMAP_PATH, get(heatmap_data));

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => api,
    };

    app.layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use heatmap_core::{map_payload, HeatmapPayload};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router(None).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_error(body: &Value, code: &str) {
        assert_eq!(body["error"]["code"], code);
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let (status, body) = get_json("/api/heatmap-data?index=NIFTY50").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index"], "NIFTY50");
        assert!(body["date"].is_string());
        assert!(body["note"].is_string());

        let data = body["data"].as_array().unwrap();
        assert!(!data.is_empty());
        for item in data {
            assert!(item["symbol"].is_string());
            assert!(item["name"].is_string());
            assert!(item["price"].is_f64());
            assert!(item["change"].is_number());
            assert!(item["volume"].is_u64());
        }
    }

    #[tokio::test]
    async fn test_sector_filter() {
        let (status, body) = get_json("/api/heatmap-data?index=NIFTY50&sector=FINANCE").await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert!(!data.is_empty());
        assert!(data.iter().all(|item| item["sector"] == "FINANCE"));
    }

    #[tokio::test]
    async fn test_unknown_sector_is_empty_with_note() {
        let (status, body) = get_json("/api/heatmap-data?index=NIFTY50&sector=INVALID").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert!(body["note"].as_str().unwrap().contains("No data available"));
    }

    #[tokio::test]
    async fn test_missing_index() {
        let (status, body) = get_json("/api/heatmap-data?sector=FINANCE").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "INVALID_PARAM");
        assert!(body["error"]["message"].as_str().unwrap().contains("index"));

        let (status, body) = get_json("/api/heatmap-data?index=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "INVALID_PARAM");

        let (status, _) = get_json("/api/heatmap-data").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_index() {
        let (status, body) = get_json("/api/heatmap-data?index=UNKNOWNINDEX").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_date() {
        let (status, body) = get_json("/api/heatmap-data?index=NIFTY50&date=not-a-date").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "INVALID_PARAM");
        assert!(body["error"]["message"].as_str().unwrap().contains("date"));
    }

    #[tokio::test]
    async fn test_dates_are_echoed_and_deterministic() {
        let uri = "/api/heatmap-data?index=NIFTYBANK&date=2024-04-01";
        let (_, first) = get_json(uri).await;
        let (_, second) = get_json(uri).await;
        assert_eq!(first["date"], "2024-04-01");
        assert_eq!(first, second);

        let (status, future) = get_json("/api/heatmap-data?index=NIFTY50&date=2100-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(future["data"].is_array());
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (_, all) = get_json("/api/heatmap-data?index=NIFTY50&date=2024-04-01").await;
        let (_, large) =
            get_json("/api/heatmap-data?index=NIFTY50&category=LARGE_CAP&date=2024-04-01").await;
        let (_, invalid) =
            get_json("/api/heatmap-data?index=NIFTY50&category=INVALID&date=2024-04-01").await;

        let count = |v: &Value| v["data"].as_array().unwrap().len();
        assert!(count(&large) <= count(&all));
        assert_eq!(count(&invalid), count(&all));
        assert!(large["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|q| q["market_cap"].as_f64().unwrap() >= mock::LARGE_CAP_MIN));
    }

    #[tokio::test]
    async fn test_forced_internal_error() {
        let (status, body) = get_json("/api/heatmap-data?index=NIFTY50&force_error=1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_error(&body, "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "Server error");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/heatmap-data")
            .header(header::ORIGIN, "http://localhost")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = router(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_response_maps_to_treemap_nodes() {
        let request = Request::builder()
            .uri("/api/heatmap-data?index=NIFTYIT&date=2024-04-01")
            .body(Body::empty())
            .unwrap();
        let (_, bytes) = send(request).await;

        let payload: HeatmapPayload = serde_json::from_slice(&bytes).unwrap();
        let nodes = map_payload(&payload);
        assert_eq!(nodes.len(), payload.records().len());
        assert!(nodes.iter().all(|n| n.value > 0.0 && n.sector.as_deref() == Some("IT")));
        assert_eq!(payload.note(), Some("Mock data"));
    }
}
