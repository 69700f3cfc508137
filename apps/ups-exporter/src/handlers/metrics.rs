//! Prometheus 抓取端点。
//!
//! - GET /metrics

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::AppState;

/// 每次请求触发一次采集；采集失败体现在 `ups_scrape_success` 中，仍返回 200。
pub async fn get_metrics(State(state): State<AppState>) -> Response {
    match state.registry.render().await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
