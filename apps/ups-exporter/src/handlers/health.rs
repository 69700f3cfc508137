//! 存活探针
//!
//! - `GET /health`
//! - `GET /livez`
//!
//! 只反映进程存活，不访问 UPS。

use axum::{Json, response::IntoResponse};

pub async fn health() -> impl IntoResponse {
    livez().await
}

pub async fn livez() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
