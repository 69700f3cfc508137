//! 路由定义
//!
//! - 指标抓取：/metrics
//! - 存活探针：/health, /livez

use super::AppState;
use super::handlers::*;
use super::middleware::request_context;
use axum::{Router, middleware, routing::get};

/// 创建导出器路由，所有请求经过 request_context 中间件
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/health", get(health))
        .route("/livez", get(livez))
        .with_state(state)
        .layer(middleware::from_fn(request_context))
}
