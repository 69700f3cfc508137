use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use ups_telemetry::new_request_ids;

/// 请求上下文中间件：注入 request_id/trace_id，并在请求结束后记录访问日志
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote_addr = remote_addr(&req);
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let started = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| {
        info!(
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            status = response.status().as_u16(),
            duration_ms,
            "request completed"
        );
    });

    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 对端地址；未通过 `into_make_service_with_connect_info` 启动时为 "-"
fn remote_addr(req: &Request<Body>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string())
}
