//! UPS SNMP 导出器：每次 `GET /metrics` 触发一次对 UPS 的批量读取。

mod handlers;
mod middleware;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use ups_catalog::Catalog;
use ups_collector::{CollectionEngine, MetricsRegistry};
use ups_config::AppConfig;
use ups_protocol::SnmpClient;
use ups_telemetry::{init_tracing, install_metrics};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MetricsRegistry>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 先初始化日志，配置错误也能输出
    init_tracing();

    let config = AppConfig::from_env().inspect_err(|err| error!(error = %err, "invalid configuration"))?;
    install_metrics()?;

    let catalog = Arc::new(Catalog::for_kind(config.ups_mib)?);
    let snmp = config.snmp_config();
    info!(
        target_host = %snmp.host,
        port = snmp.port,
        version = snmp.version.as_str(),
        catalog = catalog.name(),
        registers = catalog.len(),
        "ups exporter configured"
    );

    let engine = Arc::new(CollectionEngine::new(
        Arc::new(SnmpClient::new()),
        catalog,
        snmp,
    ));
    let registry = Arc::new(
        MetricsRegistry::new(engine)
            .inspect_err(|err| error!(error = %err, "invalid metric descriptors"))?,
    );
    let app = routes::create_router(AppState { registry });

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .inspect_err(|err| error!(addr = %config.http_addr, error = %err, "bind failed"))?;
    info!(addr = %config.http_addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
