//! 追踪、请求 ID 与导出器自身指标。

use prometheus::proto::MetricFamily;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 自身指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub scrapes_success: u64,
    pub scrapes_failure: u64,
    pub samples: u64,
    pub decode_failures: u64,
    pub scrape_duration_count: u64,
}

const DURATION_BUCKETS: &[f64] = &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0];

/// 导出器自身指标，进程内只安装一次。
pub struct ExporterMetrics {
    registry: Registry,
    scrapes: IntCounterVec,
    scrape_duration: Histogram,
    samples: IntCounter,
    decode_failures: IntCounter,
}

impl ExporterMetrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let scrapes = IntCounterVec::new(
            Opts::new("ups_exporter_scrapes_total", "Scrapes by outcome."),
            &["result"],
        )?;
        let scrape_duration = Histogram::with_opts(
            HistogramOpts::new(
                "ups_exporter_scrape_duration_seconds",
                "Time spent collecting from the UPS.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
        )?;
        let samples = IntCounter::new("ups_exporter_samples_total", "Samples emitted.")?;
        let decode_failures = IntCounter::new(
            "ups_exporter_decode_failures_total",
            "Values dropped because they could not be decoded.",
        )?;

        registry.register(Box::new(scrapes.clone()))?;
        registry.register(Box::new(scrape_duration.clone()))?;
        registry.register(Box::new(samples.clone()))?;
        registry.register(Box::new(decode_failures.clone()))?;

        Ok(Self {
            registry,
            scrapes,
            scrape_duration,
            samples,
            decode_failures,
        })
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scrapes_success: self.scrapes.with_label_values(&["success"]).get(),
            scrapes_failure: self.scrapes.with_label_values(&["failure"]).get(),
            samples: self.samples.get(),
            decode_failures: self.decode_failures.get(),
            scrape_duration_count: self.scrape_duration.get_sample_count(),
        }
    }
}

static METRICS: OnceLock<ExporterMetrics> = OnceLock::new();

/// 安装全局指标；重复调用返回已安装的实例。
pub fn install_metrics() -> Result<&'static ExporterMetrics, prometheus::Error> {
    if let Some(metrics) = METRICS.get() {
        return Ok(metrics);
    }
    let metrics = ExporterMetrics::new()?;
    Ok(METRICS.get_or_init(|| metrics))
}

/// 获取全局指标实例；未安装时为 None。
pub fn metrics() -> Option<&'static ExporterMetrics> {
    METRICS.get()
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录一次采集结果与耗时（秒）。
pub fn record_scrape(success: bool, duration_seconds: f64) {
    if let Some(metrics) = metrics() {
        let result = if success { "success" } else { "failure" };
        metrics.scrapes.with_label_values(&[result]).inc();
        metrics.scrape_duration.observe(duration_seconds);
    }
}

/// 记录输出的样本数。
pub fn record_samples(count: u64) {
    if let Some(metrics) = metrics() {
        metrics.samples.inc_by(count);
    }
}

/// 记录解码失败次数。
pub fn record_decode_failure() {
    if let Some(metrics) = metrics() {
        metrics.decode_failures.inc();
    }
}

/// 自身指标的指标族，未安装时为空。
pub fn gather() -> Vec<MetricFamily> {
    metrics()
        .map(|metrics| metrics.registry.gather())
        .unwrap_or_default()
}
