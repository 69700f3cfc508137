use crate::engine::CollectionEngine;
use prometheus::core::Desc;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

pub const SCRAPE_SUCCESS_METRIC: &str = "ups_scrape_success";
pub const SCRAPE_DURATION_METRIC: &str = "ups_scrape_duration_seconds";

/// 指标暴露错误。
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("encode error: {0}")]
    Encode(String),
}

/// 把采集结果转换为 Prometheus 指标族。
pub struct MetricsRegistry {
    engine: Arc<CollectionEngine>,
    descs: Vec<Desc>,
}

impl MetricsRegistry {
    /// 启动时为目录中的每个描述符构建 `Desc`，名称或标签非法时直接失败。
    pub fn new(engine: Arc<CollectionEngine>) -> Result<Self, RegistryError> {
        let descs = engine
            .describe()
            .iter()
            .map(|descriptor| {
                Desc::new(
                    descriptor.metric_name.clone(),
                    descriptor.help.clone(),
                    descriptor.labels.clone(),
                    HashMap::new(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { engine, descs })
    }

    pub fn describe(&self) -> &[Desc] {
        &self.descs
    }

    pub fn metric_names(&self) -> Vec<&str> {
        self.descs.iter().map(|desc| desc.fq_name.as_str()).collect()
    }

    /// 执行一次采集，返回本次抓取的指标族与自身指标。
    pub async fn gather(&self) -> Result<Vec<MetricFamily>, RegistryError> {
        let report = self.engine.collect().await;
        let registry = Registry::new();
        let catalog = self.engine.catalog();
        let mut gauges: HashMap<&str, GaugeVec> = HashMap::new();

        for sample in &report.samples {
            let Some(descriptor) = catalog.find_by_name(&sample.metric_name) else {
                warn!(metric = %sample.metric_name, "sample without descriptor");
                continue;
            };

            let gauge = match gauges.get(descriptor.metric_name.as_str()).cloned() {
                Some(gauge) => gauge,
                None => {
                    let labels: Vec<&str> = descriptor.labels.iter().map(String::as_str).collect();
                    let gauge = GaugeVec::new(
                        Opts::new(descriptor.metric_name.clone(), descriptor.help.clone()),
                        &labels,
                    )?;
                    registry.register(Box::new(gauge.clone()))?;
                    gauges.insert(descriptor.metric_name.as_str(), gauge.clone());
                    gauge
                }
            };

            let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
            gauge.get_metric_with_label_values(&values)?.set(sample.value);
        }

        let duration = Gauge::new(
            SCRAPE_DURATION_METRIC,
            "Time the last scrape of the UPS took.",
        )?;
        duration.set(report.duration.as_secs_f64());
        registry.register(Box::new(duration))?;

        let success = Gauge::new(
            SCRAPE_SUCCESS_METRIC,
            "Whether the last scrape of the UPS succeeded.",
        )?;
        success.set(if report.is_success() { 1.0 } else { 0.0 });
        registry.register(Box::new(success))?;

        let mut families = registry.gather();
        families.extend(ups_telemetry::gather());
        Ok(families)
    }

    /// 文本格式暴露。
    pub async fn render(&self) -> Result<String, RegistryError> {
        let families = self.gather().await?;
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| RegistryError::Encode(err.to_string()))
    }
}
