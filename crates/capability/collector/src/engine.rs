use domain::{DecodedSample, RawSample, RegisterDescriptor};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace, warn};
use ups_catalog::Catalog;
use ups_protocol::{ProtocolClient, ProtocolError, SnmpConfig};

/// 抓取级错误：本次抓取不产生任何样本。
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("open session: {0}")]
    Session(#[source] ProtocolError),
    #[error("batched read: {0}")]
    Read(#[source] ProtocolError),
}

/// 一次抓取的结果。
#[derive(Debug)]
pub struct ScrapeReport {
    pub samples: Vec<DecodedSample>,
    /// 因解码失败被丢弃的值
    pub dropped: usize,
    pub duration: Duration,
    pub error: Option<ScrapeError>,
}

impl ScrapeReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 采集引擎：目录、协议客户端与会话参数在构造时绑定，之后只读。
pub struct CollectionEngine {
    client: Arc<dyn ProtocolClient>,
    catalog: Arc<Catalog>,
    session: SnmpConfig,
    labels: BTreeMap<String, String>,
}

impl CollectionEngine {
    /// `target` 标签默认取会话目标地址。
    pub fn new(client: Arc<dyn ProtocolClient>, catalog: Arc<Catalog>, session: SnmpConfig) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert("target".to_string(), session.host.clone());
        Self {
            client,
            catalog,
            session,
            labels,
        }
    }

    /// 覆盖或追加一个标签值。
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 静态描述列表，与每次抓取结果无关。
    pub fn describe(&self) -> &[RegisterDescriptor] {
        self.catalog.describe()
    }

    /// 执行一次完整采集。错误不会向外抛出，而是记录在报告中。
    pub async fn collect(&self) -> ScrapeReport {
        let started = Instant::now();
        info!(
            host = %self.session.host,
            catalog = self.catalog.name(),
            registers = self.catalog.len(),
            "scrape started"
        );

        let (samples, dropped, error) = match self.read().await {
            Ok(raw) => {
                let (samples, dropped) = self.decode_all(&raw);
                (samples, dropped, None)
            }
            Err(err) => (Vec::new(), 0, Some(err)),
        };

        let duration = started.elapsed();
        let duration_ms = duration.as_millis() as u64;
        match &error {
            None => info!(
                host = %self.session.host,
                samples = samples.len(),
                dropped,
                duration_ms,
                "scrape finished"
            ),
            Some(err) => error!(
                host = %self.session.host,
                error = %err,
                duration_ms,
                "scrape failed"
            ),
        }

        ups_telemetry::record_scrape(error.is_none(), duration.as_secs_f64());
        ups_telemetry::record_samples(samples.len() as u64);

        ScrapeReport {
            samples,
            dropped,
            duration,
            error,
        }
    }

    /// 打开会话并批量读取；会话打开后无论成败都会关闭。
    async fn read(&self) -> Result<Vec<RawSample>, ScrapeError> {
        let mut session = self
            .client
            .open(&self.session)
            .await
            .map_err(ScrapeError::Session)?;

        let result = session.get(&self.catalog.all_ids()).await;
        session.close();
        result.map_err(ScrapeError::Read)
    }

    fn decode_all(&self, raw: &[RawSample]) -> (Vec<DecodedSample>, usize) {
        let mut samples = Vec::with_capacity(raw.len());
        let mut dropped = 0;

        for sample in raw {
            let Some(descriptor) = self.catalog.lookup(&sample.id) else {
                trace!(oid = %sample.id, "ignoring unknown register");
                continue;
            };

            match ups_normalize::normalize(descriptor, &sample.value) {
                Ok(value) => samples.push(DecodedSample {
                    metric_name: descriptor.metric_name.clone(),
                    value,
                    label_values: self.label_values(descriptor),
                }),
                Err(err) => {
                    dropped += 1;
                    ups_telemetry::record_decode_failure();
                    warn!(
                        metric = %descriptor.metric_name,
                        oid = %sample.id,
                        error = %err,
                        "dropping undecodable value"
                    );
                }
            }
        }

        (samples, dropped)
    }

    fn label_values(&self, descriptor: &RegisterDescriptor) -> Vec<String> {
        descriptor
            .labels
            .iter()
            .map(|name| self.labels.get(name).cloned().unwrap_or_default())
            .collect()
    }
}
