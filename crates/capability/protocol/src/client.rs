//! SNMP 客户端：会话抽象与基于 `snmp2` 的 UDP 实现
//!
//! 一次采集对应一个会话（一个 UDP socket），会话之间不共享。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let config = SnmpConfig::new("192.168.1.50");
//! let mut session = SnmpClient::new().open(&config).await?;
//! let samples = session.get(&ids).await;
//! session.close();
//! ```

use crate::error::ProtocolError;
use crate::types::{SnmpConfig, SnmpVersion, now_epoch_ms};
use async_trait::async_trait;
use domain::{Oid, RawSample, WireValue};
use snmp2::{AsyncSession, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// 无错误
const NO_ERROR: u32 = 0;
/// v1 代理对不存在 OID 的整包错误
const NO_SUCH_NAME: u32 = 2;

/// 协议客户端：为每次采集打开独立会话
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    async fn open(&self, config: &SnmpConfig) -> Result<Box<dyn ProtocolSession>, ProtocolError>;
}

/// 协议会话：一次批量读取，然后关闭
#[async_trait]
pub trait ProtocolSession: Send {
    /// 单次批量 GET，结果按响应顺序返回
    async fn get(&mut self, ids: &[Oid]) -> Result<Vec<RawSample>, ProtocolError>;

    /// 释放会话资源
    fn close(self: Box<Self>);
}

/// 基于 UDP 的 SNMP 客户端
#[derive(Debug, Clone, Default)]
pub struct SnmpClient;

impl SnmpClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProtocolClient for SnmpClient {
    async fn open(&self, config: &SnmpConfig) -> Result<Box<dyn ProtocolSession>, ProtocolError> {
        let session = SnmpSession::connect(config).await?;
        Ok(Box::new(session))
    }
}

/// 单个 SNMP 会话
pub struct SnmpSession {
    inner: AsyncSession,
    peer: SocketAddr,
    version: SnmpVersion,
    timeout: Duration,
    retries: u32,
}

/// 一次响应中与本模块相关的部分（不再借用会话缓冲区）
struct Reply {
    error_status: u32,
    error_index: u32,
    varbinds: Vec<RawSample>,
}

impl SnmpSession {
    /// 解析目标地址并打开 UDP 会话
    pub async fn connect(config: &SnmpConfig) -> Result<Self, ProtocolError> {
        let timeout = config.timeout();
        let peer = resolve(config, timeout).await?;
        let community = config.community.as_bytes();
        let starting_req_id = (now_epoch_ms() & 0x3fff_ffff) as i32;

        let opened = match config.version {
            SnmpVersion::V1 => AsyncSession::new_v1(peer, community, starting_req_id).await,
            SnmpVersion::V2c => AsyncSession::new_v2c(peer, community, starting_req_id).await,
        };
        let inner =
            opened.map_err(|e| ProtocolError::Connection(format!("open {}: {:?}", peer, e)))?;

        debug!(%peer, version = config.version.as_str(), "snmp session opened");

        Ok(Self {
            inner,
            peer,
            version: config.version,
            timeout,
            retries: config.retries,
        })
    }

    /// 发送一次 GET 并等待响应，超时或响应不匹配时重传
    async fn request(&mut self, ids: &[Oid]) -> Result<Reply, ProtocolError> {
        let names = ids
            .iter()
            .map(to_snmp_oid)
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&snmp2::Oid<'static>> = names.iter().collect();

        for attempt in 0..=self.retries {
            match tokio::time::timeout(self.timeout, self.inner.get_many(&refs)).await {
                Ok(Ok(pdu)) => {
                    let error_status = pdu.error_status;
                    let error_index = pdu.error_index;
                    let varbinds = pdu
                        .varbinds
                        .filter_map(|(name, value)| match from_snmp_oid(&name) {
                            Ok(id) => Some(RawSample::new(id, to_wire_value(value))),
                            Err(e) => {
                                warn!(error = %e, "skipping varbind with unusable oid");
                                None
                            }
                        })
                        .collect();
                    return Ok(Reply {
                        error_status,
                        error_index,
                        varbinds,
                    });
                }
                Ok(Err(e)) => {
                    warn!(peer = %self.peer, error = ?e, "discarding snmp response");
                }
                Err(_) => {
                    debug!(peer = %self.peer, attempt = attempt + 1, "snmp request timed out");
                }
            }
        }

        Err(ProtocolError::Timeout(format!(
            "no response from {} after {} attempt(s)",
            self.peer,
            self.retries + 1
        )))
    }
}

#[async_trait]
impl ProtocolSession for SnmpSession {
    async fn get(&mut self, ids: &[Oid]) -> Result<Vec<RawSample>, ProtocolError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pending = ids.to_vec();
        loop {
            let reply = self.request(&pending).await?;
            if reply.error_status == NO_ERROR {
                return Ok(reply.varbinds);
            }

            // v1 代理遇到不存在的 OID 时整包报错，去掉该 OID 后重发
            let index = reply.error_index as usize;
            if reply.error_status == NO_SUCH_NAME
                && self.version == SnmpVersion::V1
                && index >= 1
                && index <= pending.len()
            {
                let removed = pending.remove(index - 1);
                debug!(peer = %self.peer, oid = %removed, "agent reported noSuchName, dropping register");
                if pending.is_empty() {
                    return Ok(Vec::new());
                }
                continue;
            }

            return Err(ProtocolError::Snmp(format!(
                "{} (status {}) at index {}",
                error_status_name(reply.error_status),
                reply.error_status,
                index
            )));
        }
    }

    fn close(self: Box<Self>) {
        debug!(peer = %self.peer, "snmp session closed");
    }
}

async fn resolve(config: &SnmpConfig, timeout: Duration) -> Result<SocketAddr, ProtocolError> {
    let lookup = tokio::net::lookup_host((config.host.as_str(), config.port));
    let mut addrs = tokio::time::timeout(timeout, lookup)
        .await
        .map_err(|_| ProtocolError::Timeout(format!("resolving {}", config.host)))?
        .map_err(|e| ProtocolError::Connection(format!("resolve {}: {}", config.host, e)))?;
    addrs
        .next()
        .ok_or_else(|| ProtocolError::Connection(format!("no address for {}", config.host)))
}

fn to_snmp_oid(oid: &Oid) -> Result<snmp2::Oid<'static>, ProtocolError> {
    let arcs: Vec<u64> = oid.arcs().iter().map(|arc| u64::from(*arc)).collect();
    snmp2::Oid::from(&arcs)
        .map_err(|e| ProtocolError::DataParse(format!("oid {}: {:?}", oid, e)))
}

fn from_snmp_oid(oid: &snmp2::Oid<'_>) -> Result<Oid, ProtocolError> {
    let text = oid.to_id_string();
    text.parse()
        .map_err(|e| ProtocolError::DataParse(format!("oid {}: {}", text, e)))
}

/// 响应值 -> WireValue；无法识别的类型留给解码器按样本丢弃
fn to_wire_value(value: Value<'_>) -> WireValue {
    match value {
        Value::Integer(raw) => WireValue::Integer(raw),
        Value::OctetString(bytes) => WireValue::OctetString(bytes.to_vec()),
        Value::Unsigned32(raw) => WireValue::Gauge(raw),
        Value::Timeticks(raw) => WireValue::TimeTicks(raw),
        Value::Counter32(raw) => WireValue::Counter32(raw),
        Value::Counter64(raw) => WireValue::Counter64(raw),
        Value::IpAddress(octets) => WireValue::IpAddress(octets),
        Value::Opaque(bytes) => WireValue::Opaque(bytes.to_vec()),
        Value::ObjectIdentifier(oid) => match from_snmp_oid(&oid) {
            Ok(oid) => WireValue::ObjectId(oid),
            Err(_) => WireValue::Unsupported(OBJECT_IDENTIFIER_TAG),
        },
        Value::Null => WireValue::Null,
        Value::NoSuchObject => WireValue::NoSuchObject,
        Value::NoSuchInstance => WireValue::NoSuchInstance,
        Value::EndOfMibView => WireValue::EndOfMibView,
        _ => WireValue::Unsupported(0),
    }
}

const OBJECT_IDENTIFIER_TAG: u8 = 0x06;

fn error_status_name(status: u32) -> &'static str {
    match status {
        1 => "tooBig",
        2 => "noSuchName",
        3 => "badValue",
        4 => "readOnly",
        5 => "genErr",
        _ => "error",
    }
}
