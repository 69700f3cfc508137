use crate::{Oid, WireType};

/// 协议层返回的带类型标签的值。
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    OctetString(Vec<u8>),
    Integer(i64),
    /// Gauge32 / Unsigned32。
    Gauge(u32),
    /// 百分之一秒。
    TimeTicks(u32),
    Counter32(u32),
    Counter64(u64),
    IpAddress([u8; 4]),
    ObjectId(Oid),
    Opaque(Vec<u8>),
    Null,
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    /// 未识别的 BER 标签。
    Unsupported(u8),
}

impl WireValue {
    /// 可解码的线上类型；其它类型返回 None。
    pub fn wire_type(&self) -> Option<WireType> {
        match self {
            WireValue::OctetString(_) => Some(WireType::OctetString),
            WireValue::Integer(_) => Some(WireType::Integer),
            WireValue::Gauge(_) => Some(WireType::Gauge),
            WireValue::TimeTicks(_) => Some(WireType::TimeTicks),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::OctetString(_) => "octet_string",
            WireValue::Integer(_) => "integer",
            WireValue::Gauge(_) => "gauge",
            WireValue::TimeTicks(_) => "time_ticks",
            WireValue::Counter32(_) => "counter32",
            WireValue::Counter64(_) => "counter64",
            WireValue::IpAddress(_) => "ip_address",
            WireValue::ObjectId(_) => "object_id",
            WireValue::Opaque(_) => "opaque",
            WireValue::Null => "null",
            WireValue::NoSuchObject => "no_such_object",
            WireValue::NoSuchInstance => "no_such_instance",
            WireValue::EndOfMibView => "end_of_mib_view",
            WireValue::Unsupported(_) => "unsupported",
        }
    }
}

/// 单次采集中协议层返回的一条原始结果。
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub id: Oid,
    pub value: WireValue,
}

impl RawSample {
    pub fn new(id: Oid, value: WireValue) -> Self {
        Self { id, value }
    }
}

/// 解码并换算后的指标样本。
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSample {
    pub metric_name: String,
    pub value: f64,
    pub label_values: Vec<String>,
}
