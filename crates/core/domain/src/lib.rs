pub mod data;
pub mod oid;

pub use data::{DecodedSample, RawSample, WireValue};
pub use oid::{Oid, OidParseError};

/// 寄存器声明的线上类型（描述符期望值）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    OctetString,
    Integer,
    Gauge,
    TimeTicks,
}

impl WireType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::OctetString => "octet_string",
            WireType::Integer => "integer",
            WireType::Gauge => "gauge",
            WireType::TimeTicks => "time_ticks",
        }
    }
}

/// 单位换算：解码后的原始数值 -> 指标文档单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// 原生单位，不换算。
    Identity,
    /// 十分之一单位（0.1 V / 0.1 A / 0.1 Hz）。
    Tenths,
    /// 十分之一华氏度 -> 摄氏度。
    FahrenheitTenthsToCelsius,
    /// 百分之一秒（TimeTicks）-> 分钟。
    CentisecondsToMinutes,
}

impl Transform {
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            Transform::Identity => raw,
            Transform::Tenths => raw / 10.0,
            Transform::FahrenheitTenthsToCelsius => (raw / 10.0 - 32.0) * 5.0 / 9.0,
            Transform::CentisecondsToMinutes => raw / 6000.0,
        }
    }
}

/// 寄存器描述符：寄存器 ID 与指标元数据的静态绑定。
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterDescriptor {
    pub id: Oid,
    pub metric_name: String,
    pub help: String,
    pub expected_type: WireType,
    pub transform: Transform,
    pub labels: Vec<String>,
}

impl RegisterDescriptor {
    pub fn new(
        id: Oid,
        metric_name: impl Into<String>,
        help: impl Into<String>,
        expected_type: WireType,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            metric_name: metric_name.into(),
            help: help.into(),
            expected_type,
            transform,
            labels: Vec::new(),
        }
    }

    /// 声明标签名（顺序即样本标签值顺序）。
    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|label| label.to_string()).collect();
        self
    }
}
