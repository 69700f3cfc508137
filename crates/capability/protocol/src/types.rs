//! 协议相关类型定义

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// SNMP 协议版本（只支持 community 认证）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[default]
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2c")]
    V2c,
}

impl SnmpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnmpVersion::V1 => "1",
            SnmpVersion::V2c => "2c",
        }
    }
}

impl FromStr for SnmpVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(SnmpVersion::V1),
            "2c" | "v2c" => Ok(SnmpVersion::V2c),
            other => Err(ProtocolError::ConfigParse(format!(
                "unsupported snmp version: {}",
                other
            ))),
        }
    }
}

/// SNMP 会话配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpConfig {
    /// 目标设备地址
    pub host: String,
    /// 目标端口（默认 161）
    #[serde(default = "default_snmp_port")]
    pub port: u16,
    /// community 共享口令
    #[serde(default = "default_community")]
    pub community: String,
    /// 协议版本
    #[serde(default)]
    pub version: SnmpVersion,
    /// 单次请求超时（毫秒）
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// 超时后的重传次数
    #[serde(default)]
    pub retries: u32,
}

fn default_snmp_port() -> u16 {
    161
}

fn default_community() -> String {
    "public".to_string()
}

fn default_timeout() -> u64 {
    2000
}

impl SnmpConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_snmp_port(),
            community: default_community(),
            version: SnmpVersion::default(),
            timeout_ms: default_timeout(),
            retries: 0,
        }
    }

    /// 从 JSON 配置字符串解析
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(|e| ProtocolError::ConfigParse(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 获取当前时间戳（毫秒）
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
