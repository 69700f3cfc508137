//! 应用运行配置加载。

use std::env;
use ups_catalog::CatalogKind;
use ups_protocol::{SnmpConfig, SnmpVersion};

/// 单次读取允许的最大重传次数。
pub const MAX_SNMP_RETRIES: u32 = 3;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub snmp_target: String,
    pub snmp_port: u16,
    pub snmp_community: String,
    pub snmp_version: SnmpVersion,
    pub snmp_timeout_ms: u64,
    pub snmp_retries: u32,
    pub ups_mib: CatalogKind,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（测试时可传入固定表）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reader = Reader { lookup };

        let snmp_target = reader
            .optional("SNMP_TARGET")
            .ok_or_else(|| ConfigError::Missing("SNMP_TARGET".to_string()))?;
        let snmp_port = reader.parse_with_default("SNMP_PORT", 161u16)?;
        let snmp_community = reader
            .optional("SNMP_COMMUNITY")
            .unwrap_or_else(|| "public".to_string());
        let snmp_version = match reader.optional("SNMP_VERSION") {
            Some(value) => value
                .parse::<SnmpVersion>()
                .map_err(|_| ConfigError::Invalid("SNMP_VERSION".to_string(), value))?,
            None => SnmpVersion::V1,
        };
        let snmp_timeout_ms = reader.parse_with_default("SNMP_TIMEOUT_MS", 2000u64)?;
        if snmp_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "SNMP_TIMEOUT_MS".to_string(),
                "0".to_string(),
            ));
        }
        let snmp_retries = reader.parse_with_default("SNMP_RETRIES", 0u32)?;
        if snmp_retries > MAX_SNMP_RETRIES {
            return Err(ConfigError::Invalid(
                "SNMP_RETRIES".to_string(),
                snmp_retries.to_string(),
            ));
        }
        let ups_mib = match reader.optional("UPS_MIB") {
            Some(value) => value
                .parse::<CatalogKind>()
                .map_err(|_| ConfigError::Invalid("UPS_MIB".to_string(), value))?,
            None => CatalogKind::CyberPower,
        };
        let http_addr = reader
            .optional("EXPORTER_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:9100".to_string());

        Ok(Self {
            http_addr,
            snmp_target,
            snmp_port,
            snmp_community,
            snmp_version,
            snmp_timeout_ms,
            snmp_retries,
            ups_mib,
        })
    }

    /// 采集会话配置。
    pub fn snmp_config(&self) -> SnmpConfig {
        SnmpConfig {
            host: self.snmp_target.clone(),
            port: self.snmp_port,
            community: self.snmp_community.clone(),
            version: self.snmp_version,
            timeout_ms: self.snmp_timeout_ms,
            retries: self.snmp_retries,
        }
    }
}

struct Reader<F> {
    lookup: F,
}

impl<F> Reader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// 空字符串视为未设置。
    fn optional(&self, key: &str) -> Option<String> {
        match (self.lookup)(key) {
            Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        }
    }

    fn parse_with_default<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
    {
        let value = match self.optional(key) {
            Some(value) => value,
            None => return Ok(default),
        };
        value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(key.to_string(), value))
    }
}
