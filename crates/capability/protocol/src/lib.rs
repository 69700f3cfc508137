//! # 协议通信能力模块
//!
//! 提供 UPS 设备的 SNMP 读取能力：
//! - **SNMP v1 / v2c GET**：community 认证的只读批量查询
//! - 报文编解码由 `snmp2` 完成，本模块只负责会话、重传与值映射
//!
//! ## 架构设计
//!
//! ```text
//! CollectionEngine
//!       │
//!       ▼
//! ProtocolClient::open(SnmpConfig)
//!       │
//!       ▼
//! ProtocolSession::get([Oid])  ── 一个 GetRequest / 一个 GetResponse
//!       │
//!       ▼
//! Vec<RawSample>（按响应顺序）
//! ```
//!
//! ## 配置格式
//!
//! ```json
//! { "host": "192.168.1.50", "port": 161, "community": "public",
//!   "version": "1", "timeout_ms": 2000, "retries": 0 }
//! ```

mod client;
mod error;
mod types;

pub use client::{ProtocolClient, ProtocolSession, SnmpClient, SnmpSession};
pub use error::ProtocolError;
pub use types::*;
