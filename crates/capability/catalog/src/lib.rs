//! # 寄存器目录
//!
//! 寄存器 ID -> 指标描述符的唯一数据源。每个设备家族一张静态表：
//!
//! - [`CatalogKind::CyberPower`]：厂商私有树 `.1.3.6.1.4.1.3808`
//! - [`CatalogKind::Rfc1628`]：标准 UPS-MIB 树 `.1.3.6.1.2.1.33`
//!
//! 批量读取的 OID 列表（[`Catalog::all_ids`]）与静态描述列表
//! （[`Catalog::describe`]）都从同一个有序向量派生。

mod cyberpower;
mod rfc1628;

use domain::{Oid, RegisterDescriptor, Transform, WireType};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::str::FromStr;

/// 目录内所有描述符声明的标签。
pub const TARGET_LABELS: &[&str] = &["target"];

/// 目录构建错误。
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid register id: {0}")]
    InvalidOid(#[from] domain::OidParseError),
    #[error("duplicate register id {0} in catalog {1}")]
    DuplicateId(String, String),
    #[error("duplicate metric name {0} in catalog {1}")]
    DuplicateMetric(String, String),
    #[error("catalog {0} is empty")]
    Empty(String),
    #[error("unknown catalog: {0}")]
    UnknownKind(String),
}

/// 静态表中的一行。
#[derive(Debug, Clone, Copy)]
pub(crate) struct RegisterSpec {
    pub oid: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub expected: WireType,
    pub transform: Transform,
}

impl RegisterSpec {
    fn build(&self) -> Result<RegisterDescriptor, CatalogError> {
        let id = self.oid.parse::<Oid>()?;
        Ok(
            RegisterDescriptor::new(id, self.name, self.help, self.expected, self.transform)
                .with_labels(TARGET_LABELS),
        )
    }
}

/// 设备家族。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    CyberPower,
    Rfc1628,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::CyberPower => "cyberpower",
            CatalogKind::Rfc1628 => "rfc1628",
        }
    }

    fn specs(&self) -> &'static [RegisterSpec] {
        match self {
            CatalogKind::CyberPower => cyberpower::REGISTERS,
            CatalogKind::Rfc1628 => rfc1628::REGISTERS,
        }
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cyberpower" | "vendor" => Ok(CatalogKind::CyberPower),
            "rfc1628" | "standard" | "ups-mib" => Ok(CatalogKind::Rfc1628),
            _ => Err(CatalogError::UnknownKind(s.to_string())),
        }
    }
}

/// 有序、不可变的寄存器目录。
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    descriptors: Vec<RegisterDescriptor>,
    by_id: HashMap<Oid, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// 校验并构建目录：ID 与指标名在目录内均不可重复。
    pub fn new(
        name: impl Into<String>,
        descriptors: Vec<RegisterDescriptor>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if descriptors.is_empty() {
            return Err(CatalogError::Empty(name));
        }

        let mut by_id = HashMap::with_capacity(descriptors.len());
        let mut by_name = HashMap::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            match by_id.entry(descriptor.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateId(
                        descriptor.id.to_string(),
                        name,
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
            match by_name.entry(descriptor.metric_name.clone()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateMetric(
                        descriptor.metric_name.clone(),
                        name,
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }

        Ok(Self {
            name,
            descriptors,
            by_id,
            by_name,
        })
    }

    /// 按设备家族构建内置目录。
    pub fn for_kind(kind: CatalogKind) -> Result<Self, CatalogError> {
        let descriptors = kind
            .specs()
            .iter()
            .map(RegisterSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kind.as_str(), descriptors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, id: &Oid) -> Option<&RegisterDescriptor> {
        self.by_id.get(id).map(|index| &self.descriptors[*index])
    }

    pub fn find_by_name(&self, metric_name: &str) -> Option<&RegisterDescriptor> {
        self.by_name
            .get(metric_name)
            .map(|index| &self.descriptors[*index])
    }

    /// 批量读取顺序的全部寄存器 ID。
    pub fn all_ids(&self) -> Vec<Oid> {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.id.clone())
            .collect()
    }

    pub fn describe(&self) -> &[RegisterDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
