//! 层级寄存器标识（OID）。

use std::fmt;
use std::str::FromStr;

/// OID 解析错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidParseError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for OidParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid oid {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for OidParseError {}

/// 对象标识符，文本形式为带前导点的点分数字（`.1.3.6.1...`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn from_arcs(arcs: impl Into<Vec<u32>>) -> Self {
        Self(arcs.into())
    }

    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(OidParseError {
                input: s.to_string(),
                reason: "empty",
            });
        }

        let mut arcs = Vec::new();
        for part in body.split('.') {
            let arc = part.parse::<u32>().map_err(|_| OidParseError {
                input: s.to_string(),
                reason: "arc is not an unsigned 32-bit number",
            })?;
            arcs.push(arc);
        }

        // BER 编码要求至少两段，且首段为 0/1/2。
        if arcs.len() < 2 {
            return Err(OidParseError {
                input: s.to_string(),
                reason: "needs at least two arcs",
            });
        }
        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] > 39) {
            return Err(OidParseError {
                input: s.to_string(),
                reason: "first two arcs out of range",
            });
        }

        Ok(Self(arcs))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arc in &self.0 {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}
