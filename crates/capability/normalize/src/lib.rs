use domain::{RegisterDescriptor, WireValue};
use tracing::debug;

/// 解码错误（样本级，只丢弃当前样本）。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("unsupported wire type: {0}")]
    UnsupportedType(&'static str),
    #[error("invalid numeric text: {0}")]
    InvalidText(String),
}

/// 线上值 -> f64，不做单位换算。
pub fn decode(value: &WireValue) -> Result<f64, NormalizeError> {
    match value {
        WireValue::OctetString(bytes) => parse_text(bytes),
        WireValue::Integer(raw) => Ok(*raw as f64),
        WireValue::Gauge(raw) => Ok(*raw as f64),
        WireValue::TimeTicks(raw) => Ok(*raw as f64),
        other => Err(NormalizeError::UnsupportedType(other.type_name())),
    }
}

/// 解码后应用描述符的单位换算（恰好一次）。
pub fn normalize(
    descriptor: &RegisterDescriptor,
    value: &WireValue,
) -> Result<f64, NormalizeError> {
    let raw = decode(value)?;

    if let Some(actual) = value.wire_type() {
        if actual != descriptor.expected_type {
            debug!(
                metric = %descriptor.metric_name,
                expected = descriptor.expected_type.as_str(),
                actual = actual.as_str(),
                "wire type differs from descriptor"
            );
        }
    }

    Ok(descriptor.transform.apply(raw))
}

fn parse_text(bytes: &[u8]) -> Result<f64, NormalizeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| NormalizeError::InvalidText(err.to_string()))?;
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| NormalizeError::InvalidText(trimmed.to_string()))?;
    // "NaN"/"inf" 不是设备读数。
    if !value.is_finite() {
        return Err(NormalizeError::InvalidText(trimmed.to_string()));
    }
    Ok(value)
}
