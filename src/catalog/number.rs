use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A numeric field exactly as the server sent it.
///
/// The recommendation service is not strict about numbers: prices arrive as
/// decimal strings ("399.00"), scores as floats, and older records may carry
/// `null` or garbage. The original JSON value is kept so it can be written
/// back out untouched; `as_f64` gives the numeric reading when there is one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LenientNumber(pub Value);

impl LenientNumber {
    /// Numeric value, if the field holds a finite number or a numeric string
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// Value used for ordering: anything non-numeric counts as 0
    pub fn sort_key(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }
}

impl From<f64> for LenientNumber {
    fn from(v: f64) -> Self {
        Self(
            serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        )
    }
}

/// Sort key for an optional field (missing counts as 0)
pub fn sort_key(value: Option<&LenientNumber>) -> f64 {
    value.map(LenientNumber::sort_key).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_value() {
        let n = LenientNumber(json!(7.25));
        assert_eq!(n.as_f64(), Some(7.25));
    }

    #[test]
    fn test_numeric_string() {
        let n = LenientNumber(json!("399.00"));
        assert_eq!(n.as_f64(), Some(399.0));
    }

    #[test]
    fn test_garbage_sorts_as_zero() {
        assert_eq!(LenientNumber(json!("n/a")).sort_key(), 0.0);
        assert_eq!(LenientNumber(json!(null)).sort_key(), 0.0);
        assert_eq!(LenientNumber(json!([1, 2])).sort_key(), 0.0);
        assert_eq!(sort_key(None), 0.0);
    }

    #[test]
    fn test_original_value_preserved_on_serialize() {
        let n: LenientNumber = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_from_nan_is_null() {
        assert_eq!(LenientNumber::from(f64::NAN).0, Value::Null);
    }
}
