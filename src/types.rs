//! Data structures for normalized readings
//!
//! A `Reading` is the single output unit of every converter. Field order
//! matters: serde emits fields in declaration order, which keeps the
//! `timestamp`, `val` keys sorted alphabetically in the JSON output.

use serde::Serialize;

/// One normalized time-series point
///
/// # Example
///
/// ```
/// # use energy2json::{Reading, ReadingValue};
/// let reading = Reading::new(1704067200, ReadingValue::Decimal("12.34".to_string()));
/// let json = serde_json::to_string(&reading).unwrap();
/// assert_eq!(json, r#"{"timestamp":1704067200,"val":"12.34"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Unix epoch seconds (UTC) of the interval start
    pub timestamp: i64,

    /// Reading value as supplied by the source
    pub val: ReadingValue,
}

impl Reading {
    pub fn new(timestamp: i64, val: ReadingValue) -> Self {
        Self { timestamp, val }
    }
}

/// Value carried by a reading
///
/// - CSV and Nord Pool Spot values are decimal strings after separator
///   normalization (`"12,34"` → `"12.34"`)
/// - Nord Pool prices are passed through as the JSON number the provider sent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Decimal(String),
    Number(serde_json::Number),
}

impl From<String> for ReadingValue {
    fn from(value: String) -> Self {
        ReadingValue::Decimal(value)
    }
}

impl From<serde_json::Number> for ReadingValue {
    fn from(value: serde_json::Number) -> Self {
        ReadingValue::Number(value)
    }
}
