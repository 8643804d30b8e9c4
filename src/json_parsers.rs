//! JSON parsers for Nord Pool price data
//!
//! This module provides parsers for the two Nord Pool payload generations:
//! - Day-ahead prices API (version 3 envelope, UTC `deliveryStart`)
//! - Legacy Nord Pool Spot page data (`pageId` 47, local `StartTime`)
//!
//! # Features
//!
//! - **Two-phase decoding**: the envelope is decoded and validated before the
//!   row payload is even deserialized, so an unsupported document is reported
//!   by its envelope fields rather than by whatever shape its rows happen to have
//! - **Single-take extraction**: only the first area price / first column of a
//!   row becomes a reading
//! - **Error handling**: fail-fast validation with the observed field value

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{
    NordPoolSpotConfig, CURRENCY, NORDPOOL_FINAL_STATE, NORDPOOL_SPOT_EMPTY_VALUE,
    NORDPOOL_SPOT_PAGE_ID, NORDPOOL_SPOT_TIMESTAMP_LAYOUT, NORDPOOL_TIMESTAMP_LAYOUT,
    NORDPOOL_VERSION,
};
use crate::error::{ConvertError, ParseError, ValidationError};
use crate::pipeline::{convert, SourceFormat};
use crate::timezone::{parse_utc_timestamp, LocalTimeResolver};
use crate::transformations::normalize_grouped_decimal;
use crate::types::{Reading, ReadingValue};

/// Decoded document: typed envelope plus the raw JSON for the row payload
#[derive(Debug)]
pub struct JsonDocument<E> {
    envelope: E,
    raw: Value,
}

fn decode_document<E>(input: &str, format: &str) -> Result<JsonDocument<E>, ConvertError>
where
    E: for<'de> Deserialize<'de>,
{
    let raw: Value = serde_json::from_str(input)
        .map_err(|e| ConvertError::Decode(format!("Failed to parse {} JSON: {}", format, e)))?;
    let envelope = E::deserialize(&raw)
        .map_err(|e| ConvertError::Decode(format!("Invalid {} envelope: {}", format, e)))?;

    Ok(JsonDocument { envelope, raw })
}

fn decode_payload<P>(raw: Value, format: &str) -> Result<P, ConvertError>
where
    P: for<'de> Deserialize<'de>,
{
    serde_json::from_value(raw)
        .map_err(|e| ConvertError::Decode(format!("Invalid {} payload: {}", format, e)))
}

// ============================================================================
// Nord Pool day-ahead JSON Parser
// ============================================================================

/// Envelope fields checked before extraction
///
/// Checked fields are kept as raw JSON so that a wrongly typed value is
/// reported as a validation failure with the value itself.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NordPoolEnvelope {
    version: Value,
    currency: Value,
    delivery_areas: Vec<Value>,
    area_states: Vec<AreaState>,
}

#[derive(Debug, Deserialize)]
struct AreaState {
    state: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NordPoolPayload {
    multi_area_entries: Vec<MultiAreaEntry>,
}

/// One delivery period
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultiAreaEntry {
    /// Period start in UTC
    /// Example: "2024-01-01T23:00:00Z"
    delivery_start: String,

    /// Price per delivery area, in document order
    /// Example: {"EE": 45.2}
    entry_per_area: Map<String, Value>,
}

/// Nord Pool day-ahead price source format
#[derive(Debug, Clone, Default)]
pub struct NordPool;

impl SourceFormat for NordPool {
    type Document = JsonDocument<NordPoolEnvelope>;
    const NAME: &'static str = "nordpool";

    fn decode(&self, input: String) -> Result<Self::Document, ConvertError> {
        decode_document(&input, "Nord Pool")
    }

    fn validate(&self, document: &Self::Document) -> Result<(), ValidationError> {
        let envelope = &document.envelope;

        // Compared numerically so `3.0` is the same version as `3`
        if envelope.version.as_f64() != Some(NORDPOOL_VERSION as f64) {
            return Err(ValidationError::UnsupportedVersion(envelope.version.to_string()));
        }
        if envelope.delivery_areas.len() != 1 {
            return Err(ValidationError::AreaCount(envelope.delivery_areas.len()));
        }
        if envelope.currency.as_str() != Some(CURRENCY) {
            return Err(ValidationError::Currency(envelope.currency.to_string()));
        }
        let state = envelope
            .area_states
            .first()
            .ok_or(ValidationError::MissingAreaState)?;
        if state.state.as_str() != Some(NORDPOOL_FINAL_STATE) {
            return Err(ValidationError::AreaState(state.state.to_string()));
        }

        Ok(())
    }

    fn extract(&self, document: Self::Document) -> Result<Vec<Reading>, ConvertError> {
        let payload: NordPoolPayload = decode_payload(document.raw, "Nord Pool")?;
        let mut readings = Vec::with_capacity(payload.multi_area_entries.len());

        for entry in payload.multi_area_entries {
            let timestamp = parse_utc_timestamp(&entry.delivery_start, NORDPOOL_TIMESTAMP_LAYOUT)?;

            // Exactly one area was validated; anything beyond the first is dropped
            let mut areas = entry.entry_per_area.into_iter();
            let Some((area, price)) = areas.next() else {
                continue;
            };
            let dropped: Vec<String> = areas.map(|(name, _)| name).collect();
            if !dropped.is_empty() {
                warn!(
                    delivery_start = %entry.delivery_start,
                    kept = %area,
                    ?dropped,
                    "entry carries more than one area price"
                );
            }

            let val = price_value(price).ok_or_else(|| {
                ParseError::InvalidPrice(format!(
                    "area {} at {} is not a number or string",
                    area, entry.delivery_start
                ))
            })?;
            readings.push(Reading::new(timestamp, val));
        }

        Ok(readings)
    }
}

fn price_value(price: Value) -> Option<ReadingValue> {
    match price {
        Value::Number(n) => Some(ReadingValue::Number(n)),
        Value::String(s) => Some(ReadingValue::Decimal(s)),
        _ => None,
    }
}

/// Parse Nord Pool day-ahead JSON response
///
/// # Example
///
/// ```
/// # use energy2json::json_parsers::parse_nordpool_json;
/// let json = r#"{"version":3,"currency":"EUR","deliveryAreas":["EE"],
///   "areaStates":[{"state":"Final"}],
///   "multiAreaEntries":[{"deliveryStart":"2024-01-01T00:00:00Z","entryPerArea":{"EE":45.2}}]}"#;
///
/// let rows = parse_nordpool_json(json).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].timestamp, 1704067200);
/// ```
pub fn parse_nordpool_json(json_content: &str) -> Result<Vec<Reading>, ConvertError> {
    convert(&NordPool, json_content.to_string())
}

// ============================================================================
// Nord Pool Spot legacy JSON Parser
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NordPoolSpotEnvelope {
    currency: Value,
    page_id: Value,
}

#[derive(Debug, Deserialize)]
struct NordPoolSpotPayload {
    data: SpotData,
}

#[derive(Debug, Deserialize)]
struct SpotData {
    #[serde(rename = "Rows")]
    rows: Vec<SpotRow>,
}

/// One table row of the page
#[derive(Debug, Deserialize)]
struct SpotRow {
    /// Subtotal / summary row (min, max, average ...)
    #[serde(rename = "IsExtraRow")]
    is_extra_row: bool,

    /// Local start time without zone
    /// Example: "2023-10-29T02:00:00"
    #[serde(rename = "StartTime", default)]
    start_time: Option<String>,

    #[serde(rename = "Columns", default)]
    columns: Vec<SpotColumn>,
}

#[derive(Debug, Deserialize)]
struct SpotColumn {
    /// Price text, "-" when there is no price
    /// Example: "1 234,56"
    #[serde(rename = "Value")]
    value: String,
}

/// Nord Pool Spot legacy page source format
#[derive(Debug, Clone, Default)]
pub struct NordPoolSpot {
    config: NordPoolSpotConfig,
}

impl NordPoolSpot {
    pub fn new(config: NordPoolSpotConfig) -> Self {
        Self { config }
    }
}

impl SourceFormat for NordPoolSpot {
    type Document = JsonDocument<NordPoolSpotEnvelope>;
    const NAME: &'static str = "nordpoolspot";

    fn decode(&self, input: String) -> Result<Self::Document, ConvertError> {
        decode_document(&input, "Nord Pool Spot")
    }

    fn validate(&self, document: &Self::Document) -> Result<(), ValidationError> {
        let envelope = &document.envelope;

        if envelope.currency.as_str() != Some(CURRENCY) {
            return Err(ValidationError::Currency(envelope.currency.to_string()));
        }
        if envelope.page_id.as_i64() != Some(NORDPOOL_SPOT_PAGE_ID) {
            return Err(ValidationError::PageId(envelope.page_id.to_string()));
        }

        Ok(())
    }

    fn extract(&self, document: Self::Document) -> Result<Vec<Reading>, ConvertError> {
        let payload: NordPoolSpotPayload = decode_payload(document.raw, "Nord Pool Spot")?;
        let mut resolver =
            LocalTimeResolver::new(NORDPOOL_SPOT_TIMESTAMP_LAYOUT, self.config.timezone);
        let mut readings = Vec::new();
        let mut extra_rows = 0usize;

        for row in payload.data.rows {
            // Extra rows never reach the cursor
            if row.is_extra_row {
                extra_rows += 1;
                continue;
            }

            let start_time = row
                .start_time
                .ok_or_else(|| ParseError::MissingColumn("StartTime".to_string()))?;
            let timestamp = resolver.resolve(&start_time)?;

            // Only the first column is looked at, a leading "-" means no price
            match row.columns.first() {
                Some(column) if column.value != NORDPOOL_SPOT_EMPTY_VALUE => {
                    readings.push(Reading::new(
                        timestamp,
                        ReadingValue::Decimal(normalize_grouped_decimal(&column.value)),
                    ));
                }
                _ => {}
            }
        }

        debug!(
            timezone = resolver.timezone().name(),
            extra_rows, "spot rows parsed"
        );
        Ok(readings)
    }
}

/// Parse legacy Nord Pool Spot page JSON
///
/// # Example
///
/// ```
/// # use energy2json::config::NordPoolSpotConfig;
/// # use energy2json::json_parsers::parse_nordpool_spot_json;
/// let json = r#"{"currency":"EUR","pageId":47,"data":{"Rows":[
///   {"IsExtraRow":false,"StartTime":"2024-01-01T00:00:00","Columns":[{"Value":"1 234,5"}]},
///   {"IsExtraRow":true,"StartTime":"2024-01-01T00:00:00","Columns":[{"Value":"9,9"}]}
/// ]}}"#;
///
/// let rows = parse_nordpool_spot_json(json, &NordPoolSpotConfig::default()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].timestamp, 1704063600);
/// ```
pub fn parse_nordpool_spot_json(
    json_content: &str,
    config: &NordPoolSpotConfig,
) -> Result<Vec<Reading>, ConvertError> {
    convert(&NordPoolSpot::new(config.clone()), json_content.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
