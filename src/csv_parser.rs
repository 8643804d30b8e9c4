//! CSV parser for Elering metering exports
//!
//! Converts the consumption CSV downloaded from the Elering data hub into
//! `Reading`s.
//!
//! # CSV Format
//!
//! - **Delimiter:** Semicolon (`;`)
//! - **Encoding:** UTF-8
//! - **Decimal Separator:** Comma (`,`)
//! - **Metadata Header:** First 5 lines, skipped whatever they contain
//!   (blank lines included)
//! - **Field 1:** Interval start, local time (`dd.mm.yyyy HH:MM`, Europe/Tallinn)
//! - **Field 2:** Consumption value, empty when not (yet) metered
//!
//! # Examples
//!
//! ```rust
//! use energy2json::config::EleringConfig;
//! use energy2json::csv_parser::parse_elering_csv;
//!
//! let csv = "Metering point;EE0000000000000000\n\
//! Period;01.01.2024 - 01.01.2024\n\
//! Type;Consumption\n\
//! Unit;kWh\n\
//! Start;Amount\n\
//! 01.01.2024 00:00;0,512\n\
//! 01.01.2024 01:00;0,480";
//!
//! let rows = parse_elering_csv(csv, &EleringConfig::default()).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].timestamp, 1704060000);
//! ```

use std::io::Cursor;

use csv::ReaderBuilder;
use tracing::debug;

use crate::config::{EleringConfig, ELERING_DELIMITER, ELERING_TIMESTAMP_LAYOUT};
use crate::csv_utils::get_field;
use crate::error::{ConvertError, ParseError, ValidationError};
use crate::pipeline::{convert, SourceFormat};
use crate::timezone::LocalTimeResolver;
use crate::transformations::normalize_decimal_comma;
use crate::types::{Reading, ReadingValue};

const TIMESTAMP_FIELD: usize = 0;
const VALUE_FIELD: usize = 1;

/// Elering metering CSV source format
#[derive(Debug, Clone, Default)]
pub struct EleringCsv {
    config: EleringConfig,
}

impl EleringCsv {
    pub fn new(config: EleringConfig) -> Self {
        Self { config }
    }
}

impl SourceFormat for EleringCsv {
    type Document = csv::Reader<Cursor<String>>;
    const NAME: &'static str = "elering";

    fn decode(&self, input: String) -> Result<Self::Document, ConvertError> {
        // Records are pulled lazily during extraction
        Ok(ReaderBuilder::new()
            .delimiter(ELERING_DELIMITER)
            .has_headers(false)
            .flexible(true) // Metadata records have their own field counts
            .from_reader(Cursor::new(input)))
    }

    fn validate(&self, _document: &Self::Document) -> Result<(), ValidationError> {
        // The metadata block is not interpreted, there is no envelope to check
        Ok(())
    }

    fn extract(&self, mut document: Self::Document) -> Result<Vec<Reading>, ConvertError> {
        let mut resolver = LocalTimeResolver::new(ELERING_TIMESTAMP_LAYOUT, self.config.timezone);
        let mut readings = Vec::new();
        let mut empty_rows = 0usize;

        let header_lines = self.config.header_rows as u64;

        for result in document.records() {
            let record =
                result.map_err(|e| ParseError::CsvFormat(format!("CSV parse error: {}", e)))?;

            // The reader drops blank lines, so the header is counted in
            // physical lines rather than records
            let line = record.position().map_or(u64::MAX, |pos| pos.line());
            if line <= header_lines {
                continue;
            }

            // Unmetered intervals are skipped before they can touch the cursor
            let value = get_field(&record, VALUE_FIELD, "value")?;
            if value.is_empty() {
                empty_rows += 1;
                continue;
            }

            let start = get_field(&record, TIMESTAMP_FIELD, "start time")?;
            let timestamp = resolver.resolve(start)?;

            readings.push(Reading::new(
                timestamp,
                ReadingValue::Decimal(normalize_decimal_comma(value)),
            ));
        }

        debug!(
            timezone = resolver.timezone().name(),
            empty_rows, "metering rows parsed"
        );
        Ok(readings)
    }
}

/// Parse an Elering metering CSV into readings
///
/// # Arguments
///
/// * `csv_content` - Raw CSV text
/// * `config` - Timezone and header size
///
/// # Returns
///
/// * `Ok(Vec<Reading>)` - Readings in row order
/// * `Err(ConvertError)` - Malformed CSV, short record or bad timestamp
pub fn parse_elering_csv(
    csv_content: &str,
    config: &EleringConfig,
) -> Result<Vec<Reading>, ConvertError> {
    convert(&EleringCsv::new(config.clone()), csv_content.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Mõõtepunkt;EE0000000000000000
Periood;28.10.2023 - 29.10.2023
Tarbimine;kWh
Tüüp;Tunnipõhine
Perioodi algus;Kogus (kWh)
";

    fn parse(body: &str) -> Result<Vec<Reading>, ConvertError> {
        parse_elering_csv(&format!("{}{}", HEADER, body), &EleringConfig::default())
    }

    fn decimal(value: &str) -> ReadingValue {
        ReadingValue::Decimal(value.to_string())
    }

    #[test]
    fn test_parse_elering_csv_valid() {
        let rows = parse("15.01.2024 00:00;12,34\n15.01.2024 01:00;0,5\n").unwrap();

        assert_eq!(
            rows,
            vec![
                Reading::new(1705269600, decimal("12.34")),
                Reading::new(1705273200, decimal("0.5")),
            ]
        );
    }

    #[test]
    fn test_parse_elering_csv_keeps_row_order() {
        // Rows out of chronological order stay as given
        let rows = parse("15.01.2024 02:00;3\n15.01.2024 00:00;1\n15.01.2024 01:00;2\n").unwrap();

        let values: Vec<_> = rows.iter().map(|r| r.val.clone()).collect();
        assert_eq!(values, vec![decimal("3"), decimal("1"), decimal("2")]);
        assert!(rows[0].timestamp > rows[1].timestamp);
    }

    #[test]
    fn test_parse_elering_csv_header_skipped_unconditionally() {
        // Header records that look like data are still skipped
        let csv = "01.01.2024 00:00;1
01.01.2024 01:00;2
01.01.2024 02:00;3
01.01.2024 03:00;4
01.01.2024 04:00;5
01.01.2024 05:00;6";

        let rows = parse_elering_csv(csv, &EleringConfig::default()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].val, decimal("6"));
    }

    #[test]
    fn test_parse_elering_csv_blank_line_in_header() {
        // The blank line is one of the five header lines
        let csv = "Meta1;x\n\nMeta3;x\nMeta4;x\nStart;Amount\n\
01.01.2024 00:00;1\n01.01.2024 01:00;2\n";

        let rows = parse_elering_csv(csv, &EleringConfig::default()).unwrap();

        assert_eq!(
            rows,
            vec![
                Reading::new(1704060000, decimal("1")),
                Reading::new(1704063600, decimal("2")),
            ]
        );
    }

    #[test]
    fn test_parse_elering_csv_blank_data_lines_skipped() {
        // Blank lines after the header carry no reading and are dropped
        let rows = parse("\n15.01.2024 00:00;1\n\n15.01.2024 01:00;2\n\n").unwrap();

        assert_eq!(
            rows,
            vec![
                Reading::new(1705269600, decimal("1")),
                Reading::new(1705273200, decimal("2")),
            ]
        );
    }

    #[test]
    fn test_parse_elering_csv_header_only() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse_elering_csv("", &EleringConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_elering_csv_fall_back_hour() {
        let rows = parse(
            "29.10.2023 02:00;1,0
29.10.2023 03:00;2,0
29.10.2023 03:00;3,0
29.10.2023 04:00;4,0
",
        )
        .unwrap();

        let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp).collect();
        assert_eq!(
            timestamps,
            vec![1698534000, 1698537600, 1698541200, 1698544800]
        );
    }

    #[test]
    fn test_parse_elering_csv_empty_value_does_not_touch_cursor() {
        // The empty row between the two 03:00 rows is invisible to the cursor,
        // so the second 03:00 is still treated as the repeated hour
        let rows = parse(
            "29.10.2023 03:00;2,0
29.10.2023 03:30;
29.10.2023 03:00;3,0
",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].timestamp - rows[0].timestamp, 3600);
    }

    #[test]
    fn test_parse_elering_csv_empty_value_skips_bad_timestamp() {
        // Timestamp is never parsed for unmetered rows
        let rows = parse("not a date;\n15.01.2024 00:00;1\n").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_elering_csv_extra_fields_ignored() {
        let rows = parse("15.01.2024 00:00;1,5;15.01.2024 01:00;kWh\n").unwrap();
        assert_eq!(rows, vec![Reading::new(1705269600, decimal("1.5"))]);
    }

    #[test]
    fn test_parse_elering_csv_value_not_revalidated() {
        let rows = parse("15.01.2024 00:00;abc\n").unwrap();
        assert_eq!(rows[0].val, decimal("abc"));
    }

    #[test]
    fn test_parse_elering_csv_invalid_timestamp() {
        let result = parse("15.01.2024 00:00;1\n2024-01-15 01:00;2\n");
        assert!(matches!(
            result,
            Err(ConvertError::Parse(ParseError::InvalidTimestamp(_)))
        ));
    }

    #[test]
    fn test_parse_elering_csv_short_record() {
        let result = parse("15.01.2024 00:00\n");
        assert!(matches!(
            result,
            Err(ConvertError::Parse(ParseError::MissingColumn(_)))
        ));
    }

    #[test]
    fn test_parse_elering_csv_custom_timezone() {
        let config = EleringConfig::with_timezone(chrono_tz::UTC);
        let rows = parse_elering_csv(&format!("{}01.01.2024 00:00;1\n", HEADER), &config).unwrap();

        assert_eq!(rows[0].timestamp, 1704067200);
    }

    #[test]
    fn test_parse_elering_csv_is_deterministic() {
        let body = "29.10.2023 03:00;2,0\n29.10.2023 03:00;3,0\n";
        assert_eq!(parse(body).unwrap(), parse(body).unwrap());
    }
}
