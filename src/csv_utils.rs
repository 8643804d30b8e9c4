//! Shared CSV utilities
//!
//! The metering export carries no usable header row, so fields are addressed
//! by position.

use crate::error::ParseError;

/// Helper to get field value by position from CSV record
///
/// # Arguments
///
/// * `record` - CSV record (row)
/// * `index` - Zero-based field position
/// * `field_name` - Name used in the error message
///
/// # Returns
///
/// * `Ok(&str)` - Field value
/// * `Err(ParseError::MissingColumn)` - Record is shorter than `index + 1`
///
/// # Example
///
/// ```rust
/// use csv::StringRecord;
/// use energy2json::csv_utils::get_field;
///
/// let record = StringRecord::from(vec!["01.01.2024 00:00", "0,512"]);
///
/// assert_eq!(get_field(&record, 1, "value").unwrap(), "0,512");
/// assert!(get_field(&record, 2, "extra").is_err());
/// ```
pub fn get_field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    field_name: &str,
) -> Result<&'a str, ParseError> {
    record.get(index).ok_or_else(|| {
        let line = record
            .position()
            .map(|p| format!(" on line {}", p.line()))
            .unwrap_or_default();
        ParseError::MissingColumn(format!("{} (field {}){}", field_name, index + 1, line))
    })
}
