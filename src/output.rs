//! JSON output for converted readings
//!
//! The layout is fixed so downstream tooling can diff outputs: a pretty
//! printed array, 4-space indentation, keys sorted alphabetically (guaranteed
//! by the field order of `Reading`) and a trailing newline.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ConvertError;
use crate::types::Reading;

const INDENT: &[u8] = b"    ";

/// Serialize readings to `writer`
///
/// # Example
///
/// ```
/// # use energy2json::{output::write_readings, Reading, ReadingValue};
/// let readings = vec![Reading::new(1704067200, ReadingValue::Decimal("12.34".to_string()))];
/// let mut out = Vec::new();
/// write_readings(&mut out, &readings).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "[\n    {\n        \"timestamp\": 1704067200,\n        \"val\": \"12.34\"\n    }\n]\n"
/// );
/// ```
pub fn write_readings<W: Write>(mut writer: W, readings: &[Reading]) -> Result<(), ConvertError> {
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
    readings
        .serialize(&mut serializer)
        .map_err(|e| ConvertError::Io(format!("Failed to write JSON: {}", e)))?;

    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadingValue;

    fn render(readings: &[Reading]) -> String {
        let mut out = Vec::new();
        write_readings(&mut out, readings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_empty_list() {
        assert_eq!(render(&[]), "[]\n");
    }

    #[test]
    fn test_write_number_value() {
        let number = serde_json::Number::from_f64(45.2).unwrap();
        let out = render(&[Reading::new(1704067200, ReadingValue::Number(number))]);

        assert_eq!(
            out,
            "[\n    {\n        \"timestamp\": 1704067200,\n        \"val\": 45.2\n    }\n]\n"
        );
    }

    #[test]
    fn test_write_is_stable() {
        let readings = vec![
            Reading::new(1, ReadingValue::Decimal("1.0".to_string())),
            Reading::new(1, ReadingValue::Decimal("2.0".to_string())),
        ];

        let out = render(&readings);
        assert_eq!(out, render(&readings));
        // Duplicated timestamps are kept
        assert_eq!(out.matches("\"timestamp\": 1,").count(), 2);
    }
}
