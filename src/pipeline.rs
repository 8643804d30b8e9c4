//! Conversion pipeline shared by all source formats
//!
//! Every converter runs the same four steps over one whole document:
//!
//! 1. **Decode** the raw input into the format's document type
//! 2. **Validate** the envelope; a failure rejects the document before any
//!    row is looked at
//! 3. **Extract** readings row by row, normalizing timestamps
//! 4. **Emit** (see `output`)
//!
//! Formats plug in by implementing `SourceFormat`.

use std::io::Read;

use tracing::debug;

use crate::error::{ConvertError, ValidationError};
use crate::types::Reading;

/// Per-format strategy for the conversion pipeline
pub trait SourceFormat {
    /// Decoded, not yet validated, document
    type Document;

    /// Short name used in log output
    const NAME: &'static str;

    fn decode(&self, input: String) -> Result<Self::Document, ConvertError>;

    fn validate(&self, document: &Self::Document) -> Result<(), ValidationError>;

    /// Extract readings in source order
    ///
    /// Only called on documents that passed `validate`.
    fn extract(&self, document: Self::Document) -> Result<Vec<Reading>, ConvertError>;
}

/// Run decode, validate and extract over one document
pub fn convert<F: SourceFormat>(format: &F, input: String) -> Result<Vec<Reading>, ConvertError> {
    let document = format.decode(input)?;
    format.validate(&document)?;
    let readings = format.extract(document)?;

    debug!(
        format = F::NAME,
        readings = readings.len(),
        "document converted"
    );
    Ok(readings)
}

/// Read the whole input, then convert it
pub fn convert_reader<F: SourceFormat, R: Read>(
    format: &F,
    mut reader: R,
) -> Result<Vec<Reading>, ConvertError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    convert(format, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadingValue;

    /// Line-per-reading format: "<epoch> <value>", a leading "!" fails validation
    struct LineFormat;

    impl SourceFormat for LineFormat {
        type Document = Vec<String>;
        const NAME: &'static str = "lines";

        fn decode(&self, input: String) -> Result<Self::Document, ConvertError> {
            Ok(input.lines().map(str::to_string).collect())
        }

        fn validate(&self, document: &Self::Document) -> Result<(), ValidationError> {
            match document.first() {
                Some(line) if line.starts_with('!') => {
                    Err(ValidationError::Currency(line.to_string()))
                }
                _ => Ok(()),
            }
        }

        fn extract(&self, document: Self::Document) -> Result<Vec<Reading>, ConvertError> {
            document
                .into_iter()
                .map(|line| -> Result<Reading, ConvertError> {
                    let (ts, val) = line
                        .split_once(' ')
                        .ok_or_else(|| ConvertError::Decode(line.clone()))?;
                    let timestamp = ts
                        .parse::<i64>()
                        .map_err(|e| ConvertError::Decode(e.to_string()))?;
                    Ok(Reading::new(timestamp, ReadingValue::Decimal(val.to_string())))
                })
                .collect()
        }
    }

    #[test]
    fn test_convert_runs_all_steps() {
        let readings = convert(&LineFormat, "10 a\n20 b\n".to_string()).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1], Reading::new(20, ReadingValue::Decimal("b".to_string())));
    }

    #[test]
    fn test_validation_failure_stops_before_extract() {
        // Second line would fail extraction; validation must win
        let result = convert(&LineFormat, "!EUR\nbroken".to_string());

        assert!(matches!(result, Err(ConvertError::Validation(_))));
    }

    #[test]
    fn test_convert_reader() {
        let readings = convert_reader(&LineFormat, "5 x".as_bytes()).unwrap();
        assert_eq!(readings, vec![Reading::new(5, ReadingValue::Decimal("x".to_string()))]);
    }

    #[test]
    fn test_convert_reader_rejects_invalid_utf8() {
        let result = convert_reader(&LineFormat, &[0xff, 0xfe, 0x20][..]);
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}
