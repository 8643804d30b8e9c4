//! Error types for the energy data converters
//!
//! Every failure is fatal for the document being converted:
//! - Validation errors (unsupported envelope version, currency, area, state)
//! - Parse errors (malformed timestamps, missing CSV fields, odd price types)
//! - Decode, I/O and configuration errors raised around the pipeline

use std::fmt;

/// Top-level error type for a conversion run
///
/// Supports automatic conversion from specific error types via From trait
#[derive(Debug)]
pub enum ConvertError {
    /// Input could not be read
    Io(String),

    /// Invalid converter configuration (unknown timezone name)
    Config(String),

    /// Input is not a well-formed document of the expected shape
    Decode(String),

    /// Document envelope failed validation, no readings were produced
    Validation(ValidationError),

    /// Row-level parse error, aborts the whole document
    Parse(ParseError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConvertError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ConvertError::Decode(msg) => write!(f, "Decode error: {}", msg),
            ConvertError::Validation(e) => write!(f, "Validation error: {}", e),
            ConvertError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<ValidationError> for ConvertError {
    fn from(err: ValidationError) -> Self {
        ConvertError::Validation(err)
    }
}

impl From<ParseError> for ConvertError {
    fn from(err: ParseError) -> Self {
        ConvertError::Parse(err)
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}

/// Envelope validation errors
///
/// Each variant carries the observed value so the diagnostic names both the
/// field and what the provider actually sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `version` is not 3
    UnsupportedVersion(String),

    /// `deliveryAreas` does not hold exactly one area
    AreaCount(usize),

    /// `currency` is not EUR
    Currency(String),

    /// `areaStates[0].state` is not Final
    AreaState(String),

    /// `areaStates` is empty
    MissingAreaState,

    /// `pageId` is not 47
    PageId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedVersion(v) => {
                write!(f, "unknown version {} (expected 3)", v)
            }
            ValidationError::AreaCount(n) => {
                write!(
                    f,
                    "only one delivery area is supported, deliveryAreas has {}",
                    n
                )
            }
            ValidationError::Currency(c) => write!(f, "unknown currency {} (expected EUR)", c),
            ValidationError::AreaState(s) => {
                write!(f, "not a final data: areaStates[0].state is {}", s)
            }
            ValidationError::MissingAreaState => write!(f, "areaStates is empty"),
            ValidationError::PageId(p) => write!(f, "invalid pageId {} (expected 47)", p),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Row-level parsing errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Timestamp does not match the fixed layout, or cannot be placed in the zone
    ///
    /// Example: "2024-13-01T00:00:00" (invalid month)
    InvalidTimestamp(String),

    /// Record has fewer fields than the converter reads
    MissingColumn(String),

    /// Price is neither a JSON number nor a string
    InvalidPrice(String),

    /// CSV format error (unterminated quote, invalid UTF-8)
    CsvFormat(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidTimestamp(val) => {
                write!(f, "Invalid timestamp: {}", val)
            }
            ParseError::MissingColumn(col) => {
                write!(f, "Missing required column: {}", col)
            }
            ParseError::InvalidPrice(val) => {
                write!(f, "Invalid price: {}", val)
            }
            ParseError::CsvFormat(msg) => {
                write!(f, "CSV format error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ParseError {}
