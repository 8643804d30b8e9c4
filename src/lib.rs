//! energy2json - convert energy market time series to simple JSON
//!
//! Three converters share one pipeline (decode → validate → normalize → emit)
//! and one output shape: an ordered list of `{"timestamp", "val"}` readings
//! with Unix epoch timestamps.
//!
//! # Sources
//! - Elering metering CSV (local Europe/Tallinn timestamps)
//! - Nord Pool day-ahead JSON, version 3 (UTC timestamps)
//! - Nord Pool Spot legacy page JSON (local Europe/Paris timestamps)
//!
//! Local timestamps are resolved with an explicit timezone per document;
//! repeated wall-clock strings at the autumn transition are read as the
//! second occurrence of the repeated hour (see `timezone`).

pub mod cli;
pub mod config;
pub mod csv_parser;
pub mod csv_utils;
mod error;
pub mod json_parsers;
pub mod output;
pub mod pipeline;
pub mod timezone;
pub mod transformations;
mod types;

// Re-export public types for easier access
pub use csv_parser::{parse_elering_csv, EleringCsv};
pub use error::{ConvertError, ParseError, ValidationError};
pub use json_parsers::{parse_nordpool_json, parse_nordpool_spot_json, NordPool, NordPoolSpot};
pub use pipeline::{convert, convert_reader, SourceFormat};
pub use types::{Reading, ReadingValue};
