//! Converter configuration
//!
//! Provider constants live here together with the small per-converter
//! settings the command line may override.
//!
//! # Example
//!
//! ```
//! use energy2json::config::{parse_timezone, EleringConfig};
//!
//! let config = EleringConfig::default();
//! assert_eq!(config.timezone, chrono_tz::Europe::Tallinn);
//! assert_eq!(config.header_rows, 5);
//!
//! let helsinki = EleringConfig::with_timezone(parse_timezone("Europe/Helsinki").unwrap());
//! assert_eq!(helsinki.header_rows, 5);
//! ```

use chrono_tz::Tz;

use crate::error::ConvertError;

// ============================================================================
// Elering metering CSV
// ============================================================================

/// Local wall-clock layout of the first CSV field
pub const ELERING_TIMESTAMP_LAYOUT: &str = "%d.%m.%Y %H:%M";

/// Metadata block preceding the data rows
pub const ELERING_HEADER_ROWS: usize = 5;

pub const ELERING_DELIMITER: u8 = b';';

pub const ELERING_TIMEZONE: Tz = chrono_tz::Europe::Tallinn;

// ============================================================================
// Nord Pool day-ahead JSON
// ============================================================================

pub const NORDPOOL_TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub const NORDPOOL_VERSION: i64 = 3;

pub const NORDPOOL_FINAL_STATE: &str = "Final";

// ============================================================================
// Nord Pool Spot legacy JSON
// ============================================================================

pub const NORDPOOL_SPOT_TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

pub const NORDPOOL_SPOT_PAGE_ID: i64 = 47;

/// Column value meaning "no data"
pub const NORDPOOL_SPOT_EMPTY_VALUE: &str = "-";

pub const NORDPOOL_SPOT_TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// The only currency any converter accepts
pub const CURRENCY: &str = "EUR";

/// Settings for the Elering CSV converter
#[derive(Debug, Clone, PartialEq)]
pub struct EleringConfig {
    /// Zone of the wall-clock timestamps
    pub timezone: Tz,

    /// Records skipped unconditionally before data starts
    pub header_rows: usize,
}

impl EleringConfig {
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone,
            ..Self::default()
        }
    }
}

impl Default for EleringConfig {
    fn default() -> Self {
        Self {
            timezone: ELERING_TIMEZONE,
            header_rows: ELERING_HEADER_ROWS,
        }
    }
}

/// Settings for the Nord Pool Spot converter
#[derive(Debug, Clone, PartialEq)]
pub struct NordPoolSpotConfig {
    /// Zone of the `StartTime` values
    pub timezone: Tz,
}

impl Default for NordPoolSpotConfig {
    fn default() -> Self {
        Self {
            timezone: NORDPOOL_SPOT_TIMEZONE,
        }
    }
}

/// Look up an IANA timezone by name
///
/// # Returns
///
/// * `Ok(Tz)` - Known zone
/// * `Err(ConvertError::Config)` - Unknown zone name
pub fn parse_timezone(name: &str) -> Result<Tz, ConvertError> {
    name.parse::<Tz>()
        .map_err(|_| ConvertError::Config(format!("unknown timezone '{}'", name)))
}
