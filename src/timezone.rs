//! Civil-time to epoch normalization
//!
//! Provider exports stamp intervals with local wall-clock strings. Around the
//! autumn DST transition one wall-clock hour occurs twice, and interval data
//! then simply repeats the same string. `LocalTimeResolver` keeps the raw
//! string of the previous row and treats an identical string as the second
//! occurrence of the repeated hour:
//!
//! ```text
//! 29.10.2023 02:00  -> EEST  (changed)
//! 29.10.2023 03:00  -> EEST  (changed, first 03:00)
//! 29.10.2023 03:00  -> EET   (repeat, one hour later)
//! 29.10.2023 04:00  -> EET   (changed, unambiguous)
//! ```
//!
//! This is an approximation driven by the input, not by the transition
//! table: it only has to agree with how the providers lay out their rows.
//!
//! # Example
//!
//! ```
//! use energy2json::timezone::LocalTimeResolver;
//!
//! let mut resolver = LocalTimeResolver::new("%d.%m.%Y %H:%M", chrono_tz::Europe::Tallinn);
//! let first = resolver.resolve("29.10.2023 03:00").unwrap();
//! let repeat = resolver.resolve("29.10.2023 03:00").unwrap();
//! assert_eq!(first, 1698537600);
//! assert_eq!(repeat - first, 3600);
//! ```

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};

use crate::error::ParseError;

/// Distance used to step out of a spring-forward gap before localizing
const GAP_SHIFT_HOURS: i64 = 6;

/// Resolves local wall-clock strings of one document to Unix epoch seconds
///
/// One resolver is created per document; the "last seen" cursor must not
/// leak between documents.
#[derive(Debug, Clone)]
pub struct LocalTimeResolver {
    layout: &'static str,
    timezone: Tz,
    last_raw: Option<String>,
}

impl LocalTimeResolver {
    pub fn new(layout: &'static str, timezone: Tz) -> Self {
        Self {
            layout,
            timezone,
            last_raw: None,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolve one raw local timestamp and advance the cursor
    ///
    /// A string that differs from the previous one (or the first string of
    /// the document) resolves with the DST offset when ambiguous; a repeated
    /// string resolves with the standard offset.
    ///
    /// # Returns
    ///
    /// * `Ok(i64)` - Unix epoch seconds
    /// * `Err(ParseError::InvalidTimestamp)` - String does not match the layout
    pub fn resolve(&mut self, raw: &str) -> Result<i64, ParseError> {
        let is_dst = self.last_raw.as_deref() != Some(raw);

        let naive = NaiveDateTime::parse_from_str(raw, self.layout).map_err(|e| {
            ParseError::InvalidTimestamp(format!(
                "'{}' does not match '{}': {}",
                raw, self.layout, e
            ))
        })?;
        let localized = localize(self.timezone, &naive, is_dst)?;

        self.last_raw = Some(raw.to_string());
        Ok(localized.timestamp())
    }
}

/// Place a naive wall-clock time in `timezone`, using `is_dst` as a hint
///
/// - Unambiguous times ignore the hint
/// - Ambiguous times pick the DST candidate when `is_dst`, else the
///   standard-time candidate
/// - Nonexistent times (spring-forward gap) apply the DST offset when
///   `is_dst`, else the standard offset
pub fn localize(
    timezone: Tz,
    naive: &NaiveDateTime,
    is_dst: bool,
) -> Result<DateTime<Tz>, ParseError> {
    match timezone.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, latest) => {
            let earliest_dst = dst_active(&earliest);
            let latest_dst = dst_active(&latest);
            let pick_earliest = if earliest_dst != latest_dst {
                earliest_dst == is_dst
            } else {
                is_dst
            };
            Ok(if pick_earliest { earliest } else { latest })
        }
        LocalResult::None => {
            let shift = Duration::hours(GAP_SHIFT_HOURS);
            let resolved = if is_dst {
                timezone
                    .from_local_datetime(&(*naive + shift))
                    .earliest()
                    .map(|dt| dt - shift)
            } else {
                timezone
                    .from_local_datetime(&(*naive - shift))
                    .latest()
                    .map(|dt| dt + shift)
            };
            resolved.ok_or_else(|| {
                ParseError::InvalidTimestamp(format!("{} does not exist in {}", naive, timezone.name()))
            })
        }
    }
}

fn dst_active(dt: &DateTime<Tz>) -> bool {
    dt.offset().dst_offset() != Duration::zero()
}

/// Parse a timestamp the source already states in UTC
///
/// # Example
///
/// ```
/// # use energy2json::timezone::parse_utc_timestamp;
/// assert_eq!(
///     parse_utc_timestamp("2024-01-01T00:00:00Z", "%Y-%m-%dT%H:%M:%SZ").unwrap(),
///     1704067200
/// );
/// assert!(parse_utc_timestamp("2024-01-01 00:00", "%Y-%m-%dT%H:%M:%SZ").is_err());
/// ```
pub fn parse_utc_timestamp(raw: &str, layout: &str) -> Result<i64, ParseError> {
    NaiveDateTime::parse_from_str(raw, layout)
        .map(|naive| naive.and_utc().timestamp())
        .map_err(|e| {
            ParseError::InvalidTimestamp(format!("'{}' does not match '{}': {}", raw, layout, e))
        })
}
