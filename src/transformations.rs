//! Value transformations shared by the converters
//!
//! Providers write decimals the European way. The converters only swap the
//! separators; the value stays a string and is not re-validated as a number.
//!
//! 1. **Comma decimal**: `"12,34"` → `"12.34"` (Elering CSV)
//! 2. **Grouped comma decimal**: `"1 234,5"` → `"1234.5"` (Nord Pool Spot)

/// Replace the decimal comma with a period
///
/// # Examples
///
/// ```
/// # use energy2json::transformations::normalize_decimal_comma;
/// assert_eq!(normalize_decimal_comma("12,34"), "12.34");
/// assert_eq!(normalize_decimal_comma("0.5"), "0.5");
/// assert_eq!(normalize_decimal_comma("-0,201"), "-0.201");
/// ```
pub fn normalize_decimal_comma(value: &str) -> String {
    value.replace(',', ".")
}

/// Drop thousands-separator spaces and replace the decimal comma
///
/// # Examples
///
/// ```
/// # use energy2json::transformations::normalize_grouped_decimal;
/// assert_eq!(normalize_grouped_decimal("1 234,5"), "1234.5");
/// assert_eq!(normalize_grouped_decimal("45,20"), "45.20");
/// ```
pub fn normalize_grouped_decimal(value: &str) -> String {
    normalize_decimal_comma(value).replace(' ', "")
}
