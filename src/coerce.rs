//! Parse-or-fallback cell coercions.
//!
//! Every function here is total: malformed input resolves to the group's
//! documented fallback (`-1` for nutrients, `false` for booleans, empty
//! string for text) and never aborts the row.

use crate::constants::labels::TRUE_TOKENS;
use crate::constants::markers::CARET_MARKER;
use crate::constants::sentinels::NUTRIENT_SENTINEL;

/// True when the raw value, trimmed of surrounding whitespace, ends with
/// the caret quality marker. Mid-string carets do not count.
pub fn has_anomaly_marker(raw: &str) -> bool {
    raw.trim().ends_with(CARET_MARKER)
}

/// Trim surrounding whitespace and strip at most one trailing caret.
///
/// A doubled marker (`"50^^"`) keeps one caret and will fail any numeric
/// parse downstream.
pub fn strip_marker(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(CARET_MARKER).unwrap_or(trimmed)
}

/// Text coercion: missing becomes the empty string; present values are
/// trimmed and lose one trailing caret.
pub fn coerce_text(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(value) => strip_marker(value).trim_end().to_string(),
    }
}

/// Nutrient coercion: strip the marker, parse as `f64`, fall back to the
/// `-1` sentinel on absence, parse failure, or a NaN parse.
pub fn coerce_nutrient(raw: Option<&str>) -> f64 {
    let Some(value) = raw else {
        return NUTRIENT_SENTINEL;
    };
    match strip_marker(value).trim().parse::<f64>() {
        Ok(parsed) if !parsed.is_nan() => parsed,
        _ => NUTRIENT_SENTINEL,
    }
}

/// Tag/flag coercion: uppercase, accept `TRUE`/`1`, everything else
/// (including `FALSE`, `0`, junk, and missing) resolves to `false`.
pub fn coerce_flag(raw: Option<&str>) -> bool {
    let Some(value) = raw else {
        return false;
    };
    let upper = value.to_uppercase();
    TRUE_TOKENS.contains(&upper.as_str())
}
