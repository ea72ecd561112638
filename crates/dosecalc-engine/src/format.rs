//! Display formatting for calculator values.
//!
//! Rounding here is for display only. Anything that feeds further logic,
//! such as renal categorization, uses the unrounded value.

use dosecalc_model::{CalculationResult, NumericField};

/// Rendered in place of a number when there is no result to show.
pub const NO_RESULT: &str = "--";

/// Decimal places used for a value: 0 from 1000 up, 1 from 100 up, else 2.
pub fn decimal_places(value: f64) -> usize {
    if value >= 1000.0 {
        0
    } else if value >= 100.0 {
        1
    } else {
        2
    }
}

/// Format a number with magnitude-dependent precision.
///
/// Non-finite values render as [`NO_RESULT`].
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return NO_RESULT.to_string();
    }
    let decimals = decimal_places(value);
    format!("{value:.decimals$}")
}

pub fn format_field(field: NumericField) -> String {
    field.value().map_or_else(|| NO_RESULT.to_string(), format_value)
}

/// Value and unit, e.g. `336.0 mL`, or [`NO_RESULT`] for invalid and
/// withheld outcomes.
pub fn format_result(result: &CalculationResult) -> String {
    match result.numeric_value() {
        Some(value) if value.is_finite() => format!("{} {}", format_value(value), result.unit),
        _ => NO_RESULT.to_string(),
    }
}
