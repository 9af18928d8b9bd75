/// Weights and prices come in as decimal numbers and totals are fixed at two
/// decimal places when a sale is recorded, so amounts are plain `f64` rounded
/// with `round2` rather than integer cents.

/// Round to two decimal places, half away from zero.
/// Example: 33.2667 -> 33.27
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an amount for display: two decimal places, trailing zeros trimmed.
/// Example: 180.0 -> "180", 33.27 -> "33.27", 12.5 -> "12.5"
pub fn format_amount(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// True when the value is usable as a weight or unit price.
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
