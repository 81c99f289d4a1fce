//! Formatting helpers for presenting coordinates and signal values.

/// Signal values keep up to three decimals, trailing zeros trimmed.
pub fn format_signal(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn format_coordinate(value: f64) -> String {
    format!("{value:.2}")
}

/// Tick labels: integers without a fraction, otherwise up to two decimals.
/// Very small or large magnitudes switch to scientific notation.
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        format!("{value:.1e}")
    } else if value.fract().abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let rounded = format!("{value:.2}");
        rounded
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
