//! Display formatting of side-panel numbers.

/// Shown in place of a value that does not exist.
pub const NO_DATA: &str = "N/A";

/// Formats `value` with two decimals and comma thousands separators
/// (`1234.5` becomes `"1,234.50"`).
#[must_use]
pub fn format_metric(value: f64) -> String {
    if !value.is_finite() {
        return NO_DATA.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && fixed != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped}.{frac_part}")
}

/// Formats an optional value, showing [`NO_DATA`] for `None`.
#[must_use]
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), format_metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(format_metric(1234.5), "1,234.50");
        assert_eq!(format_metric(341_814_420.0), "341,814,420.00");
        assert_eq!(format_metric(1_000_000.0), "1,000,000.00");
        assert_eq!(format_metric(999.999), "1,000.00");
    }

    #[test]
    fn small_values() {
        assert_eq!(format_metric(0.0), "0.00");
        assert_eq!(format_metric(15.0), "15.00");
        assert_eq!(format_metric(37.1), "37.10");
        assert_eq!(format_metric(123.456), "123.46");
    }

    #[test]
    fn negatives_keep_their_sign() {
        assert_eq!(format_metric(-1234.5), "-1,234.50");
        assert_eq!(format_metric(-0.001), "0.00");
    }

    #[test]
    fn missing_values() {
        assert_eq!(format_metric(f64::NAN), NO_DATA);
        assert_eq!(format_optional(None), NO_DATA);
        assert_eq!(format_optional(Some(2.5)), "2.50");
    }
}
