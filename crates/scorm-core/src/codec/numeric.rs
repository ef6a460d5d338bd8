//! Lenient numeric parsing. The LMS returns `""` for elements it has no value
//! for, so a failed parse is a zero, never an error.

/// Parses a `real(10,7)` value, yielding `0.0` for empty, invalid or
/// non-finite input.
pub fn parse_real(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses an integer value, yielding `0` for empty or invalid input.
pub fn parse_integer(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Parses a `._count` value. Negative counts are treated as empty.
pub fn parse_count(raw: &str) -> usize {
    usize::try_from(parse_integer(raw)).unwrap_or(0)
}

/// Formats a real the way the data model expects (`1.0` → `"1"`).
pub fn format_real(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_invalid_are_zero() {
        assert_eq!(parse_real(""), 0.0);
        assert_eq!(parse_real("abc"), 0.0);
        assert_eq!(parse_real("NaN"), 0.0);
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("1.5"), 0);
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(parse_real(" 0.75 "), 0.75);
        assert_eq!(parse_integer(" -1"), -1);
    }

    #[test]
    fn negative_counts_are_empty() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("-2"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn reals_use_shortest_form() {
        assert_eq!(format_real(1.0), "1");
        assert_eq!(format_real(0.75), "0.75");
        assert_eq!(format_real(-0.5), "-0.5");
        assert_eq!(format_real(f64::INFINITY), "0");
    }
}
