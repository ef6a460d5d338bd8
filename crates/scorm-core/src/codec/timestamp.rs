//! `time (second,10,0)` timestamps in the sortable `YYYY-MM-DDTHH:MM:SS` form.

use chrono::{DateTime, NaiveDateTime};

const SORTABLE: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS`. A missing timestamp is `""`.
pub fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format(SORTABLE).to_string())
        .unwrap_or_default()
}

/// Parses a timestamp written either by us or by the LMS.
///
/// Accepts the sortable form (with optional fractional seconds) and RFC 3339
/// with an offset, in which case the wall-clock part is kept. Anything else
/// yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 7))
            .unwrap()
    }

    #[test]
    fn formats_sortable() {
        assert_eq!(format_timestamp(Some(sample())), "2024-03-09T14:05:07");
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn parses_own_output() {
        assert_eq!(parse_timestamp("2024-03-09T14:05:07"), Some(sample()));
    }

    #[test]
    fn parses_lms_variants() {
        assert_eq!(
            parse_timestamp("2024-03-09T14:05:07.25"),
            sample().with_nanosecond(250_000_000)
        );
        assert_eq!(parse_timestamp("2024-03-09T14:05:07+10:00"), Some(sample()));
        assert_eq!(parse_timestamp("2024-03-09T14:05:07Z"), Some(sample()));
    }

    #[test]
    fn empty_and_garbage_are_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
