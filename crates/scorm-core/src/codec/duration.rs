//! `timeinterval (second,10,2)` codec.
//!
//! The encoder only emits days, hours, minutes and seconds. The decoder accepts
//! the full `P[nY][nM][nD][T[nH][nM][n[.n]S]]` grammar because intervals such as
//! `cmi.total_time` are written by the LMS, not by us.

use once_cell::sync::Lazy;
use regex::Regex;

const HUNDREDTHS_PER_YEAR: i64 = 3_155_760_000;
const HUNDREDTHS_PER_MONTH: i64 = 262_980_000;
const HUNDREDTHS_PER_DAY: i64 = 8_640_000;
const HUNDREDTHS_PER_HOUR: i64 = 360_000;
const HUNDREDTHS_PER_MINUTE: i64 = 6_000;
const HUNDREDTHS_PER_SECOND: i64 = 100;

static INTERVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^P(?:([0-9]+)Y)?(?:([0-9]+)M)?(?:([0-9]+)D)?",
        r"T?(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+(?:\.[0-9]+)?)S)?$",
    ))
    .expect("interval grammar is a valid regex pattern")
});

/// Encodes a number of seconds as `P{d}DT{h}H{m}M{s}S`.
///
/// Seconds keep their fractional part at hundredths precision. Negative and
/// non-finite input encodes as zero.
pub fn seconds_to_interval(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    let hundredths = (seconds * HUNDREDTHS_PER_SECOND as f64).round() as i64;
    let days = hundredths / HUNDREDTHS_PER_DAY;
    let rest = hundredths % HUNDREDTHS_PER_DAY;
    let hours = rest / HUNDREDTHS_PER_HOUR;
    let rest = rest % HUNDREDTHS_PER_HOUR;
    let minutes = rest / HUNDREDTHS_PER_MINUTE;
    let rest = rest % HUNDREDTHS_PER_MINUTE;

    format!(
        "P{}DT{}H{}M{}.{:02}S",
        days,
        hours,
        minutes,
        rest / HUNDREDTHS_PER_SECOND,
        rest % HUNDREDTHS_PER_SECOND
    )
}

/// Decodes an interval into seconds.
///
/// The whole string must match the grammar; empty or non-matching input
/// yields `0.0`. Oversized components saturate.
pub fn interval_to_seconds(interval: &str) -> f64 {
    let interval = interval.trim();
    if interval.is_empty() {
        return 0.0;
    }

    let Some(caps) = INTERVAL.captures(interval) else {
        return 0.0;
    };

    // Captures are all digits, so a failed parse can only mean overflow.
    let whole = |group: usize, unit: i64| -> i64 {
        caps.get(group)
            .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))
            .map(|n| n.saturating_mul(unit))
            .unwrap_or(0)
    };

    let seconds = caps
        .get(6)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|s| (s * HUNDREDTHS_PER_SECOND as f64).round() as i64)
        .unwrap_or(0);

    let total = [
        whole(1, HUNDREDTHS_PER_YEAR),
        whole(2, HUNDREDTHS_PER_MONTH),
        whole(3, HUNDREDTHS_PER_DAY),
        whole(4, HUNDREDTHS_PER_HOUR),
        whole(5, HUNDREDTHS_PER_MINUTE),
        seconds,
    ]
    .into_iter()
    .fold(0i64, i64::saturating_add);

    total as f64 / HUNDREDTHS_PER_SECOND as f64
}
