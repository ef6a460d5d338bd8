use anyhow::{Result, bail};
use scorm_core::codec::{interval_to_seconds, seconds_to_interval};

pub fn encode(seconds: f64) -> Result<()> {
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("seconds must be a non-negative number, got {}", seconds);
    }
    println!("{}", seconds_to_interval(seconds));
    Ok(())
}

/// Unparseable intervals print `0`, matching how the engine reads them.
pub fn decode(interval: &str) {
    println!("{}", interval_to_seconds(interval));
}
