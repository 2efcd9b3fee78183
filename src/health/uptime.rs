//! Human-readable durations.
//!
//! Output follows the compact `1h2m3.5s` style: hours and minutes appear only
//! when non-zero (minutes are kept once hours appear), seconds carry up to nine
//! fractional digits with trailing zeros trimmed, and sub-second values switch
//! to `ms`, `µs` or `ns`.

use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Render an elapsed duration.
pub fn format_uptime(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return with_fraction(nanos, NANOS_PER_MICRO, 3, "µs");
    }
    if nanos < NANOS_PER_SEC {
        return with_fraction(nanos, NANOS_PER_MILLI, 6, "ms");
    }

    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let secs_nanos = u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(elapsed.subsec_nanos());
    out.push_str(&with_fraction(secs_nanos, NANOS_PER_SEC, 9, "s"));
    out
}

fn with_fraction(value: u128, unit: u128, digits: usize, suffix: &str) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return format!("{whole}{suffix}");
    }
    let padded = format!("{frac:0digits$}");
    format!("{whole}.{}{suffix}", padded.trim_end_matches('0'))
}
