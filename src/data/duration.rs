use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to nanoseconds multiplier (order matters: "ms" before "s" and "m")
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "30s", "500ms", "5m", "1.5h".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<f64>() {
        return from_nanos_f64(secs * 1_000_000_000.0, s);
    }

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            return from_nanos_f64(val * multiplier, s);
        }
    }

    bail!("Unknown duration format: {}", s)
}

fn from_nanos_f64(nanos: f64, input: &str) -> Result<Duration> {
    if !nanos.is_finite() || nanos < 0.0 {
        bail!("Duration out of range: {}", input);
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos < 1_000_000 {
        format!("{}µs", nanos / 1_000)
    } else if nanos < 1_000_000_000 {
        format!("{}ms", d.as_millis())
    } else if d.as_secs() < 120 {
        format!("{:.1}s", d.as_secs_f64())
    } else if d.as_secs() < 7_200 {
        format!("{}m{}s", d.as_secs() / 60, d.as_secs() % 60)
    } else {
        format!("{}h{}m", d.as_secs() / 3_600, (d.as_secs() % 3_600) / 60)
    }
}
