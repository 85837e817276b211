//! Plain-text and JSON rendering of the application state.

use std::fmt::Write;

use chrono::{DateTime, TimeZone, Utc};
use sensorwatch_types::{Dataset, DeviceStatus};
use serde_json::{json, Value};

use crate::app::{App, Indicator};
use crate::data::{age, duration::format_duration};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short machine-readable name of an indicator.
pub fn indicator_key(indicator: &Indicator) -> &'static str {
    match indicator {
        Indicator::NoData => "no_data",
        Indicator::FetchFailed(_) => "fetch_failed",
        Indicator::Feed(l) => match l.status {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Unknown => "unknown",
        },
    }
}

/// Render the status line, latest values and live table.
pub fn render_text<Tz: TimeZone>(app: &App, now: DateTime<Tz>) -> String {
    let now = now.with_timezone(&Utc);
    let mut out = String::new();

    let _ = writeln!(out, "Source: {}", app.source_description());

    match app.indicator(now) {
        Indicator::NoData => {
            let _ = writeln!(out, "Status: No data yet");
        }
        Indicator::FetchFailed(err) => {
            let _ = writeln!(out, "Status: Fetch failed ({})", err);
            if app.dataset().is_some_and(|d| !d.is_empty()) {
                let _ = writeln!(out, "Showing data from the last successful fetch");
            }
        }
        Indicator::Feed(liveness) => {
            let _ = write!(out, "Status: {}", liveness.status);
            if let Some(last_seen) = liveness.last_seen {
                let _ = write!(out, " (last seen {} UTC", last_seen.format(TIME_FORMAT));
                if let Some(ago) = app.dataset().and_then(|d| age(d, now)) {
                    match ago.to_std() {
                        Ok(ago) => {
                            let _ = write!(out, ", {} ago", format_duration(ago));
                        }
                        Err(_) => {
                            let _ = write!(out, ", ahead of local clock");
                        }
                    }
                }
                out.push(')');
            }
            out.push('\n');
        }
    }

    if let Some(latest) = app.latest() {
        let _ = writeln!(
            out,
            "Latest: {:.1} °C  {:.1} %",
            latest.temperature, latest.humidity
        );
    }

    let table = app.live_table();
    if !table.is_empty() {
        out.push('\n');
        out.push_str(&render_table(&table));
    }

    out
}

/// Render readings as an aligned text table.
pub fn render_table(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20}  {:>11}  {:>8}", "Time (UTC)", "Temperature", "Humidity");
    for reading in dataset {
        let _ = writeln!(
            out,
            "{:<20}  {:>11.1}  {:>8.1}",
            reading.timestamp.format(TIME_FORMAT),
            reading.temperature,
            reading.humidity
        );
    }
    out
}

/// Render the same information as [`render_text`] as JSON.
pub fn render_json<Tz: TimeZone>(app: &App, now: DateTime<Tz>) -> Value {
    let now = now.with_timezone(&Utc);
    let indicator = app.indicator(now);

    let (last_seen, error) = match &indicator {
        Indicator::Feed(l) => (l.last_seen, None),
        Indicator::FetchFailed(err) => (None, Some(err.to_string())),
        Indicator::NoData => (None, None),
    };

    json!({
        "source": app.source_description(),
        "status": indicator_key(&indicator),
        "error": error,
        "last_seen": last_seen,
        "latest": app.latest(),
        "recent": app.live_table(),
    })
}
