//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SENSORWATCH_*` environment variables, then command-line overrides.
//! Durations are written as strings such as `"10s"`, `"500ms"` or `"5m"`.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::app::ViewConfig;
use crate::data::duration::parse_duration;

/// Environment variable prefix, e.g. `SENSORWATCH_URL`.
pub const ENV_PREFIX: &str = "SENSORWATCH";

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL of the published CSV feed.
    pub url: String,
    /// Poll interval.
    pub refresh: Duration,
    /// Minimum age of a successful fetch before fetching again.
    pub ttl: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    pub view: ViewConfig,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub refresh: Option<String>,
    pub ttl: Option<String>,
    pub timeout: Option<String>,
    pub offline_after: Option<String>,
    pub live_window: Option<String>,
    pub table_rows: Option<usize>,
}

/// Settings as they appear in the file/environment, before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    url: Option<String>,
    refresh: String,
    ttl: String,
    timeout: String,
    offline_after: String,
    live_window: String,
    table_rows: usize,
}

impl Settings {
    /// Load settings from all layers.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("refresh", "10s")?
            .set_default("ttl", "5s")?
            .set_default("timeout", "10s")?
            .set_default("offline_after", "30s")?
            .set_default("live_window", "5m")?
            .set_default("table_rows", 10)?;

        if let Some(path) = config_path {
            let name = path.to_string_lossy();
            builder = builder.add_source(File::new(&name, FileFormat::Toml).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("url", overrides.url)?
            .set_override_option("refresh", overrides.refresh)?
            .set_override_option("ttl", overrides.ttl)?
            .set_override_option("timeout", overrides.timeout)?
            .set_override_option("offline_after", overrides.offline_after)?
            .set_override_option("live_window", overrides.live_window)?
            .set_override_option("table_rows", overrides.table_rows.map(|n| n as i64))?
            .build()
            .context("Failed to load configuration")?;

        let raw: RawSettings = config
            .try_deserialize()
            .context("Invalid configuration")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let url = match raw.url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => bail!(
                "No feed URL configured (use --url, {}_URL or the config file)",
                ENV_PREFIX
            ),
        };

        let refresh = duration_setting("refresh", &raw.refresh)?;
        if refresh.is_zero() {
            bail!("refresh must be greater than zero");
        }

        Ok(Self {
            url,
            refresh,
            ttl: duration_setting("ttl", &raw.ttl)?,
            timeout: duration_setting("timeout", &raw.timeout)?,
            view: ViewConfig {
                offline_after: duration_setting("offline_after", &raw.offline_after)?,
                live_window: duration_setting("live_window", &raw.live_window)?,
                table_rows: raw.table_rows,
            },
        })
    }
}

fn duration_setting(name: &str, value: &str) -> Result<Duration> {
    parse_duration(value).with_context(|| format!("Invalid duration for {}: '{}'", name, value))
}
