use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sensorwatch::{report, source, write_csv, App, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "sensorwatch")]
#[command(about = "Poll a published temperature/humidity CSV feed and report device status")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the CSV feed (http, https or file)
    #[arg(short, long)]
    url: Option<String>,

    /// Poll interval (e.g., "10s", "1m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Minimum age of a fetch before fetching again
    #[arg(long)]
    ttl: Option<String>,

    /// Per-request timeout
    #[arg(long)]
    timeout: Option<String>,

    /// Age of the newest reading at which the device counts as offline
    #[arg(long)]
    offline_after: Option<String>,

    /// Live window, measured back from the newest reading
    #[arg(short, long)]
    window: Option<String>,

    /// Maximum rows in the live table
    #[arg(long)]
    rows: Option<usize>,

    /// Fetch once, print the status and exit
    #[arg(long, conflicts_with = "export")]
    once: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Export readings to a CSV file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// First day to export (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "export")]
    from: Option<NaiveDate>,

    /// Last day to export (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "export")]
    to: Option<NaiveDate>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            refresh: self.refresh.clone(),
            ttl: self.ttl.clone(),
            timeout: self.timeout.clone(),
            offline_after: self.offline_after.clone(),
            live_window: self.window.clone(),
            table_rows: self.rows,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref(), args.overrides())?;

    let source = source::open(&settings.url, settings.timeout)?;
    let mut app = App::new(source, settings.ttl, settings.view.clone());

    if let Some(ref path) = args.export {
        return export_to_file(&mut app, path, args.from, args.to).await;
    }

    if args.once {
        app.refresh().await;
        print_status(&app, args.json)?;
        if app.last_error().is_some() {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_poll_loop(&mut app, &settings, args.json).await
}

/// Poll the feed until interrupted, printing the status after each poll.
async fn run_poll_loop(app: &mut App, settings: &Settings, json: bool) -> Result<()> {
    info!(
        source = app.source_description(),
        refresh = ?settings.refresh,
        "Polling feed"
    );

    let mut interval = tokio::time::interval(settings.refresh);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                app.refresh().await;
                print_status(app, json)?;
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

fn print_status(app: &App, json: bool) -> Result<()> {
    let now = Utc::now();
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer(&mut stdout, &report::render_json(app, now))?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", report::render_text(app, now))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Fetch once and write the readings between `from` and `to` to a CSV file.
async fn export_to_file(
    app: &mut App,
    export_path: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    app.refresh().await;
    if let Some(err) = app.last_error() {
        bail!("Cannot export: {}", err);
    }

    let dataset = app.historical_view(from, to)?;

    let file = File::create(export_path)
        .with_context(|| format!("Failed to create {}", export_path.display()))?;
    write_csv(&dataset, BufWriter::new(file))?;

    info!(
        path = %export_path.display(),
        readings = dataset.len(),
        "Exported readings"
    );
    println!("Exported {} readings to {}", dataset.len(), export_path.display());

    Ok(())
}
