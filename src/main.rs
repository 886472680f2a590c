//! news-digest: binary entrypoint.
//! Loads the daily snapshots once (`report`) or keeps refreshing them
//! (`watch`), writing dashboard reports as JSON to stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_digest::{spawn_refresh_loop, DashboardReport, DashboardService, DigestConfig};

#[derive(Parser)]
#[command(name = "news-digest", about = "Daily news snapshot digest")]
struct Cli {
    /// TOML config file (overrides DIGEST_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL or directory holding the snapshot files
    #[arg(long, global = true)]
    data_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every snapshot once and print the dashboard report
    Report {
        #[arg(long)]
        pretty: bool,
    },
    /// Refresh periodically, printing one JSON line per refresh
    Watch {
        #[arg(long)]
        interval_mins: Option<u64>,
    },
}

/// Logs go to stderr so stdout carries only report JSON.
/// `DIGEST_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("snapshot=info,cache=info,loader=info,refresh=info,warn"));
    let json = std::env::var("DIGEST_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<DigestConfig> {
    let mut cfg = match &cli.config {
        Some(path) => DigestConfig::load_from(path)?,
        None => DigestConfig::load_default()?,
    };
    if let Some(base) = &cli.data_base {
        cfg.data_base = base.clone();
    }
    Ok(cfg)
}

fn print_report(report: &DashboardReport, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .context("serializing report")?;
    println!("{out}");
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let service = Arc::new(DashboardService::from_config(&cfg)?);

    match cli.command {
        Command::Report { pretty } => {
            let report = service.refresh().await;
            print_report(&report, pretty)?;
        }
        Command::Watch { interval_mins } => {
            let interval = interval_mins
                .map(|m| Duration::from_secs(m.max(1) * 60))
                .unwrap_or_else(|| cfg.refresh_interval());
            tracing::info!(target: "refresh", every_secs = interval.as_secs(), "watching snapshots");

            let (mut rx, handle) = spawn_refresh_loop(service, interval);
            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = rx.borrow_and_update().clone();
                        if let Some(report) = latest {
                            print_report(&report, false)?;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!(target: "refresh", "interrupted, stopping");
                        break;
                    }
                }
            }
            handle.abort();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; missing file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
