// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use clap::Parser;
use common::position::PositionFix;
use fix_replay::{FixReplayModule, load_json_lines};
use location_filter::LocationFilterModule;
use module_core::{Event, EventBus, EventKind, Module};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod fixes_csv;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fix recording, `.csv` or JSON lines
    #[arg(short = 'f', long)]
    fixes: PathBuf,
    /// Filter config file, defaults to <config dir>/fixfilter/filter.json
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    newer_threshold_ms: Option<i64>,
    #[arg(long)]
    accuracy_threshold: Option<f64>,
    /// Delay between two replayed fixes
    #[arg(short, long, default_value_t = 100)]
    interval_ms: u64,
    /// Keep running after the last fix until Ctrl-C
    #[arg(short, long)]
    keep_running: bool,
}

async fn load_fixes(path: &Path) -> Result<Vec<PositionFix>, std::io::Error> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        fixes_csv::read_fixes_from_file(path)
    } else {
        load_json_lines(path).await
    }
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let filter_config = config::resolve_filter_config(
        cli.config.as_deref(),
        config::default_config_path().as_deref(),
        cli.newer_threshold_ms,
        cli.accuracy_threshold,
    )
    .map_err(|e| error!("Failed to load filter config. Error: {}", e))?;
    let fixes = load_fixes(&cli.fixes).await.map_err(|e| {
        error!(
            "Failed to load fixes from {}. Error: {}",
            cli.fixes.display(),
            e
        )
    })?;

    let eb = EventBus::default();
    let quit_sender = eb.sender();
    ctrlc::set_handler(move || {
        let _ = quit_sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    })
    .map_err(|e| error!("Failed to install Ctrl-C handler. Error: {}", e))?;

    let mut replay = FixReplayModule::new(
        eb.context(),
        fixes,
        Duration::from_millis(cli.interval_ms),
        !cli.keep_running,
    )
    .map_err(|e| error!("Failed to create FixReplayModule. Error: {}", e))?;
    let mut location_filter = LocationFilterModule::new(eb.context(), filter_config);

    info!("Starting modules...");
    let (replay_result, filter_result) = tokio::join!(replay.run(), location_filter.run());

    match location_filter.current_best() {
        Some(best) => info!(
            "Best fix: lat {}, lon {}, accuracy {} m from {} at {}",
            best.position().latitude,
            best.position().longitude,
            best.accuracy(),
            best.provider(),
            best.timestamp()
        ),
        None => info!("No fix accepted"),
    }
    replay_result.and(filter_result)
}
