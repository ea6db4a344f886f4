// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Fix replay source
//!
//! Replays recorded position fixes onto the event bus, standing in for a
//! platform location service.

mod recording;

pub use recording::{load_json_lines, parse_json_lines};

use common::position::PositionFix;
use module_core::{Event, EventKind, Module, ModuleCtx};
use std::{
    io::{Error, ErrorKind},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, error, info};

#[derive(Clone)]
struct FixReplayConfig {
    fixes: Vec<Arc<PositionFix>>,
    interval: Duration,
    quit_when_done: bool,
}

/// Publishes a list of fixes as [`EventKind::PositionFixEvent`]s, one per interval.
///
/// The fixes are published in the given order. With `quit_when_done` the
/// module publishes a [`EventKind::QuitEvent`] after the last fix, which
/// stops every module on the bus.
pub struct FixReplayModule {
    ctx: ModuleCtx,
    config: Arc<FixReplayConfig>,
}

impl FixReplayModule {
    pub fn new(
        ctx: ModuleCtx,
        fixes: Vec<PositionFix>,
        interval: Duration,
        quit_when_done: bool,
    ) -> Result<Self, Error> {
        if fixes.is_empty() {
            return Err(Error::new(ErrorKind::InvalidData, "fixes parameter is empty"));
        }
        if interval.is_zero() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "replay interval must not be zero",
            ));
        }
        Ok(FixReplayModule {
            ctx,
            config: Arc::new(FixReplayConfig {
                fixes: fixes.into_iter().map(Arc::new).collect(),
                interval,
                quit_when_done,
            }),
        })
    }
}

#[async_trait::async_trait]
impl Module for FixReplayModule {
    async fn run(&mut self) -> Result<(), ()> {
        let config = self.config.clone();
        let sender = self.ctx.sender.clone();
        let replay_task_handle = tokio::spawn(async move {
            replay_task(sender, config).await;
        });
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                replay_task_handle.abort();
                                run = false;
                            }
                        }
                        Err(e) => error!("Failed to receive event. Error {}", e),
                    }
                }
            }
        }
        Ok(())
    }
}

async fn replay_task(sender: tokio::sync::broadcast::Sender<Event>, config: Arc<FixReplayConfig>) {
    let mut timer = tokio::time::interval(config.interval);
    info!("Replaying {} fixes", config.fixes.len());
    for fix in config.fixes.iter() {
        timer.tick().await;
        debug!(
            "Replaying fix from {} at {}",
            fix.provider(),
            fix.timestamp()
        );
        let _ = sender.send(Event {
            kind: EventKind::PositionFixEvent(fix.clone()),
        });
    }
    info!("Replay finished");
    if config.quit_when_done {
        // Let the last fix be picked up before everybody stops.
        timer.tick().await;
        let _ = sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    }
}
