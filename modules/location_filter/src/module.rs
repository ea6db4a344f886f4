// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{LocationFilter, PositionFixObserver};
use async_trait::async_trait;
use common::filter_config::FilterConfig;
use common::position::PositionFix;
use module_core::{Event, EventKind, Module, ModuleCtx};
use std::sync::Arc;
use tracing::{error, info};

/// Republishes accepted fixes as [`EventKind::BestPositionFixEvent`].
struct BestFixPublisher {
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl PositionFixObserver for BestFixPublisher {
    fn on_position_fix(&self, fix: &PositionFix) {
        let _ = self.sender.send(Event {
            kind: EventKind::BestPositionFixEvent(Arc::new(fix.clone())),
        });
    }
}

/// Runs a [`LocationFilter`] on the event bus.
///
/// The module feeds every [`EventKind::PositionFixEvent`] into its filter
/// and publishes each accepted fix as [`EventKind::BestPositionFixEvent`].
/// [`EventKind::ResetFilterEvent`] drops the retained fix. Since the event
/// loop handles one event at a time, fixes reach the filter serialized.
pub struct LocationFilterModule {
    ctx: ModuleCtx,
    filter: LocationFilter,
}

impl LocationFilterModule {
    pub fn new(ctx: ModuleCtx, config: FilterConfig) -> Self {
        let mut filter = LocationFilter::new(config);
        filter.register_observer(Arc::new(BestFixPublisher {
            sender: ctx.sender.clone(),
        }));
        LocationFilterModule { ctx, filter }
    }

    /// Gives access to the filter, e.g. to register additional observers
    /// before the module runs.
    pub fn filter(&mut self) -> &mut LocationFilter {
        &mut self.filter
    }

    pub fn current_best(&self) -> Option<&PositionFix> {
        self.filter.current_best()
    }
}

#[async_trait]
impl Module for LocationFilterModule {
    /// Runs the event loop until a `QuitEvent` is received.
    async fn run(&mut self) -> Result<(), ()> {
        info!(
            "Location filter started. Significantly newer after {} ms, significantly less accurate above {} m",
            self.filter.config().significantly_newer.num_milliseconds(),
            self.filter.config().significantly_less_accurate
        );
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => run = false,
                                EventKind::PositionFixEvent(fix) => {
                                    self.filter.submit((*fix).clone());
                                }
                                EventKind::ResetFilterEvent => self.filter.reset(),
                                _ => (),
                            }
                        }
                        Err(e) => error!("Failed to receive event. Error {}", e)
                    }
                }
            }
        }
        Ok(())
    }
}
