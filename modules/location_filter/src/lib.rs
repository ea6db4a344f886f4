// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Location filter
//!
//! Reduces a stream of raw position fixes to the best fix seen so far and
//! notifies observers whenever that fix changes.

use algorithm::evaluate_fix;
use common::filter_config::FilterConfig;
use common::position::PositionFix;
use std::sync::Arc;
use tracing::{debug, info};

mod module;

pub use module::LocationFilterModule;

/// Receives every fix accepted by a [`LocationFilter`].
///
/// Observers are called synchronously from [`LocationFilter::submit`], once
/// per accepted fix.
pub trait PositionFixObserver: Send + Sync {
    fn on_position_fix(&self, fix: &PositionFix);
}

impl<F> PositionFixObserver for F
where
    F: Fn(&PositionFix) + Send + Sync,
{
    fn on_position_fix(&self, fix: &PositionFix) {
        self(fix)
    }
}

/// The fix retained by a [`LocationFilter`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    current_best: Option<PositionFix>,
}

impl FilterState {
    pub fn current_best(&self) -> Option<&PositionFix> {
        self.current_best.as_ref()
    }

    pub fn clear(&mut self) {
        self.current_best = None;
    }
}

/// Keeps the best fix of a location subscription.
///
/// Every fix handed to [`submit`](Self::submit) is compared with the
/// retained fix by [`algorithm::evaluate_fix`]. Accepted fixes replace the
/// retained one and are passed to all registered observers.
///
/// The filter has no internal locking; callers delivering fixes from
/// several threads must serialize access.
pub struct LocationFilter {
    config: FilterConfig,
    state: FilterState,
    observers: Vec<Arc<dyn PositionFixObserver>>,
}

impl LocationFilter {
    pub fn new(config: FilterConfig) -> Self {
        LocationFilter {
            config,
            state: FilterState::default(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Returns the best fix received since creation or the last [`reset`](Self::reset).
    pub fn current_best(&self) -> Option<&PositionFix> {
        self.state.current_best()
    }

    /// Offers `candidate` to the filter.
    ///
    /// Returns `true` if the fix became the new best fix. In that case all
    /// observers have been notified before this returns. Rejected fixes
    /// leave the state untouched and notify nobody.
    pub fn submit(&mut self, candidate: PositionFix) -> bool {
        let decision = evaluate_fix(&candidate, self.state.current_best(), &self.config);
        if !decision.is_accepted() {
            debug!(
                "Rejected fix from {} at {} (accuracy {} m): {:?}",
                candidate.provider(),
                candidate.timestamp(),
                candidate.accuracy(),
                decision
            );
            return false;
        }

        info!(
            "New best fix from {} at {}: lat {}, lon {}, accuracy {} m ({:?})",
            candidate.provider(),
            candidate.timestamp(),
            candidate.position().latitude,
            candidate.position().longitude,
            candidate.accuracy(),
            decision
        );
        let best = self.state.current_best.insert(candidate);
        for observer in &self.observers {
            observer.on_position_fix(best);
        }
        true
    }

    /// Drops the retained fix. The next submitted fix is accepted unconditionally.
    pub fn reset(&mut self) {
        debug!("Location filter reset");
        self.state.clear();
    }

    /// Registers `observer`. Registering the same observer twice has no effect.
    pub fn register_observer(&mut self, observer: Arc<dyn PositionFixObserver>) {
        if self.is_registered(&observer) {
            return;
        }
        self.observers.push(observer);
    }

    /// Removes `observer`, returns `false` if it wasn't registered.
    pub fn unregister_observer(&mut self, observer: &Arc<dyn PositionFixObserver>) -> bool {
        let count = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != count
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn is_registered(&self, observer: &Arc<dyn PositionFixObserver>) -> bool {
        self.observers.iter().any(|o| Arc::ptr_eq(o, observer))
    }
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
