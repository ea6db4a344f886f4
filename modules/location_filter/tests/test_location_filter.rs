// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::TimeDelta;
use common::filter_config::FilterConfig;
use common::position::PositionFix;
use common::test_helper::fixes::{GPS, NETWORK, fix_at};
use location_filter::{LocationFilter, PositionFixObserver};
use std::sync::{Arc, Mutex};

/// Observer that records every fix it is notified with.
#[derive(Default)]
struct RecordingObserver {
    fixes: Mutex<Vec<PositionFix>>,
}

impl RecordingObserver {
    fn received(&self) -> Vec<PositionFix> {
        self.fixes.lock().unwrap().clone()
    }
}

impl PositionFixObserver for RecordingObserver {
    fn on_position_fix(&self, fix: &PositionFix) {
        self.fixes.lock().unwrap().push(fix.clone());
    }
}

fn filter_with_observer() -> (LocationFilter, Arc<RecordingObserver>) {
    let mut filter = LocationFilter::default();
    let observer = Arc::new(RecordingObserver::default());
    filter.register_observer(observer.clone());
    (filter, observer)
}

#[test]
fn first_fix_is_accepted() {
    let (mut filter, observer) = filter_with_observer();
    assert!(filter.current_best().is_none());

    let fix = fix_at(0, 5_000.0, NETWORK);
    assert!(filter.submit(fix.clone()));
    assert_eq!(filter.current_best(), Some(&fix));
    assert_eq!(observer.received(), vec![fix]);
}

#[test]
fn significantly_newer_fix_is_accepted() {
    let (mut filter, observer) = filter_with_observer();
    let best = fix_at(0, 50.0, GPS);
    let candidate = fix_at(150_000, 80.0, GPS);

    assert!(filter.submit(best.clone()));
    assert!(filter.submit(candidate.clone()));
    assert_eq!(filter.current_best(), Some(&candidate));
    assert_eq!(observer.received(), vec![best, candidate]);
}

#[test]
fn significantly_less_accurate_fix_from_other_provider_is_rejected() {
    let (mut filter, observer) = filter_with_observer();
    let best = fix_at(0, 10.0, GPS);

    assert!(filter.submit(best.clone()));
    assert!(!filter.submit(fix_at(60_000, 300.0, NETWORK)));
    assert_eq!(filter.current_best(), Some(&best));
    assert_eq!(observer.received(), vec![best]);
}

#[test]
fn slightly_less_accurate_fix_from_same_provider_is_accepted() {
    let (mut filter, _observer) = filter_with_observer();
    let candidate = fix_at(60_000, 150.0, GPS);

    assert!(filter.submit(fix_at(0, 10.0, GPS)));
    assert!(filter.submit(candidate.clone()));
    assert_eq!(filter.current_best(), Some(&candidate));
}

#[test]
fn significantly_older_fix_is_rejected() {
    let (mut filter, observer) = filter_with_observer();
    assert!(filter.submit(fix_at(200_000, 500.0, NETWORK)));
    assert!(!filter.submit(fix_at(0, 1.0, GPS)));
    assert_eq!(observer.received().len(), 1);
}

#[test]
fn same_fix_twice_is_rejected() {
    let (mut filter, observer) = filter_with_observer();
    let fix = fix_at(1_000, 20.0, GPS);
    assert!(filter.submit(fix.clone()));
    assert!(!filter.submit(fix.clone()));
    assert_eq!(observer.received(), vec![fix]);
}

#[test]
fn out_of_order_more_accurate_fix_is_accepted() {
    let (mut filter, _observer) = filter_with_observer();
    let older_but_better = fix_at(30_000, 5.0, NETWORK);
    assert!(filter.submit(fix_at(90_000, 40.0, GPS)));
    assert!(filter.submit(older_but_better.clone()));
    assert_eq!(filter.current_best(), Some(&older_but_better));
}

#[test]
fn reset_clears_the_best_fix() {
    let (mut filter, observer) = filter_with_observer();
    assert!(filter.submit(fix_at(200_000, 5.0, GPS)));
    filter.reset();
    assert!(filter.current_best().is_none());

    // Would be significantly older without the reset.
    let fix = fix_at(0, 900.0, NETWORK);
    assert!(filter.submit(fix.clone()));
    assert_eq!(filter.current_best(), Some(&fix));
    assert_eq!(observer.received().len(), 2);
}

#[test]
fn all_observers_are_notified_once() {
    let mut filter = LocationFilter::default();
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    filter.register_observer(first.clone());
    filter.register_observer(second.clone());
    // Registering again must not lead to a second notification.
    filter.register_observer(first.clone());
    assert_eq!(filter.observer_count(), 2);

    let fix = fix_at(0, 10.0, GPS);
    filter.submit(fix.clone());
    assert_eq!(first.received(), vec![fix.clone()]);
    assert_eq!(second.received(), vec![fix]);
}

#[test]
fn unregistered_observer_is_not_notified() {
    let mut filter = LocationFilter::default();
    let kept = Arc::new(RecordingObserver::default());
    let removed = Arc::new(RecordingObserver::default());
    let removed_handle: Arc<dyn PositionFixObserver> = removed.clone();
    filter.register_observer(kept.clone());
    filter.register_observer(removed_handle.clone());

    assert!(filter.unregister_observer(&removed_handle));
    assert!(!filter.unregister_observer(&removed_handle));
    assert_eq!(filter.observer_count(), 1);

    filter.submit(fix_at(0, 10.0, GPS));
    assert_eq!(kept.received().len(), 1);
    assert!(removed.received().is_empty());
}

#[test]
fn closure_observer() {
    let mut filter = LocationFilter::default();
    let accuracies = Arc::new(Mutex::new(Vec::new()));
    let sink = accuracies.clone();
    filter.register_observer(Arc::new(move |fix: &PositionFix| {
        sink.lock().unwrap().push(fix.accuracy());
    }));

    filter.submit(fix_at(0, 30.0, GPS));
    filter.submit(fix_at(1_000, 40.0, NETWORK));
    filter.submit(fix_at(2_000, 20.0, NETWORK));
    assert_eq!(*accuracies.lock().unwrap(), vec![30.0, 20.0]);
}

#[test]
fn configured_thresholds_are_used() {
    let mut filter = LocationFilter::new(FilterConfig::new(TimeDelta::seconds(10), 500.0));
    assert!(filter.submit(fix_at(0, 10.0, GPS)));
    // Newer by more than ten seconds wins regardless of accuracy.
    assert!(filter.submit(fix_at(10_001, 2_000.0, NETWORK)));
    // Within 500 m of loss from the same provider is still accepted.
    assert!(filter.submit(fix_at(15_000, 2_400.0, NETWORK)));
    assert_eq!(filter.current_best().map(|f| f.accuracy()), Some(2_400.0));
}
