// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{Event, EventBus, EventKind, EventKindType};
use tokio::time::timeout;
use tracing::debug;

/// Sends a quit signal to a running module and waits for it to stop gracefully.
///
/// This function publishes a [`QuitEvent`](EventKind::QuitEvent) through the given [`EventBus`],
/// signaling the target module to terminate. It then waits for the module's task
/// (represented by the provided [`tokio::task::JoinHandle`]) to complete within 100ms.
///
/// # Panics
/// This function panics if:
/// - The module does not stop within the timeout duration.
/// - The task panicked or returned an error (`Err(())`).
pub async fn stop_module(
    event_bus: &EventBus,
    handle: &mut tokio::task::JoinHandle<Result<(), ()>>,
) {
    event_bus.publish(&Event {
        kind: EventKind::QuitEvent,
    });
    timeout(std::time::Duration::from_millis(100), handle)
        .await
        .expect("Module doesn't handle quit event in timeout")
        .expect("Module task panicked")
        .expect("Module returned an error");
}

/// Waits for a specific type of [`Event`] on a broadcast receiver within a given duration.
///
/// The total waiting time is divided into ten polling steps so the function
/// stays responsive to events of other types arriving in between. Only the
/// variant is compared, payloads are ignored.
///
/// # Panics
///
/// Panics if no matching event is received within `duration`.
pub async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
) -> Event {
    let deadline = tokio::time::Instant::now() + duration;
    let step_duration = duration / 10;
    while tokio::time::Instant::now() < deadline {
        if let Ok(Ok(event)) = timeout(step_duration, rx.recv()).await
            && EventKindType::from(&event.kind) == exp_event
        {
            return event;
        }
    }
    panic!("Failed to receive event of type {:?}", exp_event);
}

/// Asserts that no event of type `unexp_event` arrives within `duration`.
///
/// Events of other types are consumed and ignored.
///
/// # Panics
///
/// Panics with the offending event if one of the given type is received.
pub async fn assert_no_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    unexp_event: EventKindType,
) {
    let deadline = tokio::time::Instant::now() + duration;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            return;
        }
        match timeout(remaining, rx.recv()).await {
            Ok(Ok(event)) if EventKindType::from(&event.kind) == unexp_event => {
                panic!("Received unexpected event {:?}", event);
            }
            Ok(Ok(event)) => debug!("Ignoring event {:?}", event),
            Ok(Err(e)) => debug!("Receiver error while waiting: {}", e),
            Err(_) => return,
        }
    }
}
