// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::position::{Position, PositionFix, ProviderId};
use chrono::{DateTime, Utc};

pub const GPS: &str = "gps";
pub const NETWORK: &str = "network";

/// Builds a fix `millis` milliseconds after the Unix epoch.
///
/// Panics if `millis` is outside the range chrono can represent.
pub fn fix_at(millis: i64, accuracy: f64, provider: &str) -> PositionFix {
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_else(|| panic!("Timestamp {millis} ms is out of range"));
    PositionFix::new(
        timestamp,
        Position::new(52.026649, 11.282535),
        accuracy,
        ProviderId::new(provider),
    )
}

/// Same as [`fix_at`] but placed at the given coordinate.
pub fn fix_at_position(
    millis: i64,
    accuracy: f64,
    provider: &str,
    latitude: f64,
    longitude: f64,
) -> PositionFix {
    let fix = fix_at(millis, accuracy, provider);
    PositionFix::new(
        fix.timestamp(),
        Position::new(latitude, longitude),
        fix.accuracy(),
        fix.provider().clone(),
    )
}
