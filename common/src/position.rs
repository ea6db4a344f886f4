// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::timestamp_ms;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Error, ErrorKind};

/// Represents a geographical coordinate with latitude and longitude.
///
/// The `Position` struct is commonly used to store a point on Earth
/// in decimal degrees. Latitude values range from -90.0 to 90.0, and
/// longitude values range from -180.0 to 180.0.
///
/// # Example
///
/// ```rust
/// use common::position::Position;
///
/// let pos = Position {
///     latitude: 52.5200,
///     longitude: 13.4050,
/// };
///
/// println!("{:?}", pos);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Creates a new [`Position`] with the given latitude and longitude.
    ///
    /// ```rust
    /// use common::position::Position;
    ///
    /// let pos = Position::new(52.5200, 13.4050);
    /// assert_eq!(pos.latitude, 52.5200);
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Opaque identity of the subsystem that produced a fix, e.g. `gps` or `network`.
///
/// Two fixes come from the same provider when their identifiers compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        ProviderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        ProviderId::new(id)
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        ProviderId(id)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single reported position reading.
///
/// Besides the coordinate a fix carries the instant it was obtained, the
/// estimated error radius in meters and the provider that produced it.
/// Smaller accuracy values are better. Fixes may arrive out of
/// chronological order.
///
/// `accuracy` is expected to be non-negative. [`PositionFix::new`] does not
/// check this; use [`PositionFix::validate`] on untrusted input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    #[serde(with = "timestamp_ms")]
    timestamp: DateTime<Utc>,
    position: Position,
    accuracy: f64,
    provider: ProviderId,
}

impl PositionFix {
    /// Creates a new [`PositionFix`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::position::{Position, PositionFix};
    ///
    /// let fix = PositionFix::new(
    ///     chrono::Utc::now(),
    ///     Position::new(52.0, 13.0),
    ///     12.5,
    ///     "gps".into(),
    /// );
    /// assert_eq!(fix.provider().as_str(), "gps");
    /// ```
    pub fn new(
        timestamp: DateTime<Utc>,
        position: Position,
        accuracy: f64,
        provider: ProviderId,
    ) -> PositionFix {
        PositionFix {
            timestamp,
            position,
            accuracy,
            provider,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Checks that the accuracy is a finite, non-negative radius.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Fix from provider {} at {} has invalid accuracy {}",
                    self.provider, self.timestamp, self.accuracy
                ),
            ));
        }
        Ok(())
    }

    /// Returns the instant the fix was obtained.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the estimated error radius in meters.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Signed time between `other` and this fix.
    ///
    /// The result is positive when this fix is newer than `other`.
    pub fn time_since(&self, other: &PositionFix) -> TimeDelta {
        self.timestamp - other.timestamp
    }
}
