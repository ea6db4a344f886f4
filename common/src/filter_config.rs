// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::millis;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::{
    io::{Error, ErrorKind},
    path::Path,
};

/// Thresholds used to decide whether a new fix supersedes the current best fix.
///
/// Both values may be configured through a JSON document; missing keys fall
/// back to the defaults.
///
/// ```json
/// {
///     "significantly_newer_ms": 120000,
///     "significantly_less_accurate": 200.0
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Age difference above which a fix counts as significantly newer (or older).
    #[serde(rename = "significantly_newer_ms", with = "millis")]
    pub significantly_newer: TimeDelta,

    /// Accuracy loss in meters above which a newer fix counts as significantly less accurate.
    pub significantly_less_accurate: f64,
}

impl FilterConfig {
    pub const DEFAULT_SIGNIFICANTLY_NEWER_MS: i64 = 120_000;
    pub const DEFAULT_SIGNIFICANTLY_LESS_ACCURATE: f64 = 200.0;

    pub fn new(significantly_newer: TimeDelta, significantly_less_accurate: f64) -> Self {
        FilterConfig {
            significantly_newer,
            significantly_less_accurate,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: FilterConfig = serde_json::from_str(json)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the configuration stored at `path`.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        FilterConfig::from_json(&content).map_err(|e| {
            Error::new(
                e.kind(),
                format!("Invalid filter config {}: {}", path.display(), e),
            )
        })
    }

    /// Rejects negative or non-finite thresholds.
    pub fn validate(&self) -> Result<(), Error> {
        if self.significantly_newer < TimeDelta::zero() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "significantly_newer_ms must not be negative, got {}",
                    self.significantly_newer.num_milliseconds()
                ),
            ));
        }
        if !self.significantly_less_accurate.is_finite() || self.significantly_less_accurate < 0.0
        {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "significantly_less_accurate must be a non-negative number, got {}",
                    self.significantly_less_accurate
                ),
            ));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            significantly_newer: TimeDelta::milliseconds(Self::DEFAULT_SIGNIFICANTLY_NEWER_MS),
            significantly_less_accurate: Self::DEFAULT_SIGNIFICANTLY_LESS_ACCURATE,
        }
    }
}
