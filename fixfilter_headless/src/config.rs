// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::TimeDelta;
use common::filter_config::FilterConfig;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Location of the config file used when none is given on the command line.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("fixfilter");
    path.push("filter.json");
    Some(path)
}

/// Builds the filter configuration.
///
/// An explicitly given file must exist. Without one, the default config
/// file is used if present, otherwise the built-in defaults. Threshold
/// overrides are applied last.
pub fn resolve_filter_config(
    config_file: Option<&Path>,
    default_file: Option<&Path>,
    newer_threshold_ms: Option<i64>,
    accuracy_threshold: Option<f64>,
) -> Result<FilterConfig, Error> {
    let mut config = match (config_file, default_file) {
        (Some(path), _) => {
            info!("Loading filter config from {}", path.display());
            FilterConfig::from_file(path)?
        }
        (None, Some(path)) if path.exists() => {
            info!("Loading filter config from {}", path.display());
            FilterConfig::from_file(path)?
        }
        _ => {
            debug!("No filter config file, using defaults");
            FilterConfig::default()
        }
    };

    if let Some(millis) = newer_threshold_ms {
        config.significantly_newer = TimeDelta::try_milliseconds(millis).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("newer threshold {millis} ms is out of range"),
            )
        })?;
    }
    if let Some(meters) = accuracy_threshold {
        config.significantly_less_accurate = meters;
    }
    config
        .validate()
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    Ok(config)
}
