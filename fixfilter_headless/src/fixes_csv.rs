// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::{DateTime, Utc};
use common::position::{Position, PositionFix, ProviderId};
use serde::Deserialize;
use std::io::{Error, ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// One row of a CSV fix recording.
#[derive(Debug, Deserialize)]
struct FixRecord {
    timestamp_ms: i64,
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    provider: String,
}

impl FixRecord {
    fn into_fix(self, row: usize) -> Result<PositionFix, Error> {
        let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms) else {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("Row {row}: timestamp {} is out of range", self.timestamp_ms),
            ));
        };
        let fix = PositionFix::new(
            timestamp,
            Position::new(self.latitude, self.longitude),
            self.accuracy,
            ProviderId::from(self.provider),
        );
        fix.validate()
            .map_err(|e| Error::new(e.kind(), format!("Row {row}: {e}")))?;
        Ok(fix)
    }
}

/// Reads fixes from CSV with the header `timestamp_ms,latitude,longitude,accuracy,provider`.
pub fn read_fixes<R: Read>(reader: R) -> Result<Vec<PositionFix>, Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut fixes = Vec::new();
    for (index, result) in rdr.deserialize::<FixRecord>().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| {
            Error::new(
                ErrorKind::InvalidData,
                format!("Row {row}: malformed record. Error: {e}"),
            )
        })?;
        fixes.push(record.into_fix(row)?);
    }
    debug!("length of fixes: {}", fixes.len());
    Ok(fixes)
}

pub fn read_fixes_from_file(path: &Path) -> Result<Vec<PositionFix>, Error> {
    let file = std::fs::File::open(path)?;
    read_fixes(file)
}
