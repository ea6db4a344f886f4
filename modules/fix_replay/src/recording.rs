// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::PositionFix;
use futures::StreamExt;
use std::{
    io::{Error, ErrorKind},
    path::Path,
};
use tokio_util::codec::{FramedRead, LinesCodec};

/// Parses one JSON-lines record. Blank lines yield `None`.
fn parse_line(line: &str, line_number: usize) -> Result<Option<PositionFix>, Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let fix = PositionFix::from_json(line).map_err(|e| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Line {line_number}: malformed fix. Error: {e}"),
        )
    })?;
    fix.validate()
        .map_err(|e| Error::new(e.kind(), format!("Line {line_number}: {e}")))?;
    Ok(Some(fix))
}

/// Reads a fix recording with one JSON encoded [`PositionFix`] per line.
///
/// ```json
/// {"timestamp":0,"position":{"latitude":52.02,"longitude":11.28},"accuracy":8.0,"provider":"gps"}
/// ```
///
/// Fails on the first malformed line or fix with negative accuracy.
pub async fn load_json_lines(path: &Path) -> Result<Vec<PositionFix>, Error> {
    let file = tokio::fs::File::open(path).await?;
    let mut framed = FramedRead::new(file, LinesCodec::new());
    let mut fixes = Vec::new();
    let mut line_number = 0;
    while let Some(line) = framed.next().await {
        line_number += 1;
        let line = line.map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        if let Some(fix) = parse_line(&line, line_number)? {
            fixes.push(fix);
        }
    }
    Ok(fixes)
}

/// Same as [`load_json_lines`] for a recording that is already in memory.
pub fn parse_json_lines(content: &str) -> Result<Vec<PositionFix>, Error> {
    let mut fixes = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(fix) = parse_line(line, index + 1)? {
            fixes.push(fix);
        }
    }
    Ok(fixes)
}
