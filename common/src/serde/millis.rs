// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::TimeDelta;
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(delta.num_milliseconds())
}

/// Deserialize a millisecond count like `120000` into a `chrono::TimeDelta`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = i64::deserialize(deserializer)?;
    TimeDelta::try_milliseconds(millis)
        .ok_or_else(|| serde::de::Error::custom(format!("{millis} ms is out of range")))
}
