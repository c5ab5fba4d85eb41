// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity record as stored in the local cache.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One activity exactly as Strava returned it.
///
/// Records are kept as a field map rather than a fixed struct: cached pages
/// come from different API versions and activity types, and the query
/// engine reports incompatible field types itself instead of rejecting the
/// whole page at load time. Records are never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activity {
    fields: Map<String, Value>,
}

impl Activity {
    /// Raw value of a field. JSON `null` counts as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Activity name/title (empty when missing).
    pub fn name(&self) -> &str {
        self.field("name").and_then(Value::as_str).unwrap_or("")
    }

    /// Activity type as recorded (Run, Ride, ...), empty when missing.
    pub fn activity_type(&self) -> &str {
        self.field("type").and_then(Value::as_str).unwrap_or("")
    }

    /// Strava activity ID, rendered as text.
    pub fn id(&self) -> Option<String> {
        self.field("id").map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Start timestamp text (`start_date_local`).
    pub fn start_date_local(&self) -> Option<&str> {
        self.field("start_date_local").and_then(Value::as_str)
    }
}

/// Activity types the CLI accepts for `--type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Run,
    Ride,
    Hike,
    Workout,
    RockClimbing,
    NordicSki,
    AlpineSki,
    WeightTraining,
}

impl ActivityType {
    pub const ALL: [ActivityType; 8] = [
        ActivityType::Run,
        ActivityType::Ride,
        ActivityType::Hike,
        ActivityType::Workout,
        ActivityType::RockClimbing,
        ActivityType::NordicSki,
        ActivityType::AlpineSki,
        ActivityType::WeightTraining,
    ];

    /// Name as Strava spells it in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Run => "Run",
            ActivityType::Ride => "Ride",
            ActivityType::Hike => "Hike",
            ActivityType::Workout => "Workout",
            ActivityType::RockClimbing => "RockClimbing",
            ActivityType::NordicSki => "NordicSki",
            ActivityType::AlpineSki => "AlpineSki",
            ActivityType::WeightTraining => "WeightTraining",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an activity type outside the known set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown activity type {0:?}")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}
