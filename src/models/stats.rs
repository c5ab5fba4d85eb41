// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly statistics aggregates.

use chrono::{Duration, NaiveDate};

/// A Monday to Sunday calendar week, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Totals for the activities of one week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyStats {
    /// Total distance (km, 2 decimals)
    pub covered_distance: f64,
    /// Total moving time
    pub moving_time: Duration,
    /// Total elevation gain (m, 2 decimals)
    pub covered_elevation: f64,
}

impl Default for WeeklyStats {
    fn default() -> Self {
        Self {
            covered_distance: 0.0,
            moving_time: Duration::zero(),
            covered_elevation: 0.0,
        }
    }
}

/// A week range paired with its statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklySummary {
    pub range: WeekRange,
    pub stats: WeeklyStats,
}
