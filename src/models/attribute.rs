// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Queryable activity attributes and their typed values.

use chrono::{Duration, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;
use crate::time_utils::format_duration;

/// Logical attribute that can be filtered, sorted or displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Distance,
    ElevationGain,
    Heartrate,
    MovingTime,
    AverageSpeed,
    /// Derived from `average_speed`; there is no raw pace field.
    AveragePace,
    Date,
}

/// Shape of a formatted attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Number,
    Date,
    Duration,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Distance,
        Attribute::ElevationGain,
        Attribute::Heartrate,
        Attribute::MovingTime,
        Attribute::AverageSpeed,
        Attribute::AveragePace,
        Attribute::Date,
    ];

    /// Logical name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Distance => "distance",
            Attribute::ElevationGain => "elevation_gain",
            Attribute::Heartrate => "heartrate",
            Attribute::MovingTime => "moving_time",
            Attribute::AverageSpeed => "average_speed",
            Attribute::AveragePace => "average_pace",
            Attribute::Date => "date",
        }
    }

    /// Raw Strava field the value is read from.
    pub fn field(self) -> &'static str {
        match self {
            Attribute::Distance => "distance",
            Attribute::ElevationGain => "total_elevation_gain",
            Attribute::Heartrate => "average_heartrate",
            Attribute::MovingTime => "moving_time",
            Attribute::AverageSpeed | Attribute::AveragePace => "average_speed",
            Attribute::Date => "start_date_local",
        }
    }

    /// Display unit of the formatted value.
    pub fn unit(self) -> &'static str {
        match self {
            Attribute::Distance => "km",
            Attribute::ElevationGain => "m",
            Attribute::Heartrate => "bpm",
            Attribute::MovingTime => "h:mm:ss",
            Attribute::AverageSpeed => "km/h",
            Attribute::AveragePace => "min/km",
            Attribute::Date => "YYYY-MM-DD",
        }
    }

    /// Kind of value the formatter produces for this attribute.
    pub fn kind(self) -> QuantityKind {
        match self {
            Attribute::Date => QuantityKind::Date,
            Attribute::MovingTime | Attribute::AveragePace => QuantityKind::Duration,
            _ => QuantityKind::Number,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = QueryError;

    /// Resolve a logical name, or the raw field name of a stored attribute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Attribute::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .or_else(|| match key {
                "total_elevation_gain" => Some(Attribute::ElevationGain),
                "average_heartrate" => Some(Attribute::Heartrate),
                "start_date_local" => Some(Attribute::Date),
                _ => None,
            })
            .ok_or_else(|| QueryError::UnknownAttribute(s.to_string()))
    }
}

/// A formatted attribute value, comparable only with values of the same kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Number(f64),
    Date(NaiveDate),
    Duration(Duration),
}

impl Quantity {
    pub fn kind(&self) -> QuantityKind {
        match self {
            Quantity::Number(_) => QuantityKind::Number,
            Quantity::Date(_) => QuantityKind::Date,
            Quantity::Duration(_) => QuantityKind::Duration,
        }
    }
}

impl PartialOrd for Quantity {
    /// `None` for values of different kinds, or NaN numbers.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Quantity::Number(a), Quantity::Number(b)) => a.partial_cmp(b),
            (Quantity::Date(a), Quantity::Date(b)) => Some(a.cmp(b)),
            (Quantity::Duration(a), Quantity::Duration(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Quantity::Duration(d) => f.write_str(&format_duration(*d)),
        }
    }
}
