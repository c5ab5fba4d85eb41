// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sorting activities by attribute.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, Result};
use crate::models::{Activity, Attribute, Quantity};
use crate::services::format::attribute_value;
use crate::time_utils::parse_strava_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QueryError::InvalidSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Sort request in `attribute:order` form, e.g. `distance:desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub attribute: Attribute,
    pub order: SortOrder,
}

impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let (attribute, order) = s
            .split_once(':')
            .ok_or_else(|| QueryError::MalformedSort(s.to_string()))?;
        let order = order.parse()?;
        let attribute = attribute.parse()?;
        Ok(Self { attribute, order })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.attribute, self.order)
    }
}

/// Ordering key for one activity.
///
/// Dates order by the full start timestamp and distance or speed by the
/// unrounded raw number, so activities on the same day or within the
/// display precision still sort apart. Everything else orders by its
/// formatted value.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey {
    Timestamp(NaiveDateTime),
    Raw(f64),
    Formatted(Quantity),
}

fn sort_key(activity: &Activity, attribute: Attribute) -> Result<Option<SortKey>> {
    // Formatting first keeps type errors and absence identical to filtering.
    let Some(value) = attribute_value(activity, attribute)? else {
        return Ok(None);
    };
    let raw = activity.field(attribute.field());
    let key = match attribute {
        Attribute::Date => raw
            .and_then(Value::as_str)
            .and_then(parse_strava_timestamp)
            .map(SortKey::Timestamp),
        Attribute::Distance | Attribute::AverageSpeed => {
            raw.and_then(Value::as_f64).map(SortKey::Raw)
        }
        _ => None,
    };
    Ok(Some(key.unwrap_or(SortKey::Formatted(value))))
}

/// Sort activities by `attribute`.
///
/// Activities without the attribute cannot be ordered and are dropped.
/// The sort is stable: ties keep their input order in both directions.
pub fn sort_by<'a, I>(
    activities: I,
    attribute: Attribute,
    order: SortOrder,
) -> Result<Vec<&'a Activity>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut keyed: Vec<(SortKey, &'a Activity)> = Vec::new();
    let mut dropped = 0usize;
    for activity in activities {
        match sort_key(activity, attribute)? {
            Some(value) => keyed.push((value, activity)),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(
            attribute = %attribute,
            dropped,
            "Dropped activities missing sort attribute"
        );
    }

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    Ok(keyed.into_iter().map(|(_, activity)| activity).collect())
}

/// Sort using an `attribute:order` argument.
pub fn sort_by_arg<'a, I>(activities: I, arg: &str) -> Result<Vec<&'a Activity>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let spec: SortSpec = arg.parse()?;
    sort_by(activities, spec.attribute, spec.order)
}
