// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attribute filters: parsing `"<symbol> <literal>"` text and evaluating it.
//!
//! The literal is coerced by the attribute it targets, so a parsed filter
//! always holds a value of the same kind the formatter yields for that
//! attribute (km number, calendar date, pace or moving-time duration).

use chrono::{Duration, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, Result};
use crate::models::{Activity, Attribute, Quantity, QuantityKind};
use crate::services::format::attribute_value;
use crate::time_utils::{
    duration_from_seconds, format_duration, parse_clock_duration, two_digit_sexagesimal,
};

/// One of the five supported comparison symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::Equal => "==",
            Comparison::GreaterOrEqual => ">=",
            Comparison::LessOrEqual => "<=",
        }
    }

    /// Whether `record <symbol> literal` holds, given `record.cmp(literal)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Greater => ordering == Ordering::Greater,
            Comparison::Less => ordering == Ordering::Less,
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
            Comparison::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

impl FromStr for Comparison {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ">" => Ok(Comparison::Greater),
            "<" => Ok(Comparison::Less),
            "==" => Ok(Comparison::Equal),
            ">=" => Ok(Comparison::GreaterOrEqual),
            "<=" => Ok(Comparison::LessOrEqual),
            other => Err(QueryError::InvalidSymbol(other.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed comparison against one attribute, e.g. `distance > 30`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeFilter {
    pub attribute: Attribute,
    pub comparison: Comparison,
    pub value: Quantity,
}

impl AttributeFilter {
    /// Parse `"<symbol> <literal>"` for `attribute`.
    pub fn parse(attribute: Attribute, text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [symbol, literal] = tokens[..] else {
            return Err(QueryError::MalformedFilter(text.to_string()));
        };
        let comparison = symbol.parse()?;
        let value = parse_literal(attribute, literal)?;
        Ok(Self {
            attribute,
            comparison,
            value,
        })
    }

    /// Compare an already formatted record value against this filter.
    ///
    /// Values of another kind never match; the parser makes that unreachable
    /// for values produced by [`attribute_value`].
    pub fn matches(&self, value: &Quantity) -> bool {
        match value.partial_cmp(&self.value) {
            Some(ordering) => self.comparison.holds(ordering),
            None => {
                tracing::warn!(
                    attribute = %self.attribute,
                    value = %value,
                    value_kind = ?value.kind(),
                    filter_kind = ?self.value.kind(),
                    filter = %self,
                    "Incomparable values in attribute filter"
                );
                false
            }
        }
    }

    /// Evaluate the filter against an activity.
    ///
    /// A record without the attribute does not match (it is not an error).
    pub fn evaluate(&self, activity: &Activity) -> Result<bool> {
        Ok(attribute_value(activity, self.attribute)?.is_some_and(|v| self.matches(&v)))
    }
}

impl fmt::Display for AttributeFilter {
    /// Renders text that [`AttributeFilter::parse`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.comparison)?;
        match (self.attribute, self.value) {
            (Attribute::AveragePace, Quantity::Duration(d)) => {
                let total = d.num_seconds();
                write!(f, "{}:{:02}", total / 60, total % 60)
            }
            (_, Quantity::Duration(d)) => f.write_str(&format_duration(d)),
            (_, value) => write!(f, "{}", value),
        }
    }
}

/// Parse a filter literal into the value kind of `attribute`.
pub fn parse_literal(attribute: Attribute, literal: &str) -> Result<Quantity> {
    let invalid = || QueryError::InvalidLiteral(literal.to_string());
    match (attribute, attribute.kind()) {
        (Attribute::AveragePace, _) => pace_from_str(literal).map(Quantity::Duration),
        (_, QuantityKind::Date) => NaiveDate::parse_from_str(literal, "%Y-%m-%d")
            .map(Quantity::Date)
            .map_err(|_| invalid()),
        (_, QuantityKind::Duration) => parse_clock_duration(literal)
            .or_else(|| parse_finite(literal).and_then(duration_from_seconds))
            .map(Quantity::Duration)
            .ok_or_else(invalid),
        (_, QuantityKind::Number) => parse_finite(literal)
            .map(Quantity::Number)
            .ok_or_else(invalid),
    }
}

/// Parse a pace literal `m:ss` / `mm:ss` (minutes per km).
///
/// Minutes are `0..=59` with an optional leading zero, seconds are exactly
/// two digits. An hour component is rejected.
pub fn pace_from_str(literal: &str) -> Result<Duration> {
    let invalid = || QueryError::InvalidPace(literal.to_string());
    let (minutes, seconds) = literal.split_once(':').ok_or_else(invalid)?;
    if minutes.is_empty() || minutes.len() > 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    let seconds = two_digit_sexagesimal(seconds).ok_or_else(invalid)?;
    if minutes >= 60 {
        return Err(invalid());
    }
    Ok(Duration::seconds(minutes * 60 + seconds))
}

fn parse_finite(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}
