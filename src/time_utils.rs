// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Timestamp layout used by Strava for `start_date_local`.
const STRAVA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a Strava timestamp (`2024-01-15T10:30:00Z`).
///
/// Falls back to full RFC3339 so offsets and fractional seconds are accepted.
pub fn parse_strava_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STRAVA_TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Calendar date of a Strava timestamp, dropping the time of day.
pub fn parse_strava_date(value: &str) -> Option<NaiveDate> {
    parse_strava_timestamp(value).map(|dt| dt.date())
}

/// Format a duration as `H:MM:SS` (hours are not zero padded).
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Parse an `H:MM:SS` clock duration, the inverse of [`format_duration`].
///
/// Minutes and seconds must be two digits in `0..=59`.
pub fn parse_clock_duration(value: &str) -> Option<Duration> {
    let mut parts = value.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || hours.is_empty() {
        return None;
    }
    if !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes = two_digit_sexagesimal(minutes)?;
    let seconds = two_digit_sexagesimal(seconds)?;
    let total = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    Duration::try_seconds(total)
}

/// Whole-second duration from a count of seconds.
///
/// Fractions are truncated, as Strava records moving time in whole seconds.
/// `None` for negative, non-finite or out of range values.
pub fn duration_from_seconds(seconds: f64) -> Option<Duration> {
    if !seconds.is_finite() || seconds < 0.0 || seconds >= MAX_DURATION_SECONDS {
        return None;
    }
    Duration::try_seconds(seconds.trunc() as i64)
}

/// Upper bound (exclusive) for [`duration_from_seconds`], about 292 million years.
const MAX_DURATION_SECONDS: f64 = (i64::MAX / 1000) as f64;

/// Parse exactly two ASCII digits in `00..=59`.
pub(crate) fn two_digit_sexagesimal(value: &str) -> Option<i64> {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let parsed: i64 = value.parse().ok()?;
    (parsed < 60).then_some(parsed)
}
