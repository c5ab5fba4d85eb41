// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversion of raw Strava values into display units.
//!
//! Strava stores distances in meters, speeds in m/s, durations in seconds
//! and local start times as `Z`-suffixed timestamps. Every comparison,
//! sort and aggregate works on the converted [`Quantity`], so filter
//! literals typed by the user (km, km/h, mm:ss) line up with record values.

use chrono::Duration;
use serde_json::Value;

use crate::error::{QueryError, Result};
use crate::models::{Activity, Attribute, Quantity};
use crate::time_utils::{duration_from_seconds, parse_strava_date};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Meters to kilometers, rounded to two decimals.
pub fn meters_to_km(meters: f64) -> f64 {
    round2(meters / 1000.0)
}

/// m/s to km/h, rounded to two decimals.
pub fn speed_to_kmh(speed: f64) -> f64 {
    round2(speed * 3.6)
}

/// Running pace (time per km) for a speed in m/s.
///
/// Truncated to whole seconds. A zero (or negative) speed has no meaningful
/// pace and maps to a zero duration.
pub fn speed_to_pace(speed: f64) -> Duration {
    if speed <= 0.0 || !speed.is_finite() {
        return Duration::zero();
    }
    let pace_minutes = 60.0 / (speed * 3.6);
    // Resolve to microseconds first so 200.00000000000003s stays 200s.
    let micros = (pace_minutes * 60_000_000.0).round() as i64;
    Duration::seconds(micros / 1_000_000)
}

/// Convert a raw field value for `attribute` into its display unit.
pub fn format_value(attribute: Attribute, raw: &Value) -> Result<Quantity> {
    let field = attribute.field();
    match attribute {
        Attribute::Distance => Ok(Quantity::Number(meters_to_km(number(field, raw)?))),
        Attribute::AverageSpeed => Ok(Quantity::Number(speed_to_kmh(number(field, raw)?))),
        Attribute::AveragePace => Ok(Quantity::Duration(speed_to_pace(number(field, raw)?))),
        Attribute::MovingTime => duration_from_seconds(number(field, raw)?)
            .map(Quantity::Duration)
            .ok_or_else(|| {
                QueryError::unexpected_type(field, "a non-negative number of seconds", raw)
            }),
        Attribute::Date => raw
            .as_str()
            .and_then(parse_strava_date)
            .map(Quantity::Date)
            .ok_or_else(|| QueryError::unexpected_type(field, "an ISO-8601 timestamp", raw)),
        Attribute::ElevationGain | Attribute::Heartrate => Ok(Quantity::Number(number(field, raw)?)),
    }
}

/// Formatted value of `attribute` for one activity.
///
/// `Ok(None)` when the record has no such field: callers exclude the record
/// rather than fail. Pace is computed from speed here, the record itself is
/// left untouched.
pub fn attribute_value(activity: &Activity, attribute: Attribute) -> Result<Option<Quantity>> {
    activity
        .field(attribute.field())
        .map(|raw| format_value(attribute, raw))
        .transpose()
}

fn number(field: &'static str, raw: &Value) -> Result<f64> {
    raw.as_f64()
        .ok_or_else(|| QueryError::unexpected_type(field, "a number", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_distance_to_km() {
        assert_eq!(
            format_value(Attribute::Distance, &json!(39000)),
            Ok(Quantity::Number(39.0))
        );
        assert_eq!(
            format_value(Attribute::Distance, &json!(24567.8)),
            Ok(Quantity::Number(24.57))
        );
    }

    #[test]
    fn test_speed_to_kmh() {
        assert_eq!(
            format_value(Attribute::AverageSpeed, &json!(5.0)),
            Ok(Quantity::Number(18.0))
        );
    }

    #[test]
    fn test_speed_to_pace() {
        assert_eq!(speed_to_pace(5.0), Duration::seconds(200));
        assert_eq!(speed_to_pace(2.91), Duration::minutes(5) + Duration::seconds(43));
    }

    #[test]
    fn test_zero_speed_pace() {
        assert_eq!(speed_to_pace(0.0), Duration::zero());
        assert_eq!(
            format_value(Attribute::AveragePace, &json!(0)),
            Ok(Quantity::Duration(Duration::zero()))
        );
    }

    #[test]
    fn test_moving_time_and_date() {
        assert_eq!(
            format_value(Attribute::MovingTime, &json!(3723)),
            Ok(Quantity::Duration(Duration::seconds(3723)))
        );
        assert_eq!(
            format_value(Attribute::Date, &json!("2023-12-06T07:15:00Z")),
            Ok(Quantity::Date(NaiveDate::from_ymd_opt(2023, 12, 6).unwrap()))
        );
    }

    #[test]
    fn test_moving_time_whole_seconds() {
        assert_eq!(
            format_value(Attribute::MovingTime, &json!(3723.9)),
            Ok(Quantity::Duration(Duration::seconds(3723)))
        );
        assert_eq!(
            format_value(Attribute::MovingTime, &json!(0)),
            Ok(Quantity::Duration(Duration::zero()))
        );
    }

    #[test]
    fn test_moving_time_out_of_range_is_type_error() {
        for raw in [json!(-1e300), json!(1e300), json!(-1)] {
            let err = format_value(Attribute::MovingTime, &raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type, "{}", raw);
        }
    }

    #[test]
    fn test_extreme_numbers_do_not_panic() {
        assert!(matches!(
            format_value(Attribute::Distance, &json!(-1e300)),
            Ok(Quantity::Number(km)) if km < 0.0 && km.is_finite()
        ));
        assert_eq!(
            format_value(Attribute::AveragePace, &json!(-3.0)),
            Ok(Quantity::Duration(Duration::zero()))
        );
        assert!(matches!(
            format_value(Attribute::AveragePace, &json!(1e-300)),
            Ok(Quantity::Duration(_))
        ));
        assert!(matches!(
            format_value(Attribute::AverageSpeed, &json!(1e300)),
            Ok(Quantity::Number(_))
        ));
    }

    #[test]
    fn test_passthrough_attributes() {
        assert_eq!(
            format_value(Attribute::ElevationGain, &json!(1234.5)),
            Ok(Quantity::Number(1234.5))
        );
        assert_eq!(
            format_value(Attribute::Heartrate, &json!(152)),
            Ok(Quantity::Number(152.0))
        );
    }

    #[test]
    fn test_non_numeric_distance_is_type_error() {
        let err = format_value(Attribute::Distance, &json!("far")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("\"far\""));
    }

    #[test]
    fn test_bad_timestamp_is_type_error() {
        let err = format_value(Attribute::Date, &json!(20231206)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_attribute_value_absent_field() {
        let activity: Activity = serde_json::from_value(json!({"name": "Yoga"})).unwrap();
        assert_eq!(attribute_value(&activity, Attribute::Heartrate), Ok(None));
    }

    #[test]
    fn test_attribute_value_derives_pace_without_mutation() {
        let activity: Activity =
            serde_json::from_value(json!({"average_speed": 5.0})).unwrap();
        let before = activity.clone();
        assert_eq!(
            attribute_value(&activity, Attribute::AveragePace),
            Ok(Some(Quantity::Duration(Duration::seconds(200))))
        );
        assert_eq!(activity, before);
        assert!(activity.field("average_pace").is_none());
    }
}
