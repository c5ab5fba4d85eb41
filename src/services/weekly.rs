// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly rollups of distance, moving time and elevation.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::error::{QueryError, Result};
use crate::models::{Activity, Attribute, Quantity, WeekRange, WeeklyStats, WeeklySummary};
use crate::services::format::{attribute_value, round2};
use crate::time_utils::format_duration;

/// The last `num_weeks` calendar weeks, most recent first, ending this week.
pub fn generate_week_ranges(num_weeks: usize) -> Vec<WeekRange> {
    generate_week_ranges_from(Local::now().date_naive(), num_weeks)
}

/// The `num_weeks` Monday to Sunday weeks up to and including `today`'s week.
///
/// Stops early at the start of the representable calendar.
pub fn generate_week_ranges_from(today: NaiveDate, num_weeks: usize) -> Vec<WeekRange> {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (0..num_weeks)
        .map_while(|i| {
            let start = Duration::try_weeks(i64::try_from(i).ok()?)
                .and_then(|weeks| monday.checked_sub_signed(weeks))?;
            Some(WeekRange {
                start,
                end: start.checked_add_signed(Duration::days(6))?,
            })
        })
        .collect()
}

/// Partition activities into `ranges` by local start date.
///
/// Activities outside every range, or without a start date, are left out.
pub fn group_by_week<'a, I>(activities: I, ranges: &[WeekRange]) -> Result<Vec<Vec<&'a Activity>>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut weeks: Vec<Vec<&'a Activity>> = vec![Vec::new(); ranges.len()];
    for activity in activities {
        let Some(Quantity::Date(date)) = attribute_value(activity, Attribute::Date)? else {
            continue;
        };
        if let Some(idx) = ranges.iter().position(|range| range.contains(date)) {
            weeks[idx].push(activity);
        }
    }
    Ok(weeks)
}

/// Totals for a set of activities.
///
/// Distance sums the per-activity kilometer values; elevation sums the raw
/// meters. Missing values count as zero.
pub fn calculate_stats(activities: &[&Activity]) -> Result<WeeklyStats> {
    let mut distance = 0.0;
    let mut moving_time = Duration::zero();
    let mut elevation = 0.0;

    for activity in activities {
        if let Some(Quantity::Number(km)) = attribute_value(activity, Attribute::Distance)? {
            distance += km;
        }
        if let Some(Quantity::Duration(time)) = attribute_value(activity, Attribute::MovingTime)? {
            moving_time = moving_time.checked_add(&time).ok_or_else(|| {
                QueryError::UnexpectedType {
                    field: Attribute::MovingTime.field(),
                    expected: "a weekly total within range",
                    found: format_duration(time),
                }
            })?;
        }
        if let Some(Quantity::Number(meters)) = attribute_value(activity, Attribute::ElevationGain)? {
            elevation += meters;
        }
    }

    Ok(WeeklyStats {
        covered_distance: round2(distance),
        moving_time,
        covered_elevation: round2(elevation),
    })
}

/// Statistics for each of `ranges`, in the same order.
pub fn weekly_stats_for<'a, I>(activities: I, ranges: &[WeekRange]) -> Result<Vec<WeeklySummary>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let weeks = group_by_week(activities, ranges)?;
    ranges
        .iter()
        .zip(weeks)
        .map(|(range, week)| {
            Ok(WeeklySummary {
                range: *range,
                stats: calculate_stats(&week)?,
            })
        })
        .collect()
}

/// Statistics for the last `num_weeks` weeks, most recent first.
pub fn weekly_stats<'a, I>(activities: I, num_weeks: usize) -> Result<Vec<WeeklySummary>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let ranges = generate_week_ranges(num_weeks);
    tracing::debug!(num_weeks, "Computing weekly stats");
    weekly_stats_for(activities, &ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_activity(start: &str, distance: f64, moving_time: i64, elevation: f64) -> Activity {
        serde_json::from_value(json!({
            "name": "Run",
            "type": "Run",
            "start_date_local": start,
            "distance": distance,
            "moving_time": moving_time,
            "total_elevation_gain": elevation,
        }))
        .unwrap()
    }

    #[test]
    fn test_ranges_from_wednesday() {
        // 2024-01-17 is a Wednesday
        let ranges = generate_week_ranges_from(date(2024, 1, 17), 2);
        assert_eq!(
            ranges,
            vec![
                WeekRange {
                    start: date(2024, 1, 15),
                    end: date(2024, 1, 21)
                },
                WeekRange {
                    start: date(2024, 1, 8),
                    end: date(2024, 1, 14)
                },
            ]
        );
    }

    #[test]
    fn test_ranges_from_monday_and_sunday() {
        let monday = generate_week_ranges_from(date(2024, 1, 15), 1);
        let sunday = generate_week_ranges_from(date(2024, 1, 21), 1);
        assert_eq!(monday, sunday);
        assert_eq!(monday[0].start.weekday(), Weekday::Mon);
        assert_eq!(monday[0].end.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_ranges_cross_year_boundary() {
        let ranges = generate_week_ranges_from(date(2024, 1, 3), 2);
        assert_eq!(ranges[0].start, date(2024, 1, 1));
        assert_eq!(ranges[1].start, date(2023, 12, 25));
        assert_eq!(ranges[1].end, date(2023, 12, 31));
    }

    #[test]
    fn test_zero_weeks() {
        assert!(generate_week_ranges_from(date(2024, 1, 17), 0).is_empty());
    }

    #[test]
    fn test_group_by_week_drops_outside() {
        let ranges = generate_week_ranges_from(date(2024, 1, 17), 2);
        let data = vec![
            make_activity("2024-01-15T06:00:00Z", 1000.0, 60, 1.0),
            make_activity("2024-01-14T23:59:59Z", 2000.0, 60, 1.0),
            make_activity("2024-01-01T10:00:00Z", 3000.0, 60, 1.0),
            make_activity("2024-01-22T10:00:00Z", 4000.0, 60, 1.0),
        ];
        let weeks = group_by_week(&data, &ranges).unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].len(), 1);
        assert_eq!(weeks[1].len(), 1);
    }

    #[test]
    fn test_calculate_stats() {
        let data = vec![
            make_activity("2024-01-15T06:00:00Z", 10_234.0, 3600, 120.5),
            make_activity("2024-01-16T06:00:00Z", 5_001.0, 1800, 80.25),
        ];
        let refs: Vec<&Activity> = data.iter().collect();
        let stats = calculate_stats(&refs).unwrap();
        assert_eq!(stats.covered_distance, 15.23);
        assert_eq!(stats.moving_time, Duration::seconds(5400));
        assert_eq!(stats.covered_elevation, 200.75);
    }

    #[test]
    fn test_ranges_stop_at_calendar_start() {
        let ranges = generate_week_ranges_from(NaiveDate::MIN + Duration::days(20), 10);
        assert!(!ranges.is_empty());
        assert!(ranges.len() < 10);
        assert!(ranges.iter().all(|range| range.start >= NaiveDate::MIN));
    }

    #[test]
    fn test_calculate_stats_moving_time_overflow_is_error() {
        let data = vec![
            make_activity("2024-01-15T06:00:00Z", 1000.0, 60, 1.0),
            serde_json::from_value(json!({"moving_time": 9.0e15})).unwrap(),
            serde_json::from_value(json!({"moving_time": 9.0e15})).unwrap(),
        ];
        let refs: Vec<&Activity> = data.iter().collect();
        let err = calculate_stats(&refs).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Type);
    }

    #[test]
    fn test_calculate_stats_negative_and_fractional_values() {
        let data: Vec<Activity> = vec![
            serde_json::from_value(json!({
                "distance": -500.0,
                "moving_time": 59.9,
                "total_elevation_gain": -10.5,
            }))
            .unwrap(),
            make_activity("2024-01-15T06:00:00Z", 1500.0, 60, 20.0),
        ];
        let refs: Vec<&Activity> = data.iter().collect();
        let stats = calculate_stats(&refs).unwrap();
        assert_eq!(stats.covered_distance, 1.0);
        assert_eq!(stats.moving_time, Duration::seconds(119));
        assert_eq!(stats.covered_elevation, 9.5);
    }

    #[test]
    fn test_empty_week_is_zero() {
        let ranges = generate_week_ranges_from(date(2024, 1, 17), 3);
        let summaries = weekly_stats_for(&Vec::<Activity>::new(), &ranges).unwrap();
        assert_eq!(summaries.len(), 3);
        for summary in summaries {
            assert_eq!(summary.stats, WeeklyStats::default());
        }
    }

    #[test]
    fn test_weekly_stats_uses_current_weeks() {
        let summaries = weekly_stats(&Vec::<Activity>::new(), 4).unwrap();
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].range.start.weekday(), Weekday::Mon);
        assert_eq!(
            summaries[0].range.start - summaries[1].range.start,
            Duration::days(7)
        );
    }
}
