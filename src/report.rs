// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of query results.

use crate::error::Result;
use crate::models::{Activity, Attribute, WeeklySummary};
use crate::services::format::attribute_value;
use crate::time_utils::{format_duration, parse_strava_timestamp};

const ACTIVITY_URL: &str = "https://strava.com/activities";

/// Render activities as a listing with every attribute.
pub fn render_activities(activities: &[&Activity]) -> Result<String> {
    let mut out = format!("Total activities: {}\n", activities.len());
    for activity in activities {
        out.push_str(&render_activity(activity)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_activity(activity: &Activity) -> Result<String> {
    let started = activity
        .start_date_local()
        .map(|raw| {
            parse_strava_timestamp(raw)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| raw.to_string())
        })
        .unwrap_or_default();

    let mut out = format!(
        "{} [{}] {}\n",
        activity.name(),
        activity.activity_type(),
        started
    );
    if let Some(id) = activity.id() {
        out.push_str(&format!("{}/{}\n", ACTIVITY_URL, id));
    }

    for attribute in Attribute::ALL {
        if attribute == Attribute::Date {
            continue;
        }
        let value = attribute_value(activity, attribute)?
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());
        out.push_str(&format!("  - {}: {} {}\n", attribute, value, attribute.unit()));
    }
    Ok(out)
}

/// Render weekly summaries as a table, most recent week first.
pub fn render_weekly(summaries: &[WeeklySummary]) -> String {
    let mut out = format!(
        "{:<12} {:<12} {:>12} {:>12} {:>12}\n",
        "Start", "End", "Distance", "Time", "Elevation"
    );
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for summary in summaries {
        out.push_str(&format!(
            "{:<12} {:<12} {:>9.2} km {:>12} {:>10.2} m\n",
            summary.range.start.format("%Y-%m-%d").to_string(),
            summary.range.end.format("%Y-%m-%d").to_string(),
            summary.stats.covered_distance,
            format_duration(summary.stats.moving_time),
            summary.stats.covered_elevation,
        ));
    }
    out
}
