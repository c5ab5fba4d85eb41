// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-CLI
//!
//! Filters, sorts and summarizes activities previously downloaded from
//! Strava into the local cache directory.

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};
use strava_cli::{
    config::Config,
    models::{ActivityType, Attribute},
    report::{render_activities, render_weekly},
    services::{load_from_dir, weekly_stats, ActivityQuery},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "strava-cli")]
#[command(about = "Filter Strava activities by your parameters")]
#[command(
    long_about = "Filter Strava activities by your parameters.\n\
        Attribute filters are \"symbol value\" strings where symbol is one of >, <, ==, >=, <=.\n\
        Sorting takes 'attribute:[asc/desc]', e.g. 'distance:desc'."
)]
struct Cli {
    /// Filter by keywords (regex) present in the activity name
    #[arg(long)]
    name: Option<String>,

    /// Filter by activity type, one or more
    #[arg(long = "type", num_args = 1..)]
    types: Vec<ActivityType>,

    /// Limit output to number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Sort by attribute and order: 'attribute:[asc/desc]'
    #[arg(long)]
    sortby: Option<String>,

    /// Print weekly statistics for the last N weeks
    #[arg(long, num_args = 0..=1, value_name = "WEEKS")]
    weekly: Option<Option<usize>>,

    /// Distance filters [km], e.g. '> 90'
    #[arg(long, short = 'd', visible_alias = "dis", num_args = 1..)]
    distance: Vec<String>,

    /// Date filters [YYYY-MM-DD], e.g. '> 2023-12-06'
    #[arg(long, short = 'D', visible_alias = "dat", num_args = 1..)]
    date: Vec<String>,

    /// Elevation gain filters [m], e.g. '> 1000'
    #[arg(long, short = 'e', visible_aliases = ["elevation_gain", "eg"], num_args = 1..)]
    elevation_gain: Vec<String>,

    /// Average heartrate filters [bpm], e.g. '== 160'
    #[arg(long, short = 'r', visible_aliases = ["average_heartrate", "hr"], num_args = 1..)]
    heartrate: Vec<String>,

    /// Average speed filters [km/h], e.g. '>= 25'
    #[arg(long, short = 's', visible_aliases = ["average_speed", "sp"], num_args = 1..)]
    average_speed: Vec<String>,

    /// Moving time filters [h:mm:ss or seconds], e.g. '< 1:00:00'
    #[arg(long, short = 't', visible_alias = "moving_time", num_args = 1..)]
    moving_time: Vec<String>,

    /// Average pace filters [mm:ss per km], e.g. '< 05:30'
    #[arg(long, short = 'p', visible_aliases = ["average_pace", "pc"], num_args = 1..)]
    average_pace: Vec<String>,
}

impl Cli {
    /// Build the activity query; any malformed argument rejects the whole query.
    fn query(&self) -> strava_cli::Result<ActivityQuery> {
        let mut query = ActivityQuery::new().types(self.types.iter().map(|t| t.as_str()));
        if let Some(name) = &self.name {
            query = query.name(name.as_str());
        }

        let attribute_args = [
            (Attribute::Distance, &self.distance),
            (Attribute::Date, &self.date),
            (Attribute::ElevationGain, &self.elevation_gain),
            (Attribute::Heartrate, &self.heartrate),
            (Attribute::AverageSpeed, &self.average_speed),
            (Attribute::MovingTime, &self.moving_time),
            (Attribute::AveragePace, &self.average_pace),
        ];
        for (attribute, texts) in attribute_args {
            query = query.attribute_filters(attribute, texts)?;
        }

        if let Some(sortby) = &self.sortby {
            query = query.sort(sortby.parse()?);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        Ok(query)
    }
}

/// Help footer listing the attributes and activity types a query accepts.
fn help_footer() -> String {
    let attributes: Vec<String> = Attribute::ALL
        .iter()
        .map(|attribute| format!("{} [{}]", attribute, attribute.unit()))
        .collect();
    let types: Vec<&str> = ActivityType::ALL.iter().map(|t| t.as_str()).collect();
    format!(
        "Available attributes: {}\nAvailable activity types: {}",
        attributes.join(", "),
        types.join(", ")
    )
}

fn main() -> anyhow::Result<()> {
    let matches = Cli::command().after_help(help_footer()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_json);

    let query = cli.query()?;
    tracing::debug!(?query, "Parsed query");

    let activities = load_from_dir(&config.activities_dir).with_context(|| {
        format!(
            "Failed to load activities from {}",
            config.activities_dir.display()
        )
    })?;

    let selected = query.run(&activities)?;

    match cli.weekly {
        Some(weeks) => {
            let weeks = weeks.unwrap_or(config.default_weeks);
            let summaries = weekly_stats(selected, weeks)?;
            print!("{}", render_weekly(&summaries));
        }
        None => print!("{}", render_activities(&selected)?),
    }

    Ok(())
}

/// Initialize logging to stderr, leaving stdout for results.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_builds_query() {
        let cli = Cli::parse_from([
            "strava-cli",
            "--type",
            "run",
            "ride",
            "--distance",
            "> 10",
            "< 50",
            "--average_pace",
            "< 5:30",
            "--sortby",
            "distance:desc",
            "-l",
            "3",
        ]);
        let query = cli.query().unwrap();
        assert_eq!(query.types, vec!["Run", "Ride"]);
        assert_eq!(query.filters.len(), 3);
        assert_eq!(query.limit, Some(3));
        assert!(query.sort.is_some());
    }

    #[test]
    fn test_cli_short_flags_and_aliases() {
        let cli = Cli::parse_from([
            "strava-cli",
            "-d",
            "> 10",
            "-t",
            "< 1:00:00",
            "--hr",
            "> 120",
            "--pc",
            "< 6:00",
            "--eg",
            "> 100",
            "--sp",
            "> 20",
            "--dat",
            "> 2023-12-01",
        ]);
        assert_eq!(cli.distance, vec!["> 10"]);
        assert_eq!(cli.moving_time, vec!["< 1:00:00"]);
        assert_eq!(cli.heartrate, vec!["> 120"]);
        assert_eq!(cli.average_pace, vec!["< 6:00"]);
        assert_eq!(cli.elevation_gain, vec!["> 100"]);
        assert_eq!(cli.average_speed, vec!["> 20"]);
        assert_eq!(cli.date, vec!["> 2023-12-01"]);
        assert_eq!(cli.query().unwrap().filters.len(), 7);
    }

    #[test]
    fn test_help_lists_attributes_and_types() {
        let footer = help_footer();
        assert!(footer.contains("average_pace [min/km]"));
        assert!(footer.contains("WeightTraining"));
        let help = Cli::command().after_help(footer).render_long_help().to_string();
        assert!(help.contains("Available activity types"));
    }

    #[test]
    fn test_cli_rejects_bad_filter() {
        let cli = Cli::parse_from(["strava-cli", "--distance", ">10"]);
        assert!(cli.query().is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["strava-cli", "--type", "spaceflying"]).is_err());
    }

    #[test]
    fn test_weekly_flag_without_value() {
        let cli = Cli::parse_from(["strava-cli", "--weekly"]);
        assert_eq!(cli.weekly, Some(None));
        let cli = Cli::parse_from(["strava-cli", "--weekly", "8"]);
        assert_eq!(cli.weekly, Some(Some(8)));
    }
}
