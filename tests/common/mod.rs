// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use strava_cli::models::Activity;
use strava_cli::services::loader::load_page;

pub const FIXTURE_PATH: &str = "tests/fixtures/activities.json";

/// Load the shared activity fixture.
#[allow(dead_code)]
pub fn load_fixture() -> Vec<Activity> {
    load_page(FIXTURE_PATH).expect("Failed to load activity fixture")
}

/// Names of activities, in order.
#[allow(dead_code)]
pub fn names(activities: &[&Activity]) -> Vec<String> {
    activities.iter().map(|a| a.name().to_string()).collect()
}
