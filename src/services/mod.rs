// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - query engine and activity cache access.

pub mod filter;
pub mod format;
pub mod loader;
pub mod query;
pub mod sort;
pub mod weekly;

pub use filter::{AttributeFilter, Comparison};
pub use format::{attribute_value, format_value, speed_to_pace};
pub use loader::{load_from_dir, LoadError};
pub use query::{apply_attr_filters, filter_activity_types, match_name, ActivityQuery};
pub use sort::{sort_by, sort_by_arg, SortOrder, SortSpec};
pub use weekly::{
    generate_week_ranges, generate_week_ranges_from, weekly_stats, weekly_stats_for,
};
