// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity query pipeline.
//!
//! Stages run in a fixed order:
//! 1. Name match (case and accent insensitive regex search)
//! 2. Activity type filter
//! 3. Attribute filters, ANDed in sequence
//! 4. Sort
//! 5. Limit
//!
//! Every stage borrows its input and returns a new collection of
//! references; the loaded activities are never modified.

use regex::RegexBuilder;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::error::{QueryError, Result};
use crate::models::{Activity, Attribute};
use crate::services::filter::AttributeFilter;
use crate::services::sort::{sort_by, SortSpec};

/// Remove diacritics so that "Čertovica" is matched by "certovica".
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Keep activities whose name contains a match for `pattern`.
///
/// Both the name and the pattern are accent-stripped and matched without
/// regard to case. `pattern` is a regular expression; an invalid one is a
/// validation error.
pub fn match_name<'a, I>(activities: I, pattern: &str) -> Result<Vec<&'a Activity>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let regex = RegexBuilder::new(&strip_accents(pattern))
        .case_insensitive(true)
        .build()
        .map_err(|e| QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

    Ok(activities
        .into_iter()
        .filter(|activity| regex.is_match(&strip_accents(activity.name())))
        .collect())
}

/// Keep activities whose `type` is one of `types` (case-insensitive).
///
/// Unknown type names simply never match.
pub fn filter_activity_types<'a, I, S>(activities: I, types: &[S]) -> Vec<&'a Activity>
where
    I: IntoIterator<Item = &'a Activity>,
    S: AsRef<str>,
{
    activities
        .into_iter()
        .filter(|activity| {
            let activity_type = activity.activity_type();
            types
                .iter()
                .any(|t| t.as_ref().eq_ignore_ascii_case(activity_type))
        })
        .collect()
}

/// Keep activities that satisfy `filter`.
///
/// Activities lacking the attribute are dropped; a raw value of the wrong
/// type aborts the whole query.
pub fn apply_attr_filter<'a, I>(
    activities: I,
    filter: &AttributeFilter,
) -> Result<Vec<&'a Activity>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut kept = Vec::new();
    for activity in activities {
        if filter.evaluate(activity)? {
            kept.push(activity);
        }
    }
    Ok(kept)
}

/// Apply every filter in turn, feeding each stage's output to the next.
pub fn apply_attr_filters<'a, I>(
    activities: I,
    filters: &[AttributeFilter],
) -> Result<Vec<&'a Activity>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut current: Vec<&'a Activity> = activities.into_iter().collect();
    for filter in filters {
        let before = current.len();
        current = apply_attr_filter(current, filter)?;
        tracing::debug!(
            filter = %filter,
            before,
            after = current.len(),
            "Applied attribute filter"
        );
    }
    Ok(current)
}

/// A complete query over a collection of activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    /// Name pattern
    pub name: Option<String>,
    /// Activity types to keep; empty keeps every type
    pub types: Vec<String>,
    /// Attribute filters, all of which must hold
    pub filters: Vec<AttributeFilter>,
    pub sort: Option<SortSpec>,
    pub limit: Option<usize>,
}

impl ActivityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn filter(mut self, filter: AttributeFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Parse and add every `"<symbol> <literal>"` filter for `attribute`.
    ///
    /// All texts are validated before any is added, so one bad argument
    /// rejects the query instead of being skipped.
    pub fn attribute_filters<S: AsRef<str>>(
        mut self,
        attribute: Attribute,
        texts: &[S],
    ) -> Result<Self> {
        let parsed = texts
            .iter()
            .map(|text| AttributeFilter::parse(attribute, text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.filters.extend(parsed);
        Ok(self)
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the query.
    pub fn run<'a>(&self, activities: &'a [Activity]) -> Result<Vec<&'a Activity>> {
        let mut current: Vec<&'a Activity> = activities.iter().collect();
        tracing::debug!(count = current.len(), "Running activity query");

        if let Some(pattern) = &self.name {
            current = match_name(current, pattern)?;
            tracing::debug!(pattern = %pattern, count = current.len(), "Matched activity names");
        }

        if !self.types.is_empty() {
            current = filter_activity_types(current, &self.types);
            tracing::debug!(types = ?self.types, count = current.len(), "Filtered activity types");
        }

        current = apply_attr_filters(current, &self.filters)?;

        if let Some(sort) = &self.sort {
            current = sort_by(current, sort.attribute, sort.order)?;
            tracing::debug!(sort = %sort, count = current.len(), "Sorted activities");
        }

        if let Some(limit) = self.limit {
            current.truncate(limit);
        }

        Ok(current)
    }
}
