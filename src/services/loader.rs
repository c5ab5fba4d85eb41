// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Loading activities from the local page cache.
//!
//! The downloader stores each page of `/athlete/activities` as a JSON array
//! in its own file. This module only reads that cache.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Activity;

/// Load every cached activity page under `dir`, in file name order.
///
/// A missing directory yields no activities (nothing downloaded yet).
pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Activity>, LoadError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        tracing::warn!(path = %dir.display(), "Activity cache directory does not exist");
        return Ok(Vec::new());
    }

    let mut pages: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    pages.sort();

    let mut activities = Vec::new();
    for page in &pages {
        let loaded = load_page(page)?;
        tracing::debug!(path = %page.display(), count = loaded.len(), "Loaded activity page");
        activities.extend(loaded);
    }

    tracing::info!(
        pages = pages.len(),
        count = activities.len(),
        "Loaded cached activities"
    );
    Ok(activities)
}

/// Load a single cached page (a JSON array of activities).
pub fn load_page<P: AsRef<Path>>(path: P) -> Result<Vec<Activity>, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_json(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON array of activities.
pub fn load_from_json(json: &str) -> Result<Vec<Activity>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Errors from reading the activity cache.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_json() {
        let activities =
            load_from_json(r#"[{"name": "Bondcliff", "type": "Run"}, {"name": "Happy Friday"}]"#)
                .unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_type(), "Run");
    }

    #[test]
    fn test_load_from_json_rejects_non_array() {
        assert!(load_from_json(r#"{"name": "Bondcliff"}"#).is_err());
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let activities = load_from_dir("/nonexistent/strava-cli-activities").unwrap();
        assert!(activities.is_empty());
    }
}
