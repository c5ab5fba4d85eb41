// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-CLI: query a local snapshot of your Strava activities
//!
//! This crate provides the query engine behind the `strava-cli` binary:
//! typed attribute formatting, comparison filters, name and type matching,
//! sorting and weekly rollups over activities already downloaded to disk.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod time_utils;

pub use error::{ErrorKind, QueryError, Result};
