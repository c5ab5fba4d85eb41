// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod attribute;
pub mod stats;

pub use activity::{Activity, ActivityType, UnknownActivityType};
pub use attribute::{Attribute, Quantity, QuantityKind};
pub use stats::{WeekRange, WeeklyStats, WeeklySummary};
