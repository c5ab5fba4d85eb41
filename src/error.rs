// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query error types with a coarse classification for callers.

/// Broad category of a [`QueryError`].
///
/// The CLI layer uses this to decide how to phrase a failure; tests use it
/// to tell real errors apart from records that are merely excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed user input: filter text, comparison symbol, sort order, pattern.
    Validation,
    /// Attribute name that does not resolve to a known attribute.
    Lookup,
    /// Raw record value whose type does not fit the requested conversion.
    Type,
}

/// Error raised by the query engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("Incorrect attribute filter specified: {0:?}, maybe a missing space between symbol and value")]
    MalformedFilter(String),

    #[error("Incorrect comparison symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Specified value: {0:?} is not correct")]
    InvalidLiteral(String),

    #[error("Incorrect pace specified: {0:?}, expected mm:ss")]
    InvalidPace(String),

    #[error("Sorting argument should be in format 'attribute:[asc/desc]', got {0:?}")]
    MalformedSort(String),

    #[error("Sorting order should be either asc or desc, got {0:?}")]
    InvalidSortOrder(String),

    #[error("Invalid name pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Incorrect attribute specified: {0:?}")]
    UnknownAttribute(String),

    #[error("Unexpected value for {field}: expected {expected}, found {found}")]
    UnexpectedType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

impl QueryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::MalformedFilter(_)
            | QueryError::InvalidSymbol(_)
            | QueryError::InvalidLiteral(_)
            | QueryError::InvalidPace(_)
            | QueryError::MalformedSort(_)
            | QueryError::InvalidSortOrder(_)
            | QueryError::InvalidPattern { .. } => ErrorKind::Validation,
            QueryError::UnknownAttribute(_) => ErrorKind::Lookup,
            QueryError::UnexpectedType { .. } => ErrorKind::Type,
        }
    }

    /// Build a type error for a raw JSON value.
    pub(crate) fn unexpected_type(
        field: &'static str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        QueryError::UnexpectedType {
            field,
            expected,
            found: found.to_string(),
        }
    }
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
