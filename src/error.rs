// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Error types for pattern searches.
//!
//! Only argument validation can fail. Predicates return plain `bool`; a
//! predicate that panics unwinds through the iterator unmodified, and any
//! chains yielded before the panic remain valid.

use thiserror::Error;

/// Error returned when a search cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// The requested search range violates `start <= end <= len`.
    ///
    /// Ranges are never clamped: an out-of-bounds range almost always means
    /// the caller computed an index against a different sequence.
    #[error("invalid search range {start}..{end} for sequence of length {len}")]
    InvalidRange {
        /// Requested first index (inclusive).
        start: usize,
        /// Requested last index (exclusive).
        end: usize,
        /// Length of the searched sequence.
        len: usize,
    },
}

/// Convenience alias for results carrying a [`MatchError`].
pub type MatchResult<T> = Result<T, MatchError>;

/// Checks `start <= end <= len`.
pub(crate) const fn check_range(start: usize, end: usize, len: usize) -> MatchResult<()> {
    if start <= end && end <= len {
        Ok(())
    } else {
        Err(MatchError::InvalidRange { start, end, len })
    }
}
