// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Predicate patterns and the scan engine that matches them.
//!
//! A pattern is a list of per-position predicates, not a parsed string:
//!
//! ```text
//! [p0, p1, p2]  matches at i when p0(x[i]), p1(x[i+1]) and p2(x[i+2]) hold
//! []            matches a zero-length window at every index in range
//! ```
//!
//! The executor reports every match of a base pattern (overlaps included)
//! and, for chained patterns, only the first occurrence after each parent
//! match.

pub mod executor;
pub mod predicate;
