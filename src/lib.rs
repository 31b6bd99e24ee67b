// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! # `seqmatch`: Predicate-Pattern Matching over Ordered Sequences
//!
//! Locates runs of elements that satisfy a chain of per-position predicates,
//! and chains such searches so that a later pattern must occur after an
//! earlier match. The typical use is finding anchor points in an instruction
//! stream before inserting or replacing code.
//!
//! ## Operations
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`MatchSequence::new`] | Every window of `items` matching a pattern |
//! | [`MatchSequence::with_range`] | Same, restricted to `[start, end)`; rejects invalid ranges |
//! | [`MatchSequence::then`] | Extends each chain with the first later match of another pattern |
//! | [`MatchSequence::then_with`] | `then` with an explicit [`ChainBound`] |
//! | [`MatchSequence::iter`] | Lazy, restartable enumeration of [`MatchChain`]s |
//!
//! ## Example
//!
//! ```
//! use seqmatch::{eq, MatchSequence, Pattern};
//!
//! let items = [2, 4, 6, 8];
//! let even = |x: &i32| x % 2 == 0;
//! let pairs = Pattern::new().with(even).with(even);
//!
//! let starts: Vec<usize> = MatchSequence::new(&items, &pairs)
//!     .iter()
//!     .map(|chain| chain.first().start())
//!     .collect();
//! assert_eq!(starts, vec![0, 1, 2]);
//!
//! let eight = Pattern::new().with(eq(8));
//! let pairs_found = MatchSequence::new(&items, &pairs);
//! let then_eight = pairs_found.then(&eight);
//! // The pair at 2..4 leaves no room for an 8 after it.
//! assert_eq!(then_eight.count(), 2);
//! ```
//!
//! Searches only report positions. Acting on them (inserting, replacing,
//! removing) is left to the caller, after enumeration has finished.

pub mod common;
pub mod error;
pub mod instruction;
pub mod pattern;
pub mod sequence;

pub use common::window::{MatchChain, MatchWindow};
pub use error::{MatchError, MatchResult};
pub use pattern::executor::{ChainBound, Matches};
pub use pattern::predicate::{any, both, either, eq, not, Pattern, Predicate};
pub use sequence::{search, search_range, MatchSequence};
