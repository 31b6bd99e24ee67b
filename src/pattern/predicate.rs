// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Per-position predicates and the patterns built from them.
//!
//! A [`Pattern`] is an ordered list of predicates. It matches at index `i`
//! of a sequence when predicate `k` accepts element `i + k` for every `k`.
//! Patterns are immutable once built and can be reused across any number
//! of searches.
//!
//! # Examples
//!
//! ```
//! use seqmatch::pattern::predicate::{eq, Pattern};
//!
//! let pattern = Pattern::new()
//!     .with(eq('a'))
//!     .with(|c: &char| c.is_ascii_digit());
//!
//! let items = ['a', '1', 'a', 'x'];
//! assert!(pattern.matches_at(&items, 0));
//! assert!(!pattern.matches_at(&items, 2));
//! ```

use std::fmt;

/// A pure test applied to one element of the searched sequence.
///
/// Implemented for every `Fn(&T) -> bool`, so closures are the usual way
/// to write one. Predicates may be called many times for the same element
/// and must not rely on call order beyond left-to-right scanning.
pub trait Predicate<T> {
    /// Returns true if `item` satisfies this predicate.
    fn test(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// An ordered, immutable list of per-position predicates.
///
/// An empty pattern is allowed. It matches a zero-length window at every
/// index of the search range, including the end index itself.
pub struct Pattern<'p, T> {
    steps: Vec<Box<dyn Predicate<T> + 'p>>,
}

impl<'p, T> Pattern<'p, T> {
    /// Creates an empty pattern.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a pattern from already-boxed predicates.
    #[must_use]
    pub fn from_predicates<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Predicate<T> + 'p>>,
    {
        Self {
            steps: predicates.into_iter().collect(),
        }
    }

    /// Appends a predicate for the next position.
    #[must_use]
    pub fn with<P>(mut self, predicate: P) -> Self
    where
        P: Predicate<T> + 'p,
    {
        self.steps.push(Box::new(predicate));
        self
    }

    /// Number of positions a match covers.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pattern has no predicates.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns true if every predicate holds at its offset from `index`.
    ///
    /// Predicates are evaluated left to right and evaluation stops at the
    /// first failure. Returns false when the pattern would run past the
    /// end of `items`.
    #[must_use]
    pub fn matches_at(&self, items: &[T], index: usize) -> bool {
        let Some(window) = index
            .checked_add(self.steps.len())
            .and_then(|end| items.get(index..end))
        else {
            return false;
        };
        self.steps
            .iter()
            .zip(window)
            .all(|(predicate, item)| predicate.test(item))
    }
}

impl<T> Default for Pattern<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Pattern<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("len", &self.steps.len())
            .finish_non_exhaustive()
    }
}

/// Accepts every element. Useful as a positional wildcard.
#[must_use]
pub fn any<T>() -> impl Fn(&T) -> bool {
    |_: &T| true
}

/// Accepts elements equal to `value`.
#[must_use]
pub fn eq<T: PartialEq>(value: T) -> impl Fn(&T) -> bool {
    move |item: &T| *item == value
}

/// Inverts a predicate.
#[must_use]
pub fn not<T, P: Predicate<T>>(predicate: P) -> impl Fn(&T) -> bool {
    move |item: &T| !predicate.test(item)
}

/// Accepts elements satisfying both predicates. `b` is skipped when `a` fails.
#[must_use]
pub fn both<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool
where
    A: Predicate<T>,
    B: Predicate<T>,
{
    move |item: &T| a.test(item) && b.test(item)
}

/// Accepts elements satisfying either predicate. `b` is skipped when `a` holds.
#[must_use]
pub fn either<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool
where
    A: Predicate<T>,
    B: Predicate<T>,
{
    move |item: &T| a.test(item) || b.test(item)
}
