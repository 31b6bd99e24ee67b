// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Positional result types produced by pattern searches.
//!
//! A [`MatchWindow`] is a half-open index interval `[start, end)` into the
//! searched sequence. A [`MatchChain`] is the ordered history of windows
//! found by a base search followed by zero or more chained searches.
//!
//! Both types are plain positional descriptors. They do not borrow the
//! searched sequence, so callers may hold on to them while mutating the
//! sequence afterwards (e.g. to insert or replace instructions at the
//! reported positions).

use std::ops::Range;

/// A half-open interval `[start, end)` of positions that satisfied a pattern.
///
/// `Copy` and 16 bytes on 64-bit targets, so chains of windows stay cheap
/// to clone while a chained search extends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchWindow {
    start: usize,
    end: usize,
}

impl MatchWindow {
    /// Creates a window starting at `start` and covering `len` positions.
    #[must_use]
    #[inline]
    pub(crate) const fn at(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// The first position of the window (inclusive).
    #[must_use]
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last position of the window (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered, equal to the pattern length.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for the zero-length windows produced by an empty pattern.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The window as a range, suitable for slicing the searched sequence.
    #[must_use]
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<MatchWindow> for Range<usize> {
    fn from(window: MatchWindow) -> Self {
        window.range()
    }
}

/// Ordered windows found by successively applied patterns.
///
/// Element `0` comes from the base search; element `k` from the `k`-th
/// chained pattern. For every `k > 0`, `windows[k].start() >= windows[k - 1].end()`.
/// A chain is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchChain {
    windows: Vec<MatchWindow>,
}

impl MatchChain {
    /// Starts a chain from the window found by a base search.
    #[must_use]
    pub(crate) fn single(window: MatchWindow) -> Self {
        Self {
            windows: vec![window],
        }
    }

    /// Appends the window found by a chained search.
    pub(crate) fn push(&mut self, window: MatchWindow) {
        debug_assert!(window.start() >= self.last().end());
        self.windows.push(window);
    }

    /// The window found by the base search.
    #[must_use]
    pub fn first(&self) -> MatchWindow {
        self.windows[0]
    }

    /// The window found by the most recently applied pattern.
    #[must_use]
    pub fn last(&self) -> MatchWindow {
        self.windows[self.windows.len() - 1]
    }

    /// All windows, in pattern-application order.
    #[must_use]
    pub fn windows(&self) -> &[MatchWindow] {
        &self.windows
    }

    /// Number of windows (one per applied pattern).
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Always false; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Consumes the chain, returning the underlying windows.
    #[must_use]
    pub fn into_windows(self) -> Vec<MatchWindow> {
        self.windows
    }
}

impl std::ops::Index<usize> for MatchChain {
    type Output = MatchWindow;

    fn index(&self, index: usize) -> &MatchWindow {
        &self.windows[index]
    }
}

impl<'c> IntoIterator for &'c MatchChain {
    type Item = &'c MatchWindow;
    type IntoIter = std::slice::Iter<'c, MatchWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}
