// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! `MatchSequence`: lazy, restartable searches for predicate patterns.
//!
//! A base search reports every index in the search range where a pattern
//! matches. Calling [`then`](MatchSequence::then) on a search produces a
//! chained search: each chain of the parent is extended with the first
//! occurrence of the next pattern after it, and chains with no such
//! occurrence are dropped.
//!
//! # Usage
//!
//! ```
//! use seqmatch::pattern::predicate::{eq, Pattern};
//! use seqmatch::sequence::MatchSequence;
//!
//! let items = ['A', 'B', 'A', 'B', 'A'];
//! let is_a = Pattern::new().with(eq('A'));
//! let is_b = Pattern::new().with(eq('B'));
//!
//! let a = MatchSequence::new(&items, &is_a);
//! let a_then_b = a.then(&is_b);
//!
//! let found: Vec<Vec<(usize, usize)>> = a_then_b
//!     .iter()
//!     .map(|chain| chain.windows().iter().map(|w| (w.start(), w.end())).collect())
//!     .collect();
//! assert_eq!(found, vec![vec![(0, 1), (1, 2)], vec![(2, 3), (3, 4)]]);
//! ```
//!
//! # Caller obligations
//!
//! A `MatchSequence` borrows the searched slice and its patterns; it never
//! copies or mutates them. Every call to [`iter`](MatchSequence::iter)
//! rescans from the beginning, so enumerating twice gives the same chains.
//! Predicates that panic unwind through the iterator unmodified.

use log::debug;

use crate::common::window::MatchChain;
use crate::error::{check_range, MatchResult};
use crate::pattern::executor::Matches;
use crate::pattern::predicate::Pattern;

pub use crate::pattern::executor::ChainBound;

/// How a sequence produces its chains.
#[derive(Debug)]
enum Stage<'a, T> {
    /// Scan the search range directly.
    Base,
    /// Extend each chain of `parent`.
    Chained {
        parent: &'a MatchSequence<'a, T>,
        bound: ChainBound,
    },
}

/// A lazy producer of match chains over a borrowed slice.
///
/// Base and chained searches share this one type; a chained search holds
/// a shared borrow of its parent, so one parent can feed any number of
/// independent children.
#[derive(Debug)]
pub struct MatchSequence<'a, T> {
    items: &'a [T],
    pattern: &'a Pattern<'a, T>,
    start: usize,
    end: usize,
    stage: Stage<'a, T>,
}

impl<'a, T> MatchSequence<'a, T> {
    /// Searches all of `items` for `pattern`.
    #[must_use]
    pub fn new(items: &'a [T], pattern: &'a Pattern<'a, T>) -> Self {
        debug!(
            "base search over 0..{} with pattern of length {}",
            items.len(),
            pattern.len()
        );
        Self {
            items,
            pattern,
            start: 0,
            end: items.len(),
            stage: Stage::Base,
        }
    }

    /// Searches `items[start..end]` for `pattern`.
    ///
    /// Windows must lie entirely inside the range. Reported positions are
    /// still indices into the whole of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidRange`](crate::error::MatchError::InvalidRange)
    /// unless `start <= end <= items.len()`. The range is never clamped.
    pub fn with_range(
        items: &'a [T],
        pattern: &'a Pattern<'a, T>,
        start: usize,
        end: usize,
    ) -> MatchResult<Self> {
        check_range(start, end, items.len())?;
        debug!(
            "base search over {}..{} with pattern of length {}",
            start,
            end,
            pattern.len()
        );
        Ok(Self {
            items,
            pattern,
            start,
            end,
            stage: Stage::Base,
        })
    }

    /// Extends every chain with the first match of `pattern` after it.
    ///
    /// The continuation must start at or after the end of the chain's last
    /// window and end before the end index of the base search. Only the
    /// first such occurrence is taken. Chains without one are dropped.
    #[must_use]
    pub fn then(&'a self, pattern: &'a Pattern<'a, T>) -> Self {
        self.then_with(pattern, ChainBound::SearchEnd)
    }

    /// Like [`then`](Self::then), with an explicit upper bound for the
    /// forward search.
    #[must_use]
    pub fn then_with(&'a self, pattern: &'a Pattern<'a, T>, bound: ChainBound) -> Self {
        debug!(
            "chained search (stage {}) with pattern of length {} bounded by {:?}",
            self.depth() + 1,
            pattern.len(),
            bound
        );
        Self {
            items: self.items,
            pattern,
            start: self.start,
            end: self.end,
            stage: Stage::Chained {
                parent: self,
                bound,
            },
        }
    }

    /// Starts a fresh enumeration of the chains.
    ///
    /// Each call owns its own cursor state; enumerations never share
    /// progress.
    pub fn iter(&self) -> Matches<'_, T> {
        match &self.stage {
            Stage::Base => Matches::base(self.items, self.pattern, self.start, self.end),
            Stage::Chained { parent, bound } => {
                Matches::chained(parent.iter(), self.pattern, *bound)
            }
        }
    }

    /// The first chain, scanning no further than needed to find it.
    #[must_use]
    pub fn first(&self) -> Option<MatchChain> {
        self.iter().next()
    }

    /// Returns true if at least one chain exists.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.first().is_some()
    }

    /// Counts all chains.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Collects all chains into a `Vec`.
    #[must_use]
    pub fn collect_chains(&self) -> Vec<MatchChain> {
        self.iter().collect()
    }

    /// The searched items.
    #[must_use]
    pub const fn items(&self) -> &'a [T] {
        self.items
    }

    /// The pattern applied at this stage.
    #[must_use]
    pub const fn pattern(&self) -> &'a Pattern<'a, T> {
        self.pattern
    }

    /// First index of the base search range (inclusive).
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.start
    }

    /// Last index of the base search range (exclusive).
    #[must_use]
    pub const fn end_index(&self) -> usize {
        self.end
    }

    /// Number of patterns applied so far; each chain holds this many windows.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut stage = &self.stage;
        while let Stage::Chained { parent, .. } = stage {
            depth += 1;
            stage = &parent.stage;
        }
        depth
    }
}

impl<'s, T> IntoIterator for &'s MatchSequence<'_, T> {
    type Item = MatchChain;
    type IntoIter = Matches<'s, T>;

    fn into_iter(self) -> Matches<'s, T> {
        self.iter()
    }
}

/// Searches all of `items` for `pattern`. Shorthand for [`MatchSequence::new`].
#[must_use]
pub fn search<'a, T>(items: &'a [T], pattern: &'a Pattern<'a, T>) -> MatchSequence<'a, T> {
    MatchSequence::new(items, pattern)
}

/// Searches `items[start..end]` for `pattern`. Shorthand for
/// [`MatchSequence::with_range`].
pub fn search_range<'a, T>(
    items: &'a [T],
    pattern: &'a Pattern<'a, T>,
    start: usize,
    end: usize,
) -> MatchResult<MatchSequence<'a, T>> {
    MatchSequence::with_range(items, pattern, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::window::MatchWindow;
    use crate::error::MatchError;
    use crate::pattern::predicate::{any, eq};
    use std::cell::Cell;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn spans(seq: &MatchSequence<'_, char>) -> Vec<Vec<(usize, usize)>> {
        seq.iter()
            .map(|c| c.windows().iter().map(|w| (w.start(), w.end())).collect())
            .collect()
    }

    #[test]
    fn test_empty_items() {
        let items: [i32; 0] = [];
        let pattern = Pattern::new().with(eq(1));
        let seq = MatchSequence::new(&items, &pattern);
        assert_eq!(seq.count(), 0);
        assert!(!seq.is_match());
        assert!(seq.first().is_none());
    }

    #[test]
    fn test_overlapping_even_pairs() {
        let even = |x: &i32| x % 2 == 0;
        let pattern = Pattern::new().with(even).with(even);
        let items = [2, 4, 6, 8];
        let starts: Vec<usize> = MatchSequence::new(&items, &pattern)
            .iter()
            .map(|c| c.first().start())
            .collect();
        assert_eq!(starts, vec![0, 1, 2]);
    }

    #[test]
    fn test_each_base_chain_has_one_window() {
        let pattern = Pattern::new().with(eq(1));
        let items = [1, 0, 1];
        for chain in &MatchSequence::new(&items, &pattern) {
            assert_eq!(chain.len(), 1);
            assert_eq!(chain.first().len(), 1);
        }
    }

    #[test]
    fn test_with_range_limits_scan() {
        let pattern = Pattern::new().with(eq(1));
        let items = [1, 1, 1, 1, 1];
        let seq = MatchSequence::with_range(&items, &pattern, 1, 4).unwrap();
        let starts: Vec<usize> = seq.iter().map(|c| c.first().start()).collect();
        assert_eq!(starts, vec![1, 2, 3]);
        assert_eq!(seq.start_index(), 1);
        assert_eq!(seq.end_index(), 4);
    }

    #[test]
    fn test_empty_range_yields_nothing() {
        let pattern = Pattern::new().with(any());
        let items = [1, 2, 3];
        let seq = MatchSequence::with_range(&items, &pattern, 2, 2).unwrap();
        assert_eq!(seq.count(), 0);
    }

    #[test]
    fn test_invalid_range_fails_fast() {
        let pattern = Pattern::new().with(any());
        let items = [1, 2, 3];
        assert_eq!(
            MatchSequence::with_range(&items, &pattern, 0, 4).unwrap_err(),
            MatchError::InvalidRange {
                start: 0,
                end: 4,
                len: 3
            }
        );
        assert!(MatchSequence::with_range(&items, &pattern, 3, 1).is_err());
        assert!(search_range(&items, &pattern, 4, 4).is_err());
    }

    #[test]
    fn test_invalid_range_does_not_evaluate_predicates() {
        let calls = Cell::new(0);
        let pattern = Pattern::new().with(|_: &i32| {
            calls.set(calls.get() + 1);
            true
        });
        let items = [1, 2, 3];
        assert!(MatchSequence::with_range(&items, &pattern, 0, 9).is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_alternating_scenario() {
        init_logging();
        let items = ['A', 'B', 'A', 'B', 'A'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::new(&items, &is_a);
        assert_eq!(spans(&base), vec![vec![(0, 1)], vec![(2, 3)], vec![(4, 5)]]);

        let chained = base.then(&is_b);
        assert_eq!(
            spans(&chained),
            vec![vec![(0, 1), (1, 2)], vec![(2, 3), (3, 4)]]
        );
        assert_eq!(chained.depth(), 2);
    }

    #[test]
    fn test_chain_drops_parent_without_continuation() {
        // Base windows [0, 3) and [3, 6). The only B sits at 5: after the
        // first window, but inside the second one.
        let items = ['A', 'x', 'x', 'A', 'x', 'B'];
        let a_block = Pattern::new().with(eq('A')).with(any()).with(any());
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::new(&items, &a_block);
        assert_eq!(spans(&base), vec![vec![(0, 3)], vec![(3, 6)]]);

        let chained = base.then(&is_b);
        assert_eq!(spans(&chained), vec![vec![(0, 3), (5, 6)]]);
    }

    #[test]
    fn test_range_end_cuts_off_continuation() {
        let items = ['A', 'x', 'B'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::with_range(&items, &is_a, 0, 2).unwrap();
        assert_eq!(base.count(), 1);
        assert_eq!(base.then(&is_b).count(), 0);
    }

    #[test]
    fn test_only_first_continuation_taken() {
        let items = ['A', 'B', 'B', 'B'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::new(&items, &is_a);
        assert_eq!(spans(&base.then(&is_b)), vec![vec![(0, 1), (1, 2)]]);
    }

    #[test]
    fn test_three_stage_chain() {
        let items = ['A', 'x', 'B', 'x', 'C', 'A', 'B'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let is_c = Pattern::new().with(eq('C'));
        let base = MatchSequence::new(&items, &is_a);
        let ab = base.then(&is_b);
        let abc = ab.then(&is_c);
        assert_eq!(abc.depth(), 3);
        assert_eq!(spans(&abc), vec![vec![(0, 1), (2, 3), (4, 5)]]);
        // The second A..B chain has no C after it.
        assert_eq!(ab.count(), 2);
    }

    #[test]
    fn test_chain_end_bound_is_base_end() {
        let items = ['A', 'B', 'x', 'C'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let is_c = Pattern::new().with(eq('C'));
        let base = MatchSequence::with_range(&items, &is_a, 0, 3).unwrap();
        let ab = base.then(&is_b);
        assert_eq!(ab.end_index(), 3);
        // C at 3 lies past the base end.
        assert_eq!(ab.then(&is_c).count(), 0);
    }

    #[test]
    fn test_shared_parent_feeds_independent_children() {
        let items = ['A', 'B', 'C', 'A', 'C'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let is_c = Pattern::new().with(eq('C'));
        let base = MatchSequence::new(&items, &is_a);
        let to_b = base.then(&is_b);
        let to_c = base.then(&is_c);

        // Interleave two enumerations over different children.
        let mut it_b = to_b.iter();
        let mut it_c = to_c.iter();
        assert_eq!(it_c.next().unwrap().last().start(), 2);
        assert_eq!(it_b.next().unwrap().last().start(), 1);
        assert_eq!(it_c.next().unwrap().last().start(), 4);
        assert!(it_b.next().is_none());
        assert!(it_c.next().is_none());
    }

    #[test]
    fn test_reenumeration_is_idempotent() {
        let items = ['A', 'B', 'A', 'B', 'A'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::new(&items, &is_a);
        let chained = base.then(&is_b);
        let first = chained.collect_chains();
        let second = chained.collect_chains();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_concurrent_enumerations_do_not_interfere() {
        let pattern = Pattern::new().with(eq(1));
        let items = [1, 1, 1];
        let seq = MatchSequence::new(&items, &pattern);
        let mut a = seq.iter();
        let mut b = seq.iter();
        assert_eq!(a.next().unwrap().first().start(), 0);
        assert_eq!(a.next().unwrap().first().start(), 1);
        assert_eq!(b.next().unwrap().first().start(), 0);
        assert_eq!(a.next().unwrap().first().start(), 2);
        assert_eq!(b.next().unwrap().first().start(), 1);
    }

    #[test]
    fn test_first_is_lazy() {
        let calls = Cell::new(0usize);
        let pattern = Pattern::new().with(|x: &u32| {
            calls.set(calls.get() + 1);
            *x == 7
        });
        let mut items = vec![0u32; 100_000];
        items[10] = 7;
        items[50_000] = 7;
        let seq = MatchSequence::new(&items, &pattern);
        assert_eq!(seq.first().unwrap().first(), MatchWindow::at(10, 1));
        assert_eq!(calls.get(), 11);
    }

    #[test]
    fn test_chained_first_pulls_one_parent_chain() {
        let parent_calls = Cell::new(0usize);
        let is_a = Pattern::new().with(|c: &char| {
            parent_calls.set(parent_calls.get() + 1);
            *c == 'A'
        });
        let is_b = Pattern::new().with(eq('B'));
        let items = ['A', 'B', 'A', 'B', 'A', 'A', 'A'];
        let base = MatchSequence::new(&items, &is_a);
        let chained = base.then(&is_b);
        let chain = chained.first().unwrap();
        assert_eq!(chain.last(), MatchWindow::at(1, 1));
        // Only index 0 was tested by the base pattern.
        assert_eq!(parent_calls.get(), 1);
    }

    #[test]
    fn test_chain_never_manufactures_matches() {
        let items = [1, 2, 3];
        let none = Pattern::new().with(eq(9));
        let anything = Pattern::new().with(any());
        let base = MatchSequence::new(&items, &none);
        assert_eq!(base.then(&anything).count(), 0);
    }

    #[test]
    fn test_then_with_next_parent_match() {
        init_logging();
        let items = ['A', 'A', 'B'];
        let is_a = Pattern::new().with(eq('A'));
        let is_b = Pattern::new().with(eq('B'));
        let base = MatchSequence::new(&items, &is_a);
        assert_eq!(base.then(&is_b).count(), 2);
        let bounded = base.then_with(&is_b, ChainBound::NextParentMatch);
        assert_eq!(spans(&bounded), vec![vec![(1, 2), (2, 3)]]);
    }

    #[test]
    fn test_multi_position_chained_pattern() {
        let items = [0, 1, 5, 2, 3, 2, 3];
        let one = Pattern::new().with(eq(1));
        let two_three = Pattern::new().with(eq(2)).with(eq(3));
        let base = MatchSequence::new(&items, &one);
        let chain = base.then(&two_three).first().unwrap();
        assert_eq!(chain.windows(), &[MatchWindow::at(1, 1), MatchWindow::at(3, 2)]);
        assert_eq!(chain.last().len(), 2);
    }

    #[test]
    fn test_empty_pattern_degenerate_case() {
        let items = [1, 2];
        let empty: Pattern<'_, i32> = Pattern::new();
        let seq = MatchSequence::new(&items, &empty);
        // Zero-length windows at 0, 1 and 2.
        assert_eq!(seq.count(), 3);
    }

    /// Matches 1 and panics on 9.
    fn ones_rejecting_nines(x: &i32) -> bool {
        assert!(*x != 9, "unexpected element");
        *x == 1
    }

    #[test]
    fn test_predicate_panic_propagates() {
        let items = [1, 2, 9];
        let pattern = Pattern::new().with(ones_rejecting_nines);
        let seq = MatchSequence::new(&items, &pattern);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut it = seq.iter();
            let first = it.next();
            assert!(first.is_some());
            it.next()
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_base_scan_stops_after_predicate_panic() {
        let items = [1, 9, 1, 1];
        let pattern = Pattern::new().with(ones_rejecting_nines);
        let seq = MatchSequence::new(&items, &pattern);
        let mut it = seq.iter();
        assert_eq!(it.next().unwrap().first().start(), 0);
        let fault = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| it.next()));
        assert!(fault.is_err());
        assert!(it.next().is_none());
        assert_eq!(it.size_hint(), (0, Some(0)));
        // A fresh enumeration rescans and hits the same fault.
        let mut again = seq.iter();
        assert!(again.next().is_some());
    }

    #[test]
    fn test_chained_scan_stops_after_predicate_panic() {
        let items = [1, 9, 1, 1];
        let is_one = Pattern::new().with(eq(1));
        let next_one = Pattern::new().with(ones_rejecting_nines);
        let base = MatchSequence::new(&items, &is_one);
        let chained = base.then(&next_one);
        let mut it = chained.iter();
        // Extending the chain at 0 scans index 1 and faults.
        let fault = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| it.next()));
        assert!(fault.is_err());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_accessors_and_free_functions() {
        let items = [4, 5, 6];
        let pattern = Pattern::new().with(eq(5));
        let seq = search(&items, &pattern);
        assert_eq!(seq.items(), &items);
        assert_eq!(seq.pattern().len(), 1);
        assert_eq!(seq.depth(), 1);
        assert_eq!(seq.count(), 1);
        let ranged = search_range(&items, &pattern, 2, 3).unwrap();
        assert_eq!(ranged.count(), 0);
    }
}
