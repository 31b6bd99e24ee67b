// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Lazy scan executor for predicate patterns.
//!
//! [`Matches`] is the pull-based iterator behind every
//! [`MatchSequence`](crate::sequence::MatchSequence). It has two shapes:
//!
//! - **Base scan**: tests the pattern at each start index of the search
//!   range, in increasing order, and yields a one-window chain per hit.
//!   Overlapping hits are all reported.
//! - **Chained scan**: pulls one chain at a time from a parent iterator and
//!   looks for the *first* occurrence of its own pattern at or after the
//!   end of that chain's last window. A parent chain with no continuation
//!   is dropped.
//!
//! All cursor state lives in the iterator itself, so every enumeration of a
//! sequence starts from scratch and never interferes with another one.
//! Nothing is computed ahead of what the consumer pulls, apart from the
//! single-chain lookahead required by [`ChainBound::NextParentMatch`].

use log::trace;

use crate::common::window::{MatchChain, MatchWindow};
use crate::error::{check_range, MatchResult};
use crate::pattern::predicate::Pattern;

/// Upper bound for the forward search performed by a chained pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainBound {
    /// Search up to the end index of the innermost base search.
    ///
    /// The bound does not shrink as the chain grows.
    #[default]
    SearchEnd,
    /// Additionally stop at the start of the next parent chain, so the
    /// continuation must fall between two consecutive parent matches.
    ///
    /// The last parent chain is bounded by the search end. This variant
    /// pulls one parent chain ahead of the one being extended.
    NextParentMatch,
}

/// Finds the first window of `pattern` starting in `[from, to - len]`.
///
/// Assumes `from <= to <= items.len()` has already been checked.
pub(crate) fn find_in<T>(
    items: &[T],
    pattern: &Pattern<'_, T>,
    from: usize,
    to: usize,
) -> Option<MatchWindow> {
    let len = pattern.len();
    let last = to.checked_sub(len)?;
    (from..=last)
        .find(|&i| pattern.matches_at(items, i))
        .map(|i| MatchWindow::at(i, len))
}

/// Finds the first window of `pattern` that lies entirely inside `[from, to)`.
///
/// # Errors
///
/// Returns [`MatchError::InvalidRange`](crate::error::MatchError::InvalidRange)
/// unless `from <= to <= items.len()`.
///
/// # Examples
///
/// ```
/// use seqmatch::pattern::executor::find_first;
/// use seqmatch::pattern::predicate::{eq, Pattern};
///
/// let pattern = Pattern::new().with(eq(7));
/// let window = find_first(&[1, 7, 3, 7], &pattern, 2, 4).unwrap().unwrap();
/// assert_eq!(window.start(), 3);
/// ```
pub fn find_first<T>(
    items: &[T],
    pattern: &Pattern<'_, T>,
    from: usize,
    to: usize,
) -> MatchResult<Option<MatchWindow>> {
    check_range(from, to, items.len())?;
    Ok(find_in(items, pattern, from, to))
}

/// Per-enumeration cursor state.
enum ScanState<'s, T> {
    /// Next candidate start index of a base scan.
    Base { next: usize },
    /// Chained scan over a parent enumeration.
    Chained {
        parent: Box<Matches<'s, T>>,
        bound: ChainBound,
        /// Parent chain already pulled as lookahead for `NextParentMatch`.
        pending: Option<MatchChain>,
    },
}

/// Lazy iterator over the match chains of one search.
///
/// Created by [`MatchSequence::iter`](crate::sequence::MatchSequence::iter).
/// The searched items must not change while this iterator is alive, which
/// the borrow held on them enforces.
pub struct Matches<'s, T> {
    items: &'s [T],
    pattern: &'s Pattern<'s, T>,
    /// Exclusive end of the innermost base search range.
    end: usize,
    state: ScanState<'s, T>,
    /// Set while predicates run and after exhaustion; a predicate that
    /// unwinds leaves it set, so no further chains are produced.
    finished: bool,
}

impl<'s, T> Matches<'s, T> {
    /// Base scan over `[start, end)`. The range must already be valid.
    pub(crate) const fn base(
        items: &'s [T],
        pattern: &'s Pattern<'s, T>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            items,
            pattern,
            end,
            state: ScanState::Base { next: start },
            finished: false,
        }
    }

    /// Chained scan extending every chain produced by `parent`.
    pub(crate) fn chained(
        parent: Self,
        pattern: &'s Pattern<'s, T>,
        bound: ChainBound,
    ) -> Self {
        Self {
            items: parent.items,
            pattern,
            end: parent.end,
            state: ScanState::Chained {
                parent: Box::new(parent),
                bound,
                pending: None,
            },
            finished: false,
        }
    }

    /// Scans forward to the next chain.
    fn advance(&mut self) -> Option<MatchChain> {
        let len = self.pattern.len();
        match &mut self.state {
            ScanState::Base { next } => {
                let last = self.end.checked_sub(len)?;
                while *next <= last {
                    let i = *next;
                    *next += 1;
                    if self.pattern.matches_at(self.items, i) {
                        trace!("pattern matched at {}..{}", i, i + len);
                        return Some(MatchChain::single(MatchWindow::at(i, len)));
                    }
                }
                None
            }
            ScanState::Chained {
                parent,
                bound,
                pending,
            } => loop {
                let mut chain = match pending.take() {
                    Some(chain) => chain,
                    None => parent.next()?,
                };
                let limit = match bound {
                    ChainBound::SearchEnd => self.end,
                    ChainBound::NextParentMatch => match parent.next() {
                        Some(following) => {
                            let start = following.first().start();
                            *pending = Some(following);
                            start
                        }
                        None => self.end,
                    },
                };
                let from = chain.last().end();
                if from <= limit {
                    if let Some(window) = find_in(self.items, self.pattern, from, limit) {
                        trace!(
                            "chained pattern matched at {}..{} after {}",
                            window.start(),
                            window.end(),
                            from
                        );
                        chain.push(window);
                        return Some(chain);
                    }
                }
                trace!("no continuation in {}..{}, dropping chain", from, limit);
            },
        }
    }
}

impl<T> Iterator for Matches<'_, T> {
    type Item = MatchChain;

    fn next(&mut self) -> Option<MatchChain> {
        if self.finished {
            return None;
        }
        self.finished = true;
        let chain = self.advance()?;
        self.finished = false;
        Some(chain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        match &self.state {
            ScanState::Base { next } => {
                let remaining = self
                    .end
                    .checked_sub(self.pattern.len())
                    .and_then(|last| (last + 1).checked_sub(*next))
                    .unwrap_or(0);
                (0, Some(remaining))
            }
            ScanState::Chained {
                parent, pending, ..
            } => {
                let (_, upper) = parent.size_hint();
                (0, upper.and_then(|u| u.checked_add(usize::from(pending.is_some()))))
            }
        }
    }
}

impl<T> std::iter::FusedIterator for Matches<'_, T> {}

impl<T> std::fmt::Debug for Matches<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match &self.state {
            ScanState::Base { .. } => "base",
            ScanState::Chained { .. } => "chained",
        };
        f.debug_struct("Matches")
            .field("stage", &stage)
            .field("pattern_len", &self.pattern.len())
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
