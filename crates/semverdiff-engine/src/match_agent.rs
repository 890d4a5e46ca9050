//! Ambiguity-aware pairing primitive
//!
//! `MatchAgent` pairs elements of an old and a new collection across a
//! sequence of predicates of decreasing strictness. A pair is only accepted
//! when it is unambiguous on both sides for the current predicate; anything
//! still ambiguous stays in the pool for a later, differently-scoped tier.

use semverdiff_core::Element;

/// A paired old/new element believed to be the same logical entity
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMatch<'a, T> {
    pub old_item: &'a T,
    pub new_item: &'a T,
}

/// The outcome of matching two collections
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResults<'a, T> {
    /// Accepted pairs, in discovery order across tiers
    pub matching_items: Vec<ItemMatch<'a, T>>,

    /// New-side elements no tier could pair, in input order
    pub items_added: Vec<&'a T>,

    /// Old-side elements no tier could pair, in input order
    pub items_removed: Vec<&'a T>,
}

/// Generic pairing engine over two element pools
pub struct MatchAgent<'a, T> {
    old_pool: Vec<&'a T>,
    new_pool: Vec<&'a T>,
    matches: Vec<ItemMatch<'a, T>>,
}

impl<'a, T: Element> MatchAgent<'a, T> {
    pub fn new(old_items: &'a [T], new_items: &'a [T]) -> Self {
        Self {
            old_pool: old_items.iter().collect(),
            new_pool: new_items.iter().collect(),
            matches: Vec::new(),
        }
    }

    /// Run one matching tier over the current remainder
    ///
    /// A pair `(o, n)` is accepted iff the predicate holds for it and `n` is
    /// the unique candidate for `o` while `o` is the unique candidate for
    /// `n`. Candidate counts are computed against the pools as they stood
    /// when the tier started, so acceptance depends only on cardinality and
    /// never on iteration order.
    pub fn match_on(&mut self, predicate: impl Fn(&T, &T) -> bool) {
        let mut accepted: Vec<(usize, usize)> = Vec::new();

        for (old_idx, old_item) in self.old_pool.iter().enumerate() {
            let candidates: Vec<usize> = self
                .new_pool
                .iter()
                .enumerate()
                .filter(|(_, new_item)| predicate(old_item, new_item))
                .map(|(idx, _)| idx)
                .collect();

            let &[new_idx] = candidates.as_slice() else {
                continue;
            };

            let reverse_count = self
                .old_pool
                .iter()
                .filter(|other_old| predicate(other_old, self.new_pool[new_idx]))
                .count();

            if reverse_count == 1 {
                accepted.push((old_idx, new_idx));
            }
        }

        for &(old_idx, new_idx) in &accepted {
            self.matches.push(ItemMatch {
                old_item: self.old_pool[old_idx],
                new_item: self.new_pool[new_idx],
            });
        }

        // Remove in descending index order so earlier indices stay valid
        let mut old_removals: Vec<usize> = accepted.iter().map(|&(o, _)| o).collect();
        let mut new_removals: Vec<usize> = accepted.iter().map(|&(_, n)| n).collect();
        old_removals.sort_unstable_by(|a, b| b.cmp(a));
        new_removals.sort_unstable_by(|a, b| b.cmp(a));

        for idx in old_removals {
            self.old_pool.remove(idx);
        }
        for idx in new_removals {
            self.new_pool.remove(idx);
        }
    }

    /// Finish matching: whatever is still pooled is an addition or removal
    pub fn into_results(self) -> MatchResults<'a, T> {
        MatchResults {
            matching_items: self.matches,
            items_added: self.new_pool,
            items_removed: self.old_pool,
        }
    }
}
