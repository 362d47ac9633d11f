// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The branch-and-bound bin packer.
//!
//! `BnbPacker` searches partitions of a residual item list into bins via
//! depth-first recursion over the item index. At each node two branch
//! families are tried: inserting the current item into an open bin that
//! has not reached the target (subject to the per-bin cap), and opening a
//! new bin holding only the item. Three prunings keep the tree tractable:
//! a reward upper bound from suffix sums, a mandatory-leftover lower bound
//! over doomed bins, and structural symmetry keys that collapse duplicate
//! sibling branches at each level. When an insertion lands a bin within
//! [`REPLICATION_TOLERANCE`] above the target, the bin's value multiset is
//! greedily replicated from the remaining suffix before descending.
//!
//! All state mutations go through the undo trail, so every branch restores
//! the search state exactly on return.

use crate::{
    eval::evaluate,
    incumbent::Incumbent,
    replicate::replicate_template,
    state::{SearchState, SymmetryKey},
    stats::PackerStatistics,
    trail::SearchTrail,
};
use gantry_model::{
    bin::Bin,
    index::{BinIndex, ItemIndex},
    item::{Item, Value},
    objective::Objective,
    partition::Partition,
};
use rustc_hash::FxHashSet;
use std::time::Instant;

/// How far above the target a just-closed bin's sum may land and still act
/// as a replication template, in the smallest currency unit.
pub const REPLICATION_TOLERANCE: Value = 100;

/// The result of one pack call: the best partition discovered, its
/// objective, and the search statistics.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    partition: Partition,
    objective: Objective,
    stats: PackerStatistics,
}

impl PackOutcome {
    /// Returns the best partition discovered. Empty if no item could be
    /// placed anywhere (for example when every item exceeds the cap).
    #[inline]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Returns the objective of the best partition.
    #[inline]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Returns the statistics collected during the search.
    #[inline]
    pub fn stats(&self) -> &PackerStatistics {
        &self.stats
    }

    /// Consumes the outcome, returning the partition.
    #[inline]
    pub fn into_partition(self) -> Partition {
        self.partition
    }
}

/// A branch-and-bound packer configured with a target sum and an optional
/// per-bin cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BnbPacker {
    target: Value,
    per_bin_cap: Option<Value>,
}

impl BnbPacker {
    /// Creates a new `BnbPacker`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not positive, or if a cap is given that is
    /// not positive.
    pub fn new(target: Value, per_bin_cap: Option<Value>) -> Self {
        assert!(
            target > 0,
            "called `BnbPacker::new` with a non-positive target: {}",
            target
        );
        if let Some(cap) = per_bin_cap {
            assert!(
                cap > 0,
                "called `BnbPacker::new` with a non-positive cap: {}",
                cap
            );
        }
        Self {
            target,
            per_bin_cap,
        }
    }

    /// Returns the target sum a bin must reach to qualify.
    #[inline]
    pub fn target(&self) -> Value {
        self.target
    }

    /// Returns the per-bin cap, if any.
    #[inline]
    pub fn per_bin_cap(&self) -> Option<Value> {
        self.per_bin_cap
    }

    /// Searches for the best partition of `items` into bins and returns it
    /// together with its objective and the search statistics.
    ///
    /// The items are copied and sorted descending by value internally; the
    /// caller's order does not matter, and ties keep the caller's relative
    /// order so repeated runs are deterministic.
    pub fn pack(&self, items: &[Item]) -> PackOutcome {
        let start = Instant::now();

        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| b.value().cmp(&a.value()));

        let mut suffix_sums = vec![0; sorted.len() + 1];
        for index in (0..sorted.len()).rev() {
            suffix_sums[index] = suffix_sums[index + 1] + sorted[index].value();
        }

        let mut search = Search {
            items: &sorted,
            suffix_sums,
            target: self.target,
            per_bin_cap: self.per_bin_cap,
            state: SearchState::new(sorted.len()),
            trail: SearchTrail::preallocated(sorted.len()),
            incumbent: Incumbent::new(),
            stats: PackerStatistics::new(),
        };
        search.descend(0);

        let mut stats = search.stats;
        stats.set_time_total(start.elapsed());

        match search.incumbent.into_best() {
            Some((objective, bins)) => PackOutcome {
                partition: Partition::from_bins(bins),
                objective,
                stats,
            },
            None => PackOutcome {
                partition: Partition::new(),
                objective: Objective::ZERO,
                stats,
            },
        }
    }
}

impl std::fmt::Display for BnbPacker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.per_bin_cap {
            Some(cap) => write!(f, "BnbPacker(target: {}, cap: {})", self.target, cap),
            None => write!(f, "BnbPacker(target: {}, cap: none)", self.target),
        }
    }
}

/// One pack call's worth of search state. Items are sorted descending by
/// value so the suffix-sum bounds bite early.
struct Search<'a> {
    items: &'a [Item],
    suffix_sums: Vec<Value>,
    target: Value,
    per_bin_cap: Option<Value>,
    state: SearchState,
    trail: SearchTrail,
    incumbent: Incumbent,
    stats: PackerStatistics,
}

impl Search<'_> {
    fn descend(&mut self, index: usize) {
        self.stats.on_node_explored(index);
        let remaining = self.suffix_sums[index];

        // Bounds are checked before the leaf test, so a complete assignment
        // that cannot beat the incumbent is never re-evaluated.
        if let Some(best) = self.incumbent.objective() {
            let optimistic_rewards =
                ((self.state.assigned_total() + remaining) / self.target) as u64;
            if optimistic_rewards < best.reward_count() {
                self.stats.on_reward_bound_pruning();
                return;
            }

            // Bins that cannot reach the target even with the entire
            // remaining suffix are doomed; their mandatory items are a
            // lower bound on the final mandatory leftover.
            let mut leftover_bound = 0u64;
            for bin in self.state.bins() {
                if bin.sum() < self.target && bin.sum() + remaining < self.target {
                    leftover_bound += bin.mandatory_count() as u64;
                }
            }
            if leftover_bound > best.mandatory_leftover() {
                self.stats.on_mandatory_bound_pruning();
                return;
            }
        }

        if index == self.items.len() {
            self.stats.on_solution_found();
            let objective = evaluate(self.state.bins(), self.target);
            if self.incumbent.try_improve(objective, self.state.bins()) {
                tracing::debug!(%objective, bins = self.state.num_open_bins(), "incumbent improved");
            }
            return;
        }

        if self.state.is_used(ItemIndex::new(index)) {
            self.descend(index + 1);
            return;
        }

        let item = self.items[index];

        // Only one representative among open bins sharing a
        // (mandatory count, sum) signature is branched into at this level.
        let mut seen: FxHashSet<SymmetryKey> = FxHashSet::default();

        for raw_index in 0..self.state.num_open_bins() {
            let bin_index = BinIndex::new(raw_index);
            let bin = self.state.bin(bin_index);
            if bin.sum() >= self.target {
                continue;
            }
            if let Some(cap) = self.per_bin_cap {
                if bin.sum() + item.value() > cap {
                    continue;
                }
            }
            if !seen.insert(SymmetryKey::of_bin(bin)) {
                self.stats.on_symmetry_pruning();
                continue;
            }

            self.trail.push_frame();
            self.trail.insert_item(&mut self.state, bin_index, item);
            self.try_replicate(bin_index, index);

            self.descend(index + 1);

            self.trail.backtrack(&mut self.state);
            self.stats.on_backtrack();
        }

        let fits_alone = self.per_bin_cap.map_or(true, |cap| item.value() <= cap);
        if fits_alone {
            self.trail.push_frame();
            self.trail.open_bin(&mut self.state, item);

            self.descend(index + 1);

            self.trail.backtrack(&mut self.state);
            self.stats.on_backtrack();
        }
    }

    /// If the bin the current item just joined landed within the
    /// replication tolerance above the target, replicate its value multiset
    /// from the unconsumed suffix. The replicas stay committed for the
    /// whole subtree and are undone along with the insertion frame.
    fn try_replicate(&mut self, bin_index: BinIndex, index: usize) {
        let overshoot = self.state.bin(bin_index).sum() - self.target;
        if !(0..=REPLICATION_TOLERANCE).contains(&overshoot) {
            return;
        }
        let template: Bin = self.state.bin(bin_index).clone();
        let copies = replicate_template(
            self.items,
            index + 1,
            &template,
            &mut self.state,
            &mut self.trail,
        );
        if copies > 0 {
            self.stats.on_bins_replicated(copies as u64);
        }
    }
}
