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

//! The phase pipeline.
//!
//! `HybridSolver::solve` runs preprocessing, DP extraction, and completion
//! in order, concatenates the bins each phase produced, and sorts the
//! result ascending by bin sum. Sorting is presentation only; it carries
//! no semantic weight.
//!
//! The DP extraction loop walks sums from the target upward through the
//! tolerance window, re-querying the same sum against the shrinking
//! residual set until extraction fails before advancing. An iteration
//! guard bounded by the residual item count stops the loop if extraction
//! ever stops consuming items.

use crate::{
    config::{SolveConfig, Strategy},
    stats::SolveStatistics,
};
use fixedbitset::FixedBitSet;
use gantry_bnb::{eval::evaluate, BnbPacker};
use gantry_dp::extract_exact_subset;
use gantry_model::{bin::Bin, item::Item, objective::Objective, partition::Partition};
use std::time::Instant;

/// The result of one solve call.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    partition: Partition,
    objective: Objective,
    stats: SolveStatistics,
}

impl SolveOutcome {
    /// Returns the final partition, sorted ascending by bin sum.
    #[inline]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Returns the objective of the final partition.
    #[inline]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Returns the per-phase statistics.
    #[inline]
    pub fn stats(&self) -> &SolveStatistics {
        &self.stats
    }

    /// Consumes the outcome, returning the partition.
    #[inline]
    pub fn into_partition(self) -> Partition {
        self.partition
    }
}

/// Orchestrates preprocessing, DP extraction, and completion over one
/// item set according to a [`SolveConfig`].
#[derive(Debug, Clone, Copy)]
pub struct HybridSolver {
    config: SolveConfig,
}

impl HybridSolver {
    /// Creates a solver for the given configuration.
    #[inline]
    pub fn new(config: SolveConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Solves the bin covering instance over `items`.
    ///
    /// Every input item ends up in exactly one bin of the returned
    /// partition. Items that cannot reach the target in any combination
    /// are still emitted, either inside a non-qualifying bin found by the
    /// packer or as deferred singletons.
    pub fn solve(&self, items: &[Item]) -> SolveOutcome {
        let start = Instant::now();
        let mut stats = SolveStatistics::new();
        let mut partition = Partition::new();

        let remaining = self.preprocess(items, &mut partition, &mut stats);
        let remaining = self.extract_exact_bins(remaining, &mut partition, &mut stats);
        self.complete(remaining, &mut partition, &mut stats);

        partition.sort_by_sum();
        let objective = evaluate(partition.bins(), self.config.target());
        stats.set_time_total(start.elapsed());
        tracing::info!(
            %objective,
            bins = partition.len(),
            strategy = %self.config.strategy(),
            "solve finished"
        );

        SolveOutcome {
            partition,
            objective,
            stats,
        }
    }

    /// Phase 1: items meeting the target alone become singleton qualifying
    /// bins. Returns the residual items.
    fn preprocess(
        &self,
        items: &[Item],
        partition: &mut Partition,
        stats: &mut SolveStatistics,
    ) -> Vec<Item> {
        let mut remaining = Vec::with_capacity(items.len());
        for &item in items {
            if item.value() >= self.config.target() {
                partition.push_bin(Bin::singleton(item));
                stats.on_preprocessed_bin();
            } else {
                remaining.push(item);
            }
        }
        remaining
    }

    /// Phase 2: peel exact-sum subsets off the residual set for each sum
    /// in the tolerance window. Returns what the extraction left behind.
    ///
    /// Skipped entirely when the strategy disables it or when a cap below
    /// the target makes exact-target bins unreachable.
    fn extract_exact_bins(
        &self,
        mut remaining: Vec<Item>,
        partition: &mut Partition,
        stats: &mut SolveStatistics,
    ) -> Vec<Item> {
        let target = self.config.target();
        if !self.config.strategy().uses_dp_extraction() || target <= 0 {
            return remaining;
        }
        if matches!(self.config.per_bin_cap(), Some(cap) if cap < target) {
            return remaining;
        }

        let mut max_sum = target + self.config.dp_tolerance().max(0);
        if let Some(cap) = self.config.per_bin_cap() {
            max_sum = max_sum.min(cap);
        }

        let mut sum = target;
        while sum <= max_sum && !remaining.is_empty() {
            // Each successful extraction removes at least one item, so the
            // residual count bounds the number of queries this sum can
            // legitimately answer.
            let mut guard = remaining.len();
            loop {
                if remaining.is_empty() {
                    break;
                }
                if guard == 0 {
                    tracing::warn!(sum, "extraction guard tripped, advancing to next sum");
                    break;
                }
                guard -= 1;

                stats.on_dp_query();
                let picked = match extract_exact_subset(&remaining, sum) {
                    Some(picked) => picked,
                    None => break,
                };

                let mut picked_mask = FixedBitSet::with_capacity(remaining.len());
                for index in &picked {
                    picked_mask.insert(index.get());
                }

                let mut bin = Bin::new();
                let mut kept = Vec::with_capacity(remaining.len() - picked.len());
                for (index, item) in remaining.iter().enumerate() {
                    if picked_mask.contains(index) {
                        bin.push(*item);
                    } else {
                        kept.push(*item);
                    }
                }
                debug_assert_eq!(
                    bin.sum(),
                    sum,
                    "extracted subset does not sum to the queried value"
                );
                partition.push_bin(bin);
                stats.on_dp_bin();
                remaining = kept;
            }
            sum += 1;
        }
        remaining
    }

    /// Phase 3: pack the remainder by branch and bound, or emit deferred
    /// singletons under the pure DP strategy.
    ///
    /// A packer that finds no complete assignment (every item blocked by
    /// the cap) is a configuration error; the items are still emitted as
    /// deferred singletons so the partition conserves the input.
    fn complete(
        &self,
        remaining: Vec<Item>,
        partition: &mut Partition,
        stats: &mut SolveStatistics,
    ) {
        if remaining.is_empty() {
            return;
        }
        if self.config.strategy().uses_backtracking() {
            let packer = BnbPacker::new(self.config.target(), self.config.per_bin_cap());
            let outcome = packer.pack(&remaining);
            stats.set_packer(*outcome.stats());
            if outcome.partition().is_empty() {
                tracing::warn!(
                    items = remaining.len(),
                    cap = ?self.config.per_bin_cap(),
                    "no placement satisfies the cap, emitting deferred singletons"
                );
                self.defer_singletons(remaining, partition, stats);
            } else {
                partition.extend(outcome.into_partition());
            }
        } else {
            debug_assert_eq!(self.config.strategy(), Strategy::Dp);
            self.defer_singletons(remaining, partition, stats);
        }
    }

    fn defer_singletons(
        &self,
        remaining: Vec<Item>,
        partition: &mut Partition,
        stats: &mut SolveStatistics,
    ) {
        for item in remaining {
            partition.push_bin(Bin::singleton(item));
            stats.on_deferred_singleton();
        }
    }
}

impl std::fmt::Display for HybridSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HybridSolver({})", self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::item::Value;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn solve(items: &[Item], config: SolveConfig) -> SolveOutcome {
        HybridSolver::new(config).solve(items)
    }

    fn sorted_values(outcome: &SolveOutcome) -> Vec<(Value, bool)> {
        let mut values: Vec<(Value, bool)> = outcome
            .partition()
            .bins()
            .iter()
            .flat_map(|bin| bin.items())
            .map(|item| (item.value(), item.is_mandatory()))
            .collect();
        values.sort();
        values
    }

    #[test]
    fn test_single_exact_mandatory_item() {
        let items = vec![Item::mandatory(1000)];
        let outcome = solve(&items, SolveConfig::new(1000));
        assert_eq!(outcome.partition().len(), 1);
        assert_eq!(outcome.objective(), Objective::new(0, 1, 0));
        assert_eq!(outcome.stats().preprocessed_bins(), 1);
    }

    #[test]
    fn test_dp_finds_exact_combination() {
        let items = vec![
            Item::optional(400),
            Item::optional(300),
            Item::optional(300),
        ];
        let outcome = solve(&items, SolveConfig::new(1000));
        assert_eq!(outcome.partition().len(), 1);
        assert_eq!(outcome.partition().bins()[0].sum(), 1000);
        assert_eq!(outcome.objective().waste(), 0);
        assert_eq!(outcome.stats().dp_bins(), 1);
    }

    #[test]
    fn test_short_remainder_ends_in_one_bin() {
        let items = vec![Item::mandatory(700), Item::optional(200)];
        let outcome = solve(&items, SolveConfig::new(1000));
        assert_eq!(outcome.partition().len(), 1);
        assert_eq!(outcome.partition().bins()[0].sum(), 900);
        assert_eq!(outcome.objective().mandatory_leftover(), 1);
        assert_eq!(outcome.objective().reward_count(), 0);
    }

    #[test]
    fn test_empty_input_yields_empty_partition() {
        let outcome = solve(&[], SolveConfig::new(1000));
        assert!(outcome.partition().is_empty());
        assert_eq!(outcome.objective(), Objective::ZERO);
    }

    #[test]
    fn test_cap_below_item_value_defers_the_item() {
        // The 600 item can never enter a bin capped at 500. It must still
        // appear in the output, as a deferred singleton.
        let items = vec![Item::mandatory(600)];
        let config = SolveConfig::new(1000).with_per_bin_cap(Some(500));
        let outcome = solve(&items, config);
        assert_eq!(outcome.partition().len(), 1);
        assert_eq!(outcome.partition().bins()[0].sum(), 600);
        assert_eq!(outcome.stats().deferred_singletons(), 1);
        // The DP phase is skipped outright when the cap is below target.
        assert_eq!(outcome.stats().dp_queries(), 0);
    }

    #[test]
    fn test_conservation_across_strategies() {
        let items = vec![
            Item::mandatory(1200),
            Item::mandatory(450),
            Item::optional(550),
            Item::optional(320),
            Item::optional(180),
            Item::optional(90),
        ];
        let mut expected: Vec<(Value, bool)> = items
            .iter()
            .map(|item| (item.value(), item.is_mandatory()))
            .collect();
        expected.sort();

        for strategy in [Strategy::Dp, Strategy::Backtracking, Strategy::Hybrid] {
            let config = SolveConfig::new(1000).with_strategy(strategy);
            let outcome = solve(&items, config);
            assert_eq!(
                sorted_values(&outcome),
                expected,
                "strategy {} lost or duplicated items",
                strategy
            );
        }
    }

    #[test]
    fn test_dp_strategy_defers_leftovers_as_singletons() {
        let items = vec![
            Item::optional(600),
            Item::optional(400),
            Item::mandatory(150),
            Item::optional(70),
        ];
        let config = SolveConfig::new(1000).with_strategy(Strategy::Dp);
        let outcome = solve(&items, config);

        // 600+400 is extracted; 150 and 70 become singletons.
        assert_eq!(outcome.stats().dp_bins(), 1);
        assert_eq!(outcome.stats().deferred_singletons(), 2);
        assert_eq!(outcome.partition().len(), 3);
        assert_eq!(outcome.objective().mandatory_leftover(), 1);
    }

    #[test]
    fn test_requeries_same_sum_on_shrinking_residual() {
        // Two disjoint exact-1000 subsets at the same sum.
        let items = vec![
            Item::optional(600),
            Item::optional(400),
            Item::optional(550),
            Item::optional(450),
        ];
        let config = SolveConfig::new(1000).with_strategy(Strategy::Dp);
        let outcome = solve(&items, config);
        assert_eq!(outcome.stats().dp_bins(), 2);
        assert_eq!(outcome.objective().reward_count(), 2);
        assert_eq!(outcome.objective().waste(), 0);
    }

    #[test]
    fn test_tolerance_window_catches_near_target_sums() {
        // 670+337 = 1007, inside the default window of 10 above 1000.
        let items = vec![Item::optional(670), Item::optional(337)];
        let outcome = solve(&items, SolveConfig::new(1000));
        assert_eq!(outcome.objective().reward_count(), 1);
        assert_eq!(outcome.objective().waste(), 7);
        assert_eq!(outcome.stats().dp_bins(), 1);
    }

    #[test]
    fn test_zero_tolerance_narrows_the_window() {
        let items = vec![Item::optional(670), Item::optional(337)];
        let config = SolveConfig::new(1000)
            .with_strategy(Strategy::Dp)
            .with_dp_tolerance(0);
        let outcome = solve(&items, config);
        assert_eq!(outcome.stats().dp_bins(), 0);
        assert_eq!(outcome.stats().deferred_singletons(), 2);
    }

    #[test]
    fn test_preprocessing_is_strategy_independent() {
        let items = vec![Item::mandatory(1500), Item::optional(100)];
        for strategy in [Strategy::Dp, Strategy::Backtracking, Strategy::Hybrid] {
            let config = SolveConfig::new(1000).with_strategy(strategy);
            let outcome = solve(&items, config);
            let qualifying = outcome
                .partition()
                .bins()
                .iter()
                .filter(|bin| bin.len() == 1 && bin.sum() == 1500)
                .count();
            assert_eq!(qualifying, 1, "strategy {} broke preprocessing", strategy);
            assert_eq!(outcome.stats().preprocessed_bins(), 1);
        }
    }

    #[test]
    fn test_partition_is_sorted_ascending_by_sum() {
        let items = vec![
            Item::mandatory(1800),
            Item::optional(600),
            Item::optional(400),
            Item::optional(50),
        ];
        let outcome = solve(&items, SolveConfig::new(1000));
        let sums: Vec<Value> = outcome
            .partition()
            .bins()
            .iter()
            .map(|bin| bin.sum())
            .collect();
        let mut sorted = sums.clone();
        sorted.sort();
        assert_eq!(sums, sorted);
    }

    #[test]
    fn test_degenerate_target_absorbs_everything_in_preprocessing() {
        let items = vec![Item::optional(5), Item::mandatory(3)];
        let outcome = solve(&items, SolveConfig::new(0));
        assert_eq!(outcome.stats().preprocessed_bins(), 2);
        assert_eq!(outcome.partition().len(), 2);
    }

    #[test]
    fn test_hybrid_commits_to_dp_extraction() {
        // DP peels the exact 600+400 bin first, stranding the mandatory
        // 500 alone. Pure backtracking instead pays 100 of waste to pull
        // the mandatory item into the qualifying bin. The hybrid result is
        // legitimately worse; the phases are not reconciled.
        let items = vec![
            Item::optional(600),
            Item::optional(400),
            Item::mandatory(500),
        ];
        let hybrid = solve(&items, SolveConfig::new(1000));
        let pure_bt = solve(
            &items,
            SolveConfig::new(1000).with_strategy(Strategy::Backtracking),
        );
        assert_eq!(pure_bt.objective().mandatory_leftover(), 0);
        assert_eq!(hybrid.objective().mandatory_leftover(), 1);
        assert_eq!(hybrid.stats().dp_bins(), 1);
        assert!(pure_bt.objective().is_better_than(&hybrid.objective()));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let mut rng = StdRng::seed_from_u64(99);
        let items: Vec<Item> = (0..10)
            .map(|_| {
                let value = rng.gen_range(50..900);
                if rng.gen_bool(0.3) {
                    Item::mandatory(value)
                } else {
                    Item::optional(value)
                }
            })
            .collect();

        let config = SolveConfig::new(1000);
        let first = solve(&items, config);
        let second = solve(&items, config);
        assert_eq!(first.objective(), second.objective());
        assert_eq!(first.partition().bins(), second.partition().bins());
    }
}
