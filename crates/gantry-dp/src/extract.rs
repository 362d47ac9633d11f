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

//! Exact subset-sum extraction maximizing mandatory-item usage.
//!
//! The dynamic program tracks, for every achievable sum `s` in
//! `0..=target`, the maximum number of mandatory items reachable, plus a
//! provenance record (previous sum and item index) written the first time
//! an improvement is found for that sum. Items are processed in a fixed
//! order and sums in decreasing order, enforcing each item is used at most
//! once.

use crate::error::ReconstructionFault;
use fixedbitset::FixedBitSet;
use gantry_model::{
    index::ItemIndex,
    item::{Item, Value},
};

/// A provenance record: how a sum was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Provenance {
    /// The sum before the recorded item was added.
    previous_sum: usize,
    /// The item index that was added to reach the sum.
    item: usize,
}

/// The filled DP table over sums `0..=target`.
struct DpTable {
    /// `best_mandatory[s]` is the maximum mandatory-item count over all
    /// subsets summing exactly to `s`, or `None` if `s` is unreachable.
    best_mandatory: Vec<Option<u32>>,
    /// First-improvement provenance per sum.
    provenance: Vec<Option<Provenance>>,
}

/// Finds one subset of `items` summing exactly to `target_sum`, maximizing
/// the number of mandatory items used.
///
/// Returns the indices of the chosen items (into `items`), or `None` if no
/// exact subset exists, if `target_sum` is not positive, or if the DP
/// provenance turns out to be corrupted (logged diagnostically, never
/// propagated as a duplicate-item subset).
///
/// Deterministic: given a fixed item order, repeated calls return the same
/// subset (earliest-discovered paths are retained on ties).
pub fn extract_exact_subset(items: &[Item], target_sum: Value) -> Option<Vec<ItemIndex>> {
    if target_sum <= 0 || items.is_empty() {
        return None;
    }

    // The total of positive values bounds every subset sum; targets beyond
    // it are unreachable and must not size the tables.
    let total: Value = items.iter().map(|item| item.value().max(0)).sum();
    if target_sum > total {
        return None;
    }

    let target = target_sum as usize;
    let table = fill_table(items, target);
    table.best_mandatory[target]?;

    match reconstruct(&table, items.len(), target) {
        Ok(indices) => Some(indices),
        Err(fault) => {
            tracing::warn!(
                %fault,
                target_sum,
                num_items = items.len(),
                "discarding subset extraction with corrupted provenance"
            );
            None
        }
    }
}

/// Runs the 0/1 subset-sum dynamic program over sums `0..=target`.
fn fill_table(items: &[Item], target: usize) -> DpTable {
    let mut best_mandatory: Vec<Option<u32>> = vec![None; target + 1];
    let mut provenance: Vec<Option<Provenance>> = vec![None; target + 1];
    best_mandatory[0] = Some(0);

    for (i, item) in items.iter().enumerate() {
        let value = item.value();
        if value <= 0 || value as usize > target {
            continue;
        }
        let value = value as usize;
        let weight = u32::from(item.is_mandatory());

        // Decreasing sums so each item is used at most once.
        for s in (0..=target - value).rev() {
            let Some(reachable) = best_mandatory[s] else {
                continue;
            };
            let s2 = s + value;
            let candidate = reachable + weight;
            if best_mandatory[s2].map_or(true, |current| candidate > current) {
                best_mandatory[s2] = Some(candidate);
                // Provenance is written only the first time an improvement
                // lands on s2, keeping the earliest-discovered path.
                if provenance[s2].is_none() {
                    provenance[s2] = Some(Provenance {
                        previous_sum: s,
                        item: i,
                    });
                }
            }
        }
    }

    DpTable {
        best_mandatory,
        provenance,
    }
}

/// Walks the provenance chain backwards from `target` to zero, collecting
/// the chosen item indices.
///
/// The walk must terminate within `num_items` steps and must never revisit
/// an index; either violation is reported as a `ReconstructionFault`.
fn reconstruct(
    table: &DpTable,
    num_items: usize,
    target: usize,
) -> Result<Vec<ItemIndex>, ReconstructionFault> {
    let mut indices = Vec::new();
    let mut visited = FixedBitSet::with_capacity(num_items);
    let mut current = target;
    let mut steps = 0usize;

    while current > 0 {
        if steps >= num_items {
            return Err(ReconstructionFault::StepBoundExceeded {
                max_steps: num_items,
            });
        }
        let record = table.provenance[current]
            .ok_or(ReconstructionFault::MissingProvenance { sum: current })?;
        if visited.contains(record.item) {
            return Err(ReconstructionFault::RevisitedIndex {
                index: record.item,
                sum: current,
            });
        }
        visited.insert(record.item);
        indices.push(ItemIndex::new(record.item));
        current = record.previous_sum;
        steps += 1;
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of(items: &[Item], indices: &[ItemIndex]) -> Value {
        indices.iter().map(|ix| items[ix.get()].value()).sum()
    }

    #[test]
    fn test_finds_exact_subset() {
        // Scenario: [400, 300, 300], target 1000 -> all three items.
        let items = vec![
            Item::optional(400),
            Item::optional(300),
            Item::optional(300),
        ];
        let picked = extract_exact_subset(&items, 1000).expect("subset should exist");
        assert_eq!(sum_of(&items, &picked), 1000);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_returns_none_when_no_exact_subset_exists() {
        let items = vec![Item::optional(700), Item::optional(200)];
        assert_eq!(extract_exact_subset(&items, 1000), None);
    }

    #[test]
    fn test_returns_none_for_non_positive_target() {
        let items = vec![Item::optional(100)];
        assert_eq!(extract_exact_subset(&items, 0), None);
        assert_eq!(extract_exact_subset(&items, -5), None);
    }

    #[test]
    fn test_returns_none_for_empty_items() {
        assert_eq!(extract_exact_subset(&[], 100), None);
    }

    #[test]
    fn test_rejects_unreachable_target_without_tabling() {
        // The target dwarfs the total item value. It must be rejected up
        // front; sizing the tables by it would demand terabytes.
        let items = vec![Item::optional(100)];
        assert_eq!(extract_exact_subset(&items, 2_000_000_000_000), None);
    }

    #[test]
    fn test_prefers_mandatory_items_on_equal_sums() {
        // Two ways to reach 1000: {0, 2} (optional only) or with index 1
        // (mandatory). The extractor must use the mandatory item.
        let items = vec![
            Item::optional(500),
            Item::mandatory(500),
            Item::optional(500),
        ];
        let picked = extract_exact_subset(&items, 1000).expect("subset should exist");
        assert_eq!(sum_of(&items, &picked), 1000);
        assert!(picked.contains(&ItemIndex::new(1)));
    }

    #[test]
    fn test_no_duplicate_indices() {
        let items = vec![
            Item::optional(250),
            Item::optional(250),
            Item::optional(250),
            Item::optional(250),
        ];
        let picked = extract_exact_subset(&items, 1000).expect("subset should exist");
        let mut sorted: Vec<_> = picked.iter().map(|ix| ix.get()).collect();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_skips_items_larger_than_target() {
        let items = vec![Item::optional(5000), Item::optional(100)];
        let picked = extract_exact_subset(&items, 100).expect("subset should exist");
        assert_eq!(picked, vec![ItemIndex::new(1)]);
    }

    #[test]
    fn test_skips_zero_value_items() {
        let items = vec![Item::optional(0), Item::optional(100)];
        let picked = extract_exact_subset(&items, 100).expect("subset should exist");
        assert_eq!(picked, vec![ItemIndex::new(1)]);
    }

    #[test]
    fn test_is_deterministic() {
        let items = vec![
            Item::optional(300),
            Item::mandatory(400),
            Item::optional(300),
            Item::optional(400),
            Item::mandatory(600),
        ];
        let first = extract_exact_subset(&items, 1000).expect("subset should exist");
        for _ in 0..10 {
            assert_eq!(extract_exact_subset(&items, 1000).unwrap(), first);
        }
    }

    #[test]
    fn test_reconstruct_rejects_provenance_cycle() {
        // Corrupt table: sum 2 points back to sum 1, sum 1 points back to
        // sum 2, both via the same item.
        let table = DpTable {
            best_mandatory: vec![Some(0), Some(0), Some(0)],
            provenance: vec![
                None,
                Some(Provenance {
                    previous_sum: 2,
                    item: 0,
                }),
                Some(Provenance {
                    previous_sum: 1,
                    item: 0,
                }),
            ],
        };
        let fault = reconstruct(&table, 4, 2).unwrap_err();
        assert_eq!(
            fault,
            ReconstructionFault::RevisitedIndex { index: 0, sum: 1 }
        );
    }

    #[test]
    fn test_reconstruct_rejects_missing_provenance() {
        let table = DpTable {
            best_mandatory: vec![Some(0), Some(0)],
            provenance: vec![None, None],
        };
        let fault = reconstruct(&table, 3, 1).unwrap_err();
        assert_eq!(fault, ReconstructionFault::MissingProvenance { sum: 1 });
    }

    #[test]
    fn test_reconstruct_rejects_overlong_walk() {
        // A chain of distinct items longer than the claimed item count.
        let table = DpTable {
            best_mandatory: vec![Some(0); 4],
            provenance: vec![
                None,
                Some(Provenance {
                    previous_sum: 0,
                    item: 2,
                }),
                Some(Provenance {
                    previous_sum: 1,
                    item: 1,
                }),
                Some(Provenance {
                    previous_sum: 2,
                    item: 0,
                }),
            ],
        };
        let fault = reconstruct(&table, 2, 3).unwrap_err();
        assert_eq!(fault, ReconstructionFault::StepBoundExceeded { max_steps: 2 });
    }
}
