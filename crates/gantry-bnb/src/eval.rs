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

//! Partition scoring against the reward target.

use gantry_model::{bin::Bin, item::Value, objective::Objective};

/// Scores a set of bins against the target.
///
/// For each bin: if its sum meets or exceeds the target, the reward count
/// is incremented and the overshoot is added to the waste; otherwise the
/// bin's mandatory count is added to the mandatory leftover.
///
/// Pure, no side effects, `O(number of bins)`.
pub fn evaluate(bins: &[Bin], target: Value) -> Objective {
    let mut mandatory_leftover = 0u64;
    let mut reward_count = 0u64;
    let mut waste: Value = 0;

    for bin in bins {
        if bin.is_qualifying(target) {
            reward_count += 1;
            waste += bin.sum() - target;
        } else {
            mandatory_leftover += bin.mandatory_count() as u64;
        }
    }

    Objective::new(mandatory_leftover, reward_count, waste)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::item::Item;

    #[test]
    fn test_empty_partition_scores_zero() {
        assert_eq!(evaluate(&[], 1000), Objective::ZERO);
    }

    #[test]
    fn test_qualifying_bin_counts_reward_and_waste() {
        let mut bin = Bin::new();
        bin.push(Item::optional(600));
        bin.push(Item::mandatory(450));

        let objective = evaluate(std::slice::from_ref(&bin), 1000);
        assert_eq!(objective, Objective::new(0, 1, 50));
    }

    #[test]
    fn test_exact_target_has_zero_waste() {
        let bin = Bin::singleton(Item::mandatory(1000));
        let objective = evaluate(std::slice::from_ref(&bin), 1000);
        assert_eq!(objective, Objective::new(0, 1, 0));
    }

    #[test]
    fn test_non_qualifying_bin_strands_mandatory_items() {
        let mut bin = Bin::new();
        bin.push(Item::mandatory(700));
        bin.push(Item::optional(200));

        let objective = evaluate(std::slice::from_ref(&bin), 1000);
        assert_eq!(objective, Objective::new(1, 0, 0));
    }

    #[test]
    fn test_mixed_bins_accumulate() {
        let mut qualifying = Bin::new();
        qualifying.push(Item::mandatory(800));
        qualifying.push(Item::optional(300));

        let mut stranded = Bin::new();
        stranded.push(Item::mandatory(100));
        stranded.push(Item::mandatory(150));

        let objective = evaluate(&[qualifying, stranded], 1000);
        assert_eq!(objective, Objective::new(2, 1, 100));
    }
}
