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

//! Incumbent management for the branch-and-bound packer.
//!
//! The incumbent holds the best partition found so far together with its
//! objective. "No solution yet" is an explicit `None` state; there are no
//! infinite sentinel constants. Installed partitions are structural copies
//! of the mutable search bins, never aliases.

use gantry_model::{bin::Bin, objective::Objective};

/// The best solution found so far during one pack call, if any.
#[derive(Debug, Clone, Default)]
pub(crate) struct Incumbent {
    best: Option<(Objective, Vec<Bin>)>,
}

impl Incumbent {
    /// Creates a new `Incumbent` with no solution recorded.
    #[inline]
    pub(crate) fn new() -> Self {
        Self { best: None }
    }

    /// Returns `true` if any full solution has been recorded.
    #[inline]
    pub(crate) fn has_solution(&self) -> bool {
        self.best.is_some()
    }

    /// Returns the objective of the best solution found so far, if any.
    #[inline]
    pub(crate) fn objective(&self) -> Option<Objective> {
        self.best.as_ref().map(|(objective, _)| *objective)
    }

    /// Installs `bins` as the new best solution if `objective` improves on
    /// the recorded best under the lexicographic ordering (or if no
    /// solution has been recorded yet). Returns `true` on improvement.
    ///
    /// The bins are copied structurally; the caller keeps ownership of the
    /// mutable search bins.
    pub(crate) fn try_improve(&mut self, objective: Objective, bins: &[Bin]) -> bool {
        let improves = match &self.best {
            None => true,
            Some((best_objective, _)) => objective.is_better_than(best_objective),
        };
        if improves {
            self.best = Some((objective, bins.to_vec()));
        }
        improves
    }

    /// Consumes the incumbent, returning the best objective and partition
    /// found, if any.
    #[inline]
    pub(crate) fn into_best(self) -> Option<(Objective, Vec<Bin>)> {
        self.best
    }
}

impl std::fmt::Display for Incumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.best {
            Some((objective, bins)) => {
                write!(f, "Incumbent(objective: {}, bins: {})", objective, bins.len())
            }
            None => write!(f, "Incumbent(no solution yet)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::item::Item;

    fn bins_with_sums(sums: &[i64]) -> Vec<Bin> {
        sums.iter()
            .map(|&s| Bin::singleton(Item::optional(s)))
            .collect()
    }

    #[test]
    fn test_first_solution_is_always_installed() {
        let mut incumbent = Incumbent::new();
        assert!(!incumbent.has_solution());

        let installed = incumbent.try_improve(Objective::new(5, 0, 0), &bins_with_sums(&[100]));
        assert!(installed);
        assert!(incumbent.has_solution());
        assert_eq!(incumbent.objective(), Some(Objective::new(5, 0, 0)));
    }

    #[test]
    fn test_improvement_sequence_is_lexicographically_monotonic() {
        let mut incumbent = Incumbent::new();
        let bins = bins_with_sums(&[100]);

        assert!(incumbent.try_improve(Objective::new(2, 1, 50), &bins));
        // Worse mandatory leftover is rejected regardless of rewards.
        assert!(!incumbent.try_improve(Objective::new(3, 9, 0), &bins));
        // Equal leftover, more rewards wins.
        assert!(incumbent.try_improve(Objective::new(2, 2, 80), &bins));
        // Equal leftover and rewards, higher waste is rejected.
        assert!(!incumbent.try_improve(Objective::new(2, 2, 90), &bins));
        // Equal leftover and rewards, lower waste wins.
        assert!(incumbent.try_improve(Objective::new(2, 2, 10), &bins));
        // Lower leftover always wins.
        assert!(incumbent.try_improve(Objective::new(1, 0, 0), &bins));

        assert_eq!(incumbent.objective(), Some(Objective::new(1, 0, 0)));
    }

    #[test]
    fn test_installed_partition_is_a_structural_copy() {
        let mut incumbent = Incumbent::new();
        let mut bins = bins_with_sums(&[100, 200]);

        incumbent.try_improve(Objective::new(0, 0, 0), &bins);
        // Mutating the search bins afterwards must not affect the incumbent.
        bins[0].push(Item::mandatory(999));

        let (_, best_bins) = incumbent.into_best().expect("solution was installed");
        assert_eq!(best_bins[0].sum(), 100);
        assert_eq!(best_bins[0].mandatory_count(), 0);
    }

    #[test]
    fn test_equal_objective_keeps_earlier_solution() {
        let mut incumbent = Incumbent::new();
        assert!(incumbent.try_improve(Objective::new(1, 1, 10), &bins_with_sums(&[1])));
        assert!(!incumbent.try_improve(Objective::new(1, 1, 10), &bins_with_sums(&[2])));

        let (_, best_bins) = incumbent.into_best().expect("solution was installed");
        assert_eq!(best_bins[0].sum(), 1);
    }
}
