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

//! Statistics collected during a branch-and-bound pack.

use std::time::Duration;

/// Counters and timings describing one call to the packer. All counters
/// saturate instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackerStatistics {
    /// The number of search nodes explored.
    nodes_explored: u64,
    /// The number of backtracking steps performed.
    backtracks: u64,
    /// The number of branches pruned by the reward upper bound.
    prunings_reward_bound: u64,
    /// The number of branches pruned by the mandatory-leftover lower bound.
    prunings_mandatory_bound: u64,
    /// The number of branches pruned as structurally symmetric siblings.
    prunings_symmetry: u64,
    /// The number of complete assignments evaluated at the leaves.
    solutions_found: u64,
    /// The number of bins created by template replication.
    replicated_bins: u64,
    /// The maximum recursion depth reached.
    max_depth: u64,
    /// The total wall-clock time spent in the pack call.
    time_total: Duration,
}

impl PackerStatistics {
    /// Creates a new `PackerStatistics` with all counters zeroed.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of search nodes explored.
    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// Returns the number of backtracking steps performed.
    #[inline]
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Returns the number of branches pruned by the reward upper bound.
    #[inline]
    pub fn prunings_reward_bound(&self) -> u64 {
        self.prunings_reward_bound
    }

    /// Returns the number of branches pruned by the mandatory-leftover
    /// lower bound.
    #[inline]
    pub fn prunings_mandatory_bound(&self) -> u64 {
        self.prunings_mandatory_bound
    }

    /// Returns the number of branches pruned as symmetric siblings.
    #[inline]
    pub fn prunings_symmetry(&self) -> u64 {
        self.prunings_symmetry
    }

    /// Returns the number of complete assignments evaluated.
    #[inline]
    pub fn solutions_found(&self) -> u64 {
        self.solutions_found
    }

    /// Returns the number of bins created by template replication.
    #[inline]
    pub fn replicated_bins(&self) -> u64 {
        self.replicated_bins
    }

    /// Returns the maximum recursion depth reached.
    #[inline]
    pub fn max_depth(&self) -> u64 {
        self.max_depth
    }

    /// Returns the total wall-clock time spent in the pack call.
    #[inline]
    pub fn time_total(&self) -> Duration {
        self.time_total
    }

    #[inline]
    pub(crate) fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub(crate) fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_reward_bound_pruning(&mut self) {
        self.prunings_reward_bound = self.prunings_reward_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_mandatory_bound_pruning(&mut self) {
        self.prunings_mandatory_bound = self.prunings_mandatory_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_symmetry_pruning(&mut self) {
        self.prunings_symmetry = self.prunings_symmetry.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_bins_replicated(&mut self, count: u64) {
        self.replicated_bins = self.replicated_bins.saturating_add(count);
    }

    #[inline]
    pub(crate) fn set_time_total(&mut self, time: Duration) {
        self.time_total = time;
    }
}

impl std::fmt::Display for PackerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Packer Statistics")?;
        writeln!(f, "  Nodes explored:           {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:               {}", self.backtracks)?;
        writeln!(f, "  Reward bound prunings:    {}", self.prunings_reward_bound)?;
        writeln!(f, "  Mandatory bound prunings: {}", self.prunings_mandatory_bound)?;
        writeln!(f, "  Symmetry prunings:        {}", self.prunings_symmetry)?;
        writeln!(f, "  Solutions found:          {}", self.solutions_found)?;
        writeln!(f, "  Replicated bins:          {}", self.replicated_bins)?;
        writeln!(f, "  Max depth:                {}", self.max_depth)?;
        write!(f, "  Total time:               {:?}", self.time_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = PackerStatistics::new();
        stats.on_node_explored(3);
        stats.on_node_explored(7);
        stats.on_node_explored(5);
        stats.on_backtrack();
        stats.on_symmetry_pruning();
        stats.on_bins_replicated(4);

        assert_eq!(stats.nodes_explored(), 3);
        assert_eq!(stats.max_depth(), 7);
        assert_eq!(stats.backtracks(), 1);
        assert_eq!(stats.prunings_symmetry(), 1);
        assert_eq!(stats.replicated_bins(), 4);
        assert_eq!(stats.solutions_found(), 0);
    }

    #[test]
    fn test_display_contains_counters() {
        let mut stats = PackerStatistics::new();
        stats.on_solution_found();
        let rendered = format!("{}", stats);
        assert!(rendered.contains("Solutions found:"));
        assert!(rendered.contains("Packer Statistics"));
    }
}
