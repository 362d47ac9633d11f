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

//! Per-phase counters collected during one solve.

use gantry_bnb::PackerStatistics;
use std::time::Duration;

/// What each solve phase contributed, plus overall timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveStatistics {
    /// Singleton qualifying bins created by preprocessing.
    preprocessed_bins: u64,
    /// Bins created by DP extraction.
    dp_bins: u64,
    /// Total subset-extraction queries issued, including failed ones.
    dp_queries: u64,
    /// Singleton non-qualifying bins emitted for leftovers.
    deferred_singletons: u64,
    /// Statistics of the branch-and-bound phase, if it ran.
    packer: Option<PackerStatistics>,
    /// Total wall-clock time spent in the solve call.
    time_total: Duration,
}

impl SolveStatistics {
    /// Creates a new `SolveStatistics` with all counters zeroed.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of singleton qualifying bins from preprocessing.
    #[inline]
    pub fn preprocessed_bins(&self) -> u64 {
        self.preprocessed_bins
    }

    /// Returns the number of bins created by DP extraction.
    #[inline]
    pub fn dp_bins(&self) -> u64 {
        self.dp_bins
    }

    /// Returns the number of subset-extraction queries issued.
    #[inline]
    pub fn dp_queries(&self) -> u64 {
        self.dp_queries
    }

    /// Returns the number of deferred singleton bins emitted.
    #[inline]
    pub fn deferred_singletons(&self) -> u64 {
        self.deferred_singletons
    }

    /// Returns the branch-and-bound statistics, if that phase ran.
    #[inline]
    pub fn packer(&self) -> Option<&PackerStatistics> {
        self.packer.as_ref()
    }

    /// Returns the total wall-clock time spent in the solve call.
    #[inline]
    pub fn time_total(&self) -> Duration {
        self.time_total
    }

    #[inline]
    pub(crate) fn on_preprocessed_bin(&mut self) {
        self.preprocessed_bins = self.preprocessed_bins.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_dp_bin(&mut self) {
        self.dp_bins = self.dp_bins.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_dp_query(&mut self) {
        self.dp_queries = self.dp_queries.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_deferred_singleton(&mut self) {
        self.deferred_singletons = self.deferred_singletons.saturating_add(1);
    }

    #[inline]
    pub(crate) fn set_packer(&mut self, stats: PackerStatistics) {
        self.packer = Some(stats);
    }

    #[inline]
    pub(crate) fn set_time_total(&mut self, time: Duration) {
        self.time_total = time;
    }
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solve Statistics")?;
        writeln!(f, "  Preprocessed bins:   {}", self.preprocessed_bins)?;
        writeln!(f, "  DP bins:             {}", self.dp_bins)?;
        writeln!(f, "  DP queries:          {}", self.dp_queries)?;
        writeln!(f, "  Deferred singletons: {}", self.deferred_singletons)?;
        writeln!(f, "  Total time:          {:?}", self.time_total)?;
        match &self.packer {
            Some(stats) => write!(f, "{}", stats),
            None => write!(f, "  (no branch-and-bound phase)"),
        }
    }
}
