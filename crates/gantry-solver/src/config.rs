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

//! Solve strategies and parameters.

use gantry_model::item::Value;

/// The default width of the DP tolerance window above the target.
pub const DEFAULT_DP_TOLERANCE: Value = 10;

/// Which phases the solver runs on the residual items left after
/// preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// DP extraction only; leftovers become deferred singleton bins.
    Dp,
    /// Branch-and-bound packing only; no DP extraction.
    Backtracking,
    /// DP extraction first, branch-and-bound on whatever remains.
    #[default]
    Hybrid,
}

impl Strategy {
    /// Returns `true` if the DP extraction phase runs under this strategy.
    #[inline]
    pub fn uses_dp_extraction(&self) -> bool {
        matches!(self, Strategy::Dp | Strategy::Hybrid)
    }

    /// Returns `true` if the branch-and-bound completion phase runs under
    /// this strategy.
    #[inline]
    pub fn uses_backtracking(&self) -> bool {
        matches!(self, Strategy::Backtracking | Strategy::Hybrid)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Dp => write!(f, "dp"),
            Strategy::Backtracking => write!(f, "bt"),
            Strategy::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// The full parameter set for one solve call.
///
/// A non-positive target is degenerate but accepted: every item then meets
/// the target alone and preprocessing absorbs the whole input. The cap is
/// `None` for unbounded bins; a cap below the target disables the DP
/// extraction phase, since no capped bin could hold an exact-target subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveConfig {
    target: Value,
    per_bin_cap: Option<Value>,
    strategy: Strategy,
    dp_tolerance: Value,
}

impl SolveConfig {
    /// Creates a configuration for `target` with no cap, the hybrid
    /// strategy, and the default tolerance window.
    #[inline]
    pub fn new(target: Value) -> Self {
        Self {
            target,
            per_bin_cap: None,
            strategy: Strategy::default(),
            dp_tolerance: DEFAULT_DP_TOLERANCE,
        }
    }

    /// Sets the per-bin cap. `None` means unbounded.
    #[inline]
    pub fn with_per_bin_cap(mut self, cap: Option<Value>) -> Self {
        self.per_bin_cap = cap;
        self
    }

    /// Sets the strategy.
    #[inline]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the DP tolerance window. Negative values are treated as zero
    /// by the solver.
    #[inline]
    pub fn with_dp_tolerance(mut self, tolerance: Value) -> Self {
        self.dp_tolerance = tolerance;
        self
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

    /// Returns the strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the DP tolerance window.
    #[inline]
    pub fn dp_tolerance(&self) -> Value {
        self.dp_tolerance
    }
}

impl std::fmt::Display for SolveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveConfig(target: {}, cap: {}, strategy: {}, dp_tolerance: {})",
            self.target,
            match self.per_bin_cap {
                Some(cap) => cap.to_string(),
                None => "none".to_string(),
            },
            self.strategy,
            self.dp_tolerance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_hybrid() {
        assert_eq!(Strategy::default(), Strategy::Hybrid);
        assert_eq!(SolveConfig::new(1000).strategy(), Strategy::Hybrid);
    }

    #[test]
    fn test_phase_selection_per_strategy() {
        assert!(Strategy::Dp.uses_dp_extraction());
        assert!(!Strategy::Dp.uses_backtracking());
        assert!(!Strategy::Backtracking.uses_dp_extraction());
        assert!(Strategy::Backtracking.uses_backtracking());
        assert!(Strategy::Hybrid.uses_dp_extraction());
        assert!(Strategy::Hybrid.uses_backtracking());
    }

    #[test]
    fn test_builder_methods() {
        let config = SolveConfig::new(2000)
            .with_per_bin_cap(Some(2500))
            .with_strategy(Strategy::Backtracking)
            .with_dp_tolerance(25);
        assert_eq!(config.target(), 2000);
        assert_eq!(config.per_bin_cap(), Some(2500));
        assert_eq!(config.strategy(), Strategy::Backtracking);
        assert_eq!(config.dp_tolerance(), 25);
    }
}
