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

//! # Gantry Solver
//!
//! High-level orchestration of the bin covering phases. The solver composes
//! the dynamic-programming subset extractor and the branch-and-bound packer
//! into a configurable pipeline:
//!
//! 1. **Preprocess**: items meeting the target alone become singleton
//!    qualifying bins.
//! 2. **DP extraction**: exact-sum subsets are peeled off the residual set
//!    for each sum inside the tolerance window above the target.
//! 3. **Completion**: the remainder is packed by branch and bound, or
//!    emitted as deferred singletons under the pure DP strategy.
//!
//! The phases are not reconciled against each other: a hybrid run commits
//! to whatever the DP phase extracted, so on some inputs it scores worse
//! than pure backtracking. This bias is configuration-dependent behavior,
//! selected by [`config::Strategy`], not an error.
//!
//! ## Modules
//!
//! - `config`: solve strategy and parameters.
//! - `solver`: the phase pipeline and its outcome type.
//! - `stats`: per-phase counters collected during one solve.

pub mod config;
pub mod solver;
pub mod stats;

pub use config::{SolveConfig, Strategy, DEFAULT_DP_TOLERANCE};
pub use solver::{HybridSolver, SolveOutcome};
pub use stats::SolveStatistics;
