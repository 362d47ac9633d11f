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

//! Gantry-BnB: branch-and-bound packing for bin covering
//!
//! Depth-first search over item placements that partitions a residual item
//! list into bins, tracking the best partition found under the lexicographic
//! objective `(mandatory_leftover ↓, reward_count ↑, waste ↓)`.
//!
//! Core flow
//! - Items are sorted descending by value; suffix sums feed the bounds.
//! - At each item, two branch families are tried: insertion into every open
//!   bin that has not reached the target (one representative per
//!   `(mandatory_count, sum)` signature), and opening a new bin.
//! - When a placement lands a bin within a small tolerance window above the
//!   target, the bin's value-multiset is greedily replicated from the
//!   remaining suffix, shortcutting repeated-item solutions.
//! - All mutations go through an undo trail with frame markers, so every
//!   recursive call restores the search state exactly on return.
//!
//! Design highlights
//! - Best-so-far tracking is `Option`-based (`Incumbent`); there are no
//!   infinite sentinel constants.
//! - Symmetry pruning uses an explicit structural key type combining bin
//!   sum and mandatory count, collected per recursion level in a hash set.
//! - The search is bounded, not exhaustive: reward upper bounds and
//!   mandatory-leftover lower bounds abandon dominated branches once a full
//!   solution exists, so the result is the best partition *found*, which is
//!   not guaranteed to be a global optimum under all configurations.
//!
//! Module map
//! - `packer`: the search driver and its outcome type.
//! - `eval`: partition scoring against the target.
//! - `state`: mutable search state (open bins, used markers, totals).
//! - `stats`: lightweight counters and timing.

pub mod eval;
mod incumbent;
pub mod packer;
mod replicate;
pub mod state;
pub mod stats;
mod trail;

pub use packer::{BnbPacker, PackOutcome, REPLICATION_TOLERANCE};
pub use stats::PackerStatistics;
