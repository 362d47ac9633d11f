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

use thiserror::Error;

/// A fault detected while walking the DP provenance chain backwards.
///
/// Any of these indicates corrupted DP state: the table claimed the target
/// sum reachable, but the recorded provenance does not form a valid,
/// duplicate-free index path from the target back to zero. The faulty
/// reconstruction is rejected (treated as "no subset found" by the caller)
/// rather than looping indefinitely or returning a duplicate-item subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReconstructionFault {
    /// The provenance chain pointed at an item index it had already consumed.
    #[error("provenance chain revisited item index {index} at sum {sum}")]
    RevisitedIndex { index: usize, sum: usize },

    /// The walk did not reach sum zero within the expected number of steps.
    #[error("provenance walk exceeded the step bound of {max_steps}")]
    StepBoundExceeded { max_steps: usize },

    /// A sum marked reachable carries no provenance record.
    #[error("no provenance recorded for reachable sum {sum}")]
    MissingProvenance { sum: usize },
}
