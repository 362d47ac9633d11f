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

//! Gantry-DP: exact subset-sum extraction
//!
//! Given a list of items and an exact target sum, this crate finds one
//! subset summing exactly to that value while maximizing the number of
//! mandatory items used, via a classic 0/1 subset-sum dynamic program.
//!
//! Guarantees
//! - Every returned subset sums exactly to the requested target; there is
//!   no approximation.
//! - Tie-breaks are stable: among paths with equal mandatory counts, the
//!   earliest-discovered path is retained, so results are deterministic
//!   given a fixed item order.
//! - Reconstruction is bounded: a provenance walk that would revisit an
//!   index or exceed `n` steps is rejected as a fault instead of looping or
//!   returning a duplicate-item subset.
//!
//! Complexity: `O(n * target)` time, `O(target)` space.

pub mod error;
pub mod extract;

pub use error::ReconstructionFault;
pub use extract::extract_exact_subset;
