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

//! The lexicographic objective of a partition.
//!
//! Comparison order: lower `mandatory_leftover` wins; ties are broken by
//! higher `reward_count`; remaining ties by lower `waste`. `Ord` is
//! implemented so that `Ordering::Less` means "better", allowing the usual
//! `min`-style idioms for best-so-far tracking.

use crate::item::Value;
use serde::{Deserialize, Serialize};

/// The objective tuple of a partition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Objective {
    /// Total mandatory items stranded in non-qualifying bins.
    mandatory_leftover: u64,
    /// Number of bins meeting or exceeding the target.
    reward_count: u64,
    /// Total overshoot above the target across all qualifying bins.
    waste: Value,
}

impl Objective {
    /// The all-zero objective of an empty partition.
    pub const ZERO: Self = Self {
        mandatory_leftover: 0,
        reward_count: 0,
        waste: 0,
    };

    /// Creates a new `Objective`.
    ///
    /// # Panics
    ///
    /// Panics if `waste` is negative.
    #[inline]
    pub fn new(mandatory_leftover: u64, reward_count: u64, waste: Value) -> Self {
        assert!(
            waste >= 0,
            "called `Objective::new` with negative waste: {}",
            waste
        );
        Self {
            mandatory_leftover,
            reward_count,
            waste,
        }
    }

    /// Returns the number of mandatory items stranded in non-qualifying bins.
    #[inline]
    pub fn mandatory_leftover(&self) -> u64 {
        self.mandatory_leftover
    }

    /// Returns the number of qualifying bins.
    #[inline]
    pub fn reward_count(&self) -> u64 {
        self.reward_count
    }

    /// Returns the total overshoot above the target across qualifying bins.
    #[inline]
    pub fn waste(&self) -> Value {
        self.waste
    }

    /// Returns `true` if this objective is strictly better than `other`
    /// under the lexicographic ordering.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Less
    }
}

impl Ord for Objective {
    /// `Ordering::Less` means "better".
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.mandatory_leftover
            .cmp(&other.mandatory_leftover)
            .then_with(|| other.reward_count.cmp(&self.reward_count))
            .then_with(|| self.waste.cmp(&other.waste))
    }
}

impl PartialOrd for Objective {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Objective(mandatory_leftover: {}, reward_count: {}, waste: {})",
            self.mandatory_leftover, self.reward_count, self.waste
        )
    }
}
