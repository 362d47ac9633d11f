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

//! Bins: ordered groups of items evaluated against the target as a unit.
//!
//! A `Bin` keeps two derived attributes consistent with its membership at
//! all times: the total `sum` of item values and the `mandatory_count` of
//! mandatory items it holds. Every insertion and removal updates both
//! atomically; there is no API to mutate one without the other.

use crate::item::{Item, Value};
use serde::Serialize;

/// An ordered group of items assigned together.
///
/// Invariants (upheld by construction):
/// - `sum` equals the sum of the values of `items`.
/// - `mandatory_count` equals the number of mandatory items in `items`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Bin {
    items: Vec<Item>,
    sum: Value,
    mandatory_count: usize,
}

impl Default for Bin {
    fn default() -> Self {
        Self::new()
    }
}

impl Bin {
    /// Creates a new, empty `Bin`.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            sum: 0,
            mandatory_count: 0,
        }
    }

    /// Creates a `Bin` holding a single item.
    #[inline]
    pub fn singleton(item: Item) -> Self {
        let mut bin = Self::new();
        bin.push(item);
        bin
    }

    /// Inserts an item at the end of the bin, updating `sum` and
    /// `mandatory_count` in the same step.
    #[inline]
    pub fn push(&mut self, item: Item) {
        self.sum += item.value();
        if item.is_mandatory() {
            self.mandatory_count += 1;
        }
        self.items.push(item);
    }

    /// Removes and returns the most recently inserted item, updating the
    /// derived attributes in the same step. Returns `None` on an empty bin.
    #[inline]
    pub fn pop(&mut self) -> Option<Item> {
        let item = self.items.pop()?;
        self.sum -= item.value();
        if item.is_mandatory() {
            debug_assert!(
                self.mandatory_count > 0,
                "called `Bin::pop` with inconsistent mandatory count"
            );
            self.mandatory_count -= 1;
        }
        Some(item)
    }

    /// Returns the items of this bin in insertion order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the sum of the item values in this bin.
    #[inline]
    pub fn sum(&self) -> Value {
        self.sum
    }

    /// Returns the number of mandatory items in this bin.
    #[inline]
    pub fn mandatory_count(&self) -> usize {
        self.mandatory_count
    }

    /// Returns the number of items in this bin.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this bin holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if this bin meets or exceeds the given target sum.
    #[inline]
    pub fn is_qualifying(&self, target: Value) -> bool {
        self.sum >= target
    }
}

impl std::fmt::Display for Bin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bin(items: {}, sum: {}, mandatory: {})",
            self.items.len(),
            self.sum,
            self.mandatory_count
        )
    }
}
