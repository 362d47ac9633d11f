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

//! Search state management for the branch-and-bound packer.
//!
//! This module provides `SearchState`, a compact, mutable container for
//! tracking the incremental placement of items into open bins during search.
//!
//! Key responsibilities:
//! - Maintain the currently open bins with their derived sums and mandatory
//!   counts (kept consistent by `gantry_model::bin::Bin`).
//! - Track which residual items have been consumed by template replication
//!   ahead of the recursion index, using a `FixedBitSet`.
//! - Maintain the running total of all assigned item value, used by the
//!   reward upper bound.
//!
//! Mutators are crate-private: all search mutations go through the undo
//! trail so that every recursive call restores the state exactly on return.
//! Debug assertions catch invariant violations in debug builds.

use fixedbitset::FixedBitSet;
use gantry_model::{
    bin::Bin,
    index::{BinIndex, ItemIndex},
    item::{Item, Value},
};

/// A structural signature identifying equivalent open bins at one recursion
/// level.
///
/// Bins with the same `(mandatory_count, sum)` are interchangeable targets
/// for the current item; only one representative branch is explored among
/// duplicates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SymmetryKey {
    mandatory_count: usize,
    sum: Value,
}

impl SymmetryKey {
    /// Creates the symmetry key of the given bin.
    #[inline]
    pub fn of_bin(bin: &Bin) -> Self {
        Self {
            mandatory_count: bin.mandatory_count(),
            sum: bin.sum(),
        }
    }
}

/// A compact, mutable container holding the incremental search state of the
/// branch-and-bound packer.
///
/// The state is stack-scoped: it exists only for the duration of one pack
/// call and never escapes it.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// The currently open bins.
    bins: Vec<Bin>,
    /// Residual items consumed by template replication ahead of the
    /// recursion index.
    used: FixedBitSet,
    /// Running total of all assigned item value.
    assigned_total: Value,
}

impl SearchState {
    /// Creates a new `SearchState` for a residual list of `num_items` items
    /// with no open bins.
    #[inline]
    pub fn new(num_items: usize) -> Self {
        Self {
            bins: Vec::new(),
            used: FixedBitSet::with_capacity(num_items),
            assigned_total: 0,
        }
    }

    /// Returns the number of currently open bins.
    #[inline]
    pub fn num_open_bins(&self) -> usize {
        self.bins.len()
    }

    /// Returns the currently open bins.
    #[inline]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Returns the bin at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `bin_index` is out of `0..num_open_bins`.
    #[inline]
    pub fn bin(&self, bin_index: BinIndex) -> &Bin {
        &self.bins[bin_index.get()]
    }

    /// Returns `true` if the given item has been consumed by template
    /// replication.
    #[inline]
    pub fn is_used(&self, item_index: ItemIndex) -> bool {
        self.used.contains(item_index.get())
    }

    /// Returns the running total of all assigned item value.
    #[inline]
    pub fn assigned_total(&self) -> Value {
        self.assigned_total
    }

    /// Inserts an item into an existing open bin.
    #[inline]
    pub(crate) fn push_item(&mut self, bin_index: BinIndex, item: Item) {
        debug_assert!(
            bin_index.get() < self.bins.len(),
            "called `SearchState::push_item` with bin index out of bounds: the len is {} but the index is {}",
            self.bins.len(),
            bin_index.get()
        );
        self.bins[bin_index.get()].push(item);
        self.assigned_total += item.value();
    }

    /// Removes the most recently inserted item from a bin.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the bin is empty.
    #[inline]
    pub(crate) fn pop_item(&mut self, bin_index: BinIndex) -> Item {
        debug_assert!(
            bin_index.get() < self.bins.len(),
            "called `SearchState::pop_item` with bin index out of bounds: the len is {} but the index is {}",
            self.bins.len(),
            bin_index.get()
        );
        let item = self.bins[bin_index.get()]
            .pop()
            .expect("called `SearchState::pop_item` on an empty bin");
        self.assigned_total -= item.value();
        item
    }

    /// Opens a new bin holding only the given item and returns its index.
    #[inline]
    pub(crate) fn open_bin(&mut self, item: Item) -> BinIndex {
        let index = BinIndex::new(self.bins.len());
        self.bins.push(Bin::singleton(item));
        self.assigned_total += item.value();
        index
    }

    /// Appends an already-built bin (a template replica).
    #[inline]
    pub(crate) fn push_bin(&mut self, bin: Bin) {
        self.assigned_total += bin.sum();
        self.bins.push(bin);
    }

    /// Removes and returns the most recently opened bin.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no bin is open.
    #[inline]
    pub(crate) fn close_last_bin(&mut self) -> Bin {
        let bin = self
            .bins
            .pop()
            .expect("called `SearchState::close_last_bin` with no open bins");
        self.assigned_total -= bin.sum();
        bin
    }

    /// Marks an item as consumed by template replication.
    #[inline]
    pub(crate) fn mark_used(&mut self, item_index: ItemIndex) {
        debug_assert!(
            !self.used.contains(item_index.get()),
            "called `SearchState::mark_used` with item {} which is already used",
            item_index.get()
        );
        self.used.insert(item_index.get());
    }

    /// Clears the replication marker of an item.
    #[inline]
    pub(crate) fn unmark_used(&mut self, item_index: ItemIndex) {
        debug_assert!(
            self.used.contains(item_index.get()),
            "called `SearchState::unmark_used` with item {} which is not used",
            item_index.get()
        );
        self.used.remove(item_index.get());
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(open_bins: {}, used: {}, assigned_total: {})",
            self.bins.len(),
            self.used.count_ones(..),
            self.assigned_total
        )
    }
}
