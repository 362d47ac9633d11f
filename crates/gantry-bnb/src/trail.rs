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

//! A linear undo log with frame markers for exact backtracking.
//!
//! `SearchTrail` records every mutation applied to `SearchState` along with
//! frame boundaries, enabling `O(k)` rollback of `k` mutations when a branch
//! is abandoned. Typical usage:
//! 1. Call `push_frame()` before exploring a branch,
//! 2. Apply mutations through the trail (`insert_item`, `open_bin`,
//!    `commit_replica`, `mark_used`),
//! 3. Call `backtrack(state)` on return to restore the state to the start
//!    of the frame, including any template-replication bins and used
//!    markers the frame added.

use crate::state::SearchState;
use gantry_model::{
    index::{BinIndex, ItemIndex},
    item::Item,
};

/// A compact record of a single mutation applied to the search state,
/// carrying enough information to undo it during backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailOp {
    /// An item was inserted into an existing open bin.
    InsertedItem { bin: BinIndex },
    /// A new bin was opened for the current item.
    OpenedBin,
    /// A template-replica bin was committed.
    CommittedReplica,
    /// A residual item was marked as consumed by replication.
    MarkedUsed { item: ItemIndex },
}

/// The undo log. Entries are consumed in reverse when backtracking a frame.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchTrail {
    /// The linear history of all mutations applied to the state.
    entries: Vec<TrailOp>,
    /// Stack of indices into `entries` marking where each frame began.
    frames: Vec<usize>,
}

impl SearchTrail {
    /// Creates a new `SearchTrail` preallocating space based on the number
    /// of residual items.
    #[inline]
    pub(crate) fn preallocated(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items),
            frames: Vec::with_capacity(num_items + 1),
        }
    }

    /// Returns the current depth (number of open frames).
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a new frame, marking the start of a branch.
    #[inline]
    pub(crate) fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Inserts an item into an existing open bin, recording the undo entry.
    #[inline]
    pub(crate) fn insert_item(&mut self, state: &mut SearchState, bin: BinIndex, item: Item) {
        state.push_item(bin, item);
        self.entries.push(TrailOp::InsertedItem { bin });
    }

    /// Opens a new bin holding only the given item, recording the undo
    /// entry. Returns the index of the new bin.
    #[inline]
    pub(crate) fn open_bin(&mut self, state: &mut SearchState, item: Item) -> BinIndex {
        let index = state.open_bin(item);
        self.entries.push(TrailOp::OpenedBin);
        index
    }

    /// Commits a template-replica bin, recording the undo entry.
    #[inline]
    pub(crate) fn commit_replica(&mut self, state: &mut SearchState, bin: gantry_model::bin::Bin) {
        state.push_bin(bin);
        self.entries.push(TrailOp::CommittedReplica);
    }

    /// Marks a residual item as consumed by replication, recording the undo
    /// entry.
    #[inline]
    pub(crate) fn mark_used(&mut self, state: &mut SearchState, item: ItemIndex) {
        state.mark_used(item);
        self.entries.push(TrailOp::MarkedUsed { item });
    }

    /// Backtracks to the previous frame, undoing all mutations made since
    /// then in reverse order.
    pub(crate) fn backtrack(&mut self, state: &mut SearchState) {
        let frame_start = match self.frames.pop() {
            Some(start) => start,
            None => return,
        };

        while self.entries.len() > frame_start {
            let entry = self
                .entries
                .pop()
                .expect("trail entries shorter than the recorded frame start");
            match entry {
                TrailOp::InsertedItem { bin } => {
                    state.pop_item(bin);
                }
                TrailOp::OpenedBin | TrailOp::CommittedReplica => {
                    state.close_last_bin();
                }
                TrailOp::MarkedUsed { item } => {
                    state.unmark_used(item);
                }
            }
        }
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::bin::Bin;

    #[test]
    fn test_backtrack_restores_insertions() {
        let mut state = SearchState::new(2);
        let mut trail = SearchTrail::preallocated(2);

        trail.push_frame();
        let bin = trail.open_bin(&mut state, Item::mandatory(400));
        trail.insert_item(&mut state, bin, Item::optional(300));
        assert_eq!(state.assigned_total(), 700);
        assert_eq!(state.num_open_bins(), 1);

        trail.backtrack(&mut state);
        assert_eq!(state.num_open_bins(), 0);
        assert_eq!(state.assigned_total(), 0);
        assert_eq!(trail.depth(), 0);
    }

    #[test]
    fn test_backtrack_restores_only_the_current_frame() {
        let mut state = SearchState::new(2);
        let mut trail = SearchTrail::preallocated(2);

        trail.push_frame();
        let bin = trail.open_bin(&mut state, Item::mandatory(400));

        trail.push_frame();
        trail.insert_item(&mut state, bin, Item::optional(300));
        assert_eq!(state.bin(bin).sum(), 700);

        trail.backtrack(&mut state);
        assert_eq!(state.num_open_bins(), 1);
        assert_eq!(state.bin(bin).sum(), 400);
        assert_eq!(state.assigned_total(), 400);

        trail.backtrack(&mut state);
        assert_eq!(state.num_open_bins(), 0);
        assert_eq!(state.assigned_total(), 0);
    }

    #[test]
    fn test_backtrack_undoes_replication_including_used_markers() {
        let mut state = SearchState::new(4);
        let mut trail = SearchTrail::preallocated(4);

        trail.push_frame();
        trail.mark_used(&mut state, ItemIndex::new(2));
        trail.mark_used(&mut state, ItemIndex::new(3));
        let mut replica = Bin::new();
        replica.push(Item::optional(600));
        replica.push(Item::optional(400));
        trail.commit_replica(&mut state, replica);
        assert_eq!(state.num_open_bins(), 1);
        assert_eq!(state.assigned_total(), 1000);
        assert!(state.is_used(ItemIndex::new(2)));

        trail.backtrack(&mut state);
        assert_eq!(state.num_open_bins(), 0);
        assert_eq!(state.assigned_total(), 0);
        assert!(!state.is_used(ItemIndex::new(2)));
        assert!(!state.is_used(ItemIndex::new(3)));
    }

    #[test]
    fn test_backtrack_on_empty_trail_is_a_no_op() {
        let mut state = SearchState::new(0);
        let mut trail = SearchTrail::default();
        trail.backtrack(&mut state);
        assert_eq!(state.num_open_bins(), 0);
    }
}
