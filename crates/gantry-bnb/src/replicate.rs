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

//! Template replication of just-completed bins.
//!
//! When a bin closes with a sum inside the replication window, its value
//! multiset becomes a template. The residual suffix is scanned greedily for
//! full additional copies of that multiset, and every copy found is
//! committed as a bin of its own. Within each value bucket, mandatory items
//! are consumed before optional ones, so replicas absorb as many mandatory
//! items as the inventory allows. All commits and used markers go through
//! the trail, so abandoning the branch undoes the replicas exactly.

use crate::{state::SearchState, trail::SearchTrail};
use gantry_model::{
    bin::Bin,
    index::ItemIndex,
    item::{Item, Value},
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// The value multiset of a template bin, as (value, count) pairs in
/// first-seen order.
type TemplateSignature = SmallVec<[(Value, u32); 8]>;

/// Remaining suffix items of one value, split by mandatory flag so that
/// replicas can prefer mandatory items within the bucket.
#[derive(Debug, Default)]
struct Bucket {
    mandatory: VecDeque<usize>,
    optional: VecDeque<usize>,
}

impl Bucket {
    #[inline]
    fn len(&self) -> usize {
        self.mandatory.len() + self.optional.len()
    }

    /// Removes and returns the next item index, mandatory first.
    #[inline]
    fn take(&mut self) -> Option<usize> {
        self.mandatory.pop_front().or_else(|| self.optional.pop_front())
    }
}

/// Computes the value multiset of `template`, preserving first-seen order.
fn signature_of(template: &Bin) -> TemplateSignature {
    let mut signature = TemplateSignature::new();
    for item in template.items() {
        match signature.iter_mut().find(|(value, _)| *value == item.value()) {
            Some((_, count)) => *count += 1,
            None => signature.push((item.value(), 1)),
        }
    }
    signature
}

/// Replicates the value multiset of `template` from the unconsumed suffix
/// `items[start..]`, committing each full copy found as a new bin through
/// the trail. Returns the number of replicas committed.
///
/// Items already marked used are skipped. Each committed replica carries
/// the true sum of its own items.
pub(crate) fn replicate_template(
    items: &[Item],
    start: usize,
    template: &Bin,
    state: &mut SearchState,
    trail: &mut SearchTrail,
) -> usize {
    let signature = signature_of(template);
    if signature.is_empty() {
        return 0;
    }

    // Bucket the unconsumed suffix by value, keeping only values the
    // template actually needs.
    let mut buckets: FxHashMap<Value, Bucket> = FxHashMap::default();
    for (offset, item) in items[start..].iter().enumerate() {
        let index = start + offset;
        if state.is_used(ItemIndex::new(index)) {
            continue;
        }
        if signature.iter().any(|(value, _)| *value == item.value()) {
            let bucket = buckets.entry(item.value()).or_default();
            if item.is_mandatory() {
                bucket.mandatory.push_back(index);
            } else {
                bucket.optional.push_back(index);
            }
        }
    }

    // The suffix supports as many full copies as its scarcest value allows.
    let max_copies = signature
        .iter()
        .map(|(value, count)| {
            buckets
                .get(value)
                .map_or(0, |bucket| bucket.len() / *count as usize)
        })
        .min()
        .unwrap_or(0);

    for _ in 0..max_copies {
        let mut replica = Bin::new();
        for (value, count) in &signature {
            let bucket = buckets
                .get_mut(value)
                .expect("replica inventory was sized for `max_copies` full copies");
            for _ in 0..*count {
                let index = bucket
                    .take()
                    .expect("replica inventory was sized for `max_copies` full copies");
                trail.mark_used(state, ItemIndex::new(index));
                replica.push(items[index]);
            }
        }
        trail.commit_replica(state, replica);
    }
    max_copies
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::index::BinIndex;

    fn template_from(values: &[Value]) -> Bin {
        let mut bin = Bin::new();
        for &value in values {
            bin.push(Item::optional(value));
        }
        bin
    }

    #[test]
    fn test_replicates_every_full_copy_in_the_suffix() {
        // Template {600, 400}; suffix holds two full copies and a spare 600.
        let items = vec![
            Item::optional(600),
            Item::optional(400),
            Item::optional(600),
            Item::optional(400),
            Item::optional(600),
        ];
        let mut state = SearchState::new(items.len());
        let mut trail = SearchTrail::preallocated(items.len());
        trail.push_frame();

        let copies = replicate_template(
            &items,
            0,
            &template_from(&[600, 400]),
            &mut state,
            &mut trail,
        );
        assert_eq!(copies, 2);
        assert_eq!(state.num_open_bins(), 2);
        assert_eq!(state.bin(BinIndex::new(0)).sum(), 1000);
        assert_eq!(state.bin(BinIndex::new(1)).sum(), 1000);
        // The spare 600 has no 400 partner and stays unconsumed.
        assert!(!state.is_used(ItemIndex::new(4)));
    }

    #[test]
    fn test_prefers_mandatory_items_within_a_value_bucket() {
        let items = vec![
            Item::optional(500),
            Item::mandatory(500),
            Item::optional(500),
            Item::optional(500),
        ];
        let mut state = SearchState::new(items.len());
        let mut trail = SearchTrail::preallocated(items.len());
        trail.push_frame();

        // Template needs two 500s; a 3-item suffix supports exactly one
        // copy, which must pick the mandatory 500 first.
        let copies = replicate_template(
            &items[..3],
            0,
            &template_from(&[500, 500]),
            &mut state,
            &mut trail,
        );
        assert_eq!(copies, 1);
        assert_eq!(state.bin(BinIndex::new(0)).mandatory_count(), 1);
        assert!(state.is_used(ItemIndex::new(1)));
    }

    #[test]
    fn test_skips_items_already_consumed() {
        let items = vec![Item::optional(700), Item::optional(700)];
        let mut state = SearchState::new(items.len());
        let mut trail = SearchTrail::preallocated(items.len());
        trail.push_frame();
        trail.mark_used(&mut state, ItemIndex::new(0));

        let copies =
            replicate_template(&items, 0, &template_from(&[700, 700]), &mut state, &mut trail);
        assert_eq!(copies, 0);
        assert_eq!(state.num_open_bins(), 0);
    }

    #[test]
    fn test_replica_sums_reflect_their_own_items() {
        // A template of a single 550 replicated from the suffix yields bins
        // whose sums are the actual 550, not the pack target.
        let items = vec![Item::optional(550), Item::optional(550)];
        let mut state = SearchState::new(items.len());
        let mut trail = SearchTrail::preallocated(items.len());
        trail.push_frame();

        let copies =
            replicate_template(&items, 0, &template_from(&[550]), &mut state, &mut trail);
        assert_eq!(copies, 2);
        assert_eq!(state.bin(BinIndex::new(0)).sum(), 550);
        assert_eq!(state.bin(BinIndex::new(1)).sum(), 550);
    }

    #[test]
    fn test_no_copies_when_a_template_value_is_missing() {
        let items = vec![Item::optional(600), Item::optional(600)];
        let mut state = SearchState::new(items.len());
        let mut trail = SearchTrail::preallocated(items.len());
        trail.push_frame();

        let copies = replicate_template(
            &items,
            0,
            &template_from(&[600, 400]),
            &mut state,
            &mut trail,
        );
        assert_eq!(copies, 0);
    }
}
