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

//! Partitions: the ordered bin collections a solve produces.
//!
//! A `Partition` is a thin wrapper over a vector of bins. It serializes
//! transparently as a JSON array of bins and offers the few aggregate
//! queries the response envelope needs.

use crate::bin::Bin;
use serde::Serialize;

/// The final partition of items into bins.
///
/// Bins are kept in insertion order until `sort_by_sum` is called; the sort
/// order is presentational only and carries no semantic meaning.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Partition {
    bins: Vec<Bin>,
}

impl Partition {
    /// Creates a new, empty `Partition`.
    #[inline]
    pub fn new() -> Self {
        Self { bins: Vec::new() }
    }

    /// Creates a `Partition` from a vector of bins.
    #[inline]
    pub fn from_bins(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    /// Appends a bin at the end of the partition.
    #[inline]
    pub fn push_bin(&mut self, bin: Bin) {
        self.bins.push(bin);
    }

    /// Appends all bins of `other` at the end of this partition.
    #[inline]
    pub fn extend(&mut self, other: Partition) {
        self.bins.extend(other.bins);
    }

    /// Returns the bins of this partition.
    #[inline]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Returns the number of bins in this partition.
    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if this partition holds no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the total number of items across all bins.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.bins.iter().map(|bin| bin.len()).sum()
    }

    /// Sorts bins ascending by sum for stable, human-scannable presentation.
    ///
    /// The sort is stable, so bins with equal sums keep their phase order.
    #[inline]
    pub fn sort_by_sum(&mut self) {
        self.bins.sort_by_key(|bin| bin.sum());
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partition Summary")?;
        if self.bins.is_empty() {
            writeln!(f, "   (No bins)")?;
            return Ok(());
        }

        writeln!(f, "   {:<6} | {:<10} | {:<10} | {:<10}", "Bin", "Items", "Sum", "Mandatory")?;
        writeln!(f, "   {:-<6}-+-{:-<10}-+-{:-<10}-+-{:-<10}", "", "", "", "")?;
        for (i, bin) in self.bins.iter().enumerate() {
            writeln!(
                f,
                "   {:<6} | {:<10} | {:<10} | {:<10}",
                i,
                bin.len(),
                bin.sum(),
                bin.mandatory_count()
            )?;
        }

        Ok(())
    }
}
