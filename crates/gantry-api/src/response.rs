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

//! Success and error envelopes.

use crate::request::Mode;
use gantry_model::{objective::Objective, partition::Partition};
use serde::Serialize;

/// The success envelope returned for a solved request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// The final bins, sorted ascending by sum.
    partition: Partition,
    /// How many items survived input normalization.
    item_count: usize,
    /// Wall-clock solve time in seconds.
    elapsed_seconds: f64,
    /// The objective of the final partition.
    metrics: Objective,
    /// The mode the solve ran under.
    mode: Mode,
}

impl SolveResponse {
    /// Assembles a success envelope.
    pub fn new(
        partition: Partition,
        item_count: usize,
        elapsed_seconds: f64,
        metrics: Objective,
        mode: Mode,
    ) -> Self {
        Self {
            partition,
            item_count,
            elapsed_seconds,
            metrics,
            mode,
        }
    }

    /// Returns the final partition.
    #[inline]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Returns how many items survived input normalization.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns the objective of the final partition.
    #[inline]
    pub fn metrics(&self) -> Objective {
        self.metrics
    }
}

/// The error envelope returned when a request cannot be solved.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl ErrorResponse {
    /// Creates an error envelope with just a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            trace: None,
        }
    }

    /// Attaches diagnostic trace text.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Returns the error message.
    #[inline]
    pub fn error(&self) -> &str {
        &self.error
    }
}
