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

//! # Gantry API
//!
//! The message boundary of the solver. This crate turns a JSON request
//! into priced items and a solve configuration, runs the solver, and
//! always answers with a JSON response: a solution envelope on success, a
//! structured error object on any failure, including internal panics.
//!
//! Input handling is permissive by design. Price lists accept arrays of
//! numbers or numeric strings as well as whitespace-delimited strings;
//! malformed entries are dropped rather than rejected, and an out-of-range
//! discount falls back to 1 (no discount).
//!
//! ## Modules
//!
//! - `pricing`: tax-inclusive discounted price derivation.
//! - `request`: the request shape and its normalization rules.
//! - `response`: success and error envelopes.
//! - `handler`: the request-in, response-out entry point.

pub mod handler;
pub mod pricing;
pub mod request;
pub mod response;

pub use handler::handle_message;
pub use request::{Mode, SolveRequest, MAX_TARGET};
pub use response::{ErrorResponse, SolveResponse};
