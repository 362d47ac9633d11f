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

//! # Gantry Model
//!
//! **The Core Domain Model for the Gantry Bin Covering Solver.**
//!
//! This crate defines the fundamental data structures used to represent the
//! reward-threshold bin covering problem: a collection of priced items is
//! partitioned into bins so that as many bins as possible meet or exceed a
//! target sum. It serves as the data interchange layer between the problem
//! definition (user input) and the solving engines (`gantry_dp`,
//! `gantry_bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed wrappers (`ItemIndex`, `BinIndex`) to
//!   prevent logical indexing errors between the item and bin index spaces.
//! * **`item`**: The immutable `Item` (integer value in the smallest
//!   currency unit plus a mandatory flag).
//! * **`bin`**: A group of items evaluated against the target as a unit,
//!   with derived `sum` and `mandatory_count` kept consistent with
//!   membership on every insertion and removal.
//! * **`partition`**: An ordered sequence of bins covering the input items.
//! * **`objective`**: The lexicographic objective tuple
//!   `(mandatory_leftover, reward_count, waste)`.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: Indices are distinct types. You cannot accidentally
//!    use an `ItemIndex` to address a `Bin`.
//! 2. **Consistency by construction**: derived bin attributes are updated
//!    atomically with membership; there is no way to desynchronize them
//!    through the public API.
//! 3. **Fail-Fast**: Constructors validate inputs eagerly so the solvers
//!    never encounter an invalid state.

pub mod bin;
pub mod index;
pub mod item;
pub mod objective;
pub mod partition;
