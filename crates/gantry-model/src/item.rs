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

use serde::{Deserialize, Serialize};

/// The currency type used throughout the solver.
///
/// Values are expressed in the smallest currency unit and are always
/// non-negative; `i64` is used so that sums, differences against the target,
/// and waste accounting share one arithmetic type.
pub type Value = i64;

/// A single priced item to be assigned to a bin.
///
/// Items are immutable once created: they are built during preprocessing
/// from caller-supplied prices and never mutated afterwards. The `mandatory`
/// flag marks items whose presence in a non-qualifying bin counts against
/// the objective.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Item {
    /// The derived (tax-inclusive, discounted) price of the item.
    #[serde(rename = "price")]
    value: Value,
    /// Whether this item must be bought.
    mandatory: bool,
}

impl Item {
    /// Creates a new `Item`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative.
    #[inline]
    pub fn new(value: Value, mandatory: bool) -> Self {
        assert!(
            value >= 0,
            "called `Item::new` with negative value: {}",
            value
        );
        Self { value, mandatory }
    }

    /// Creates a new mandatory `Item`.
    #[inline]
    pub fn mandatory(value: Value) -> Self {
        Self::new(value, true)
    }

    /// Creates a new optional `Item`.
    #[inline]
    pub fn optional(value: Value) -> Self {
        Self::new(value, false)
    }

    /// Returns the value of this item.
    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    /// Returns whether this item is mandatory.
    #[inline]
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item(value: {}, {})",
            self.value,
            if self.mandatory {
                "mandatory"
            } else {
                "optional"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_accessors() {
        let a = Item::mandatory(450);
        assert_eq!(a.value(), 450);
        assert!(a.is_mandatory());

        let b = Item::optional(99);
        assert_eq!(b.value(), 99);
        assert!(!b.is_mandatory());
    }

    #[test]
    fn test_zero_value_is_allowed() {
        let item = Item::optional(0);
        assert_eq!(item.value(), 0);
    }

    #[test]
    #[should_panic(expected = "called `Item::new` with negative value")]
    fn test_negative_value_panics() {
        let _ = Item::new(-1, false);
    }

    #[test]
    fn test_serializes_value_as_price() {
        let item = Item::mandatory(120);
        let json = serde_json::to_string(&item).expect("serialization failed");
        assert_eq!(json, r#"{"price":120,"mandatory":true}"#);
    }
}
