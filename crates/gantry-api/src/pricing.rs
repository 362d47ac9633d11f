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

//! Price derivation for a 5% included-tax store.
//!
//! Raw prices are tax-included. The tax-excluded base is recovered by
//! rounding `raw / 1.05`; the discount amount is floored on the excluded
//! base; the new tax is rounded on the discounted excluded base. The
//! solver consumes only the final tax-included discounted price.

use gantry_model::item::Value;

/// The price breakdown of a single raw price under a discount fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    tax_included: Value,
    tax_excluded: Value,
    tax: Value,
    discount_amount: Value,
}

impl PriceBreakdown {
    /// Returns the final tax-included price. This is the item value the
    /// solver operates on.
    #[inline]
    pub fn tax_included(&self) -> Value {
        self.tax_included
    }

    /// Returns the final tax-excluded price.
    #[inline]
    pub fn tax_excluded(&self) -> Value {
        self.tax_excluded
    }

    /// Returns the tax portion of the final price.
    #[inline]
    pub fn tax(&self) -> Value {
        self.tax
    }

    /// Returns the discount deducted from the tax-excluded base.
    #[inline]
    pub fn discount_amount(&self) -> Value {
        self.discount_amount
    }
}

impl std::fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PriceBreakdown(tax_included: {}, tax_excluded: {}, tax: {}, discount: {})",
            self.tax_included, self.tax_excluded, self.tax, self.discount_amount
        )
    }
}

/// Derives the discounted tax-inclusive price of one raw price.
///
/// `discount` is the fraction of the price the buyer pays: `1` means no
/// discount, `0.8` means 20% off. The caller guarantees it is in `(0, 1]`.
pub fn derive_price(raw: f64, discount: f64) -> PriceBreakdown {
    debug_assert!(
        discount > 0.0 && discount <= 1.0,
        "called `derive_price` with a discount out of (0, 1]: {}",
        discount
    );

    let origin_included = raw.round() as Value;
    let origin_excluded = (raw / 1.05).round() as Value;
    let origin_tax = origin_included - origin_excluded;

    if discount == 1.0 {
        return PriceBreakdown {
            tax_included: origin_included,
            tax_excluded: origin_excluded,
            tax: origin_tax,
            discount_amount: 0,
        };
    }

    let discount_amount = (origin_excluded as f64 * (1.0 - discount)).floor() as Value;
    let tax_excluded = origin_excluded - discount_amount;
    let tax = (tax_excluded as f64 * 0.05).round() as Value;
    PriceBreakdown {
        tax_included: tax_excluded + tax,
        tax_excluded,
        tax,
        discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_discount_keeps_the_raw_price() {
        let price = derive_price(1000.0, 1.0);
        assert_eq!(price.tax_included(), 1000);
        assert_eq!(price.tax_excluded(), 952);
        assert_eq!(price.tax(), 48);
        assert_eq!(price.discount_amount(), 0);
    }

    #[test]
    fn test_twenty_percent_off() {
        // excluded base 952, discount floor(952 * 0.2) = 190,
        // discounted base 762, tax round(762 * 0.05) = 38.
        let price = derive_price(1000.0, 0.8);
        assert_eq!(price.discount_amount(), 190);
        assert_eq!(price.tax_excluded(), 762);
        assert_eq!(price.tax(), 38);
        assert_eq!(price.tax_included(), 800);
    }

    #[test]
    fn test_discount_amount_is_floored() {
        // raw 105: excluded 100, 15% off gives floor(100 * 0.15) = 15,
        // base 85, tax round(4.25) = 4.
        let price = derive_price(105.0, 0.85);
        assert_eq!(price.discount_amount(), 15);
        assert_eq!(price.tax_included(), 89);
    }

    #[test]
    fn test_small_price_rounds_cleanly() {
        // raw 99: excluded round(94.28) = 94, tax 5.
        let price = derive_price(99.0, 1.0);
        assert_eq!(price.tax_excluded(), 94);
        assert_eq!(price.tax(), 5);
        assert_eq!(price.tax_included(), 99);
    }
}
