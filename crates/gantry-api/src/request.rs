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

//! The request shape and its normalization rules.
//!
//! Requests are permissive. Price lists arrive as arrays holding numbers
//! or numeric strings, or as one whitespace-delimited string; entries that
//! do not parse to a positive finite number are dropped. `safeDiscount`
//! takes priority over `discount`, and anything outside `(0, 1]` falls
//! back to 1. An `upperBound` of 0 means "no cap". The one hard limit is
//! [`MAX_TARGET`]: targets and tolerance windows beyond it are rejected
//! rather than solved.

use crate::pricing;
use anyhow::ensure;
use gantry_model::item::{Item, Value};
use gantry_solver::{SolveConfig, Strategy, DEFAULT_DP_TOLERANCE};
use serde::{Deserialize, Serialize};

/// The largest target sum (and tolerance window) accepted on the message
/// boundary.
///
/// The extraction tables are sized by the queried sum, so a request with
/// an unbounded target or tolerance would translate into an arbitrarily
/// large allocation that no error envelope could report on.
pub const MAX_TARGET: Value = 10_000_000;

/// Which solve pipeline the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// DP extraction only; leftovers are deferred.
    Dp,
    /// Branch and bound only. `"exact"` is accepted as an alias.
    #[serde(alias = "exact")]
    Bt,
    /// DP extraction followed by branch and bound.
    #[default]
    Hybrid,
}

impl Mode {
    /// Maps the requested mode to the solver strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        match self {
            Mode::Dp => Strategy::Dp,
            Mode::Bt => Strategy::Backtracking,
            Mode::Hybrid => Strategy::Hybrid,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Dp => write!(f, "dp"),
            Mode::Bt => write!(f, "bt"),
            Mode::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// A price list in any of the accepted shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceList {
    /// An array of numbers or numeric strings.
    Entries(Vec<serde_json::Value>),
    /// One whitespace-delimited string of prices.
    Text(String),
    /// Anything else, treated as empty.
    Other(serde_json::Value),
}

impl Default for PriceList {
    fn default() -> Self {
        Self::Entries(Vec::new())
    }
}

impl PriceList {
    /// Extracts the positive finite prices, dropping everything else.
    pub fn normalize(&self) -> Vec<f64> {
        match self {
            PriceList::Entries(entries) => entries.iter().filter_map(entry_to_price).collect(),
            PriceList::Text(text) => text
                .split_whitespace()
                .filter_map(|token| token.parse::<f64>().ok())
                .filter(|price| price.is_finite() && *price > 0.0)
                .collect(),
            PriceList::Other(_) => Vec::new(),
        }
    }
}

fn entry_to_price(entry: &serde_json::Value) -> Option<f64> {
    let parsed = match entry {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// One solve request as received on the message boundary.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveRequest {
    mustbuys: PriceList,
    optionals: PriceList,
    target: f64,
    safe_discount: Option<f64>,
    discount: Option<f64>,
    upper_bound: f64,
    mode: Mode,
    dp_tolerance: Option<f64>,
}

impl SolveRequest {
    /// Returns the requested mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the effective discount fraction. `safeDiscount` wins over
    /// `discount`; values outside `(0, 1]` fall back to 1.
    pub fn resolved_discount(&self) -> f64 {
        let candidate = self.safe_discount.or(self.discount);
        match candidate {
            Some(d) if d.is_finite() && d > 0.0 && d <= 1.0 => d,
            _ => 1.0,
        }
    }

    /// Returns the target sum as an integer; non-finite input becomes 0.
    pub fn target(&self) -> Value {
        if self.target.is_finite() {
            self.target.round() as Value
        } else {
            0
        }
    }

    /// Returns the per-bin cap, `None` when unset or 0.
    pub fn per_bin_cap(&self) -> Option<Value> {
        if self.upper_bound.is_finite() && self.upper_bound > 0.0 {
            Some(self.upper_bound.round() as Value)
        } else {
            None
        }
    }

    /// Returns the DP tolerance window, defaulting when absent or not a
    /// finite number.
    pub fn dp_tolerance(&self) -> Value {
        match self.dp_tolerance {
            Some(tolerance) if tolerance.is_finite() => tolerance.floor() as Value,
            _ => DEFAULT_DP_TOLERANCE,
        }
    }

    /// Derives the priced item list: mandatory items from `mustbuys`,
    /// optional items from `optionals`, all at the effective discount.
    pub fn items(&self) -> Vec<Item> {
        let discount = self.resolved_discount();
        let mustbuys = self.mustbuys.normalize();
        let optionals = self.optionals.normalize();

        let mut items = Vec::with_capacity(mustbuys.len() + optionals.len());
        for raw in mustbuys {
            items.push(Item::mandatory(
                pricing::derive_price(raw, discount).tax_included(),
            ));
        }
        for raw in optionals {
            items.push(Item::optional(
                pricing::derive_price(raw, discount).tax_included(),
            ));
        }
        items
    }

    /// Checks the request against the supported bounds.
    ///
    /// Oversized targets and tolerance windows are the one class of
    /// well-formed input that cannot be answered, only refused.
    pub fn validate(&self) -> anyhow::Result<()> {
        let target = self.target();
        ensure!(
            target <= MAX_TARGET,
            "target {} exceeds the supported maximum of {}",
            target,
            MAX_TARGET
        );
        let tolerance = self.dp_tolerance();
        ensure!(
            tolerance <= MAX_TARGET,
            "dpTolerance {} exceeds the supported maximum of {}",
            tolerance,
            MAX_TARGET
        );
        Ok(())
    }

    /// Derives the solve configuration.
    pub fn config(&self) -> SolveConfig {
        SolveConfig::new(self.target())
            .with_per_bin_cap(self.per_bin_cap())
            .with_strategy(self.mode.strategy())
            .with_dp_tolerance(self.dp_tolerance())
    }
}
