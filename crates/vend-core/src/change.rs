//! # Change Computation
//!
//! Picks coins out of the cash stock to pay back an exact amount.
//!
//! ## Greedy Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  amount = €0.75, stock = { TWO:2, ONE:4, FIFTY:2, TWENTY:5, TEN:2,     │
//! │                            FIVE:2 }                                     │
//! │                                                                         │
//! │  TWO    200 > 75            skip                                       │
//! │  ONE    100 > 75            skip                                       │
//! │  FIFTY   50 ≤ 75  take 1    remaining 25                               │
//! │  TWENTY  20 ≤ 25  take 1    remaining  5                               │
//! │  TEN     10 >  5            skip                                       │
//! │  FIVE     5 ≤  5  take 1    remaining  0  ✅ stop                      │
//! │                                                                         │
//! │  result = { FIVE:1, TWENTY:1, FIFTY:1 }                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Denominations are visited from the highest value down and each one is
//! used as much as stock and the remaining amount allow. There is no
//! backtracking: with `{ TWENTY:2, ONE:2, TWO:2 }` an amount of €0.60 is
//! reported infeasible although three 20-cent coins would have done it had
//! they been in stock. Callers rely on exactly this behavior.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Coin;

// =============================================================================
// Change Set
// =============================================================================

/// Coins to dispense, each with a count greater than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<Coin, u32>);

impl ChangeSet {
    /// An empty change set (exact payment).
    pub fn new() -> Self {
        ChangeSet(BTreeMap::new())
    }

    /// Units of `coin` in the set.
    pub fn count(&self, coin: Coin) -> u32 {
        self.0.get(&coin).copied().unwrap_or(0)
    }

    /// Sum of value × count over every coin.
    pub fn total(&self) -> Money {
        self.0
            .iter()
            .map(|(coin, &count)| coin.value().multiply_quantity(count))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coin, u32)> + '_ {
        self.0.iter().map(|(&coin, &count)| (coin, count))
    }
}

/// Zero counts are dropped.
impl FromIterator<(Coin, u32)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (Coin, u32)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (coin, count) in iter.into_iter().filter(|&(_, count)| count > 0) {
            *counts.entry(coin).or_insert(0) += count;
        }
        ChangeSet(counts)
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// Computes change from a coin stock.
///
/// `None` means the amount cannot be composed exactly; a partial result is
/// never returned.
pub trait ChangeStrategy {
    fn make_change(&self, stock: &BTreeMap<Coin, u32>, amount: Money) -> Option<ChangeSet>;
}

/// Highest-denomination-first change making without backtracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyChange;

impl ChangeStrategy for GreedyChange {
    fn make_change(&self, stock: &BTreeMap<Coin, u32>, amount: Money) -> Option<ChangeSet> {
        if stock.is_empty() || !amount.is_positive() {
            return None;
        }

        let mut by_value: Vec<(Coin, u32)> = stock.iter().map(|(&c, &q)| (c, q)).collect();
        by_value.sort_by(|a, b| b.0.value().cmp(&a.0.value()));

        let mut remaining = amount;
        let mut used = BTreeMap::new();

        for (coin, available) in by_value {
            let value = coin.value();
            let fits = u32::try_from(remaining.cents() / value.cents()).unwrap_or(u32::MAX);
            let take = fits.min(available);

            if take > 0 {
                remaining -= value.multiply_quantity(take);
                used.insert(coin, take);
            }

            if remaining.is_zero() {
                break;
            }
        }

        remaining.is_zero().then_some(ChangeSet(used))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
