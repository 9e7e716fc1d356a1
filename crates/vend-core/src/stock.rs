//! # Stock Ledger
//!
//! One quantity tracker, reused for the coin tubes and the product
//! columns.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock<K>                                                               │
//! │                                                                         │
//! │  • quantity(k) is never negative (u32)                                 │
//! │  • absent key ⇔ quantity 0 (entries reaching zero are dropped)          │
//! │  • remove() floors at zero, it never fails on under-stock               │
//! │  • insert() never wraps or saturates: overflow is rejected             │
//! │  • batches are validated as a whole before the first entry is applied  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{StockKind, ValidationError};
use crate::validation::{validate_batch, ValidationResult};

/// A key that can be tracked by a [`Stock`] ledger.
pub trait StockItem: Copy + Ord + fmt::Debug {
    /// Ledger the item belongs to, used to word validation errors.
    const KIND: StockKind;

    /// Upper-case identifier of the item.
    fn code(&self) -> &'static str;
}

/// Supplier-facing bulk input: item → number of units.
///
/// Quantities are signed so that invalid input can be reported instead of
/// being unrepresentable at the boundary.
pub type Batch<K> = BTreeMap<K, i64>;

/// Quantity ledger keyed by coin or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Stock<K> {
    items: BTreeMap<K, u32>,
}

impl<K: StockItem> Stock<K> {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Stock {
            items: BTreeMap::new(),
        }
    }

    /// Units held for `item`; zero when absent.
    pub fn quantity(&self, item: K) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: K) -> bool {
        self.quantity(item) > 0
    }

    pub fn insert_one(&mut self, item: K) -> ValidationResult<()> {
        self.insert(item, 1)
    }

    /// Adds `qty` units. Fails without changing anything if the count
    /// would exceed `u32::MAX`.
    pub fn insert(&mut self, item: K, qty: u32) -> ValidationResult<()> {
        let total = self.check_room(item, qty)?;
        if total > 0 {
            self.items.insert(item, total);
        }
        Ok(())
    }

    /// The count `item` would reach after adding `qty`.
    fn check_room(&self, item: K, qty: u32) -> ValidationResult<u32> {
        self.quantity(item)
            .checked_add(qty)
            .ok_or(ValidationError::InvalidQuantity {
                kind: K::KIND,
                quantity: i64::from(qty),
            })
    }

    pub fn remove_one(&mut self, item: K) {
        self.remove(item, 1);
    }

    /// Removes up to `qty` units, flooring at zero.
    pub fn remove(&mut self, item: K, qty: u32) {
        if let Some(current) = self.items.get_mut(&item) {
            *current = current.saturating_sub(qty);
            if *current == 0 {
                self.items.remove(&item);
            }
        }
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The backing map itself, ordered by key. Only non-zero entries.
    pub fn items(&self) -> &BTreeMap<K, u32> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates the whole batch, then inserts every entry.
    ///
    /// `accepted` is the set of keys this ledger may hold. On error nothing
    /// is applied, including when one entry would overflow its count.
    pub fn insert_batch(&mut self, batch: &Batch<K>, accepted: &[K]) -> ValidationResult<()> {
        let entries = validate_batch(batch, accepted)?;
        let mut totals = Vec::with_capacity(entries.len());
        for (item, qty) in entries {
            totals.push((item, self.check_room(item, qty)?));
        }
        self.items.extend(totals);
        Ok(())
    }

    /// Validates the whole batch, then removes every entry (floored at zero).
    pub fn remove_batch(&mut self, batch: &Batch<K>, accepted: &[K]) -> ValidationResult<()> {
        let entries = validate_batch(batch, accepted)?;
        for (item, qty) in entries {
            self.remove(item, qty);
        }
        Ok(())
    }
}

impl<K: StockItem> Default for Stock<K> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
