//! # Product Manager
//!
//! Owns the product stock and the customer's current selection.
//!
//! ## Selection Gating
//! ```text
//! select(item)
//!      │
//!      ├── not in the accepted set?  → InvalidItem   (stock never consulted)
//!      ├── quantity == 0?             → ProductUnavailable
//!      └── OK → selected = Some(item), price shown to the customer
//! ```

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::stock::{Batch, Stock};
use crate::types::Beverage;
use crate::validation::validate_item;

/// Product stock plus at most one selected item.
#[derive(Debug, Clone)]
pub struct ProductManager {
    stock: Stock<Beverage>,
    accepted: Vec<Beverage>,
    selected: Option<Beverage>,
}

impl ProductManager {
    /// Sells every product in the enumeration.
    pub fn new() -> Self {
        Self::with_accepted(&Beverage::ALL)
    }

    /// Sells only the given products, kept in declaration order.
    pub fn with_accepted(accepted: &[Beverage]) -> Self {
        ProductManager {
            stock: Stock::new(),
            accepted: Beverage::ALL
                .into_iter()
                .filter(|item| accepted.contains(item))
                .collect(),
            selected: None,
        }
    }

    pub fn valid_items(&self) -> &[Beverage] {
        &self.accepted
    }

    pub fn is_allowed(&self, item: Beverage) -> bool {
        self.accepted.contains(&item)
    }

    pub fn is_available(&self, item: Beverage) -> bool {
        self.stock.has(item)
    }

    /// Accepted products with at least one unit, in declaration order.
    pub fn available_items(&self) -> Vec<Beverage> {
        self.accepted
            .iter()
            .copied()
            .filter(|&item| self.is_available(item))
            .collect()
    }

    /// Live view of the product stock.
    pub fn current_stock(&self) -> &BTreeMap<Beverage, u32> {
        self.stock.items()
    }

    pub fn stock(&self) -> &Stock<Beverage> {
        &self.stock
    }

    /// Refills products. The whole batch is rejected on any invalid entry.
    pub fn insert_stock(&mut self, batch: &Batch<Beverage>) -> CoreResult<()> {
        self.stock.insert_batch(batch, &self.accepted)?;
        Ok(())
    }

    pub fn remove_stock(&mut self, batch: &Batch<Beverage>) -> CoreResult<()> {
        self.stock.remove_batch(batch, &self.accepted)?;
        Ok(())
    }

    /// Takes exactly one unit out, floored at zero.
    pub fn remove_one(&mut self, item: Beverage) -> CoreResult<()> {
        let item = validate_item(item, &self.accepted)?;
        self.stock.remove_one(item);
        Ok(())
    }

    /// Checks that `item` may be selected right now.
    ///
    /// Membership is checked before availability so that an unknown product
    /// is never reported as merely out of stock.
    pub fn check_selectable(&self, item: Beverage) -> CoreResult<()> {
        validate_item(item, &self.accepted)?;
        if !self.is_available(item) {
            return Err(CoreError::ProductUnavailable {
                product: item.name().to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, item: Beverage) {
        self.selected = Some(item);
    }

    pub fn selected(&self) -> Option<Beverage> {
        self.selected
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Price of the selection, zero when nothing is selected.
    pub fn price_of_selected(&self) -> Money {
        self.selected.map(|item| item.price()).unwrap_or_default()
    }
}

impl Default for ProductManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
