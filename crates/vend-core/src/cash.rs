//! # Cash Manager
//!
//! Owns the coin stock and the customer's running balance.
//!
//! ## Balance State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             receive_cash(coin)                                          │
//! │   ┌────────────┐ ─────────────────► ┌────────────┐                      │
//! │   │ balance =0 │                    │ balance >0 │ ◄──┐ receive_cash    │
//! │   └────────────┘ ◄───────────────── └────────────┘ ───┘                 │
//! │          reset_balance / calculate_refund / completed purchase         │
//! │                                                                         │
//! │  Every accepted coin goes into the stock as soon as it is received.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::change::{ChangeSet, ChangeStrategy, GreedyChange};
use crate::error::CoreResult;
use crate::money::Money;
use crate::stock::{Batch, Stock};
use crate::types::{BalanceResult, Coin};
use crate::validation::{validate_item, validate_price};

/// What a refund request resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RefundOutcome {
    /// No balance was held. Not an error.
    NothingToRefund,
    /// The balance was paid back with these coins.
    Refunded(ChangeSet),
    /// The stock cannot compose the balance; nothing was changed.
    Infeasible { amount: Money },
}

/// Coin stock, running balance and the change policy.
#[derive(Debug, Clone)]
pub struct CashManager<S = GreedyChange> {
    stock: Stock<Coin>,
    balance: Money,
    accepted: Vec<Coin>,
    strategy: S,
}

impl CashManager<GreedyChange> {
    /// Accepts every denomination and makes change greedily.
    pub fn new() -> Self {
        Self::with_accepted(&Coin::ALL)
    }

    /// Accepts only the given denominations.
    pub fn with_accepted(accepted: &[Coin]) -> Self {
        Self::with_strategy(accepted, GreedyChange)
    }
}

impl Default for CashManager<GreedyChange> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ChangeStrategy> CashManager<S> {
    /// The accepted set is kept in declaration order regardless of how it
    /// was passed in.
    pub fn with_strategy(accepted: &[Coin], strategy: S) -> Self {
        CashManager {
            stock: Stock::new(),
            balance: Money::zero(),
            accepted: Coin::ALL
                .into_iter()
                .filter(|coin| accepted.contains(coin))
                .collect(),
            strategy,
        }
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Denominations this machine takes, in declaration order.
    pub fn valid_cash_items(&self) -> &[Coin] {
        &self.accepted
    }

    /// Live view of the coin stock.
    pub fn current_stock(&self) -> &BTreeMap<Coin, u32> {
        self.stock.items()
    }

    pub fn stock(&self) -> &Stock<Coin> {
        &self.stock
    }

    /// Refills coins. The whole batch is rejected on any invalid entry.
    pub fn insert_stock(&mut self, batch: &Batch<Coin>) -> CoreResult<()> {
        self.stock.insert_batch(batch, &self.accepted)?;
        Ok(())
    }

    /// Takes coins out. Same validation as [`Self::insert_stock`].
    pub fn remove_stock(&mut self, batch: &Batch<Coin>) -> CoreResult<()> {
        self.stock.remove_batch(batch, &self.accepted)?;
        Ok(())
    }

    /// Empties the coin stock.
    pub fn clear_stock(&mut self) {
        self.stock.clear();
    }

    // =========================================================================
    // Balance
    // =========================================================================

    /// Accepts a coin from the customer and returns the new balance.
    ///
    /// The coin is stocked before it is credited. A coin the stock cannot
    /// hold is rejected and the balance stays as it was.
    pub fn receive_cash(&mut self, coin: Coin) -> CoreResult<Money> {
        let coin = validate_item(coin, &self.accepted)?;
        self.stock.insert_one(coin)?;
        self.balance += coin.value();
        Ok(self.balance)
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn has_balance(&self) -> bool {
        self.balance.is_positive()
    }

    /// Compares the balance to `price`.
    pub fn affordability(&self, price: Money) -> CoreResult<BalanceResult> {
        let price = validate_price(price)?;
        Ok(BalanceResult::from(self.balance.cmp(&price)))
    }

    /// `balance - price`, or zero when no balance is held.
    ///
    /// The result is negative when the balance does not cover the price;
    /// callers check [`Self::affordability`] first.
    pub fn remaining_change(&self, price: Money) -> CoreResult<Money> {
        let price = validate_price(price)?;
        if self.has_balance() {
            Ok(self.balance - price)
        } else {
            Ok(Money::zero())
        }
    }

    pub fn reset_balance(&mut self) {
        self.balance = Money::zero();
    }

    // =========================================================================
    // Change
    // =========================================================================

    /// Coins that would pay back `amount`, without touching the stock.
    pub fn change_for(&self, amount: Money) -> Option<ChangeSet> {
        self.strategy.make_change(self.stock.items(), amount)
    }

    /// Removes a change set computed against this stock.
    pub fn dispense(&mut self, change: &ChangeSet) {
        for (coin, count) in change.iter() {
            self.stock.remove(coin, count);
        }
    }

    /// What [`Self::calculate_refund`] would do, without doing it.
    pub fn plan_refund(&self) -> RefundOutcome {
        if !self.has_balance() {
            return RefundOutcome::NothingToRefund;
        }
        match self.change_for(self.balance) {
            Some(change) => RefundOutcome::Refunded(change),
            None => RefundOutcome::Infeasible {
                amount: self.balance,
            },
        }
    }

    /// Pays the whole balance back: computes the coins, removes them from
    /// stock and resets the balance. Leaves everything untouched unless the
    /// outcome is [`RefundOutcome::Refunded`].
    pub fn calculate_refund(&mut self) -> RefundOutcome {
        let outcome = self.plan_refund();
        if let RefundOutcome::Refunded(change) = &outcome {
            self.dispense(change);
            self.reset_balance();
        }
        outcome
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StockKind, ValidationError};

    fn stocked(batch: &[(Coin, i64)]) -> CashManager {
        let mut manager = CashManager::new();
        manager
            .insert_stock(&batch.iter().copied().collect())
            .unwrap();
        manager
    }

    #[test]
    fn test_valid_cash_items_keep_declaration_order() {
        let manager = CashManager::with_accepted(&[Coin::Two, Coin::TenCents, Coin::One]);
        assert_eq!(
            manager.valid_cash_items(),
            &[Coin::TenCents, Coin::One, Coin::Two]
        );
        assert_eq!(CashManager::new().valid_cash_items(), &Coin::ALL);
    }

    #[test]
    fn test_insert_stock_errors() {
        let mut manager = CashManager::with_accepted(&[Coin::One, Coin::Two]);

        let err = manager.insert_stock(&Batch::new()).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::EmptyBatch {
                kind: StockKind::Cash
            })
        );

        let err = manager
            .insert_stock(&Batch::from([(Coin::FiveCents, 1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidItem {
                kind: StockKind::Cash,
                ..
            })
        ));

        let err = manager
            .insert_stock(&Batch::from([(Coin::One, 2), (Coin::Two, -1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidQuantity { .. })
        ));
        assert!(manager.current_stock().is_empty());
    }

    #[test]
    fn test_remove_stock() {
        let mut manager = stocked(&[(Coin::One, 3), (Coin::Two, 1)]);
        manager
            .remove_stock(&Batch::from([(Coin::One, 1), (Coin::Two, 4)]))
            .unwrap();
        assert_eq!(manager.stock().quantity(Coin::One), 2);
        assert_eq!(manager.stock().quantity(Coin::Two), 0);
    }

    #[test]
    fn test_receive_cash_updates_balance_and_stock() {
        let mut manager = CashManager::new();
        assert!(!manager.has_balance());

        assert_eq!(manager.receive_cash(Coin::FiftyCents).unwrap().cents(), 50);
        assert_eq!(manager.receive_cash(Coin::FiftyCents).unwrap().cents(), 100);

        assert!(manager.has_balance());
        assert_eq!(manager.current_stock()[&Coin::FiftyCents], 2);
    }

    #[test]
    fn test_receive_rejected_coin_changes_nothing() {
        let mut manager = CashManager::with_accepted(&[Coin::One]);
        let err = manager.receive_cash(Coin::Two).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidItem { .. })));
        assert_eq!(manager.balance(), Money::zero());
        assert!(manager.current_stock().is_empty());
    }

    #[test]
    fn test_full_tube_rejects_coin() {
        let mut manager = CashManager::new();
        manager
            .insert_stock(&Batch::from([(Coin::One, i64::from(u32::MAX))]))
            .unwrap();

        let err = manager.receive_cash(Coin::One).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidQuantity {
                kind: StockKind::Cash,
                ..
            })
        ));
        assert_eq!(manager.balance(), Money::zero());
        assert_eq!(manager.stock().quantity(Coin::One), u32::MAX);

        let err = manager
            .insert_stock(&Batch::from([(Coin::One, 5)]))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidQuantity { quantity: 5, .. })
        ));
        assert_eq!(manager.stock().quantity(Coin::One), u32::MAX);
    }

    #[test]
    fn test_affordability() {
        let mut manager = CashManager::new();
        manager.receive_cash(Coin::One).unwrap();

        assert_eq!(
            manager.affordability(Money::from_cents(150)).unwrap(),
            BalanceResult::Below
        );
        assert_eq!(
            manager.affordability(Money::from_cents(100)).unwrap(),
            BalanceResult::Exact
        );
        assert_eq!(
            manager.affordability(Money::from_cents(90)).unwrap(),
            BalanceResult::Above
        );
        assert!(manager.affordability(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_remaining_change() {
        let mut manager = CashManager::new();
        assert_eq!(
            manager.remaining_change(Money::from_cents(90)).unwrap(),
            Money::zero()
        );

        manager.receive_cash(Coin::One).unwrap();
        assert_eq!(
            manager.remaining_change(Money::from_cents(90)).unwrap(),
            Money::from_cents(10)
        );
        // Not clamped: the caller is expected to check affordability first
        assert_eq!(
            manager.remaining_change(Money::from_cents(150)).unwrap(),
            Money::from_cents(-50)
        );
        assert!(manager.remaining_change(Money::from_cents(-5)).is_err());
    }

    #[test]
    fn test_change_for_does_not_mutate() {
        let manager = stocked(&[(Coin::TenCents, 2), (Coin::FiftyCents, 1)]);
        let change = manager.change_for(Money::from_cents(60)).unwrap();
        assert_eq!(change.count(Coin::FiftyCents), 1);
        assert_eq!(change.count(Coin::TenCents), 1);
        assert_eq!(manager.stock().quantity(Coin::TenCents), 2);
    }

    #[test]
    fn test_refund_with_no_balance() {
        let mut manager = stocked(&[(Coin::One, 1)]);
        assert_eq!(manager.calculate_refund(), RefundOutcome::NothingToRefund);
        assert_eq!(manager.stock().quantity(Coin::One), 1);
    }

    #[test]
    fn test_refund_returns_deposit() {
        let mut manager = stocked(&[(Coin::TenCents, 1)]);
        manager.receive_cash(Coin::Two).unwrap();
        manager.receive_cash(Coin::TwentyCents).unwrap();

        let RefundOutcome::Refunded(change) = manager.calculate_refund() else {
            panic!("expected a refund");
        };
        assert_eq!(change.total(), Money::from_cents(220));
        assert_eq!(manager.balance(), Money::zero());
        assert_eq!(manager.stock().quantity(Coin::Two), 0);
        assert_eq!(manager.stock().quantity(Coin::TenCents), 1);
    }

    #[test]
    fn test_infeasible_refund_leaves_state_untouched() {
        // The deposited coin is taken back out by the supplier, leaving
        // nothing to pay the balance with.
        let mut manager = CashManager::new();
        manager.receive_cash(Coin::One).unwrap();
        manager
            .remove_stock(&Batch::from([(Coin::One, 1)]))
            .unwrap();

        assert_eq!(
            manager.calculate_refund(),
            RefundOutcome::Infeasible {
                amount: Money::from_cents(100)
            }
        );
        assert_eq!(manager.balance(), Money::from_cents(100));
    }

    #[test]
    fn test_refund_outcome_serialization() {
        let json = serde_json::to_value(RefundOutcome::NothingToRefund).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "nothing_to_refund" }));

        let change: ChangeSet = [(Coin::One, 1)].into_iter().collect();
        let json = serde_json::to_value(RefundOutcome::Refunded(change)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "outcome": "refunded", "detail": { "ONE": 1 } })
        );

        let json = serde_json::to_value(RefundOutcome::Infeasible {
            amount: Money::from_cents(100),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "outcome": "infeasible", "detail": { "amount": 100 } })
        );
    }

    #[test]
    fn test_dispense_and_reset() {
        let mut manager = stocked(&[(Coin::TenCents, 3)]);
        manager.receive_cash(Coin::One).unwrap();
        let change: ChangeSet = [(Coin::TenCents, 2)].into_iter().collect();
        manager.dispense(&change);
        manager.reset_balance();

        assert_eq!(manager.stock().quantity(Coin::TenCents), 1);
        assert!(!manager.has_balance());
    }
}
