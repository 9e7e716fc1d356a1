//! # Vending Machine Facade
//!
//! Composes the product and cash managers into one purchase flow.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  select_product(WATER) ──► price €0.90                                 │
//! │  insert_cash(FIFTY_CENTS) ×2 ──► balance €1.00                         │
//! │  confirm_purchase()                                                     │
//! │     │                                                                   │
//! │     ├── plan_purchase()        read-only, every check happens here     │
//! │     │     ├── nothing selected?        → NoProductSelected             │
//! │     │     ├── balance below price?     → InsufficientBalance           │
//! │     │     ├── balance == price         → empty change                  │
//! │     │     └── change not composable?   → InsufficientChange            │
//! │     │                                                                   │
//! │     └── commit(plan)                                                    │
//! │           1. remove one WATER                                          │
//! │           2. clear the selection                                       │
//! │           3. take the change coins out of the cash stock               │
//! │           4. reset the balance                                         │
//! │                                                                         │
//! │  A failed confirm leaves stock, balance and selection as they were.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vend_core::{
    BalanceResult, Batch, Beverage, CashManager, ChangeSet, Coin, CoreError, Money,
    ProductManager, RefundOutcome,
};

use crate::config::MachineConfig;
use crate::error::MachineResult;

// =============================================================================
// Operation Traits
// =============================================================================

/// What a customer can do at the panel.
pub trait UserOperations {
    /// Selects a product and returns its price.
    fn select_product(&mut self, product: Beverage) -> MachineResult<Money>;

    /// Deposits one coin and returns the new balance.
    fn insert_cash(&mut self, coin: Coin) -> MachineResult<Money>;

    /// Buys the selected product with the current balance.
    fn confirm_purchase(&mut self) -> MachineResult<PurchaseReceipt>;

    /// Pays the whole balance back. `None` when there is nothing to return.
    fn refund(&mut self) -> MachineResult<Option<ChangeSet>>;

    /// Coins the machine takes, in declaration order.
    fn allowed_cash_items(&self) -> Vec<Coin>;

    /// Products that can be selected right now.
    fn available_products(&self) -> Vec<Beverage>;
}

/// What the supplier can do with the door open.
pub trait SupplierOperations {
    fn refill_products(&mut self, batch: &Batch<Beverage>) -> MachineResult<()>;

    fn refill_cash(&mut self, batch: &Batch<Coin>) -> MachineResult<()>;

    fn product_stock_status(&self) -> &BTreeMap<Beverage, u32>;

    fn cash_stock_status(&self) -> &BTreeMap<Coin, u32>;
}

// =============================================================================
// Purchase Plan & Receipt
// =============================================================================

/// A validated purchase that has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchasePlan {
    pub product: Beverage,
    pub price: Money,
    pub paid: Money,
    pub change: ChangeSet,
}

/// Result of a completed purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub id: Uuid,
    pub product: Beverage,
    pub price: Money,
    pub paid: Money,
    pub change: ChangeSet,
    pub completed_at: DateTime<Utc>,
}

impl From<PurchasePlan> for PurchaseReceipt {
    fn from(plan: PurchasePlan) -> Self {
        PurchaseReceipt {
            id: Uuid::new_v4(),
            product: plan.product,
            price: plan.price,
            paid: plan.paid,
            change: plan.change,
            completed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Vending Machine
// =============================================================================

/// One machine: a product manager and a cash manager under a single name.
#[derive(Debug, Clone)]
pub struct VendingMachine {
    name: String,
    products: ProductManager,
    cash: CashManager,
}

impl VendingMachine {
    /// A machine accepting every coin and product, with empty stock.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_managers(name, ProductManager::new(), CashManager::new())
    }

    pub fn with_managers(
        name: impl Into<String>,
        products: ProductManager,
        cash: CashManager,
    ) -> Self {
        VendingMachine {
            name: name.into(),
            products,
            cash,
        }
    }

    /// Builds a machine from a validated configuration and loads its
    /// initial stock.
    pub fn from_config(config: &MachineConfig) -> MachineResult<Self> {
        let mut machine = Self::with_managers(
            config.name(),
            ProductManager::with_accepted(&config.accepted_products()?),
            CashManager::with_accepted(&config.accepted_coins()?),
        );

        let cash = config.initial_cash()?;
        if !cash.is_empty() {
            machine.refill_cash(&cash)?;
        }
        let products = config.initial_products()?;
        if !products.is_empty() {
            machine.refill_products(&products)?;
        }

        info!(
            machine = %machine.name,
            coins = ?machine.cash.valid_cash_items(),
            products = ?machine.products.valid_items(),
            "Machine configured"
        );
        Ok(machine)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_manager(&self) -> &ProductManager {
        &self.products
    }

    pub fn cash_manager(&self) -> &CashManager {
        &self.cash
    }

    pub fn balance(&self) -> Money {
        self.cash.balance()
    }

    pub fn selected(&self) -> Option<Beverage> {
        self.products.selected()
    }

    /// Runs every purchase check against the current state without
    /// changing it.
    pub fn plan_purchase(&self) -> MachineResult<PurchasePlan> {
        let product = self.products.selected().ok_or(CoreError::NoProductSelected)?;
        let price = product.price();
        let paid = self.cash.balance();

        let change = match self.cash.affordability(price)? {
            BalanceResult::Below => {
                return Err(CoreError::InsufficientBalance {
                    product: product.name().to_string(),
                    balance: paid,
                    price,
                }
                .into());
            }
            BalanceResult::Exact => ChangeSet::new(),
            BalanceResult::Above => {
                let amount = self.cash.remaining_change(price)?;
                self.cash
                    .change_for(amount)
                    .ok_or(CoreError::InsufficientChange { amount })?
            }
        };

        Ok(PurchasePlan {
            product,
            price,
            paid,
            change,
        })
    }

    /// Applies a plan built by [`Self::plan_purchase`] on this same state.
    fn commit(&mut self, plan: PurchasePlan) -> MachineResult<PurchaseReceipt> {
        // The only step that can fail runs first.
        self.products.remove_one(plan.product)?;
        self.products.deselect();
        self.cash.dispense(&plan.change);
        self.cash.reset_balance();
        Ok(PurchaseReceipt::from(plan))
    }
}

impl UserOperations for VendingMachine {
    fn select_product(&mut self, product: Beverage) -> MachineResult<Money> {
        self.products.check_selectable(product)?;
        self.products.select(product);
        debug!(machine = %self.name, %product, "Product selected");
        Ok(product.price())
    }

    fn insert_cash(&mut self, coin: Coin) -> MachineResult<Money> {
        let balance = self.cash.receive_cash(coin)?;
        debug!(machine = %self.name, %coin, %balance, "Coin inserted");
        Ok(balance)
    }

    fn confirm_purchase(&mut self) -> MachineResult<PurchaseReceipt> {
        let plan = match self.plan_purchase() {
            Ok(plan) => plan,
            Err(e) => {
                warn!(machine = %self.name, code = ?e.code, "Purchase rejected: {}", e);
                return Err(e);
            }
        };

        let receipt = self.commit(plan)?;
        info!(
            machine = %self.name,
            receipt = %receipt.id,
            product = %receipt.product,
            paid = %receipt.paid,
            change = %receipt.change.total(),
            "Purchase completed"
        );
        Ok(receipt)
    }

    fn refund(&mut self) -> MachineResult<Option<ChangeSet>> {
        match self.cash.calculate_refund() {
            RefundOutcome::NothingToRefund => Ok(None),
            RefundOutcome::Refunded(change) => {
                info!(machine = %self.name, amount = %change.total(), "Balance refunded");
                Ok(Some(change))
            }
            RefundOutcome::Infeasible { amount } => {
                warn!(machine = %self.name, %amount, "Refund not possible with current stock");
                Err(CoreError::InsufficientChange { amount }.into())
            }
        }
    }

    fn allowed_cash_items(&self) -> Vec<Coin> {
        self.cash.valid_cash_items().to_vec()
    }

    fn available_products(&self) -> Vec<Beverage> {
        self.products.available_items()
    }
}

impl SupplierOperations for VendingMachine {
    fn refill_products(&mut self, batch: &Batch<Beverage>) -> MachineResult<()> {
        self.products.insert_stock(batch)?;
        debug!(machine = %self.name, ?batch, "Products refilled");
        Ok(())
    }

    fn refill_cash(&mut self, batch: &Batch<Coin>) -> MachineResult<()> {
        self.cash.insert_stock(batch)?;
        debug!(machine = %self.name, ?batch, "Cash refilled");
        Ok(())
    }

    fn product_stock_status(&self) -> &BTreeMap<Beverage, u32> {
        self.products.current_stock()
    }

    fn cash_stock_status(&self) -> &BTreeMap<Coin, u32> {
        self.cash.current_stock()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
