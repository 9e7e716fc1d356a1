//! # vend-core: Pure Business Logic for the Vending Machine
//!
//! This crate holds the transactional core of the machine: the coin and
//! product ledgers, the running balance and the change policy. It has no
//! I/O dependencies at all.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Machine                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 vend-machine (facade + demo)                    │   │
//! │  │    select ──► insert coins ──► confirm ──► receipt / refund    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   stock   │  │  change   │  │ managers  │  │   │
//! │  │   │   Coin    │  │  Stock<K> │  │  Greedy   │  │   Cash    │  │   │
//! │  │   │ Beverage  │  │   Batch   │  │ ChangeSet │  │  Product  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SINKS • NO HARDWARE • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Coin and Beverage enumerations, balance comparison
//! - [`money`] - Money type with integer arithmetic
//! - [`stock`] - Generic quantity ledger shared by coins and products
//! - [`change`] - Change sets and the greedy change strategy
//! - [`cash`] - Coin stock plus running balance
//! - [`product`] - Product stock plus current selection
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Batch, CashManager, Coin, Money};
//!
//! let mut cash = CashManager::new();
//! cash.insert_stock(&Batch::from([(Coin::TenCents, 5)])).unwrap();
//! cash.receive_cash(Coin::One).unwrap();
//! cash.receive_cash(Coin::FiftyCents).unwrap();
//!
//! // Water costs €0.90, so €0.60 comes back as FIFTY_CENTS + TEN_CENTS
//! let due = cash.remaining_change(Money::from_cents(90)).unwrap();
//! assert_eq!(due.cents(), 60);
//! let change = cash.change_for(due).unwrap();
//! assert_eq!(change.count(Coin::FiftyCents), 1);
//! assert_eq!(change.count(Coin::TenCents), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod change;
pub mod error;
pub mod money;
pub mod product;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cash::{CashManager, RefundOutcome};
pub use change::{ChangeSet, ChangeStrategy, GreedyChange};
pub use error::{CoreError, CoreResult, StockKind, ValidationError};
pub use money::Money;
pub use product::ProductManager;
pub use stock::{Batch, Stock, StockItem};
pub use types::*;
