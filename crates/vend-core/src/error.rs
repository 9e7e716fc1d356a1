//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── ValidationError  - Invalid input (unknown coin, bad quantity...)  │
//! │  └── CoreError        - Business rules + wrapped validation            │
//! │                                                                         │
//! │  vend-machine errors (separate crate)                                  │
//! │  └── MachineError     - Uniform outer error, keeps CoreError as source │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → MachineError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable and is raised before any state is
//! touched.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Stock Kind
// =============================================================================

/// Which ledger an error refers to. Drives the item-specific wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockKind {
    Cash,
    Product,
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockKind::Cash => write!(f, "cash item"),
            StockKind::Product => write!(f, "product"),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The key is not part of the machine's accepted set, or does not name
    /// any known coin/product at all.
    #[error("Invalid {kind} specified: {name}")]
    InvalidItem { kind: StockKind, name: String },

    /// Batch quantities must be strictly positive and fit a ledger count.
    #[error("Invalid quantity specified for {kind}: {quantity}")]
    InvalidQuantity { kind: StockKind, quantity: i64 },

    /// A batch operation was given nothing to apply.
    #[error("At least one {kind} should be provided")]
    EmptyBatch { kind: StockKind },

    /// Prices are never negative.
    #[error("Invalid product price: {price}")]
    InvalidPrice { price: Money },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product is valid but has no units left.
    #[error("Product {product} is not available in stock")]
    ProductUnavailable { product: String },

    /// Balance does not cover the selected product.
    ///
    /// ## User Workflow
    /// ```text
    /// select WATER (€0.90) ──► insert FIFTY_CENTS ──► confirm
    ///                                                    │
    ///                                                    ▼
    ///      InsufficientBalance { product: "Water", balance: €0.50, price: €0.90 }
    /// ```
    #[error("Current balance {balance} is not enough to buy {product} ({price})")]
    InsufficientBalance {
        product: String,
        balance: Money,
        price: Money,
    },

    /// The cash stock cannot compose the amount exactly.
    #[error("Insufficient change available to return {amount}")]
    InsufficientChange { amount: Money },

    /// Confirm was requested with nothing selected.
    #[error("No product selected")]
    NoProductSelected,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
