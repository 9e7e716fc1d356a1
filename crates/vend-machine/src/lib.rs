//! # vend-machine: Purchase Orchestration
//!
//! Turns the vend-core managers into a machine a customer and a supplier
//! can talk to.
//!
//! ## Modules
//!
//! - [`machine`] - `VendingMachine`, user and supplier operations
//! - [`state`] - `SharedMachine` for multi-threaded hosts
//! - [`config`] - TOML + environment configuration
//! - [`error`] - `MachineError` with machine-readable codes
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Batch, Beverage, Coin};
//! use vend_machine::{SupplierOperations, UserOperations, VendingMachine};
//!
//! let mut machine = VendingMachine::new("Lobby");
//! machine.refill_products(&Batch::from([(Beverage::Water, 3)])).unwrap();
//! machine.refill_cash(&Batch::from([(Coin::TenCents, 5)])).unwrap();
//!
//! machine.select_product(Beverage::Water).unwrap();
//! machine.insert_cash(Coin::One).unwrap();
//!
//! let receipt = machine.confirm_purchase().unwrap();
//! assert_eq!(receipt.change.count(Coin::TenCents), 1);
//! ```

pub mod config;
pub mod error;
pub mod machine;
pub mod state;

pub use config::MachineConfig;
pub use error::{ConfigError, ErrorCode, MachineError, MachineResult};
pub use machine::{PurchasePlan, PurchaseReceipt, SupplierOperations, UserOperations, VendingMachine};
pub use state::SharedMachine;
