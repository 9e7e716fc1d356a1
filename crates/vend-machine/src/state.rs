//! # Shared Machine State
//!
//! Lets several hosts (a panel, a supplier console, a telemetry task) drive
//! one machine.
//!
//! ## Thread Safety
//! The machine is wrapped in `Arc<Mutex<T>>` because:
//! 1. The customer and the supplier may act from different threads
//! 2. A purchase reads and writes both managers and must not interleave
//!    with another operation
//!
//! A poisoned lock is recovered: every operation validates before it
//! mutates, so the guarded machine is consistent even if a caller panicked
//! while holding it.

use std::sync::{Arc, Mutex, PoisonError};

use crate::machine::VendingMachine;

/// Cloneable handle to a single machine.
#[derive(Debug, Clone)]
pub struct SharedMachine {
    machine: Arc<Mutex<VendingMachine>>,
}

impl SharedMachine {
    pub fn new(machine: VendingMachine) -> Self {
        SharedMachine {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let balance = shared.with_machine(|m| m.balance());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingMachine) -> R,
    {
        let machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_machine_mut(|m| m.insert_cash(Coin::One))?;
    /// ```
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingMachine) -> R,
    {
        let mut machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut machine)
    }
}

impl From<VendingMachine> for SharedMachine {
    fn from(machine: VendingMachine) -> Self {
        Self::new(machine)
    }
}
