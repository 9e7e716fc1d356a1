//! # Validation Module
//!
//! Input checks shared by both managers.
//!
//! ## Batch Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Supplier refill: { ONE: 5, FIFTY_CENTS: 0 }                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_batch() ← THIS MODULE                                        │
//! │       │                                                                 │
//! │       ├── empty?            → EmptyBatch                               │
//! │       ├── key not accepted? → InvalidItem                              │
//! │       ├── qty <= 0?         → InvalidQuantity  ◄── this example        │
//! │       │                                                                 │
//! │       └── OK → entries handed back, ledger applies them all            │
//! │                                                                         │
//! │  Every entry is checked before the first one is applied.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{StockKind, ValidationError};
use crate::money::Money;
use crate::stock::{Batch, StockItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a batch quantity and narrows it to a ledger count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit in a `u32`
///
/// ```rust
/// use vend_core::error::StockKind;
/// use vend_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(StockKind::Cash, 5).unwrap(), 5);
/// assert!(validate_quantity(StockKind::Cash, 0).is_err());
/// assert!(validate_quantity(StockKind::Product, -2).is_err());
/// ```
pub fn validate_quantity(kind: StockKind, qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::InvalidQuantity {
            kind,
            quantity: qty,
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::InvalidQuantity {
        kind,
        quantity: qty,
    })
}

/// Validates a price.
///
/// Zero is allowed; negative prices are not.
///
/// ```rust
/// use vend_core::money::Money;
/// use vend_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(150)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::InvalidPrice { price });
    }
    Ok(price)
}

/// Checks that `item` belongs to the accepted set.
pub fn validate_item<K: StockItem>(item: K, accepted: &[K]) -> ValidationResult<K> {
    if accepted.contains(&item) {
        Ok(item)
    } else {
        Err(ValidationError::InvalidItem {
            kind: K::KIND,
            name: item.code().to_string(),
        })
    }
}

/// Validates every entry of a batch and returns them ready to apply.
pub fn validate_batch<K: StockItem>(
    batch: &Batch<K>,
    accepted: &[K],
) -> ValidationResult<Vec<(K, u32)>> {
    if batch.is_empty() {
        return Err(ValidationError::EmptyBatch { kind: K::KIND });
    }

    batch
        .iter()
        .map(|(&item, &qty)| {
            let item = validate_item(item, accepted)?;
            let qty = validate_quantity(K::KIND, qty)?;
            Ok((item, qty))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Beverage, Coin};

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(StockKind::Cash, 1).unwrap(), 1);
        assert_eq!(validate_quantity(StockKind::Cash, 999).unwrap(), 999);

        assert!(validate_quantity(StockKind::Cash, 0).is_err());
        assert!(validate_quantity(StockKind::Cash, -1).is_err());
        assert!(validate_quantity(StockKind::Cash, i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(90)).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(-10)),
            Err(ValidationError::InvalidPrice {
                price: Money::from_cents(-10)
            })
        );
    }

    #[test]
    fn test_validate_item() {
        let accepted = [Beverage::Coke, Beverage::Water];
        assert!(validate_item(Beverage::Coke, &accepted).is_ok());
        assert_eq!(
            validate_item(Beverage::Sprite, &accepted),
            Err(ValidationError::InvalidItem {
                kind: StockKind::Product,
                name: "SPRITE".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_batch() {
        let batch = Batch::from([(Coin::Two, 2), (Coin::One, 1)]);
        let entries = validate_batch(&batch, &Coin::ALL).unwrap();
        assert_eq!(entries, vec![(Coin::One, 1), (Coin::Two, 2)]);

        let empty: Batch<Coin> = Batch::new();
        assert_eq!(
            validate_batch(&empty, &Coin::ALL),
            Err(ValidationError::EmptyBatch {
                kind: StockKind::Cash
            })
        );

        let negative = Batch::from([(Coin::One, -3)]);
        assert!(matches!(
            validate_batch(&negative, &Coin::ALL),
            Err(ValidationError::InvalidQuantity { quantity: -3, .. })
        ));
    }
}
