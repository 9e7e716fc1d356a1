//! # Domain Types
//!
//! The closed enumerations the machine trades in.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Coin       │   │    Beverage     │   │  BalanceResult  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  FIVE_CENTS  5  │   │  COKE    150    │   │  Below          │       │
//! │  │  TEN_CENTS  10  │   │  SPRITE  140    │   │  Exact          │       │
//! │  │  TWENTY    20   │   │  WATER    90    │   │  Above          │       │
//! │  │  FIFTY     50   │   └─────────────────┘   └─────────────────┘       │
//! │  │  ONE      100   │                                                    │
//! │  │  TWO      200   │   values/prices in cents                           │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ALL` lists each enumeration in declaration order. That order is the one
//! reported to callers; it is never re-sorted by value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{StockKind, ValidationError};
use crate::money::Money;
use crate::stock::StockItem;

// =============================================================================
// Coin
// =============================================================================

/// A denomination accepted by the coin mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Coin {
    FiveCents,
    TenCents,
    TwentyCents,
    FiftyCents,
    One,
    Two,
}

impl Coin {
    /// Every denomination, in declaration order.
    pub const ALL: [Coin; 6] = [
        Coin::FiveCents,
        Coin::TenCents,
        Coin::TwentyCents,
        Coin::FiftyCents,
        Coin::One,
        Coin::Two,
    ];

    /// Face value of one unit.
    #[inline]
    pub const fn value(&self) -> Money {
        match self {
            Coin::FiveCents => Money::from_cents(5),
            Coin::TenCents => Money::from_cents(10),
            Coin::TwentyCents => Money::from_cents(20),
            Coin::FiftyCents => Money::from_cents(50),
            Coin::One => Money::from_cents(100),
            Coin::Two => Money::from_cents(200),
        }
    }

    /// Upper-case identifier, as used in config files.
    pub const fn code(&self) -> &'static str {
        match self {
            Coin::FiveCents => "FIVE_CENTS",
            Coin::TenCents => "TEN_CENTS",
            Coin::TwentyCents => "TWENTY_CENTS",
            Coin::FiftyCents => "FIFTY_CENTS",
            Coin::One => "ONE",
            Coin::Two => "TWO",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Coin {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Coin::ALL, StockKind::Cash)
    }
}

impl StockItem for Coin {
    const KIND: StockKind = StockKind::Cash;

    fn code(&self) -> &'static str {
        Coin::code(self)
    }
}

// =============================================================================
// Beverage
// =============================================================================

/// A product sold by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Beverage {
    Coke,
    Sprite,
    Water,
}

impl Beverage {
    /// Every product, in declaration order.
    pub const ALL: [Beverage; 3] = [Beverage::Coke, Beverage::Sprite, Beverage::Water];

    /// Display name shown on the selection panel.
    pub const fn name(&self) -> &'static str {
        match self {
            Beverage::Coke => "Coke",
            Beverage::Sprite => "Sprite",
            Beverage::Water => "Water",
        }
    }

    #[inline]
    pub const fn price(&self) -> Money {
        match self {
            Beverage::Coke => Money::from_cents(150),
            Beverage::Sprite => Money::from_cents(140),
            Beverage::Water => Money::from_cents(90),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Beverage::Coke => "COKE",
            Beverage::Sprite => "SPRITE",
            Beverage::Water => "WATER",
        }
    }
}

impl fmt::Display for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Beverage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Beverage::ALL, StockKind::Product)
    }
}

impl StockItem for Beverage {
    const KIND: StockKind = StockKind::Product;

    fn code(&self) -> &'static str {
        Beverage::code(self)
    }
}

/// Case-insensitive lookup of an identifier within an enumeration.
fn parse_code<T: StockItem>(s: &str, all: &[T], kind: StockKind) -> Result<T, ValidationError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|item| item.code().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ValidationError::InvalidItem {
            kind,
            name: wanted.to_string(),
        })
}

// =============================================================================
// Balance Result
// =============================================================================

/// How the running balance compares to a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BalanceResult {
    /// Balance is lower than the price.
    Below,
    /// Balance matches the price exactly; no change is due.
    Exact,
    /// Balance exceeds the price; change is due.
    Above,
}

impl From<Ordering> for BalanceResult {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => BalanceResult::Below,
            Ordering::Equal => BalanceResult::Exact,
            Ordering::Greater => BalanceResult::Above,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
