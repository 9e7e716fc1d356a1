//! # Machine Configuration
//!
//! What a machine accepts and what it starts with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VEND_MACHINE_NAME=Lobby                                            │
//! │     VEND_CONFIG=/etc/vend/machine.toml  (picks the file itself)        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/machine/machine.toml (Linux)                             │
//! │     ~/Library/Application Support/com.vend.machine/machine.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     every coin and product accepted, empty stock                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # machine.toml
//! [machine]
//! name = "Lobby"
//!
//! [accepts]
//! coins = ["TEN_CENTS", "TWENTY_CENTS", "FIFTY_CENTS", "ONE", "TWO"]
//! products = ["COKE", "WATER"]
//!
//! [stock.cash]
//! TEN_CENTS = 10
//! ONE = 5
//!
//! [stock.products]
//! COKE = 4
//! ```
//!
//! Names are kept as strings until [`MachineConfig::validate`] so that a
//! typo is reported with the same "Invalid cash item specified" wording the
//! machine itself uses.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vend_core::validation::{validate_item, validate_quantity};
use vend_core::{Batch, Beverage, Coin, StockItem, ValidationError};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// `[machine]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Human-readable machine name, used in logs.
    #[serde(default = "default_machine_name")]
    pub name: String,
}

fn default_machine_name() -> String {
    "Vending Machine".to_string()
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            name: default_machine_name(),
        }
    }
}

/// `[accepts]` section: the coins and products this machine trades in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptSettings {
    #[serde(default = "default_coins")]
    pub coins: Vec<String>,

    #[serde(default = "default_products")]
    pub products: Vec<String>,
}

fn default_coins() -> Vec<String> {
    Coin::ALL.iter().map(|c| c.code().to_string()).collect()
}

fn default_products() -> Vec<String> {
    Beverage::ALL.iter().map(|b| b.code().to_string()).collect()
}

impl Default for AcceptSettings {
    fn default() -> Self {
        AcceptSettings {
            coins: default_coins(),
            products: default_products(),
        }
    }
}

/// `[stock.cash]` and `[stock.products]`: initial fill, name → units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSettings {
    #[serde(default)]
    pub cash: BTreeMap<String, i64>,

    #[serde(default)]
    pub products: BTreeMap<String, i64>,
}

// =============================================================================
// Main Machine Configuration
// =============================================================================

/// Complete machine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    #[serde(default)]
    pub accepts: AcceptSettings,

    #[serde(default)]
    pub stock: StockSettings,
}

impl MachineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else `VEND_CONFIG`, else the
    ///    platform config dir)
    /// 3. Environment variables
    ///
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("VEND_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading machine config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load machine config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Does not validate.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks every name and quantity in the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.initial_cash()?;
        self.initial_products()?;
        Ok(())
    }

    /// Accepted coins, in declaration order.
    pub fn accepted_coins(&self) -> ConfigResult<Vec<Coin>> {
        parse_accepted(&self.accepts.coins)
    }

    /// Accepted products, in declaration order.
    pub fn accepted_products(&self) -> ConfigResult<Vec<Beverage>> {
        parse_accepted(&self.accepts.products)
    }

    /// Initial coin fill, keys checked against the accepted coins.
    pub fn initial_cash(&self) -> ConfigResult<Batch<Coin>> {
        parse_stock(&self.stock.cash, &self.accepted_coins()?)
    }

    /// Initial product fill, keys checked against the accepted products.
    pub fn initial_products(&self) -> ConfigResult<Batch<Beverage>> {
        parse_stock(&self.stock.products, &self.accepted_products()?)
    }

    pub fn name(&self) -> &str {
        &self.machine.name
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("VEND_MACHINE_NAME") {
            debug!(name = %name, "Overriding machine name from environment");
            self.machine.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vend", "machine")
            .map(|dirs| dirs.config_dir().join("machine.toml"))
    }
}

fn parse_accepted<K>(names: &[String]) -> ConfigResult<Vec<K>>
where
    K: StockItem + FromStr<Err = ValidationError>,
{
    let mut accepted = Vec::with_capacity(names.len());
    for name in names {
        let item = name.parse::<K>()?;
        if !accepted.contains(&item) {
            accepted.push(item);
        }
    }

    if accepted.is_empty() {
        return Err(ConfigError::NothingAccepted { kind: K::KIND });
    }

    accepted.sort();
    Ok(accepted)
}

fn parse_stock<K>(entries: &BTreeMap<String, i64>, accepted: &[K]) -> ConfigResult<Batch<K>>
where
    K: StockItem + FromStr<Err = ValidationError>,
{
    let mut batch = Batch::new();
    for (name, &qty) in entries {
        let item = validate_item(name.parse::<K>()?, accepted)?;
        let qty = validate_quantity(K::KIND, qty)?;
        *batch.entry(item).or_insert(0) += i64::from(qty);
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vend_core::StockKind;

    const LOBBY: &str = r#"
        [machine]
        name = "Lobby"

        [accepts]
        coins = ["TWO", "TEN_CENTS", "FIFTY_CENTS", "ONE", "TWENTY_CENTS"]
        products = ["WATER", "COKE"]

        [stock.cash]
        TEN_CENTS = 10
        ONE = 5

        [stock.products]
        COKE = 4
    "#;

    #[test]
    fn test_default_config() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.accepted_coins().unwrap(), Coin::ALL.to_vec());
        assert_eq!(config.accepted_products().unwrap(), Beverage::ALL.to_vec());
        assert!(config.initial_cash().unwrap().is_empty());
        assert!(config.initial_products().unwrap().is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let config = MachineConfig::from_toml_str(LOBBY).unwrap();
        config.validate().unwrap();

        assert_eq!(config.name(), "Lobby");
        assert_eq!(
            config.accepted_coins().unwrap(),
            vec![
                Coin::TenCents,
                Coin::TwentyCents,
                Coin::FiftyCents,
                Coin::One,
                Coin::Two
            ]
        );
        assert_eq!(
            config.accepted_products().unwrap(),
            vec![Beverage::Coke, Beverage::Water]
        );
        assert_eq!(
            config.initial_cash().unwrap(),
            Batch::from([(Coin::TenCents, 10), (Coin::One, 5)])
        );
        assert_eq!(
            config.initial_products().unwrap(),
            Batch::from([(Beverage::Coke, 4)])
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = MachineConfig::from_toml_str("[stock.products]\nwater = 2\n").unwrap();
        assert_eq!(config.name(), "Vending Machine");
        assert_eq!(config.accepts.coins.len(), Coin::ALL.len());
        assert_eq!(
            config.initial_products().unwrap(),
            Batch::from([(Beverage::Water, 2)])
        );
    }

    #[test]
    fn test_unknown_coin_is_rejected() {
        let config =
            MachineConfig::from_toml_str("[accepts]\ncoins = [\"ONE\", \"THREE\"]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Invalid cash item specified: THREE"
        );
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::InvalidItem {
                kind: StockKind::Cash,
                ref name,
            }) if name == "THREE"
        ));
    }

    #[test]
    fn test_empty_accepted_set_is_rejected() {
        let config = MachineConfig::from_toml_str("[accepts]\nproducts = []\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NothingAccepted {
                kind: StockKind::Product
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: at least one product must be accepted"
        );
    }

    #[test]
    fn test_stock_outside_accepted_set_is_rejected() {
        let config = MachineConfig::from_toml_str(
            "[accepts]\nproducts = [\"COKE\"]\n\n[stock.products]\nSPRITE = 3\n",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Invalid product specified: SPRITE"
        );
    }

    #[test]
    fn test_non_positive_stock_is_rejected() {
        let config = MachineConfig::from_toml_str("[stock.cash]\nONE = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Invalid quantity specified for cash item: 0"
        );
    }

    #[test]
    fn test_malformed_toml() {
        let err = MachineConfig::from_toml_str("[stock.cash\nONE = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let path = std::env::temp_dir().join("vend-config-that-does-not-exist.toml");
        let config = MachineConfig::load(Some(path)).unwrap();
        assert_eq!(config.accepted_coins().unwrap(), Coin::ALL.to_vec());
    }

    #[test]
    fn test_toml_serialization() {
        let config = MachineConfig::from_toml_str(LOBBY).unwrap();
        let out = toml::to_string_pretty(&config).unwrap();
        let back = MachineConfig::from_toml_str(&out).unwrap();
        assert_eq!(back.initial_cash().unwrap(), config.initial_cash().unwrap());
        assert_eq!(back.accepts.products, config.accepts.products);
    }
}
