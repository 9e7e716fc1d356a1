//! # Machine Error Type
//!
//! Uniform error type returned by every facade operation.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ──► CoreError ──┐                                      │
//! │                                  ├──► MachineError { code, message }   │
//! │  io / toml / bad value ──► ConfigError ──┘                              │
//! │                                                                         │
//! │  The inner error is kept as `source()` so callers can match on it.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! What a frontend or log sink receives when an operation fails:
//! ```json
//! {
//!   "code": "INSUFFICIENT_CHANGE",
//!   "message": "Insufficient change available to return €0.10"
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use vend_core::{CoreError, StockKind, ValidationError};

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading or validating the machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Invalid configuration: at least one {kind} must be accepted")]
    NothingAccepted { kind: StockKind },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Machine Error
// =============================================================================

/// Error codes for facade responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown coin/product, bad quantity, empty batch, bad price
    ValidationError,

    /// Product is valid but out of stock
    ProductUnavailable,

    /// Balance does not cover the selected product
    InsufficientBalance,

    /// Cash stock cannot compose the change or refund
    InsufficientChange,

    /// Purchase confirmed with nothing selected
    NoProductSelected,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else (output encoding and the like)
    Internal,
}

/// Error returned from facade operations.
#[derive(Debug, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct MachineError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    #[serde(skip)]
    #[source]
    source: Option<Cause>,
}

/// What a `MachineError` was converted from.
#[derive(Debug, Error)]
enum Cause {
    #[error(transparent)]
    Core(CoreError),

    #[error(transparent)]
    Config(ConfigError),
}

impl MachineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        MachineError {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        MachineError::new(ErrorCode::Internal, message)
    }

    /// The domain error this one was built from, if any.
    pub fn core_error(&self) -> Option<&CoreError> {
        match &self.source {
            Some(Cause::Core(err)) => Some(err),
            _ => None,
        }
    }

    /// The configuration error this one was built from, if any.
    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.source {
            Some(Cause::Config(err)) => Some(err),
            _ => None,
        }
    }

    /// The rejected input behind a `VALIDATION_ERROR` or a bad config value.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.source {
            Some(Cause::Core(CoreError::Validation(err))) => Some(err),
            Some(Cause::Config(ConfigError::Invalid(err))) => Some(err),
            _ => None,
        }
    }
}

/// Converts core errors to machine errors.
impl From<CoreError> for MachineError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductUnavailable { .. } => ErrorCode::ProductUnavailable,
            CoreError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            CoreError::InsufficientChange { .. } => ErrorCode::InsufficientChange,
            CoreError::NoProductSelected => ErrorCode::NoProductSelected,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        MachineError {
            code,
            message: err.to_string(),
            source: Some(Cause::Core(err)),
        }
    }
}

impl From<ConfigError> for MachineError {
    fn from(err: ConfigError) -> Self {
        MachineError {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(Cause::Config(err)),
        }
    }
}

/// Convenience type alias for facade results.
pub type MachineResult<T> = Result<T, MachineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use std::io;

    use vend_core::Money;

    #[test]
    fn test_core_error_keeps_source() {
        let core = CoreError::InsufficientChange {
            amount: Money::from_cents(10),
        };
        let err = MachineError::from(core.clone());

        assert_eq!(err.code, ErrorCode::InsufficientChange);
        assert_eq!(err.to_string(), core.to_string());
        assert_eq!(err.core_error(), Some(&core));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let empty = ValidationError::EmptyBatch {
            kind: StockKind::Product,
        };
        let err = MachineError::from(CoreError::from(empty.clone()));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "At least one product should be provided");
        assert_eq!(err.validation_error(), Some(&empty));
    }

    #[test]
    fn test_config_error_conversion() {
        let err = MachineError::from(ConfigError::NothingAccepted {
            kind: StockKind::Cash,
        });
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(
            err.message,
            "Invalid configuration: at least one cash item must be accepted"
        );
        assert!(err.core_error().is_none());
        assert!(matches!(
            err.config_error(),
            Some(ConfigError::NothingAccepted {
                kind: StockKind::Cash
            })
        ));
        assert!(err.validation_error().is_none());
    }

    #[test]
    fn test_config_io_error_keeps_source() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "machine.toml");
        let err = MachineError::from(ConfigError::from(io));

        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.message, "Failed to read config file: machine.toml");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), err.message);
        assert!(matches!(
            err.config_error(),
            Some(ConfigError::Io(e)) if e.kind() == io::ErrorKind::PermissionDenied
        ));
    }

    #[test]
    fn test_invalid_config_value_is_inspectable() {
        let bad = ValidationError::InvalidItem {
            kind: StockKind::Product,
            name: "FANTA".into(),
        };
        let err = MachineError::from(ConfigError::from(bad.clone()));
        assert_eq!(err.validation_error(), Some(&bad));
    }

    #[test]
    fn test_serializes_code_and_message() {
        let err = MachineError::from(CoreError::NoProductSelected);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NO_PRODUCT_SELECTED");
        assert_eq!(json["message"], "No product selected");
        assert!(json.get("source").is_none());
    }
}
