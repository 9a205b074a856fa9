use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::pricing::platform::Platform;

/// Errors raised by the fee and recommendation engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid input: {field} must be non-negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    #[error("Invalid input: {field} is too large to price, got {value}")]
    Overflow { field: &'static str, value: Decimal },
}

/// Errors raised while building a fee schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeScheduleError {
    #[error("Fee schedule has no rule for platform {platform}")]
    MissingPlatform { platform: Platform },

    #[error("Rate for {platform} must be within [0, 1): {field} = {rate}")]
    RateOutOfRange {
        platform: Platform,
        field: &'static str,
        rate: Decimal,
    },

    #[error("Amount for {platform} must be non-negative: {field} = {amount}")]
    NegativeAmount {
        platform: Platform,
        field: &'static str,
        amount: Decimal,
    },

    #[error("Flat fee for {platform} requires a threshold")]
    FlatFeeWithoutThreshold { platform: Platform },

    #[error("Unknown platform in fee schedule: {name}")]
    UnknownPlatform { name: String },
}

/// Errors related to inventory records and their lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Item already exists: {id}")]
    Duplicate { id: String },

    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition { id: String, from: String, to: String },
}
