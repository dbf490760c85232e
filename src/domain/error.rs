//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate inputs, such as
//! [`TradingPair::parse`](super::pair::TradingPair::parse).
//!
//! # Examples
//!
//! ```
//! use marketwatch::domain::error::DomainError;
//! use marketwatch::domain::pair::TradingPair;
//!
//! let result = TradingPair::parse("INJUSDT");
//! assert!(matches!(result, Err(DomainError::InvalidPair { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A trading pair must look like `BASE-QUOTE`.
    #[error("invalid trading pair '{value}': {reason}")]
    InvalidPair {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A book quantity does not fit a `Decimal`.
    #[error("{quantity} overflows a decimal")]
    Overflow {
        /// What was being computed.
        quantity: &'static str,
    },
}
