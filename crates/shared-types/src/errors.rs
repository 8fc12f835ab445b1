//! # Contract Error Taxonomy
//!
//! Every way a message handler can reject a message. A rejection never
//! mutates state: the substrate rolls the account back and bounces the
//! attached value to the sender (minus the processing fee).

use crate::primitives::{Address, Coins};
use thiserror::Error;

/// Errors raised by contract message handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Sender is not the identity this operation requires.
    #[error("unauthorized sender: {sender}")]
    Unauthorized {
        /// The rejected sender.
        sender: Address,
    },

    /// Attached value does not cover the required payment.
    #[error("insufficient payment: required {required}, attached {attached}")]
    InsufficientPayment {
        /// Amount the operation requires.
        required: Coins,
        /// Amount actually attached.
        attached: Coins,
    },

    /// Post-operation balance would not cover the storage reserve.
    #[error("balance below storage reserve: required {required}, available {available}")]
    BelowStorageReserve {
        /// The reserve floor.
        required: Coins,
        /// Balance available after crediting the message.
        available: Coins,
    },

    /// The record is non-transferable; every transfer attempt is rejected.
    #[error("record is non-transferable")]
    NonTransferable,

    /// The account has not been initialized yet.
    #[error("account not initialized")]
    Uninitialized,

    /// The account was already initialized; initialization is one-shot.
    #[error("account already initialized")]
    AlreadyInitialized,

    /// The message body could not be decoded.
    #[error("malformed message body: {0}")]
    MalformedBody(String),
}

impl ContractError {
    /// Returns true if this is an access-control rejection.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true if this rejection is a standing policy rather than a
    /// condition the caller could have avoided.
    #[must_use]
    pub fn is_policy(&self) -> bool {
        matches!(self, Self::NonTransferable)
    }
}

// =============================================================================
// TESTS
// =============================================================================
