//! # Substrate Error Types
//!
//! Failures raised by the ledger itself, as opposed to rejections raised by
//! contract handlers (those are `shared_types::ContractError` and travel
//! inside delivery records).

use shared_types::{Address, Coins, ContractError};
use thiserror::Error;

/// Errors from ledger-level operations (account management, external sends).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The referenced account does not exist.
    #[error("unknown account: {0}")]
    UnknownAccount(Address),

    /// A wallet cannot cover the value it is asked to send.
    #[error("insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: Address,
        required: Coins,
        available: Coins,
    },

    /// External messages can only originate from wallets.
    #[error("account {0} is contract-driven and cannot send externally")]
    ContractAccount(Address),

    /// A contract is already installed at the target address.
    #[error("account {0} already has a contract installed")]
    AccountOccupied(Address),
}

/// Why a delivery failed. Recorded on the delivery record; the attached
/// value (minus the fee) has already been bounced when one of these is set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The handler rejected the message.
    #[error("{0}")]
    Contract(#[from] ContractError),

    /// The handler committed to sending more value than the account held.
    #[error("outbound overdraft: requested {requested}, available {available}")]
    OutboundOverdraft {
        requested: Coins,
        available: Coins,
    },
}

impl ExitReason {
    /// Returns the inner contract error, if the handler produced one.
    #[must_use]
    pub fn as_contract_error(&self) -> Option<&ContractError> {
        match self {
            Self::Contract(err) => Some(err),
            Self::OutboundOverdraft { .. } => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
