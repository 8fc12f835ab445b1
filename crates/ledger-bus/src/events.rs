//! # Ledger Event Feed
//!
//! Broadcast notifications emitted while the router processes messages.
//! Observability only: nothing in the delivery discipline depends on whether
//! anyone is subscribed.

use shared_types::{Address, Coins};
use uuid::Uuid;

/// An observable ledger occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A state init was installed at a vacant account.
    ContractInstalled {
        /// The account the contract now lives at.
        address: Address,
        /// The installed contract's code tag.
        code_tag: &'static str,
    },

    /// A message was processed (successfully or not).
    MessageDelivered {
        /// Correlation id of the processed envelope.
        envelope_id: Uuid,
        /// Destination account.
        dest: Address,
        /// True if the delivery committed.
        success: bool,
    },

    /// A failed delivery's value was refunded to the sender.
    MessageBounced {
        /// Correlation id of the refund envelope.
        envelope_id: Uuid,
        /// Account that rejected the original message.
        from: Address,
        /// Account receiving the refund.
        to: Address,
        /// Refunded value.
        value: Coins,
    },
}

impl LedgerEvent {
    /// Short stable name for logging and filtering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ContractInstalled { .. } => "contract_installed",
            Self::MessageDelivered { .. } => "message_delivered",
            Self::MessageBounced { .. } => "message_bounced",
        }
    }
}
