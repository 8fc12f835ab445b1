//! # Item Message Schema
//!
//! The operations an item account understands, bincode-encoded at the
//! envelope boundary. Identity never travels in these payloads; handlers
//! read the sender from the envelope context only.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Coins, ContentBlob, ContractError};

/// Operations addressed to an item account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemMessage {
    /// One-time activation, sent by the creating factory immediately after
    /// address derivation.
    Initialize {
        /// Per-item content descriptor, fixed at mint time.
        content: ContentBlob,
        /// Identity the item is permanently associated with.
        holder: Address,
    },

    /// Transfer request. Always rejected; the full wire shape is kept so
    /// rejection is exercised against realistic payloads.
    Transfer {
        /// Caller-chosen correlation number.
        query_id: u64,
        /// Proposed new holder (never honored).
        new_holder: Address,
        /// Where a response would be sent, were transfers possible.
        response_destination: Address,
        /// Opaque caller payload.
        custom_payload: ContentBlob,
        /// Value the caller asked to forward with the transfer.
        forward_amount: Coins,
        /// Opaque payload to forward with the transfer.
        forward_payload: ContentBlob,
    },
}

impl ItemMessage {
    /// Encodes the message for the envelope body.
    ///
    /// # Errors
    ///
    /// `MalformedBody` if serialization fails (not expected for well-formed
    /// messages; surfaced rather than swallowed).
    pub fn encode(&self) -> Result<Vec<u8>, ContractError> {
        bincode::serialize(self).map_err(|err| ContractError::MalformedBody(err.to_string()))
    }

    /// Decodes an envelope body.
    ///
    /// # Errors
    ///
    /// `MalformedBody` if the bytes are not a valid item message.
    pub fn decode(body: &[u8]) -> Result<Self, ContractError> {
        bincode::deserialize(body).map_err(|err| ContractError::MalformedBody(err.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
