//! # Factory Message Schema
//!
//! The operations a factory account understands, bincode-encoded at the
//! envelope boundary. Identity never travels in these payloads; handlers
//! read the sender from the envelope context only.

use serde::{Deserialize, Serialize};
use shared_types::{Coins, ContentBlob, ContractError};

/// Operations addressed to a factory account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryMessage {
    /// Overwrite the minting terms. Owner-only.
    Configure {
        /// New collection content descriptor.
        content: ContentBlob,
        /// New mint price.
        price: Coins,
    },

    /// Mint the next item for the sender. Open to anyone paying the price.
    Issue {
        /// Per-item content descriptor for the new record.
        profile_content: ContentBlob,
    },

    /// Send the surplus balance to the owner. Owner-only.
    Withdraw,
}

impl FactoryMessage {
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
    /// `MalformedBody` if the bytes are not a valid factory message.
    pub fn decode(body: &[u8]) -> Result<Self, ContractError> {
        bincode::deserialize(body).map_err(|err| ContractError::MalformedBody(err.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
