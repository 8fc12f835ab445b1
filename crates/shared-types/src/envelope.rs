//! # Message Envelope
//!
//! The universal wrapper for every value-carrying message routed between
//! accounts, plus the context a handler sees while processing one.
//!
//! ## Properties
//!
//! - **Correlation**: every envelope carries a fresh `id`; delivery records
//!   reference it so cause and effect can be traced across hops.
//! - **Envelope Authority**: `source` is stamped by the substrate and is the
//!   sole source of truth for sender identity.
//! - **Deploy-on-Delivery**: an envelope may carry a state init; the
//!   substrate installs it only if the destination is vacant and the init's
//!   derived address matches the destination.

use crate::contract::Contract;
use crate::primitives::{Address, Coins};
use uuid::Uuid;

/// A value-carrying message queued for delivery to an account.
#[derive(Debug)]
pub struct MessageEnvelope {
    /// Correlation id, unique per envelope.
    pub id: Uuid,
    /// Sending account. Stamped by the substrate, never by the payload.
    pub source: Address,
    /// Destination account.
    pub dest: Address,
    /// Value attached to the message.
    pub value: Coins,
    /// Encoded operation. An empty body is a plain value top-up.
    pub body: Vec<u8>,
    /// Optional state init for deploy-on-delivery.
    pub state_init: Option<Box<dyn Contract>>,
    /// True if this envelope is a refund of a failed delivery.
    pub bounced: bool,
}

impl MessageEnvelope {
    /// Creates a fresh envelope with a new correlation id.
    #[must_use]
    pub fn new(source: Address, dest: Address, value: Coins, body: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            dest,
            value,
            body,
            state_init: None,
            bounced: false,
        }
    }

    /// Attaches a state init for deploy-on-delivery.
    #[must_use]
    pub fn with_state_init(mut self, init: Box<dyn Contract>) -> Self {
        self.state_init = Some(init);
        self
    }
}

/// What a handler sees while processing one delivered message.
///
/// The substrate credits the attached value and charges the processing fee
/// before invoking the handler, so `balance` is the spendable amount the
/// handler may allocate to outbound messages.
#[derive(Clone, Copy, Debug)]
pub struct MessageContext {
    /// Correlation id of the envelope being processed.
    pub envelope_id: Uuid,
    /// The sending account.
    pub sender: Address,
    /// The account processing the message.
    pub self_address: Address,
    /// Value attached to the message.
    pub value: Coins,
    /// Account balance after crediting `value` and charging the fee.
    pub balance: Coins,
}

/// A message a handler asks the substrate to send on its behalf.
///
/// Dispatch is fire-and-forget: the handler's processing step completes
/// without waiting for delivery. The substrate debits the values of all
/// outbound messages from the account atomically with the state change; if
/// the balance cannot cover them, the whole step fails and rolls back.
#[derive(Debug)]
pub struct OutboundMessage {
    /// Destination account.
    pub dest: Address,
    /// Value to attach.
    pub value: Coins,
    /// Encoded operation; empty for a plain transfer.
    pub body: Vec<u8>,
    /// Optional state init for deploy-on-delivery.
    pub state_init: Option<Box<dyn Contract>>,
}

impl OutboundMessage {
    /// Creates a plain value transfer with an empty body.
    #[must_use]
    pub fn transfer(dest: Address, value: Coins) -> Self {
        Self {
            dest,
            value,
            body: Vec::new(),
            state_init: None,
        }
    }

    /// Creates a message carrying an encoded operation.
    #[must_use]
    pub fn to(dest: Address, value: Coins, body: Vec<u8>) -> Self {
        Self {
            dest,
            value,
            body,
            state_init: None,
        }
    }

    /// Attaches a state init for deploy-on-delivery.
    #[must_use]
    pub fn with_state_init(mut self, init: Box<dyn Contract>) -> Self {
        self.state_init = Some(init);
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
