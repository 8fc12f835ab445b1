//! # Contract Seam
//!
//! The trait every on-ledger state machine implements. The substrate owns
//! the accounts and drives this trait; contracts never hold references to
//! each other and communicate only through [`OutboundMessage`]s.

use crate::derivation::derive_account_address;
use crate::envelope::{MessageContext, OutboundMessage};
use crate::errors::ContractError;
use crate::primitives::Address;
use std::any::Any;

/// A long-lived, addressable state machine.
///
/// ## Execution Contract
///
/// The substrate guarantees:
/// - `handle` runs one message at a time to completion (serial per account);
/// - on `Err`, every mutation made during the call is discarded and the
///   attached value bounces to the sender — handlers may therefore mutate
///   `self` freely before deciding to fail;
/// - on `Ok`, the returned outbound messages are debited and queued
///   atomically with the state change.
pub trait Contract: Send + Sync + 'static {
    /// Stable tag naming this contract's code. Part of address derivation.
    fn code_tag(&self) -> &'static str;

    /// Canonical encoding of the defining parameters. Part of address
    /// derivation, so it must be stable across the account's lifetime.
    fn init_data(&self) -> Vec<u8>;

    /// The account address this contract deterministically lives at.
    fn address(&self) -> Address {
        derive_account_address(self.code_tag(), &self.init_data())
    }

    /// Processes one delivered message.
    fn handle(
        &mut self,
        ctx: &MessageContext,
        body: &[u8],
    ) -> Result<Vec<OutboundMessage>, ContractError>;

    /// Clones the contract behind the trait object. The substrate snapshots
    /// state with this before each delivery so failures can roll back.
    fn clone_box(&self) -> Box<dyn Contract>;

    /// Upcast for read-only queries against the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for Box<dyn Contract> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Contract({} @ {})", self.code_tag(), self.address())
    }
}

// =============================================================================
// TESTS
// =============================================================================
