//! # Item Contract
//!
//! Wires the item domain into the ledger's contract seam: decodes bodies,
//! authenticates the factory on initialization, rejects every transfer, and
//! returns excess initialization value to the holder.

use crate::domain::{ItemData, ItemInit, ItemState, ITEM_CODE_TAG, STORAGE_RESERVE};
use crate::events::ItemMessage;
use shared_types::{
    Address, Contract, ContractError, MessageContext, OutboundMessage,
};
use std::any::Any;
use tracing::{info, warn};

/// A single profile record account.
#[derive(Clone, Debug)]
pub struct ProfileItem {
    init: ItemInit,
    state: ItemState,
}

impl ProfileItem {
    /// Creates the vacant item for `(factory, index)`. This is the state
    /// init the factory ships with the initialization message.
    #[must_use]
    pub fn vacant(factory: Address, index: u64) -> Self {
        Self {
            init: ItemInit::new(factory, index),
            state: ItemState::vacant(),
        }
    }

    /// The defining parameters.
    #[must_use]
    pub fn init(&self) -> &ItemInit {
        &self.init
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &ItemState {
        &self.state
    }

    /// The read-only data tuple. Zero-value, never fails.
    #[must_use]
    pub fn data(&self) -> ItemData {
        ItemData {
            factory: self.init.factory,
            index: self.init.index,
            initialized: self.state.initialized(),
            holder: self.state.holder(),
            content: self.state.content().clone(),
        }
    }
}

impl Contract for ProfileItem {
    fn code_tag(&self) -> &'static str {
        ITEM_CODE_TAG
    }

    fn init_data(&self) -> Vec<u8> {
        self.init.to_bytes()
    }

    fn handle(
        &mut self,
        ctx: &MessageContext,
        body: &[u8],
    ) -> Result<Vec<OutboundMessage>, ContractError> {
        // Empty body: plain value top-up.
        if body.is_empty() {
            return Ok(Vec::new());
        }

        match ItemMessage::decode(body)? {
            ItemMessage::Initialize { content, holder } => {
                if ctx.sender != self.init.factory {
                    return Err(ContractError::Unauthorized { sender: ctx.sender });
                }
                self.state.initialize(content, holder)?;
                info!(
                    item = %ctx.self_address,
                    index = self.init.index,
                    %holder,
                    "profile initialized"
                );

                // Keep the storage reserve; the rest goes back to the holder
                // so overpaid mints are not stranded here.
                let refund = ctx.balance.saturating_sub(STORAGE_RESERVE);
                if refund.is_zero() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![OutboundMessage::transfer(holder, refund)])
                }
            }

            ItemMessage::Transfer { new_holder, .. } => {
                if !self.state.initialized() {
                    return Err(ContractError::Uninitialized);
                }
                warn!(
                    item = %ctx.self_address,
                    sender = %ctx.sender,
                    %new_holder,
                    "transfer rejected: record is non-transferable"
                );
                Err(ContractError::NonTransferable)
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
