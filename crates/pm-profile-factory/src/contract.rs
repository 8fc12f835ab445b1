//! # Factory Contract
//!
//! Wires the factory domain into the ledger's contract seam: decodes
//! bodies, runs the operation against the state, and turns outcomes into
//! outbound messages (refunds, item initializations, withdrawals).
//!
//! Issuance dispatch order matters and is fixed here: derive the item's
//! address, build its initialization, bump the counter (inside
//! `FactoryState::issue`), and queue the message. The whole step commits or
//! rolls back atomically in the substrate, so there is never a counter bump
//! without a matching dispatch.

use crate::domain::entities::{
    CollectionData, FactoryData, FactoryInit, FactoryState, FACTORY_CODE_TAG,
};
use crate::events::FactoryMessage;
use pm_profile_item::{ItemMessage, ProfileItem};
use shared_types::{
    Address, Contract, ContractError, MessageContext, OutboundMessage,
};
use std::any::Any;
use tracing::info;

/// The collection-level factory account.
#[derive(Clone, Debug)]
pub struct ProfileFactory {
    init: FactoryInit,
    state: FactoryState,
}

impl ProfileFactory {
    /// Creates the factory for `(owner, salt)` with default terms.
    #[must_use]
    pub fn new(owner: Address, salt: u64) -> Self {
        Self {
            init: FactoryInit::new(owner, salt),
            state: FactoryState::new(owner),
        }
    }

    /// The defining parameters.
    #[must_use]
    pub fn init(&self) -> &FactoryInit {
        &self.init
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &FactoryState {
        &self.state
    }

    /// The full configuration tuple. Zero-value, never fails.
    #[must_use]
    pub fn factory_data(&self) -> FactoryData {
        self.state.factory_data()
    }

    /// The collection view. Zero-value, never fails.
    #[must_use]
    pub fn collection_data(&self) -> CollectionData {
        self.state.collection_data()
    }
}

impl Contract for ProfileFactory {
    fn code_tag(&self) -> &'static str {
        FACTORY_CODE_TAG
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

        match FactoryMessage::decode(body)? {
            FactoryMessage::Configure { content, price } => {
                let refund = self
                    .state
                    .configure(ctx.sender, content, price, ctx.balance)?;
                info!(
                    factory = %ctx.self_address,
                    price = %price,
                    refund = %refund,
                    "collection configured"
                );
                if refund.is_zero() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![OutboundMessage::transfer(ctx.sender, refund)])
                }
            }

            FactoryMessage::Issue { profile_content } => {
                let outcome = self.state.issue(ctx.sender, profile_content, ctx.value)?;
                let item = ProfileItem::vacant(ctx.self_address, outcome.index);
                let item_address = item.address();
                let body = ItemMessage::Initialize {
                    content: outcome.content,
                    holder: outcome.holder,
                }
                .encode()?;

                // The forward never exceeds what the account actually holds
                // after the fee; the difference stays with the factory.
                let forward = outcome.forward.min(ctx.balance);
                info!(
                    factory = %ctx.self_address,
                    index = outcome.index,
                    item = %item_address,
                    holder = %outcome.holder,
                    forward = %forward,
                    "profile issued"
                );
                Ok(vec![OutboundMessage::to(item_address, forward, body)
                    .with_state_init(Box::new(item))])
            }

            FactoryMessage::Withdraw => {
                let amount = self.state.withdraw(ctx.sender, ctx.balance)?;
                info!(
                    factory = %ctx.self_address,
                    owner = %ctx.sender,
                    amount = %amount,
                    "surplus withdrawn"
                );
                if amount.is_zero() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![OutboundMessage::transfer(self.state.owner(), amount)])
                }
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
