//! # Factory Entities
//!
//! The factory's defining parameters, its mutable state, and the outcome
//! types its operations produce. Every operation authenticates before it
//! mutates and computes value movements against the storage reserve, so the
//! caller-visible failure modes are exactly the error taxonomy and nothing
//! is ever half-applied.

use serde::{Deserialize, Serialize};
use shared_types::{derive_account_address, Address, Coins, ContentBlob, ContractError};

/// Stable tag naming the factory contract's code. Part of address
/// derivation.
pub const FACTORY_CODE_TAG: &str = "pm.profile-factory.v1";

/// Minimum balance the factory keeps to remain operable. Never withdrawable.
pub const STORAGE_RESERVE: Coins = Coins::from_nanos(20_000_000); // 0.02 coin

/// Mint price a freshly constructed factory answers with, before the owner's
/// first `Configure`. Deliberately prohibitive: issuance against an
/// unconfigured collection should not be economical.
pub const DEFAULT_MINT_PRICE: Coins = Coins::from_coins(10_000);

// =============================================================================
// DEFINING PARAMETERS
// =============================================================================

/// The parameters that define a factory account: the owner identity and a
/// salt distinguishing multiple collections of one owner. Immutable; the
/// factory's address is derived from them, which is what removes the
/// first-writer bootstrap race entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryInit {
    /// Identity authorized to configure and withdraw.
    pub owner: Address,
    /// Collection salt.
    pub salt: u64,
}

impl FactoryInit {
    /// Creates the defining parameters for `(owner, salt)`.
    #[must_use]
    pub const fn new(owner: Address, salt: u64) -> Self {
        Self { owner, salt }
    }

    /// Canonical byte encoding: owner bytes followed by the big-endian
    /// salt. Stable by construction; address derivation depends on it.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(28);
        bytes.extend_from_slice(self.owner.as_bytes());
        bytes.extend_from_slice(&self.salt.to_be_bytes());
        bytes
    }

    /// The address this factory deterministically lives at.
    #[must_use]
    pub fn address(&self) -> Address {
        derive_account_address(FACTORY_CODE_TAG, &self.to_bytes())
    }
}

/// Computes the address of the factory defined by `(owner, salt)`.
#[must_use]
pub fn factory_address(owner: Address, salt: u64) -> Address {
    FactoryInit::new(owner, salt).address()
}

// =============================================================================
// STATE
// =============================================================================

/// Mutable factory state.
///
/// `next_index` starts at 0 and is bumped exactly once per successful
/// issuance; it is never reused and never decreases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryState {
    owner: Address,
    content: ContentBlob,
    price: Coins,
    next_index: u64,
}

impl FactoryState {
    /// State of a freshly constructed factory: default price, empty
    /// content, counter at zero.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            content: ContentBlob::empty(),
            price: DEFAULT_MINT_PRICE,
            next_index: 0,
        }
    }

    /// The owner identity.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The collection content descriptor.
    #[must_use]
    pub fn content(&self) -> &ContentBlob {
        &self.content
    }

    /// The current mint price.
    #[must_use]
    pub fn price(&self) -> Coins {
        self.price
    }

    /// The index the next issued item will receive.
    #[must_use]
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Overwrites the minting terms. Owner-only.
    ///
    /// `balance` is the spendable balance after the message was credited;
    /// whatever exceeds the storage reserve is returned for refund so the
    /// factory ends the step holding exactly the reserve.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `sender` is not the owner.
    /// - `BelowStorageReserve` if `balance` cannot cover the reserve.
    ///
    /// State is untouched on either.
    pub fn configure(
        &mut self,
        sender: Address,
        content: ContentBlob,
        price: Coins,
        balance: Coins,
    ) -> Result<Coins, ContractError> {
        if sender != self.owner {
            return Err(ContractError::Unauthorized { sender });
        }
        let refund = balance
            .checked_sub(STORAGE_RESERVE)
            .ok_or(ContractError::BelowStorageReserve {
                required: STORAGE_RESERVE,
                available: balance,
            })?;
        self.content = content;
        self.price = price;
        Ok(refund)
    }

    /// Assigns the next index to an item for `issuer`. Open to any sender
    /// that pays at least the current price.
    ///
    /// # Errors
    ///
    /// `InsufficientPayment` if `attached` is below the price; the counter
    /// is untouched.
    pub fn issue(
        &mut self,
        issuer: Address,
        content: ContentBlob,
        attached: Coins,
    ) -> Result<IssueOutcome, ContractError> {
        let forward = attached
            .checked_sub(self.price)
            .ok_or(ContractError::InsufficientPayment {
                required: self.price,
                attached,
            })?;
        let index = self.next_index;
        self.next_index += 1;
        Ok(IssueOutcome {
            index,
            holder: issuer,
            content,
            forward,
        })
    }

    /// Computes the withdrawable surplus. Owner-only; the reserve stays.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `sender` is not the owner; no funds move.
    pub fn withdraw(&self, sender: Address, balance: Coins) -> Result<Coins, ContractError> {
        if sender != self.owner {
            return Err(ContractError::Unauthorized { sender });
        }
        Ok(balance.saturating_sub(STORAGE_RESERVE))
    }

    // -------------------------------------------------------------------------
    // Query views
    // -------------------------------------------------------------------------

    /// The full configuration tuple.
    #[must_use]
    pub fn factory_data(&self) -> FactoryData {
        FactoryData {
            next_index: self.next_index,
            content: self.content.clone(),
            owner: self.owner,
            price: self.price,
        }
    }

    /// The collection view (configuration without the price).
    #[must_use]
    pub fn collection_data(&self) -> CollectionData {
        CollectionData {
            next_index: self.next_index,
            content: self.content.clone(),
            owner: self.owner,
        }
    }
}

// =============================================================================
// OPERATION OUTCOMES & QUERY VIEWS
// =============================================================================

/// What a successful issuance commits the factory to dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueOutcome {
    /// Sequence number assigned to the new item.
    pub index: u64,
    /// Identity the item will be associated with (the paying sender).
    pub holder: Address,
    /// Per-item content descriptor.
    pub content: ContentBlob,
    /// Value to forward with the initialization (`attached - price`).
    pub forward: Coins,
}

/// The full read-only configuration tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryData {
    /// Index the next item will receive.
    pub next_index: u64,
    /// Collection content descriptor.
    pub content: ContentBlob,
    /// Owner identity.
    pub owner: Address,
    /// Current mint price.
    pub price: Coins,
}

/// The collection view of the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionData {
    /// Index the next item will receive.
    pub next_index: u64,
    /// Collection content descriptor.
    pub content: ContentBlob,
    /// Owner identity.
    pub owner: Address,
}

// =============================================================================
// TESTS
// =============================================================================
