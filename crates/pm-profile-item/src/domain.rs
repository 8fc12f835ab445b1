//! # Item Domain
//!
//! Pure state and derivation logic for a single profile record. No I/O,
//! no messaging; the [`crate::contract`] module wires this into the ledger.

use serde::{Deserialize, Serialize};
use shared_types::{derive_account_address, Address, Coins, ContentBlob, ContractError};

/// Stable tag naming the item contract's code. Part of address derivation.
pub const ITEM_CODE_TAG: &str = "pm.profile-item.v1";

/// Minimum balance an item keeps to remain operable.
pub const STORAGE_RESERVE: Coins = Coins::from_nanos(20_000_000); // 0.02 coin

// =============================================================================
// DEFINING PARAMETERS
// =============================================================================

/// The parameters that define an item account: the factory that created it
/// and the sequence number it was assigned. Immutable; the item's address
/// is derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInit {
    /// The creating factory.
    pub factory: Address,
    /// Sequence number assigned at mint time.
    pub index: u64,
}

impl ItemInit {
    /// Creates the defining parameters for `(factory, index)`.
    #[must_use]
    pub const fn new(factory: Address, index: u64) -> Self {
        Self { factory, index }
    }

    /// Canonical byte encoding: factory bytes followed by the big-endian
    /// index. Stable by construction; address derivation depends on it.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(28);
        bytes.extend_from_slice(self.factory.as_bytes());
        bytes.extend_from_slice(&self.index.to_be_bytes());
        bytes
    }

    /// The address this item deterministically lives at.
    #[must_use]
    pub fn address(&self) -> Address {
        derive_account_address(ITEM_CODE_TAG, &self.to_bytes())
    }
}

/// Computes the address of the item minted at `index` by `factory`.
///
/// Pure function: any party can predict an item's address before it is
/// minted, without querying the factory.
#[must_use]
pub fn item_address(factory: Address, index: u64) -> Address {
    ItemInit::new(factory, index).address()
}

// =============================================================================
// STATE
// =============================================================================

/// Mutable item state. Starts vacant; exactly one initialization is ever
/// accepted, and nothing after that can change the holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemState {
    initialized: bool,
    holder: Address,
    content: ContentBlob,
}

impl ItemState {
    /// The state of a freshly derived, never-minted item.
    #[must_use]
    pub fn vacant() -> Self {
        Self {
            initialized: false,
            holder: Address::ZERO,
            content: ContentBlob::empty(),
        }
    }

    /// One-time activation: fixes the content and the holder.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` if activation already happened; state is
    /// untouched in that case.
    pub fn initialize(
        &mut self,
        content: ContentBlob,
        holder: Address,
    ) -> Result<(), ContractError> {
        if self.initialized {
            return Err(ContractError::AlreadyInitialized);
        }
        self.initialized = true;
        self.holder = holder;
        self.content = content;
        Ok(())
    }

    /// True once the item has been minted.
    #[must_use]
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// The identity the item is permanently associated with.
    #[must_use]
    pub fn holder(&self) -> Address {
        self.holder
    }

    /// The per-item content descriptor.
    #[must_use]
    pub fn content(&self) -> &ContentBlob {
        &self.content
    }
}

impl Default for ItemState {
    fn default() -> Self {
        Self::vacant()
    }
}

// =============================================================================
// QUERY VIEW
// =============================================================================

/// The read-only data tuple an item exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemData {
    /// The creating factory.
    pub factory: Address,
    /// Sequence number assigned at mint time.
    pub index: u64,
    /// True once minted.
    pub initialized: bool,
    /// Permanent holder (zero until minted).
    pub holder: Address,
    /// Per-item content descriptor.
    pub content: ContentBlob,
}

// =============================================================================
// TESTS
// =============================================================================
