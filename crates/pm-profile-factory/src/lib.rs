//! # Profile Factory Contract
//!
//! The collection-level state machine of the issuance service: it owns the
//! minting terms (content descriptor, price), mediates payment-gated
//! issuance of [`pm_profile_item::ProfileItem`] records, and lets the owner
//! withdraw accumulated proceeds down to the storage reserve.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Strictly monotonic issuance index | `domain/entities.rs` - `FactoryState::issue` is the only index writer |
//! | Balance never drops below the reserve | `domain/entities.rs` - `configure`/`withdraw` compute surplus over `STORAGE_RESERVE` |
//! | Owner-only configuration & withdrawal | `domain/entities.rs` - sender authenticated before any mutation |
//! | Owner fixed at construction | `FactoryInit` participates in address derivation; nothing mutates it |
//!
//! Runtime checks for these live in [`domain::invariants`] and are re-run by
//! the integration suite after every scenario.
//!
//! ## Message Surface
//!
//! | Message | Access | Effect on success |
//! |---------|--------|-------------------|
//! | `Configure` | owner-only | sets content/price, refunds surplus over the reserve |
//! | `Issue` | any sender | mints the next item, forwards unused value to it |
//! | `Withdraw` | owner-only | sends surplus balance to the owner |
//!
//! Issuance is fire-and-forget: the factory derives the item's address,
//! queues its initialization, bumps the counter, and does not await
//! confirmation. An initialization that is never delivered leaves the item
//! permanently vacant; the factory does not treat that as an error.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod contract;
pub mod domain;
pub mod events;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::contract::ProfileFactory;
    pub use crate::domain::entities::{
        factory_address, CollectionData, FactoryData, FactoryInit, FactoryState, IssueOutcome,
        DEFAULT_MINT_PRICE, FACTORY_CODE_TAG, STORAGE_RESERVE,
    };
    pub use crate::domain::invariants::{
        check_all_invariants, check_index_monotonic, check_owner_stable, check_reserve_floor,
        InvariantCheckResult, InvariantViolation,
    };
    pub use crate::events::FactoryMessage;
}

pub use contract::ProfileFactory;
pub use domain::entities::{
    factory_address, FactoryInit, FactoryState, DEFAULT_MINT_PRICE, FACTORY_CODE_TAG,
    STORAGE_RESERVE,
};
pub use events::FactoryMessage;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
