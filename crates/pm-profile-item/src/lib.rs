//! # Profile Item Contract
//!
//! One minted, non-transferable profile record. Each item is its own
//! account, addressed deterministically by `(factory, index)`, holding the
//! identity it was issued to and the content it was issued with.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Holder fixed at initialization | `ItemState::initialize` is the only holder write, guarded by `AlreadyInitialized` |
//! | Initialization is factory-only | `ProfileItem::handle` authenticates the sender against the init's factory |
//! | Transfers always rejected | every `Transfer` fails with `NonTransferable`, regardless of sender |
//! | Pre-init guard | any non-Initialize operation before initialization fails with `Uninitialized` |
//!
//! The record functions as an attestation, not a tradable asset; rejecting
//! every transfer is what gives the holder association its meaning.

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
// RE-EXPORTS
// =============================================================================

pub use contract::ProfileItem;
pub use domain::{item_address, ItemData, ItemInit, ItemState, ITEM_CODE_TAG, STORAGE_RESERVE};
pub use events::ItemMessage;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
