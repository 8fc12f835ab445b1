//! # Shared Types - On-Ledger Primitives
//!
//! Single source of truth for the types every crate in the workspace speaks:
//! value objects (`Address`, `Hash`, `Coins`, `ContentBlob`), deterministic
//! account-address derivation, the value-carrying message envelope, and the
//! `Contract` seam the ledger substrate dispatches into.
//!
//! ## Design Rules
//!
//! - **Envelope-Only Identity**: a handler learns the sender solely from
//!   [`MessageContext::sender`]; message bodies never carry identity fields.
//! - **Pure Derivation**: account addresses are pure functions of a code tag
//!   and the account's defining parameters ([`derive_account_address`]), so
//!   any party can predict an address without querying anything.
//! - **No Shared Mutation**: contracts exchange [`OutboundMessage`]s only;
//!   there are no live references between accounts.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod contract;
pub mod derivation;
pub mod envelope;
pub mod errors;
pub mod primitives;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use contract::Contract;
pub use derivation::{derive_account_address, keccak256};
pub use envelope::{MessageContext, MessageEnvelope, OutboundMessage};
pub use errors::ContractError;
pub use primitives::{Address, Coins, ContentBlob, Hash};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
