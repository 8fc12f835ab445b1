//! # Ledger Bus - Message-Routing Substrate
//!
//! An in-process stand-in for the ledger every contract in this workspace
//! runs on: addressable accounts holding value, a FIFO message router, and
//! the execute-or-roll-back delivery discipline contracts are written
//! against.
//!
//! ## Execution Rules
//!
//! - **Serial per account**: one message is processed to completion before
//!   the next; concurrency exists only across accounts via queued messages.
//! - **Atomic delivery**: a handler either commits (state change + outbound
//!   messages debited together) or rolls back completely. There is no
//!   partial application.
//! - **Bounce, don't throw**: a failed delivery refunds the attached value
//!   (minus the processing fee) to the sender as a separate queued message.
//! - **Deploy-on-delivery**: a message may carry a state init; it is
//!   installed only at a vacant account whose address matches the init's
//!   derived address.
//!
//! ## Fee Model
//!
//! A flat [`PROCESSING_FEE`] is burned per delivery, taken from the attached
//! value (never from the account's prior balance). Deterministic by design:
//! every "minus unavoidable processing cost" bound in the contract crates is
//! a small multiple of this constant.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod errors;
pub mod events;
pub mod ledger;
pub mod service;

// Re-export main types
pub use errors::{ExitReason, LedgerError};
pub use events::LedgerEvent;
pub use ledger::{DeliveryRecord, Ledger};
pub use service::{LedgerApi, LedgerService, ServiceConfig, ServiceStats};

use shared_types::Coins;

/// Flat fee burned per delivered message, taken from the attached value.
pub const PROCESSING_FEE: Coins = Coins::from_nanos(10_000_000); // 0.01 coin

/// Upper bound on deliveries per [`Ledger::run`] call; stops runaway
/// message loops between contracts.
pub const MAX_HOPS_PER_RUN: usize = 10_000;

/// Default capacity of the ledger event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 1_024;

/// Code tag used to derive wallet (contract-less account) addresses.
pub const WALLET_CODE_TAG: &str = "pm.wallet.v1";
