//! # Factory Domain
//!
//! Pure business logic: state, operations, and invariant checks. No I/O,
//! no async, no messaging; [`crate::contract`] wires this into the ledger.

pub mod entities;
pub mod invariants;
