//! # Factory Invariants
//!
//! Runtime checks for the properties the factory must never lose, written
//! as pure predicates so the integration suite can re-verify them after
//! every scenario.

use crate::domain::entities::{FactoryState, STORAGE_RESERVE};
use shared_types::Coins;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Reserve Floor
///
/// A configured factory's balance never drops below the storage reserve as
/// the outcome of its own operations.
#[must_use]
pub fn check_reserve_floor(balance: Coins) -> bool {
    balance >= STORAGE_RESERVE
}

/// Monotonic Indexing
///
/// `next_index` advances by exactly one per successful issuance: no gaps,
/// no reuse, no decrease.
#[must_use]
pub fn check_index_monotonic(before: u64, after: u64, minted: u64) -> bool {
    after == before + minted
}

/// Owner Stability
///
/// Nothing after construction can change who owns the collection.
#[must_use]
pub fn check_owner_stable(before: &FactoryState, after: &FactoryState) -> bool {
    before.owner() == after.owner()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(
    before: &FactoryState,
    after: &FactoryState,
    minted: u64,
    balance: Coins,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_reserve_floor(balance) {
        violations.push(InvariantViolation::ReserveFloorBreached {
            balance,
            floor: STORAGE_RESERVE,
        });
    }

    if !check_index_monotonic(before.next_index(), after.next_index(), minted) {
        violations.push(InvariantViolation::IndexNotMonotonic {
            before: before.next_index(),
            after: after.next_index(),
            minted,
        });
    }

    if !check_owner_stable(before, after) {
        violations.push(InvariantViolation::OwnerMutated);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balance fell below the storage reserve.
    ReserveFloorBreached {
        /// Observed balance.
        balance: Coins,
        /// The reserve floor.
        floor: Coins,
    },
    /// Index did not advance by exactly the number of mints.
    IndexNotMonotonic {
        /// Counter before the operations.
        before: u64,
        /// Counter after the operations.
        after: u64,
        /// Successful mints in between.
        minted: u64,
    },
    /// The owner identity changed after construction.
    OwnerMutated,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReserveFloorBreached { balance, floor } => {
                write!(f, "reserve floor breached: balance {balance} < floor {floor}")
            }
            Self::IndexNotMonotonic {
                before,
                after,
                minted,
            } => {
                write!(
                    f,
                    "index not monotonic: {before} -> {after} across {minted} mints"
                )
            }
            Self::OwnerMutated => write!(f, "owner identity mutated after construction"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
