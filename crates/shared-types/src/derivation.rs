//! # Deterministic Address Derivation
//!
//! Pure functions mapping an account's defining parameters to its address.
//! No I/O, no state, no registry: any party holding the parameters can
//! compute the address before the account exists.

use crate::primitives::{Address, Hash};
use sha3::{Digest, Keccak256};

/// Domain-separation marker for account address derivation.
const DERIVATION_MARKER: u8 = 0xfe;

/// Computes the Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    Hash::new(digest.into())
}

/// Derives an account address from a code tag and the account's defining
/// parameters.
///
/// Address = keccak256(0xfe ++ keccak256(code_tag) ++ keccak256(init_data))\[12:\]
///
/// Hashing both components keeps the preimage fixed-width, so no choice of
/// tag or parameter bytes can collide with another (tag, parameters) pair.
#[must_use]
pub fn derive_account_address(code_tag: &str, init_data: &[u8]) -> Address {
    let tag_hash = Keccak256::digest(code_tag.as_bytes());
    let data_hash = Keccak256::digest(init_data);

    let mut preimage = Vec::with_capacity(65);
    preimage.push(DERIVATION_MARKER);
    preimage.extend_from_slice(&tag_hash);
    preimage.extend_from_slice(&data_hash);

    let digest = Keccak256::digest(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..32]);
    Address::new(addr)
}

// =============================================================================
// TESTS
// =============================================================================
