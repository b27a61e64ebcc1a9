//! Key and address conversion helpers.

use alloy_primitives::{keccak256, Address, B512};
use k256::ecdsa::VerifyingKey;

/// Convert an uncompressed 64-byte public key to its account address: the
/// low 20 bytes of the key's Keccak-256 digest.
pub fn public_key_to_address(pubkey: &B512) -> Address {
    Address::from_slice(&keccak256(pubkey)[12..])
}

/// Serialize a verifying key to its uncompressed 64-byte form, stripping
/// the 0x04 tag byte.
pub(crate) fn verifying_key_to_bytes(key: &VerifyingKey) -> B512 {
    let point = key.to_encoded_point(false);
    B512::from_slice(&point.as_bytes()[1..])
}
