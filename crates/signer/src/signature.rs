use crate::{utils::public_key_to_address, SignerError};
use alloy_primitives::{Address, B256, B512, U256};
use k256::ecdsa::{RecoveryId, VerifyingKey};

/// An ECDSA signature in Ethereum's `(v, r, s)` form.
///
/// `v` carries the recovery parity, folded together with the chain id when
/// the signature is EIP-155 protected (`v = 35 + 2·chain_id + parity`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    v: U256,
    r: U256,
    s: U256,
}

impl Signature {
    /// Create a signature from its scalar components.
    pub const fn new(v: U256, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// The `v` value.
    pub const fn v(&self) -> U256 {
        self.v
    }

    /// The `r` scalar.
    pub const fn r(&self) -> U256 {
        self.r
    }

    /// The `s` scalar.
    pub const fn s(&self) -> U256 {
        self.s
    }

    /// The chain id folded into `v`, if the signature is EIP-155 protected.
    pub fn chain_id(&self) -> Option<U256> {
        let v = self.v;
        if v < U256::from(35u64) {
            return None;
        }
        let shift = if v.bit(0) { 35u64 } else { 36u64 };
        Some((v - U256::from(shift)) >> 1)
    }

    /// The recovery parity encoded in `v`.
    pub fn y_parity(&self) -> Result<u8, SignerError> {
        let v = self.v;
        if v >= U256::from(35u64) {
            let odd = (v - U256::from(35u64)).bit(0);
            return Ok(odd as u8);
        }
        if v == U256::from(27u64) || v == U256::from(28u64) {
            return Ok((v == U256::from(28u64)) as u8);
        }
        if v <= U256::from(1u64) {
            return Ok(v.bit(0) as u8);
        }
        Err(SignerError::InvalidRecoveryId)
    }

    /// Recover the uncompressed 64-byte public key (no 0x04 tag) that
    /// produced this signature over `digest`.
    pub fn recover_pubkey(&self, digest: B256) -> Result<B512, SignerError> {
        let sig = k256::ecdsa::Signature::from_scalars(
            self.r.to_be_bytes::<32>(),
            self.s.to_be_bytes::<32>(),
        )?;
        let recid =
            RecoveryId::from_byte(self.y_parity()?).ok_or(SignerError::InvalidRecoveryId)?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recid)?;
        let point = key.to_encoded_point(false);
        Ok(B512::from_slice(&point.as_bytes()[1..]))
    }

    /// Recover the signing address: the low 20 bytes of the Keccak-256
    /// digest of the recovered public key.
    pub fn recover_address(&self, digest: B256) -> Result<Address, SignerError> {
        Ok(public_key_to_address(&self.recover_pubkey(digest)?))
    }
}
