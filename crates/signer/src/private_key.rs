use crate::{
    utils::{public_key_to_address, verifying_key_to_bytes},
    Signature, SignerError,
};
use alloy_primitives::{Address, B256, B512, U256};
use k256::ecdsa::SigningKey;

/// A signer backed by a raw secp256k1 private key held in memory.
#[derive(Clone)]
pub struct PrivateKeySigner {
    credential: SigningKey,
    address: Address,
}

impl std::fmt::Debug for PrivateKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeySigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKeySigner {
    fn eq(&self, other: &Self) -> bool {
        self.credential.to_bytes() == other.credential.to_bytes()
    }
}

impl PrivateKeySigner {
    /// Create a signer from a [`SigningKey`].
    pub fn new(credential: SigningKey) -> Self {
        let address = public_key_to_address(&verifying_key_to_bytes(credential.verifying_key()));
        Self { credential, address }
    }

    /// Create a signer from a raw 32-byte scalar.
    pub fn from_bytes(bytes: &B256) -> Result<Self, SignerError> {
        Self::from_slice(bytes.as_slice())
    }

    /// Create a signer from a raw scalar byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignerError> {
        Ok(Self::new(SigningKey::from_slice(bytes)?))
    }

    /// Create a signer with a key drawn from the thread RNG.
    pub fn random() -> Self {
        Self::new(SigningKey::random(&mut rand::thread_rng()))
    }

    /// The account address derived from the public key.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The uncompressed 64-byte public key (no 0x04 tag).
    pub fn public_key(&self) -> B512 {
        verifying_key_to_bytes(self.credential.verifying_key())
    }

    /// Sign a 32-byte digest, folding `chain_id` into `v` per EIP-155:
    /// `v = 35 + 2·chain_id + parity`.
    pub fn sign_prehash_eip155(
        &self,
        digest: B256,
        chain_id: U256,
    ) -> Result<Signature, SignerError> {
        let (sig, recid) = self.credential.sign_prehash_recoverable(digest.as_slice())?;
        let v = chain_id
            .checked_mul(U256::from(2u64))
            .and_then(|doubled| doubled.checked_add(U256::from(35 + recid.to_byte() as u64)))
            .ok_or(SignerError::InvalidRecoveryId)?;
        Ok(Signature::new(
            v,
            U256::from_be_slice(&sig.r().to_bytes()),
            U256::from_be_slice(&sig.s().to_bytes()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, keccak256};

    #[test]
    fn derives_address_from_key() {
        let signer = PrivateKeySigner::from_bytes(&b256!(
            "4646464646464646464646464646464646464646464646464646464646464646"
        ))
        .unwrap();
        assert_eq!(
            signer.address(),
            address!("9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f")
        );
        assert_eq!(
            public_key_to_address(&signer.public_key()),
            signer.address()
        );
    }

    #[test]
    fn eip155_v_carries_chain_id_parity() {
        let signer = PrivateKeySigner::random();
        let digest = keccak256(b"some digest");
        for chain_id in [1u64, 44787, 62320] {
            let sig = signer
                .sign_prehash_eip155(digest, U256::from(chain_id))
                .unwrap();
            let lower = U256::from(35 + 2 * chain_id);
            let upper = U256::from(36 + 2 * chain_id);
            assert!(sig.v() == lower || sig.v() == upper);
            assert_eq!(sig.chain_id(), Some(U256::from(chain_id)));
        }
    }

    #[test]
    fn sign_then_recover_returns_signer() {
        let signer = PrivateKeySigner::random();
        let digest = keccak256(b"message to sign");
        let sig = signer
            .sign_prehash_eip155(digest, U256::from(1u64))
            .unwrap();
        assert_eq!(sig.recover_address(digest).unwrap(), signer.address());
        assert_eq!(sig.recover_pubkey(digest).unwrap(), signer.public_key());
    }
}
