use crate::{transaction::signature_chain_id, SignableTransaction, TxError};
use alloy_primitives::{hex, Address, B256};
use ingot_signer::Signature;

/// A transaction paired with its signature and cached transaction id.
///
/// The wrapped transaction is frozen: there is no mutable access to the
/// fields, so the cached id can never go stale.
#[derive(Clone, Debug)]
pub struct Signed<T> {
    tx: T,
    signature: Signature,
    hash: B256,
}

impl<T> Signed<T> {
    pub(crate) const fn new_unchecked(tx: T, signature: Signature, hash: B256) -> Self {
        Self { tx, signature, hash }
    }

    /// The inner transaction.
    pub const fn tx(&self) -> &T {
        &self.tx
    }

    /// The attached signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The transaction id: the Keccak-256 digest of the signed
    /// serialization, computed once at construction.
    pub const fn hash(&self) -> B256 {
        self.hash
    }
}

/// Signed transactions compare by transaction id.
impl<T> PartialEq for Signed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl<T> Eq for Signed<T> {}

impl<T: SignableTransaction> Signed<T> {
    /// The signed wire serialization.
    pub fn serialize(&self) -> Result<Vec<u8>, TxError> {
        self.tx.encode_with_signature(&self.signature)
    }

    /// The signed wire serialization as `0x`-prefixed hex.
    pub fn serialize_hex(&self) -> Result<String, TxError> {
        Ok(hex::encode_prefixed(self.serialize()?))
    }

    /// An unsigned copy, with the chain id recovered from `v`.
    pub fn as_unsigned(&self) -> Result<T, TxError> {
        let chain_id = signature_chain_id(&self.signature).ok_or(TxError::ChainIdRequired)?;
        Ok(self.tx.with_chain_id(chain_id))
    }

    /// The digest the sender signed.
    pub fn sighash(&self) -> Result<B256, TxError> {
        self.as_unsigned()?.sighash()
    }

    /// Recover the address whose key produced the signature.
    pub fn recover_signer(&self) -> Result<Address, TxError> {
        Ok(self.signature.recover_address(self.sighash()?)?)
    }
}
