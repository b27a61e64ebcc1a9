use crate::{Signed, TxError};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use ingot_signer::PrivateKeySigner;

mod legacy;
pub use legacy::TxLegacy;

mod celo;
pub use celo::TxCelo;

/// Fields shared by every transaction kind.
pub trait Transaction {
    /// The sender's transaction count.
    fn nonce(&self) -> U256;

    /// Wei paid per unit of gas.
    fn gas_price(&self) -> U256;

    /// Maximum gas the transaction may consume.
    fn gas_limit(&self) -> U256;

    /// The recipient address.
    fn to(&self) -> Address;

    /// Wei transferred to the recipient.
    fn value(&self) -> U256;

    /// Calldata.
    fn input(&self) -> &Bytes;
}

/// An unsigned transaction that can be serialized for signing and combined
/// with a signature into a [`Signed`] value.
pub trait SignableTransaction: Transaction + Clone {
    /// The chain the transaction is intended for.
    fn chain_id(&self) -> U256;

    /// A copy bound to a different chain.
    fn with_chain_id(&self, chain_id: U256) -> Self;

    /// The unsigned serialization: the transaction fields followed by
    /// `(chain_id, 0, 0)`. This is both the wire form of an unsigned
    /// transaction and the EIP-155 signature preimage.
    fn encode_for_signing(&self) -> Result<Vec<u8>, TxError>;

    /// The serialization with a signature in place of the EIP-155 stub.
    fn encode_with_signature(
        &self,
        signature: &ingot_signer::Signature,
    ) -> Result<Vec<u8>, TxError>;

    /// The digest the sender signs.
    fn sighash(&self) -> Result<B256, TxError> {
        Ok(keccak256(self.encode_for_signing()?))
    }

    /// Attach a signature, computing and caching the transaction id.
    fn into_signed(self, signature: ingot_signer::Signature) -> Result<Signed<Self>, TxError>
    where
        Self: Sized,
    {
        let encoded = self.encode_with_signature(&signature)?;
        let hash = keccak256(&encoded);
        Ok(Signed::new_unchecked(self, signature, hash))
    }

    /// Sign with a local key, yielding a fresh signed value. The unsigned
    /// value is consumed; a zero chain id is rejected to enforce EIP-155.
    fn sign(self, signer: &PrivateKeySigner) -> Result<Signed<Self>, TxError>
    where
        Self: Sized,
    {
        if self.chain_id().is_zero() {
            return Err(TxError::ChainIdRequired);
        }
        let signature = signer.sign_prehash_eip155(self.sighash()?, self.chain_id())?;
        self.into_signed(signature)
    }
}

/// The chain id a signature implies: `v` itself when the signature is the
/// unsigned `(chain_id, 0, 0)` stub, the EIP-155 derivation otherwise.
pub(crate) fn signature_chain_id(signature: &ingot_signer::Signature) -> Option<U256> {
    if signature.r().is_zero() {
        Some(signature.v())
    } else {
        signature.chain_id()
    }
}

pub(crate) mod rlp_helpers {
    use super::*;
    use ingot_rlp::RlpItem;

    pub(crate) fn address_item(address: &Address) -> RlpItem {
        RlpItem::from(address.as_slice())
    }

    pub(crate) fn optional_address_item(address: &Option<Address>) -> RlpItem {
        match address {
            Some(address) => address_item(address),
            None => RlpItem::bytes(Vec::new()),
        }
    }

    pub(crate) fn expect_uint(item: &RlpItem, what: &'static str) -> Result<U256, TxError> {
        let bytes = item.as_bytes().ok_or(TxError::Format(what))?;
        Ok(ingot_rlp::uint_from_be(bytes)?)
    }

    pub(crate) fn expect_address(item: &RlpItem, what: &'static str) -> Result<Address, TxError> {
        let bytes = item.as_bytes().ok_or(TxError::Format(what))?;
        if bytes.len() != 20 {
            return Err(TxError::Format(what));
        }
        Ok(Address::from_slice(bytes))
    }

    pub(crate) fn expect_optional_address(
        item: &RlpItem,
        what: &'static str,
    ) -> Result<Option<Address>, TxError> {
        let bytes = item.as_bytes().ok_or(TxError::Format(what))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        expect_address(item, what).map(Some)
    }

    pub(crate) fn expect_bytes(item: &RlpItem, what: &'static str) -> Result<Bytes, TxError> {
        item.as_bytes()
            .map(Bytes::copy_from_slice)
            .ok_or(TxError::Format(what))
    }
}
