use crate::{
    transaction::rlp_helpers::{address_item, expect_address, expect_bytes, expect_uint},
    transaction::signature_chain_id,
    SignableTransaction, Signed, Transaction, TxError,
};
use alloy_primitives::{hex, keccak256, Address, Bytes, U256};
use ingot_rlp::RlpItem;
use ingot_signer::Signature;

/// A legacy (pre-fee-market) transaction.
///
/// The unsigned wire form appends `(chain_id, 0, 0)` to the six field
/// values, which doubles as the EIP-155 signature preimage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxLegacy {
    /// The sender's transaction count.
    pub nonce: U256,
    /// Wei paid per unit of gas.
    pub gas_price: U256,
    /// Maximum gas the transaction may consume.
    pub gas_limit: U256,
    /// The recipient address.
    pub to: Address,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Calldata.
    pub input: Bytes,
    /// The chain the transaction is intended for.
    pub chain_id: U256,
}

impl TxLegacy {
    /// RLP items of the six transaction fields, in wire order.
    fn field_items(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from(self.nonce),
            RlpItem::from(self.gas_price),
            RlpItem::from(self.gas_limit),
            address_item(&self.to),
            RlpItem::from(self.value),
            RlpItem::Bytes(self.input.clone()),
        ]
    }

    fn encode_with_suffix(&self, v: U256, r: U256, s: U256) -> Result<Vec<u8>, TxError> {
        let mut items = self.field_items();
        items.extend([RlpItem::from(v), RlpItem::from(r), RlpItem::from(s)]);
        Ok(ingot_rlp::encode(&RlpItem::List(items))?)
    }

    /// Decode a signed transaction from its wire serialization.
    pub fn decode_signed(raw: &[u8]) -> Result<Signed<Self>, TxError> {
        let item = ingot_rlp::decode(raw)?;
        let fields = item.as_list().ok_or(TxError::Format("expected a list"))?;
        let [nonce, gas_price, gas_limit, to, value, input, v, r, s] = fields else {
            return Err(TxError::Format("expected nine fields"));
        };

        let signature = Signature::new(
            expect_uint(v, "v")?,
            expect_uint(r, "r")?,
            expect_uint(s, "s")?,
        );
        let tx = Self {
            nonce: expect_uint(nonce, "nonce")?,
            gas_price: expect_uint(gas_price, "gas price")?,
            gas_limit: expect_uint(gas_limit, "gas limit")?,
            to: expect_address(to, "to")?,
            value: expect_uint(value, "value")?,
            input: expect_bytes(input, "input")?,
            chain_id: signature_chain_id(&signature).unwrap_or_default(),
        };
        Ok(Signed::new_unchecked(tx, signature, keccak256(raw)))
    }

    /// Decode a signed transaction from hex, with or without a `0x` prefix.
    pub fn decode_signed_hex(raw: &str) -> Result<Signed<Self>, TxError> {
        let bytes =
            hex::decode(raw).map_err(|_| TxError::Format("invalid hex"))?;
        Self::decode_signed(&bytes)
    }

    /// Decode an unsigned transaction: the wire form carries the EIP-155
    /// `(chain_id, 0, 0)` stub in the signature positions.
    pub fn decode_unsigned(raw: &[u8]) -> Result<Self, TxError> {
        Self::decode_signed(raw)?.as_unsigned()
    }
}

impl Transaction for TxLegacy {
    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn gas_price(&self) -> U256 {
        self.gas_price
    }

    fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    fn to(&self) -> Address {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn input(&self) -> &Bytes {
        &self.input
    }
}

impl SignableTransaction for TxLegacy {
    fn chain_id(&self) -> U256 {
        self.chain_id
    }

    fn with_chain_id(&self, chain_id: U256) -> Self {
        Self { chain_id, ..self.clone() }
    }

    fn encode_for_signing(&self) -> Result<Vec<u8>, TxError> {
        self.encode_with_suffix(self.chain_id, U256::ZERO, U256::ZERO)
    }

    fn encode_with_signature(&self, signature: &Signature) -> Result<Vec<u8>, TxError> {
        self.encode_with_suffix(signature.v(), signature.r(), signature.s())
    }
}
