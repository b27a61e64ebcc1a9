use crate::{
    transaction::rlp_helpers::{
        address_item, expect_address, expect_bytes, expect_optional_address, expect_uint,
        optional_address_item,
    },
    transaction::signature_chain_id,
    SignableTransaction, Signed, Transaction, TxError,
};
use alloy_primitives::{hex, keccak256, Address, Bytes, U256};
use ingot_rlp::RlpItem;
use ingot_signer::Signature;

/// A Celo transaction: the legacy field set extended with an optional fee
/// currency and fee recipient.
///
/// The two extra addresses sit between `gas_limit` and `to` in the wire
/// form; an absent address serializes as the empty byte string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxCelo {
    /// The sender's transaction count.
    pub nonce: U256,
    /// Wei paid per unit of gas.
    pub gas_price: U256,
    /// Maximum gas the transaction may consume.
    pub gas_limit: U256,
    /// The token used to pay for gas; the native token when absent.
    pub gas_currency: Option<Address>,
    /// The recipient of the gas fee; the validator when absent.
    pub gas_fee_recipient: Option<Address>,
    /// The recipient address.
    pub to: Address,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Calldata.
    pub input: Bytes,
    /// The chain the transaction is intended for.
    pub chain_id: U256,
}

impl TxCelo {
    /// RLP items of the eight transaction fields, in wire order.
    fn field_items(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from(self.nonce),
            RlpItem::from(self.gas_price),
            RlpItem::from(self.gas_limit),
            optional_address_item(&self.gas_currency),
            optional_address_item(&self.gas_fee_recipient),
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
        let [nonce, gas_price, gas_limit, gas_currency, gas_fee_recipient, to, value, input, v, r, s] =
            fields
        else {
            return Err(TxError::Format("expected eleven fields"));
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
            gas_currency: expect_optional_address(gas_currency, "gas currency")?,
            gas_fee_recipient: expect_optional_address(gas_fee_recipient, "gas fee recipient")?,
            to: expect_address(to, "to")?,
            value: expect_uint(value, "value")?,
            input: expect_bytes(input, "input")?,
            chain_id: signature_chain_id(&signature).unwrap_or_default(),
        };
        Ok(Signed::new_unchecked(tx, signature, keccak256(raw)))
    }

    /// Decode a signed transaction from hex, with or without a `0x` prefix.
    pub fn decode_signed_hex(raw: &str) -> Result<Signed<Self>, TxError> {
        let bytes = hex::decode(raw).map_err(|_| TxError::Format("invalid hex"))?;
        Self::decode_signed(&bytes)
    }

    /// Decode an unsigned transaction from the `(chain_id, 0, 0)` wire form.
    pub fn decode_unsigned(raw: &[u8]) -> Result<Self, TxError> {
        Self::decode_signed(raw)?.as_unsigned()
    }
}

impl Transaction for TxCelo {
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

impl SignableTransaction for TxCelo {
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

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ingot_signer::PrivateKeySigner;

    fn sample() -> TxCelo {
        TxCelo {
            nonce: U256::from(3u64),
            gas_price: U256::from(500_000_000u64),
            gas_limit: U256::from(90_000u64),
            gas_currency: Some(address!("765de816845861e75a25fca122bb6898b8b1282a")),
            gas_fee_recipient: None,
            to: address!("3535353535353535353535353535353535353535"),
            value: U256::from(1_000_000u64),
            input: Bytes::from(vec![0xca, 0xfe]),
            chain_id: U256::from(42220u64),
        }
    }

    #[test]
    fn field_order_places_fee_fields_before_recipient() {
        let raw = sample().encode_for_signing().unwrap();
        let decoded = ingot_rlp::decode(&raw).unwrap();
        let fields = decoded.as_list().unwrap();
        assert_eq!(fields.len(), 11);
        assert_eq!(
            fields[3].as_bytes().unwrap(),
            address!("765de816845861e75a25fca122bb6898b8b1282a").as_slice()
        );
        // absent fee recipient is the empty byte string
        assert_eq!(fields[4].as_bytes().unwrap(), &[] as &[u8]);
        assert_eq!(
            fields[5].as_bytes().unwrap(),
            address!("3535353535353535353535353535353535353535").as_slice()
        );
        assert_eq!(fields[7].as_bytes().unwrap(), &[0xca, 0xfe]);
    }

    #[test]
    fn signed_roundtrip() {
        let signer = PrivateKeySigner::random();
        let signed = sample().sign(&signer).unwrap();

        let raw = signed.serialize().unwrap();
        let decoded = TxCelo::decode_signed(&raw).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.tx(), signed.tx());
        assert_eq!(decoded.tx().gas_currency, signed.tx().gas_currency);
        assert_eq!(decoded.serialize().unwrap(), raw);
    }

    #[test]
    fn unsigned_roundtrip() {
        let tx = sample();
        let raw = tx.encode_for_signing().unwrap();
        assert_eq!(TxCelo::decode_unsigned(&raw).unwrap(), tx);
    }

    #[test]
    fn recovers_signer_with_celo_chain_id() {
        let signer = PrivateKeySigner::random();
        let signed = sample().sign(&signer).unwrap();
        let expected_v = U256::from(35 + 2 * 42220u64);
        assert!(
            signed.signature().v() == expected_v
                || signed.signature().v() == expected_v + U256::from(1u64)
        );
        assert_eq!(signed.recover_signer().unwrap(), signer.address());
    }

    #[test]
    fn both_fee_fields_roundtrip_when_present() {
        let signer = PrivateKeySigner::random();
        let tx = TxCelo {
            gas_fee_recipient: Some(address!("1111111111111111111111111111111111111111")),
            ..sample()
        };
        let signed = tx.sign(&signer).unwrap();
        let decoded = TxCelo::decode_signed(&signed.serialize().unwrap()).unwrap();
        assert_eq!(
            decoded.tx().gas_fee_recipient,
            Some(address!("1111111111111111111111111111111111111111"))
        );
    }
}
