//! Wire types for the RPC surface.

use alloy_primitives::{Address, Bytes, B256, U256};
use ingot_consensus::{Transaction, TxCelo, TxLegacy};
use serde::{Deserialize, Serialize};

/// A block reference: a height, or one of the node's symbolic labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockId {
    /// A specific height.
    Number(u64),
    /// The most recent block.
    Latest,
    /// The genesis block.
    Earliest,
    /// The pending block.
    Pending,
}

impl Default for BlockId {
    fn default() -> Self {
        Self::Latest
    }
}

impl From<u64> for BlockId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            // heights are 0x-prefixed minimal hex
            Self::Number(number) => serializer.serialize_str(&format!("{number:#x}")),
            Self::Latest => serializer.serialize_str("latest"),
            Self::Earliest => serializer.serialize_str("earliest"),
            Self::Pending => serializer.serialize_str("pending"),
        }
    }
}

/// An `eth_getLogs` filter.
///
/// A block hash excludes the height range; when neither is set the node's
/// defaults apply.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Restrict to logs emitted by this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Restrict by topics; `None` entries match anything in that position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Option<B256>>>,
    /// Start of the height range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockId>,
    /// End of the height range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockId>,
    /// Restrict to a single block by hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
}

impl Filter {
    /// An empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to logs emitted by `address`.
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Restrict by topics.
    pub fn topics(mut self, topics: Vec<Option<B256>>) -> Self {
        self.topics = Some(topics);
        self
    }

    /// Start of the height range.
    pub fn from_block(mut self, block: impl Into<BlockId>) -> Self {
        self.from_block = Some(block.into());
        self
    }

    /// End of the height range.
    pub fn to_block(mut self, block: impl Into<BlockId>) -> Self {
        self.to_block = Some(block.into());
        self
    }

    /// Restrict to a single block by hash, clearing any height range.
    pub fn block_hash(mut self, hash: B256) -> Self {
        self.block_hash = Some(hash);
        self.from_block = None;
        self.to_block = None;
        self
    }
}

/// An event log as returned by the node.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// The emitting contract.
    pub address: Address,
    /// The log topics; the first is the event signature digest.
    pub topics: Vec<B256>,
    /// The unindexed event data.
    pub data: Bytes,
    /// Hash of the containing block, absent while pending.
    #[serde(default)]
    pub block_hash: Option<B256>,
    /// Height of the containing block, absent while pending.
    #[serde(default)]
    pub block_number: Option<U256>,
    /// Hash of the emitting transaction.
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    /// Index of the emitting transaction in its block.
    #[serde(default)]
    pub transaction_index: Option<U256>,
    /// Index of the log in its block.
    #[serde(default)]
    pub log_index: Option<U256>,
    /// True when the log was removed by a reorg.
    #[serde(default)]
    pub removed: bool,
}

/// A transaction receipt. Absent entirely until the transaction is mined.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// The transaction id.
    pub transaction_hash: B256,
    /// Index of the transaction in its block.
    pub transaction_index: U256,
    /// Hash of the containing block.
    #[serde(default)]
    pub block_hash: Option<B256>,
    /// Height of the containing block.
    #[serde(default)]
    pub block_number: Option<U256>,
    /// The sender.
    pub from: Address,
    /// The recipient; absent for contract creation.
    #[serde(default)]
    pub to: Option<Address>,
    /// Gas used by the block up to and including this transaction.
    pub cumulative_gas_used: U256,
    /// Gas used by this transaction.
    pub gas_used: U256,
    /// The created contract's address, for creation transactions.
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// Logs emitted by this transaction.
    #[serde(default)]
    pub logs: Vec<Log>,
    /// Bloom filter over the logs.
    #[serde(default)]
    pub logs_bloom: Option<Bytes>,
    /// Execution status: 1 success, 0 revert.
    #[serde(default)]
    pub status: Option<U256>,
}

/// The transaction object passed to `eth_sendTransaction` and `eth_call`.
///
/// All quantities serialize as `0x`-prefixed minimal hex.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// The sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// The recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Gas limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    /// Gas price in wei.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    /// Value in wei.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Calldata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    /// The sender's nonce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    /// Celo: the token gas is paid in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_currency: Option<Address>,
    /// Celo: the recipient of the gas fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_fee_recipient: Option<Address>,
}

impl From<&TxLegacy> for TransactionRequest {
    fn from(tx: &TxLegacy) -> Self {
        Self {
            from: None,
            to: Some(tx.to()),
            gas: Some(tx.gas_limit()),
            gas_price: Some(tx.gas_price()),
            value: Some(tx.value()),
            data: Some(tx.input().clone()),
            nonce: Some(tx.nonce()),
            gas_currency: None,
            gas_fee_recipient: None,
        }
    }
}

impl From<&TxCelo> for TransactionRequest {
    fn from(tx: &TxCelo) -> Self {
        Self {
            gas_currency: tx.gas_currency,
            gas_fee_recipient: tx.gas_fee_recipient,
            ..Self::from(&TxLegacy {
                nonce: tx.nonce,
                gas_price: tx.gas_price,
                gas_limit: tx.gas_limit,
                to: tx.to,
                value: tx.value,
                input: tx.input.clone(),
                chain_id: tx.chain_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn block_ids_serialize_as_hex_or_labels() {
        assert_eq!(serde_json::to_string(&BlockId::Number(0)).unwrap(), r#""0x0""#);
        assert_eq!(
            serde_json::to_string(&BlockId::Number(1234)).unwrap(),
            r#""0x4d2""#
        );
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), r#""latest""#);
        assert_eq!(
            serde_json::to_string(&BlockId::Earliest).unwrap(),
            r#""earliest""#
        );
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), r#""pending""#);
    }

    #[test]
    fn filters_omit_unset_members() {
        let filter = Filter::new()
            .address(address!("abcdefabcdefabcdefabcdefabcdefabcdefabcd"))
            .from_block(BlockId::Earliest)
            .to_block(BlockId::Latest);
        assert_eq!(
            serde_json::to_string(&filter).unwrap(),
            r#"{"address":"0xabcdefabcdefabcdefabcdefabcdefabcdefabcd","fromBlock":"earliest","toBlock":"latest"}"#
        );
    }

    #[test]
    fn quantities_serialize_as_minimal_hex() {
        let request = TransactionRequest {
            value: Some(U256::from(10u64).pow(U256::from(18u64))),
            nonce: Some(U256::ZERO),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"value":"0xde0b6b3a7640000","nonce":"0x0"}"#
        );
    }

    #[test]
    fn transaction_requests_carry_celo_fields() {
        let tx = TxCelo {
            gas_currency: Some(address!("765de816845861e75a25fca122bb6898b8b1282a")),
            ..Default::default()
        };
        let request = TransactionRequest::from(&tx);
        assert_eq!(
            request.gas_currency,
            Some(address!("765de816845861e75a25fca122bb6898b8b1282a"))
        );
        assert!(serde_json::to_string(&request).unwrap().contains("gasCurrency"));
    }
}
