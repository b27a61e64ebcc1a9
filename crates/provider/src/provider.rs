use crate::{BlockId, Filter, Log, RpcClient, TransactionReceipt, TransactionRequest};
use alloy_primitives::{hex, Address, Bytes, B256, U256};
use ingot_consensus::{SignableTransaction, Signed, Transaction};
use ingot_transport::{Transport, TransportErrorKind, TransportResult};

/// The sender used to preflight transactions whose sender is unknown.
pub const DUMMY_SENDER: Address = Address::repeat_byte(0x11);

/// The high-level method surface, shared by the HTTP and websocket
/// clients.
///
/// All quantities cross the wire as `0x`-prefixed minimal hex; block
/// references accept a height or one of the symbolic labels.
#[derive(Debug)]
pub struct Provider<T> {
    client: RpcClient<T>,
    hosted: bool,
}

impl<T: Transport> Provider<T> {
    /// Create a provider over a transport.
    pub const fn new(transport: T) -> Self {
        Self { client: RpcClient::new(transport), hosted: false }
    }

    pub(crate) const fn from_client(client: RpcClient<T>, hosted: bool) -> Self {
        Self { client, hosted }
    }

    /// The underlying client.
    pub const fn client(&self) -> &RpcClient<T> {
        &self.client
    }

    /// Whether this provider talks to a hosted endpoint that cannot hold
    /// keys (and therefore rejects unsigned submission).
    pub const fn is_hosted(&self) -> bool {
        self.hosted
    }

    /// The wei balance of an account at a block.
    pub async fn get_balance(&self, address: Address, block: BlockId) -> TransportResult<U256> {
        self.client.request("eth_getBalance", (address, block)).await
    }

    /// The account's next usable nonce, counting pending transactions.
    pub async fn get_nonce(&self, address: Address) -> TransportResult<u64> {
        let count: U256 = self
            .client
            .request("eth_getTransactionCount", (address, BlockId::Pending))
            .await?;
        Ok(count.saturating_to())
    }

    /// Logs matching a filter.
    pub async fn get_logs(&self, filter: &Filter) -> TransportResult<Vec<Log>> {
        self.client.request("eth_getLogs", (filter,)).await
    }

    /// All past logs of one contract, optionally restricted by topics.
    pub async fn get_past_contract_logs(
        &self,
        address: Address,
        topics: Option<Vec<Option<B256>>>,
    ) -> TransportResult<Vec<Log>> {
        let mut filter = Filter::new()
            .address(address)
            .from_block(BlockId::Earliest)
            .to_block(BlockId::Latest);
        filter.topics = topics;
        self.get_logs(&filter).await
    }

    /// Broadcast a raw signed transaction, returning its id.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256> {
        self.client
            .request("eth_sendRawTransaction", (hex::encode_prefixed(raw),))
            .await
    }

    /// The receipt of a transaction; `None` until it is mined.
    pub async fn get_transaction_receipt(
        &self,
        tx_id: B256,
    ) -> TransportResult<Option<TransactionReceipt>> {
        self.client
            .request("eth_getTransactionReceipt", (tx_id,))
            .await
    }

    /// Dry-run a transaction via `eth_call` at the latest block, returning
    /// the raw return data. Without a sender, calls go out from
    /// [`DUMMY_SENDER`].
    pub async fn preflight_transaction<Tx: Transaction>(
        &self,
        tx: &Tx,
        sender: Option<Address>,
    ) -> TransportResult<Bytes> {
        let call = TransactionRequest {
            from: Some(sender.unwrap_or(DUMMY_SENDER)),
            to: Some(tx.to()),
            data: Some(tx.input().clone()),
            ..Default::default()
        };
        self.client.request("eth_call", (call, BlockId::Latest)).await
    }

    /// Dry-run a signed transaction from its recovered sender.
    pub async fn preflight_signed<Tx: SignableTransaction>(
        &self,
        tx: &Signed<Tx>,
    ) -> TransportResult<Bytes> {
        let sender = tx.recover_signer().map_err(TransportErrorKind::custom)?;
        self.preflight_transaction(tx.tx(), Some(sender)).await
    }

    /// Submit an unsigned transaction for the node to sign and broadcast.
    ///
    /// Hosted endpoints hold no keys; submission through one is rejected
    /// locally.
    pub async fn send_transaction(
        &self,
        from: Address,
        tx: impl Into<TransactionRequest>,
    ) -> TransportResult<B256> {
        if self.hosted {
            return Err(TransportErrorKind::custom_str(
                "hosted endpoints cannot sign transactions",
            ));
        }
        let mut request = tx.into();
        request.from = Some(from);
        self.client.request("eth_sendTransaction", (request,)).await
    }
}
