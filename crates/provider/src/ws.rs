use crate::{Provider, RpcClient};
use alloy_primitives::{Address, B256, U256};
use ingot_pubsub::{PubSubConnect, PubSubFrontend, PubSubSession, RawSubscription, SessionState};
use ingot_transport::TransportResult;
use ingot_transport_ws::WsConnect;
use serde::Serialize;

/// A provider over a websocket session: the shared method surface plus
/// subscriptions and session handover.
#[derive(Debug)]
pub struct WsProvider {
    provider: Provider<PubSubFrontend>,
    session: PubSubSession,
}

impl std::ops::Deref for WsProvider {
    type Target = Provider<PubSubFrontend>;

    fn deref(&self) -> &Self::Target {
        &self.provider
    }
}

impl WsProvider {
    /// Connect to a websocket endpoint.
    pub async fn connect(connect: WsConnect) -> TransportResult<Self> {
        Self::connect_with(connect, 0).await
    }

    /// Connect with an explicit starting request id.
    pub async fn connect_with<C: PubSubConnect>(
        connector: C,
        start_id: u64,
    ) -> TransportResult<Self> {
        Self::connect_inner(connector, start_id, false).await
    }

    pub(crate) async fn connect_inner<C: PubSubConnect>(
        connector: C,
        start_id: u64,
        hosted: bool,
    ) -> TransportResult<Self> {
        let session = connector.into_service().await?;
        let client = RpcClient::with_starting_id(session.frontend(), start_id);
        Ok(Self { provider: Provider::from_client(client, hosted), session })
    }

    /// Open a new session continuing a predecessor's state: request ids
    /// resume past the prior maximum, pending requests are re-dispatched
    /// (fulfilling their original completions), and subscriptions are
    /// re-issued with their notification channels intact.
    pub async fn resume<C: PubSubConnect>(
        connector: C,
        state: SessionState,
    ) -> TransportResult<Self> {
        let this = Self::connect_inner(connector, state.next_id(), false).await?;
        this.session.adopt(state, || this.provider.client().next_raw_id())?;
        Ok(this)
    }

    /// Establish a subscription; `params` is the `eth_subscribe` parameter
    /// list.
    pub async fn subscribe<P: Serialize>(&self, params: P) -> TransportResult<RawSubscription> {
        let server_id: U256 = self.provider.client().request("eth_subscribe", params).await?;
        let rx = self
            .provider
            .client()
            .transport()
            .get_subscription(server_id)
            .await?;
        Ok(RawSubscription::new(rx, server_id))
    }

    /// Cancel subscriptions by server id.
    pub async fn unsubscribe(&self, ids: &[U256]) -> TransportResult<bool> {
        let ok: bool = self.provider.client().request("eth_unsubscribe", ids).await?;
        for id in ids {
            self.provider.client().transport().forget_subscription(*id)?;
        }
        Ok(ok)
    }

    /// Subscribe to event logs at specific addresses.
    pub async fn subscribe_to_address_events(
        &self,
        addresses: &[Address],
        topics: Option<&[B256]>,
    ) -> TransportResult<RawSubscription> {
        #[derive(Serialize)]
        struct LogParams<'a> {
            address: &'a [Address],
            #[serde(skip_serializing_if = "Option::is_none")]
            topics: Option<&'a [B256]>,
        }
        self.subscribe(("logs", LogParams { address: addresses, topics }))
            .await
    }

    /// Subscribe to new block headers.
    pub async fn subscribe_to_headers(&self) -> TransportResult<RawSubscription> {
        self.subscribe(("newHeads",)).await
    }

    /// Ask the session to stop. Idempotent.
    pub fn close(&self) {
        self.session.close();
    }

    /// Stop the session and collect its residual state for handover.
    /// Dropping the returned state fails any still-pending requests with
    /// the session-closed error.
    pub async fn into_state(self) -> Option<SessionState> {
        self.session.into_state().await
    }
}
