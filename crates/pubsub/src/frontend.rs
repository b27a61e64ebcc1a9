use crate::{ix::PubSubInstruction, managers::InFlight};
use alloy_primitives::U256;
use ingot_json_rpc::{Response, SerializedRequest};
use ingot_transport::{Transport, TransportErrorKind, TransportFut, TransportResult};
use serde_json::value::RawValue;
use std::future::Future;
use tokio::sync::{broadcast, mpsc, oneshot};

/// A handle to a running pubsub service, used to issue requests and manage
/// subscriptions. Cheap to clone; all clones feed the same session.
#[derive(Clone, Debug)]
pub struct PubSubFrontend {
    tx: mpsc::UnboundedSender<PubSubInstruction>,
}

impl PubSubFrontend {
    pub(crate) const fn new(tx: mpsc::UnboundedSender<PubSubInstruction>) -> Self {
        Self { tx }
    }

    /// Issue a request, resolving when the service routes its response
    /// back. Fails with the session-closed error if the session stops (and
    /// its state is dropped) first.
    pub fn send(
        &self,
        request: SerializedRequest,
    ) -> impl Future<Output = TransportResult<Response>> + Send + 'static {
        let tx = self.tx.clone();
        async move {
            let (in_flight, rx) = InFlight::new(request);
            tx.send(PubSubInstruction::Request(in_flight))
                .map_err(|_| TransportErrorKind::backend_gone())?;
            rx.await.map_err(|_| TransportErrorKind::session_closed())?
        }
    }

    /// Hand a pre-built in-flight record to the service. Used by session
    /// adoption, where the completion belongs to a predecessor session.
    pub(crate) fn send_in_flight(&self, in_flight: InFlight) -> TransportResult<()> {
        self.tx
            .send(PubSubInstruction::Request(in_flight))
            .map_err(|_| TransportErrorKind::backend_gone())
    }

    /// Fetch a notification receiver for an established subscription.
    pub fn get_subscription(
        &self,
        id: U256,
    ) -> impl Future<Output = TransportResult<broadcast::Receiver<Box<RawValue>>>> + Send + 'static
    {
        let tx = self.tx.clone();
        async move {
            let (sender, rx) = oneshot::channel();
            tx.send(PubSubInstruction::GetSub(id, sender))
                .map_err(|_| TransportErrorKind::backend_gone())?;
            rx.await
                .map_err(|_| TransportErrorKind::custom_str("subscription not found"))
        }
    }

    /// Drop a subscription from the session table. The caller is expected
    /// to have issued `eth_unsubscribe` on the wire already.
    pub fn forget_subscription(&self, id: U256) -> TransportResult<()> {
        self.tx
            .send(PubSubInstruction::RemoveSub(id))
            .map_err(|_| TransportErrorKind::backend_gone())
    }

    /// Ask the service to stop. Idempotent; later calls are no-ops.
    pub fn close(&self) {
        let _ = self.tx.send(PubSubInstruction::Shutdown);
    }

    /// Whether the service has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Transport for PubSubFrontend {
    fn request(&self, request: SerializedRequest) -> TransportFut<'static> {
        Box::pin(self.send(request))
    }
}
