use ingot_json_rpc::{Response, SerializedRequest};
use ingot_transport::TransportResult;
use serde_json::value::RawValue;
use tokio::sync::{broadcast, oneshot};

/// An issued request awaiting its response.
///
/// Carries the serialized request (for re-dispatch during handover) and the
/// single-shot completion the caller is awaiting. A subscription re-issue
/// additionally carries the broadcast channel its notifications must keep
/// flowing into.
pub(crate) struct InFlight {
    /// The request that was sent.
    pub(crate) request: SerializedRequest,

    /// For `eth_subscribe` re-issues: the existing notification channel to
    /// register under the fresh server id.
    pub(crate) channel: Option<broadcast::Sender<Box<RawValue>>>,

    /// The channel the caller awaits the response on.
    pub(crate) tx: oneshot::Sender<TransportResult<Response>>,
}

impl std::fmt::Debug for InFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlight")
            .field("request", &self.request)
            .field("channel", &self.channel.is_some())
            .field("tx_closed", &self.tx.is_closed())
            .finish()
    }
}

impl InFlight {
    /// Create an in-flight request and the receiver for its completion.
    pub(crate) fn new(
        request: SerializedRequest,
    ) -> (Self, oneshot::Receiver<TransportResult<Response>>) {
        let (tx, rx) = oneshot::channel();
        (Self { request, channel: None, tx }, rx)
    }

    /// Create an in-flight subscription re-issue bound to an existing
    /// notification channel.
    pub(crate) fn with_channel(
        request: SerializedRequest,
        channel: broadcast::Sender<Box<RawValue>>,
    ) -> (Self, oneshot::Receiver<TransportResult<Response>>) {
        let (tx, rx) = oneshot::channel();
        (Self { request, channel: Some(channel), tx }, rx)
    }
}
