use ingot_json_rpc::SerializedRequest;
use serde_json::value::RawValue;
use tokio::sync::broadcast;

/// How many notifications a subscription channel buffers per receiver
/// before lagging consumers start losing the oldest items.
const NOTIFICATION_BUFFER: usize = 64;

/// An established subscription.
#[derive(Clone)]
pub(crate) struct ActiveSubscription {
    /// The `eth_subscribe` request that established the subscription, kept
    /// for re-issue during handover.
    pub(crate) request: SerializedRequest,

    /// The channel notifications are broadcast on.
    pub(crate) tx: broadcast::Sender<Box<RawValue>>,
}

impl std::fmt::Debug for ActiveSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSubscription")
            .field("request", &self.request)
            .field("receivers", &self.tx.receiver_count())
            .finish()
    }
}

impl ActiveSubscription {
    /// Create a subscription with a fresh notification channel.
    pub(crate) fn new(request: SerializedRequest) -> Self {
        let (tx, _rx) = broadcast::channel(NOTIFICATION_BUFFER);
        Self { request, tx }
    }

    /// Re-create a subscription around an existing channel, keeping prior
    /// receivers attached.
    pub(crate) const fn with_channel(
        request: SerializedRequest,
        tx: broadcast::Sender<Box<RawValue>>,
    ) -> Self {
        Self { request, tx }
    }

    /// Hand out a new receiver.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Box<RawValue>> {
        self.tx.subscribe()
    }

    /// Push a notification to the receivers, if any remain.
    pub(crate) fn notify(&self, notification: Box<RawValue>) {
        if self.tx.receiver_count() > 0 {
            let _ = self.tx.send(notification);
        }
    }
}
