use alloy_primitives::U256;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tokio::sync::broadcast;

/// A feed of raw notifications from the server, identified by its server
/// subscription id.
///
/// Notifications delivered by the node arrive in order; a consumer that
/// falls more than the channel depth behind loses the oldest items (a
/// [`RecvError::Lagged`] marks the gap).
///
/// [`RecvError::Lagged`]: broadcast::error::RecvError::Lagged
#[derive(Debug)]
pub struct RawSubscription {
    pub(crate) rx: broadcast::Receiver<Box<RawValue>>,
    pub(crate) id: U256,
}

impl RawSubscription {
    /// Wrap a notification receiver and its server id.
    pub const fn new(rx: broadcast::Receiver<Box<RawValue>>, id: U256) -> Self {
        Self { rx, id }
    }

    /// The server-assigned subscription id.
    pub const fn server_id(&self) -> U256 {
        self.id
    }

    /// Await the next notification.
    pub async fn recv(&mut self) -> Result<Box<RawValue>, broadcast::error::RecvError> {
        self.rx.recv().await
    }

    /// Receive a notification without awaiting, if one is buffered.
    pub fn try_recv(&mut self) -> Result<Box<RawValue>, broadcast::error::TryRecvError> {
        self.rx.try_recv()
    }

    /// Whether the buffer is currently empty.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Number of buffered notifications not yet received.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// A second feed over the same subscription, starting at the tail.
    pub fn resubscribe(&self) -> Self {
        Self { rx: self.rx.resubscribe(), id: self.id }
    }
}

/// An item from a typed [`Subscription`]: the expected type, or the raw
/// payload when it deserializes as something else.
#[derive(Debug)]
pub enum SubscriptionItem<T> {
    /// The expected item.
    Item(T),
    /// A payload of some other shape.
    Other(Box<RawValue>),
}

impl<T: DeserializeOwned> From<Box<RawValue>> for SubscriptionItem<T> {
    fn from(value: Box<RawValue>) -> Self {
        match serde_json::from_str(value.get()) {
            Ok(item) => Self::Item(item),
            Err(_) => Self::Other(value),
        }
    }
}

/// A typed wrapper over [`RawSubscription`], deserializing each
/// notification into `T`.
#[derive(Debug)]
pub struct Subscription<T> {
    inner: RawSubscription,
    _pd: std::marker::PhantomData<T>,
}

impl<T> From<RawSubscription> for Subscription<T> {
    fn from(inner: RawSubscription) -> Self {
        Self { inner, _pd: std::marker::PhantomData }
    }
}

impl<T> Subscription<T> {
    /// The server-assigned subscription id.
    pub const fn server_id(&self) -> U256 {
        self.inner.server_id()
    }

    /// The untyped subscription.
    pub const fn inner(&self) -> &RawSubscription {
        &self.inner
    }
}

impl<T: DeserializeOwned> Subscription<T> {
    /// Await the next notification, deserializing it into `T`.
    pub async fn recv(
        &mut self,
    ) -> Result<SubscriptionItem<T>, broadcast::error::RecvError> {
        self.inner.recv().await.map(Into::into)
    }
}
