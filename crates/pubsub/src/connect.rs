use crate::{handle::ConnectionHandle, service::PubSubService, PubSubSession};
use ingot_transport::TransportResult;
use std::future::Future;

/// Configuration objects that can establish a backend connection.
///
/// Implementers own the connection details. [`connect`] MUST spawn a
/// long-lived backend task around a [`ConnectionInterface`] and return the
/// corresponding handle; users should always go through [`into_service`] to
/// get a running session.
///
/// [`connect`]: PubSubConnect::connect
/// [`into_service`]: PubSubConnect::into_service
/// [`ConnectionInterface`]: crate::ConnectionInterface
pub trait PubSubConnect: Sized + Send + Sync + 'static {
    /// Spawn the backend task, returning a handle to it.
    fn connect(&self) -> impl Future<Output = TransportResult<ConnectionHandle>> + Send;

    /// Connect and wrap the backend in a running service task.
    fn into_service(self) -> impl Future<Output = TransportResult<PubSubSession>> + Send {
        PubSubService::connect(self)
    }
}
