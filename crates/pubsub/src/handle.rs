use ingot_json_rpc::PubSubItem;
use serde_json::value::RawValue;
use tokio::sync::{mpsc, oneshot};

/// A handle to a backend, owned by the service. Communicates with the
/// backend's [`ConnectionInterface`].
///
/// The backend shuts down when the handle is dropped or [`shutdown`] is
/// called.
///
/// [`shutdown`]: ConnectionHandle::shutdown
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Outbound channel to the server.
    pub(crate) to_socket: mpsc::UnboundedSender<Box<RawValue>>,

    /// Inbound channel of parsed items from the server.
    pub(crate) from_socket: mpsc::UnboundedReceiver<PubSubItem>,

    /// Notification from the backend of a terminal error.
    pub(crate) error: oneshot::Receiver<()>,

    /// Notifies the backend of intentional shutdown.
    shutdown: oneshot::Sender<()>,
}

impl ConnectionHandle {
    /// Create a connected handle/interface pair.
    pub fn new() -> (Self, ConnectionInterface) {
        let (to_socket, from_frontend) = mpsc::unbounded_channel();
        let (to_frontend, from_socket) = mpsc::unbounded_channel();
        let (error_tx, error_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle =
            Self { to_socket, from_socket, error: error_rx, shutdown: shutdown_tx };
        let interface = ConnectionInterface {
            from_frontend,
            to_frontend,
            error: error_tx,
            shutdown: shutdown_rx,
            dead: false,
        };
        (handle, interface)
    }

    /// Shut down the backend.
    pub fn shutdown(self) {
        let _ = self.shutdown.send(());
    }
}

/// The reciprocal of [`ConnectionHandle`], owned by the backend task.
#[derive(Debug)]
pub struct ConnectionInterface {
    /// Inbound channel of serialized requests from the service.
    from_frontend: mpsc::UnboundedReceiver<Box<RawValue>>,

    /// Outbound channel of parsed items to the service.
    to_frontend: mpsc::UnboundedSender<PubSubItem>,

    /// Notifies the service of a terminal error.
    error: oneshot::Sender<()>,

    /// Resolves when the service requests shutdown.
    shutdown: oneshot::Receiver<()>,

    /// True once the shutdown signal has resolved.
    dead: bool,
}

impl ConnectionInterface {
    /// Send a parsed item to the service.
    pub fn send_to_frontend(
        &self,
        item: PubSubItem,
    ) -> Result<(), mpsc::error::SendError<PubSubItem>> {
        self.to_frontend.send(item)
    }

    /// Receive the next outbound request from the service. Returns `None`
    /// permanently once shutdown has been requested or the service is gone.
    pub async fn recv_from_frontend(&mut self) -> Option<Box<RawValue>> {
        if self.dead {
            return None;
        }
        tokio::select! {
            _ = &mut self.shutdown => {
                self.dead = true;
                None
            }
            msg = self.from_frontend.recv() => msg,
        }
    }

    /// Close the interface, notifying the service of a terminal error.
    pub fn close_with_error(self) {
        let _ = self.error.send(());
    }
}
