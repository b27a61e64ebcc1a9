use ingot_json_rpc::{RpcError, RpcResult};
use std::error::Error as StdError;

/// A transport error is an [`RpcError`] containing a [`TransportErrorKind`].
pub type TransportError = RpcError<TransportErrorKind>;

/// The result type of transport operations.
pub type TransportResult<T> = RpcResult<T, TransportErrorKind>;

/// Transport-layer failure modes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportErrorKind {
    /// The backend connection task has stopped.
    #[error("backend connection task has stopped")]
    BackendGone,

    /// The session was closed; still-pending operations resolve with this.
    #[error("session closed")]
    SessionClosed,

    /// Subscriptions were requested on a transport without a pubsub side.
    #[error("subscriptions are not available on this transport")]
    PubsubUnavailable,

    /// Non-2xx HTTP response, with status and body.
    #[error(transparent)]
    HttpError(#[from] HttpError),

    /// The peer violated the protocol (malformed or undeliverable frame).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Custom error.
    #[error("{0}")]
    Custom(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl TransportErrorKind {
    /// Instantiate a new `TransportError` from a custom error.
    pub fn custom(err: impl StdError + Send + Sync + 'static) -> TransportError {
        RpcError::Transport(Self::Custom(Box::new(err)))
    }

    /// Instantiate a new `TransportError` from a custom error message.
    pub fn custom_str(err: &str) -> TransportError {
        RpcError::Transport(Self::Custom(err.into()))
    }

    /// Instantiate a new `TransportError::BackendGone`.
    pub const fn backend_gone() -> TransportError {
        RpcError::Transport(Self::BackendGone)
    }

    /// Instantiate a new `TransportError::SessionClosed`.
    pub const fn session_closed() -> TransportError {
        RpcError::Transport(Self::SessionClosed)
    }

    /// Instantiate a new `TransportError::PubsubUnavailable`.
    pub const fn pubsub_unavailable() -> TransportError {
        RpcError::Transport(Self::PubsubUnavailable)
    }

    /// Instantiate a new `TransportError::HttpError`.
    pub const fn http_error(status: u16, body: String) -> TransportError {
        RpcError::Transport(Self::HttpError(HttpError { status, body }))
    }

    /// Instantiate a new `TransportError::Protocol`.
    pub fn protocol(msg: impl Into<String>) -> TransportError {
        RpcError::Transport(Self::Protocol(msg.into()))
    }
}

/// A non-2xx HTTP status, with the response body for context.
#[derive(Debug, thiserror::Error)]
#[error("HTTP error {status} with body: {body}")]
pub struct HttpError {
    /// The response status code.
    pub status: u16,
    /// The response body.
    pub body: String,
}
