use crate::ErrorPayload;

/// An RPC error, layered over a transport error type `E`.
#[derive(Debug, thiserror::Error)]
pub enum RpcError<E> {
    /// The server returned an error response.
    #[error(transparent)]
    ErrorResp(ErrorPayload),

    /// JSON serialization of a request failed.
    #[error("serialization error: {0}")]
    SerError(#[source] serde_json::Error),

    /// JSON deserialization of a response failed.
    #[error("deserialization error: {err}\n{text}")]
    DeserError {
        /// The underlying serde_json error.
        #[source]
        err: serde_json::Error,
        /// The text that failed to deserialize.
        text: String,
    },

    /// An error at the transport layer.
    #[error(transparent)]
    Transport(#[from] E),
}

impl<E> RpcError<E> {
    /// Instantiate from a serialization failure.
    pub const fn ser_err(err: serde_json::Error) -> Self {
        Self::SerError(err)
    }

    /// Instantiate from a deserialization failure, keeping the offending
    /// text. When the text is itself a JSON-RPC error object, surface it as
    /// an error response instead.
    pub fn deser_err(err: serde_json::Error, text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if let Ok(payload) = serde_json::from_str::<ErrorPayload>(text) {
            return Self::ErrorResp(payload);
        }
        Self::DeserError { err, text: text.to_owned() }
    }

    /// Whether this is an error response from the server.
    pub const fn is_error_resp(&self) -> bool {
        matches!(self, Self::ErrorResp(_))
    }

    /// Whether this is a transport error.
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The server error payload, if this is an error response.
    pub const fn as_error_resp(&self) -> Option<&ErrorPayload> {
        match self {
            Self::ErrorResp(payload) => Some(payload),
            _ => None,
        }
    }
}

/// The result type of RPC operations.
pub type RpcResult<T, E> = Result<T, RpcError<E>>;
