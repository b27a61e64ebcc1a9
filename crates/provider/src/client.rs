use ingot_json_rpc::{Id, Request, RpcError};
use ingot_transport::{Transport, TransportResult};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A JSON-RPC client: a transport plus a monotonic request-id counter.
///
/// Ids are allocated sequentially and never reused within a session. The
/// counter can be seeded at construction to continue a predecessor
/// session's id space.
#[derive(Debug)]
pub struct RpcClient<T> {
    transport: T,
    id: AtomicU64,
}

impl<T> RpcClient<T> {
    /// Create a client with ids starting at 0.
    pub const fn new(transport: T) -> Self {
        Self::with_starting_id(transport, 0)
    }

    /// Create a client whose first allocated id is `start_id`.
    pub const fn with_starting_id(transport: T, start_id: u64) -> Self {
        Self { transport, id: AtomicU64::new(start_id) }
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Reserve the next request id.
    pub fn next_raw_id(&self) -> u64 {
        self.id.fetch_add(1, Ordering::Relaxed)
    }

    /// Reserve the next request id as an [`Id`].
    pub fn next_id(&self) -> Id {
        Id::Number(self.next_raw_id())
    }

    /// Build a request with a freshly reserved id.
    pub fn make_request<Params: Serialize>(
        &self,
        method: &'static str,
        params: Params,
    ) -> Request<Params> {
        Request::new(method, self.next_id(), params)
    }
}

impl<T: Transport> RpcClient<T> {
    /// Issue a request and deserialize its result.
    ///
    /// A server error response surfaces as [`RpcError::ErrorResp`].
    pub async fn request<Params, Resp>(
        &self,
        method: &'static str,
        params: Params,
    ) -> TransportResult<Resp>
    where
        Params: Serialize,
        Resp: DeserializeOwned,
    {
        let request = self
            .make_request(method, params)
            .serialize()
            .map_err(RpcError::ser_err)?;
        tracing::debug!(method, id = ?request.id(), "dispatching request");

        let response = self.transport.request(request).await?;
        match response.payload {
            ingot_json_rpc::ResponsePayload::Success(raw) => serde_json::from_str(raw.get())
                .map_err(|err| RpcError::deser_err(err, raw.get())),
            ingot_json_rpc::ResponsePayload::Failure(payload) => {
                Err(RpcError::ErrorResp(payload))
            }
        }
    }
}
