#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]

//! HTTP transport: one JSON POST per request.
//!
//! Each call is standalone; there is no connection state to resume. A
//! non-2xx status fails with the HTTP error kind, carrying the status code
//! and body. A 2xx body that is not a JSON-RPC response is surfaced
//! verbatim in the deserialization error, preserving whatever the node
//! actually said.

use ingot_json_rpc::{RpcError, SerializedRequest};
use ingot_transport::{Transport, TransportErrorKind, TransportFut};
use tracing::{debug, trace};
use url::Url;

/// Rexported from [`reqwest`](::reqwest).
pub use reqwest::Client;

/// An HTTP transport: a client plus the endpoint URL.
#[derive(Clone, Debug)]
pub struct Http<T> {
    client: T,
    url: Url,
}

impl<T> Http<T> {
    /// Create a transport from a client and an endpoint URL.
    pub const fn with_client(client: T, url: Url) -> Self {
        Self { client, url }
    }

    /// The endpoint URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl Http<Client> {
    /// Create a transport with a default client.
    pub fn new(url: Url) -> Self {
        Self { client: Client::new(), url }
    }

    fn request_reqwest(&self, request: SerializedRequest) -> TransportFut<'static> {
        let this = self.clone();
        Box::pin(async move {
            let resp = this
                .client
                .post(this.url)
                .json(&request)
                .send()
                .await
                .map_err(TransportErrorKind::custom)?;
            let status = resp.status();

            debug!(%status, "received response from server");

            // Read the body regardless of the status code, so an error
            // body makes it into the error.
            let body = resp.bytes().await.map_err(TransportErrorKind::custom)?;

            debug!(bytes = body.len(), "retrieved response body. Use `trace` for full body");
            trace!(body = %String::from_utf8_lossy(&body), "response body");

            if !status.is_success() {
                return Err(TransportErrorKind::http_error(
                    status.as_u16(),
                    String::from_utf8_lossy(&body).into_owned(),
                ));
            }

            // Bodies with neither `result` nor `error` fail to parse; the
            // error carries the body text for transparency.
            serde_json::from_slice(&body)
                .map_err(|err| RpcError::deser_err(err, String::from_utf8_lossy(&body)))
        })
    }
}

impl Transport for Http<Client> {
    fn request(&self, request: SerializedRequest) -> TransportFut<'static> {
        self.request_reqwest(request)
    }
}
