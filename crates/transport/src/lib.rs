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

//! Transport abstraction for the RPC clients.
//!
//! A [`Transport`] delivers one serialized request and resolves with the
//! matching [`Response`]. The HTTP transport performs a POST per call; the
//! pubsub frontend routes through a demultiplexed connection. Both surface
//! failures as [`TransportError`]s.

use ingot_json_rpc::{Response, SerializedRequest};
use std::{future::Future, pin::Pin};

mod error;
pub use error::{HttpError, TransportError, TransportErrorKind, TransportResult};

pub mod mock;

/// Future of a transport request.
pub type TransportFut<'a> =
    Pin<Box<dyn Future<Output = TransportResult<Response>> + Send + 'a>>;

/// An object capable of delivering JSON-RPC requests and resolving their
/// responses.
pub trait Transport: Send + Sync {
    /// Deliver a request, resolving once the response arrives.
    fn request(&self, request: SerializedRequest) -> TransportFut<'static>;
}
