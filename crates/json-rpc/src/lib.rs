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

//! Data types for the JSON-RPC 2.0 protocol.
//!
//! This crate defines requests, responses, subscription notifications and
//! the layered error type shared by the transports and clients. It does not
//! send or receive anything itself.
//!
//! Request ids exchanged with a node are positive integers; numeric fields
//! are `0x`-prefixed hex on the wire and are left raw ([`RawValue`]) until a
//! caller asks for a concrete type.
//!
//! [`RawValue`]: serde_json::value::RawValue

mod common;
pub use common::Id;

mod request;
pub use request::{Request, RequestMeta, SerializedRequest};

mod response;
pub use response::{ErrorPayload, Response, ResponsePayload};

mod notification;
pub use notification::{EthNotification, PubSubItem};

mod error;
pub use error::{RpcError, RpcResult};
