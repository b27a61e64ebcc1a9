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

//! Websocket transport backend.
//!
//! [`WsConnect`] holds the connection details; connecting spawns a
//! [`WsBackend`] task that owns the socket, forwards outbound requests,
//! parses inbound text frames into pubsub items, and keeps the connection
//! alive with periodic pings.

#[macro_use]
extern crate tracing;

use ingot_pubsub::ConnectionInterface;

mod native;
pub use native::WsConnect;

/// Keepalive ping interval, in seconds.
pub const DEFAULT_KEEPALIVE: u64 = 15;

/// An ongoing websocket connection to a backend.
///
/// Users should never instantiate a backend directly; use
/// [`PubSubConnect`] on a [`WsConnect`] to get a running session.
///
/// [`PubSubConnect`]: ingot_pubsub::PubSubConnect
#[derive(Debug)]
pub struct WsBackend<T> {
    /// The websocket connection.
    pub(crate) socket: T,

    /// The interface to the service.
    pub(crate) interface: ConnectionInterface,

    /// How long the connection may sit idle before a ping is sent.
    pub(crate) keepalive_interval: std::time::Duration,
}

impl<T> WsBackend<T> {
    /// Handle inbound text from the websocket: parse and forward to the
    /// service.
    pub(crate) fn handle_text(&mut self, text: &str) -> Result<(), ()> {
        trace!(%text, "received message from websocket");

        match serde_json::from_str(text) {
            Ok(item) => {
                if let Err(err) = self.interface.send_to_frontend(item) {
                    error!(item = ?err.0, "failed to send deserialized item to handler");
                    return Err(());
                }
            }
            Err(err) => {
                error!(%err, "failed to deserialize message");
                return Err(());
            }
        }
        Ok(())
    }
}
