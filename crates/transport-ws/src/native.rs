use crate::{WsBackend, DEFAULT_KEEPALIVE};
use futures::{SinkExt, StreamExt};
use ingot_pubsub::{ConnectionHandle, PubSubConnect};
use ingot_transport::{TransportErrorKind, TransportResult};
use serde_json::value::RawValue;
use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{protocol::Message, Utf8Bytes},
    MaybeTlsStream, WebSocketStream,
};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connection details for a websocket endpoint.
#[derive(Clone, Debug)]
pub struct WsConnect {
    /// The URL to connect to, `wss://…` (or `ws://…` for local nodes).
    url: String,
    /// The keepalive interval for pings.
    keepalive_interval: Duration,
}

impl WsConnect {
    /// Create a connection configuration for a websocket endpoint.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            keepalive_interval: Duration::from_secs(DEFAULT_KEEPALIVE),
        }
    }

    /// Set the keepalive ping interval.
    ///
    /// A ping is sent when no other message has gone out within this
    /// interval. If the server does not answer with a pong before the next
    /// ping is due, the connection is considered dead and is closed.
    pub const fn with_keepalive_interval(mut self, keepalive_interval: Duration) -> Self {
        self.keepalive_interval = keepalive_interval;
        self
    }

    /// The URL string of the connection.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PubSubConnect for WsConnect {
    fn connect(&self) -> impl Future<Output = TransportResult<ConnectionHandle>> + Send {
        let this = self.clone();
        async move {
            let url: url::Url = this.url.parse().map_err(TransportErrorKind::custom)?;
            let (socket, _) = connect_async(url.as_str())
                .await
                .map_err(TransportErrorKind::custom)?;

            let (handle, interface) = ConnectionHandle::new();
            let backend = WsBackend {
                socket,
                interface,
                keepalive_interval: this.keepalive_interval,
            };
            backend.spawn();

            Ok(handle)
        }
    }
}

impl WsBackend<WsStream> {
    /// Handle a message from the server.
    pub(crate) fn handle(&mut self, msg: Message) -> Result<(), ()> {
        match msg {
            Message::Text(text) => self.handle_text(&text),
            Message::Close(frame) => {
                if let Some(frame) = frame {
                    error!(reason = %frame.reason, code = %frame.code, "received close frame");
                } else {
                    error!("WS server has gone away");
                }
                Err(())
            }
            Message::Binary(_) => {
                error!("received binary message, expected text");
                Err(())
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(()),
        }
    }

    /// Send a request body to the server.
    pub(crate) async fn send(
        &mut self,
        msg: Box<RawValue>,
    ) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        self.socket
            .send(Message::Text(Utf8Bytes::from(msg.get().to_owned())))
            .await
    }

    /// Spawn the backend task.
    pub(crate) fn spawn(mut self) {
        let fut = async move {
            let mut errored = false;
            let mut expecting_pong = false;
            let keepalive = sleep(self.keepalive_interval);
            tokio::pin!(keepalive);
            loop {
                // We bias the loop as follows
                // 1. New dispatch to the server.
                // 2. Keepalive.
                // 3. Response or notification from the server.
                // This ensures a ping goes out only when nothing else has
                // been sent within the keepalive interval, and prioritizes
                // new dispatches over responses from the server.
                tokio::select! {
                    biased;

                    inst = self.interface.recv_from_frontend() => {
                        match inst {
                            Some(msg) => {
                                // Reset the keepalive timer.
                                keepalive.as_mut().reset(tokio::time::Instant::now() + self.keepalive_interval);
                                if let Err(err) = self.send(msg).await {
                                    error!(%err, "WS connection error");
                                    errored = true;
                                    break
                                }
                            },
                            // Service has gone away, or shutdown was requested.
                            None => {
                                let _ = self.socket.close(None).await;
                                break
                            },
                        }
                    },

                    // Ping the server if nothing else was sent within the
                    // keepalive interval.
                    _ = &mut keepalive => {
                        // Still waiting on the pong from the previous ping;
                        // the connection is dead.
                        if expecting_pong {
                            error!("WS server missed a pong");
                            errored = true;
                            break
                        }
                        keepalive.as_mut().reset(tokio::time::Instant::now() + self.keepalive_interval);
                        if let Err(err) = self.socket.send(Message::Ping(Vec::new().into())).await {
                            error!(%err, "WS connection error");
                            errored = true;
                            break
                        }
                        expecting_pong = true;
                    }

                    resp = self.socket.next() => {
                        match resp {
                            Some(Ok(msg)) => {
                                if matches!(msg, Message::Pong(_)) {
                                    expecting_pong = false;
                                }
                                errored = self.handle(msg).is_err();
                                if errored { break }
                            },
                            Some(Err(err)) => {
                                error!(%err, "WS connection error");
                                errored = true;
                                break
                            },
                            None => {
                                error!("WS server has gone away");
                                errored = true;
                                break
                            },
                        }
                    }
                }
            }
            if errored {
                self.interface.close_with_error();
            }
        };
        tokio::spawn(fut);
    }
}
