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

//! Publish-subscribe JSON-RPC plumbing.
//!
//! Pubsub connections are long-lived and bidirectional: one socket carries
//! responses to issued requests interleaved with server-pushed subscription
//! notifications. The pieces here are:
//!
//! - a **backend** (e.g. the websocket task in `ingot-transport-ws`) owning
//!   the socket, reached through a [`ConnectionHandle`]/
//!   [`ConnectionInterface`] channel pair;
//! - the **service** task: routes every inbound item to exactly one
//!   destination — the completion registered under its request id, or the
//!   notification channel registered under its subscription id — and
//!   registers `eth_subscribe` results before completing the caller, so a
//!   notification can never outrun its subscription's registration;
//! - the [`PubSubFrontend`]: the cloneable handle requests and
//!   subscription instructions go through.
//!
//! A stopped session — closed explicitly, or dead because the backend
//! failed — emits a [`SessionState`]: the completions still being awaited
//! and the live notification channels. A successor session [`adopt`]s that
//! state, re-issuing the work under fresh request ids while the original
//! callers and subscription consumers stay attached. Dropping the state
//! instead fails the pending completions with the session-closed error.
//!
//! [`adopt`]: PubSubSession::adopt

mod connect;
pub use connect::PubSubConnect;

mod frontend;
pub use frontend::PubSubFrontend;

mod handle;
pub use handle::{ConnectionHandle, ConnectionInterface};

mod ix;

mod managers;

mod service;
pub use service::SessionState;

mod session;
pub use session::PubSubSession;

mod sub;
pub use sub::{RawSubscription, Subscription, SubscriptionItem};

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use ingot_json_rpc::{Id, PubSubItem, Request};
    use ingot_transport::TransportResult;
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    };

    /// A connector whose backend is driven by the test through the
    /// [`ConnectionInterface`].
    struct MockConnect {
        interface: Arc<Mutex<Option<ConnectionInterface>>>,
    }

    impl PubSubConnect for MockConnect {
        fn connect(
            &self,
        ) -> impl std::future::Future<Output = TransportResult<ConnectionHandle>> + Send
        {
            let slot = self.interface.clone();
            async move {
                let (handle, interface) = ConnectionHandle::new();
                slot.lock().unwrap().replace(interface);
                Ok(handle)
            }
        }
    }

    async fn mock_session() -> (PubSubSession, ConnectionInterface) {
        let slot = Arc::new(Mutex::new(None));
        let session = MockConnect { interface: slot.clone() }
            .into_service()
            .await
            .unwrap();
        let interface = slot.lock().unwrap().take().unwrap();
        (session, interface)
    }

    fn item(json: &str) -> PubSubItem {
        serde_json::from_str(json).unwrap()
    }

    fn request(method: &'static str, id: u64) -> ingot_json_rpc::SerializedRequest {
        Request::new(method, Id::Number(id), [id]).serialize().unwrap()
    }

    #[tokio::test]
    async fn out_of_order_responses_reach_their_completions() {
        let (session, mut interface) = mock_session().await;
        let frontend = session.frontend();

        let first = tokio::spawn(frontend.send(request("eth_getBalance", 1)));
        let second = tokio::spawn(frontend.send(request("eth_getBalance", 2)));

        // both requests hit the wire
        let _ = interface.recv_from_frontend().await.unwrap();
        let _ = interface.recv_from_frontend().await.unwrap();

        // the server answers in reverse order
        interface
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":2,"result":"0x2"}"#))
            .unwrap();
        interface
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#))
            .unwrap();

        let second = second.await.unwrap().unwrap();
        assert_eq!(second.id, Id::Number(2));
        assert_eq!(second.payload.as_success().unwrap().get(), r#""0x2""#);

        let first = first.await.unwrap().unwrap();
        assert_eq!(first.id, Id::Number(1));
        assert_eq!(first.payload.as_success().unwrap().get(), r#""0x1""#);
    }

    #[tokio::test]
    async fn error_responses_complete_their_requests() {
        let (session, mut interface) = mock_session().await;
        let frontend = session.frontend();

        let pending = tokio::spawn(frontend.send(request("eth_call", 1)));
        let _ = interface.recv_from_frontend().await.unwrap();
        interface
            .send_to_frontend(item(
                r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"revert"}}"#,
            ))
            .unwrap();

        let response = pending.await.unwrap().unwrap();
        let err = response.payload.as_failure().unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "revert");
    }

    #[tokio::test]
    async fn notifications_route_to_their_subscription() {
        let (session, mut interface) = mock_session().await;
        let frontend = session.frontend();

        let subscribe = tokio::spawn(frontend.send(request("eth_subscribe", 1)));
        let _ = interface.recv_from_frontend().await.unwrap();
        interface
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":1,"result":"0xabc123"}"#))
            .unwrap();

        let response = subscribe.await.unwrap().unwrap();
        let server_id: U256 =
            serde_json::from_str(response.payload.as_success().unwrap().get()).unwrap();

        let mut rx = frontend.get_subscription(server_id).await.unwrap();
        interface
            .send_to_frontend(item(
                r#"{"jsonrpc":"2.0","method":"eth_subscription",
                    "params":{"subscription":"0xabc123","result":{"number":"0x1"}}}"#,
            ))
            .unwrap();
        // a notification for an unknown id is dropped without disturbing
        // the known one
        interface
            .send_to_frontend(item(
                r#"{"jsonrpc":"2.0","method":"eth_subscription",
                    "params":{"subscription":"0xffffff","result":{"number":"0x2"}}}"#,
            ))
            .unwrap();

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.get(), r#"{"number":"0x1"}"#);
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn dropping_the_state_fails_pending_requests() {
        let (session, mut interface) = mock_session().await;
        let frontend = session.frontend();

        let pending = tokio::spawn(frontend.send(request("eth_getBalance", 1)));
        let _ = interface.recv_from_frontend().await.unwrap();

        let state = session.into_state().await.unwrap();
        assert_eq!(state.pending_len(), 1);
        drop(state);

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            ingot_json_rpc::RpcError::Transport(
                ingot_transport::TransportErrorKind::SessionClosed
            )
        ));
    }

    #[tokio::test]
    async fn handover_preserves_pending_requests_and_subscriptions() {
        let (session_a, mut iface_a) = mock_session().await;
        let frontend_a = session_a.frontend();

        // establish subscription S1 on session A
        let subscribe = tokio::spawn(frontend_a.send(request("eth_subscribe", 1)));
        let _ = iface_a.recv_from_frontend().await.unwrap();
        iface_a
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":1,"result":"0xabc123"}"#))
            .unwrap();
        let response = subscribe.await.unwrap().unwrap();
        let server_id: U256 =
            serde_json::from_str(response.payload.as_success().unwrap().get()).unwrap();
        let mut rx = frontend_a.get_subscription(server_id).await.unwrap();

        iface_a
            .send_to_frontend(item(
                r#"{"jsonrpc":"2.0","method":"eth_subscription",
                    "params":{"subscription":"0xabc123","result":"a-1"}}"#,
            ))
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().get(), r#""a-1""#);

        // request R1 goes unanswered by session A
        let r1 = tokio::spawn(frontend_a.send(request("eth_getBalance", 2)));
        let _ = iface_a.recv_from_frontend().await.unwrap();

        // close A and hand its state to B
        let state = session_a.into_state().await.unwrap();
        assert_eq!(state.next_id(), 3);
        assert_eq!(state.pending_len(), 1);
        assert_eq!(state.subscription_len(), 1);

        let (session_b, mut iface_b) = mock_session().await;
        let ids = AtomicU64::new(state.next_id());
        session_b
            .adopt(state, || ids.fetch_add(1, Ordering::Relaxed))
            .unwrap();

        // B re-dispatches R1 under a fresh id, then re-issues the
        // subscription
        let body = iface_b.recv_from_frontend().await.unwrap();
        assert!(body.get().contains(r#""id":3"#), "{body}");
        assert!(body.get().contains("eth_getBalance"), "{body}");
        let body = iface_b.recv_from_frontend().await.unwrap();
        assert!(body.get().contains(r#""id":4"#), "{body}");
        assert!(body.get().contains("eth_subscribe"), "{body}");

        // R1's original completion resolves through B
        iface_b
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":3,"result":"0x64"}"#))
            .unwrap();
        let response = r1.await.unwrap().unwrap();
        assert_eq!(response.payload.as_success().unwrap().get(), r#""0x64""#);

        // the subscription resumes under a fresh server id, feeding the
        // receiver taken out of session A, with no duplicates
        iface_b
            .send_to_frontend(item(r#"{"jsonrpc":"2.0","id":4,"result":"0xdef456"}"#))
            .unwrap();
        iface_b
            .send_to_frontend(item(
                r#"{"jsonrpc":"2.0","method":"eth_subscription",
                    "params":{"subscription":"0xdef456","result":"b-1"}}"#,
            ))
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().get(), r#""b-1""#);
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let (session, _interface) = mock_session().await;
        let frontend = session.frontend();
        session.close();
        session.close();
        frontend.close();
        assert!(session.into_state().await.is_some());
    }
}
