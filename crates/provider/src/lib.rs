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

//! High-level RPC clients for Ethereum-family nodes.
//!
//! [`Provider`] exposes the method surface — balances, nonces, logs,
//! receipts, broadcasting, preflighting — over any transport. The HTTP
//! flavor does one POST per call; [`WsProvider`] multiplexes everything
//! over one websocket session and adds subscriptions and session handover.
//! [`Infura`] builds hosted endpoints from a network label and project key.

use ingot_transport_http::{Client, Http};
use url::Url;

mod client;
pub use client::RpcClient;

mod types;
pub use types::{BlockId, Filter, Log, TransactionReceipt, TransactionRequest};

#[allow(clippy::module_inception)]
mod provider;
pub use provider::{Provider, DUMMY_SENDER};

mod ws;
pub use ws::WsProvider;

mod hosted;
pub use hosted::Infura;

pub use ingot_pubsub::{RawSubscription, SessionState, Subscription, SubscriptionItem};
pub use ingot_transport_ws::WsConnect;

/// A provider over the HTTP transport.
pub type HttpProvider = Provider<Http<Client>>;

impl HttpProvider {
    /// Create a provider for an `https://…` endpoint.
    pub fn connect_http(url: Url) -> Self {
        Self::new(Http::new(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, Bytes, U256};
    use ingot_consensus::TxLegacy;
    use ingot_json_rpc::{ErrorPayload, Id, RpcError};
    use ingot_transport::mock::{Asserter, MockTransport};

    fn mock_provider() -> (Provider<MockTransport>, Asserter) {
        let asserter = Asserter::new();
        let provider = Provider::new(MockTransport::new(asserter.clone()));
        (provider, asserter)
    }

    #[tokio::test]
    async fn get_balance_coerces_params() {
        let (provider, asserter) = mock_provider();
        asserter.push_success(&"0x10");

        let balance = provider
            .get_balance(
                address!("abcdefabcdefabcdefabcdefabcdefabcdefabcd"),
                BlockId::Number(100),
            )
            .await
            .unwrap();
        assert_eq!(balance, U256::from(16u64));

        let requests = asserter.requests();
        assert_eq!(requests[0].method(), "eth_getBalance");
        assert_eq!(
            requests[0].params().get(),
            r#"["0xabcdefabcdefabcdefabcdefabcdefabcdefabcd","0x64"]"#
        );
    }

    #[tokio::test]
    async fn get_nonce_counts_pending() {
        let (provider, asserter) = mock_provider();
        asserter.push_success(&"0x5");

        let nonce = provider
            .get_nonce(address!("abcdefabcdefabcdefabcdefabcdefabcdefabcd"))
            .await
            .unwrap();
        assert_eq!(nonce, 5);

        let requests = asserter.requests();
        assert_eq!(requests[0].method(), "eth_getTransactionCount");
        assert!(requests[0].params().get().ends_with(r#""pending"]"#));
    }

    #[tokio::test]
    async fn send_raw_transaction_hex_encodes() {
        let (provider, asserter) = mock_provider();
        let hash = b256!("33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788");
        asserter.push_success(&hash);

        let returned = provider.send_raw_transaction(&[0xf8, 0x6c]).await.unwrap();
        assert_eq!(returned, hash);

        let requests = asserter.requests();
        assert_eq!(requests[0].method(), "eth_sendRawTransaction");
        assert_eq!(requests[0].params().get(), r#"["0xf86c"]"#);
    }

    #[tokio::test]
    async fn missing_receipts_are_none() {
        let (provider, asserter) = mock_provider();
        asserter.push_success(&serde_json::Value::Null);

        let receipt = provider
            .get_transaction_receipt(b256!(
                "33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788"
            ))
            .await
            .unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn preflight_uses_the_dummy_sender_when_unknown() {
        let (provider, asserter) = mock_provider();
        asserter.push_success(&"0xabcd");

        let tx = TxLegacy {
            to: address!("3535353535353535353535353535353535353535"),
            input: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
            ..Default::default()
        };
        let ret = provider.preflight_transaction(&tx, None).await.unwrap();
        assert_eq!(ret, Bytes::from(vec![0xab, 0xcd]));

        let requests = asserter.requests();
        assert_eq!(requests[0].method(), "eth_call");
        let params = requests[0].params().get();
        assert!(params.contains(r#""from":"0x1111111111111111111111111111111111111111""#));
        assert!(params.contains(r#""to":"0x3535353535353535353535353535353535353535""#));
        assert!(params.contains(r#""data":"0xa9059cbb""#));
        assert!(params.ends_with(r#","latest"]"#));
    }

    #[tokio::test]
    async fn hosted_providers_reject_unsigned_submission() {
        let asserter = Asserter::new();
        let provider =
            Provider::from_client(RpcClient::new(MockTransport::new(asserter.clone())), true);

        let tx = TxLegacy::default();
        let err = provider
            .send_transaction(DUMMY_SENDER, &tx)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Transport(_)));
        // rejected locally, nothing went out
        assert!(asserter.requests().is_empty());
    }

    #[tokio::test]
    async fn server_errors_surface_as_error_responses() {
        let (provider, asserter) = mock_provider();
        asserter.push_failure(ErrorPayload {
            code: -32000,
            message: "insufficient funds".into(),
            data: None,
        });

        let err = provider
            .get_balance(DUMMY_SENDER, BlockId::Latest)
            .await
            .unwrap_err();
        let payload = err.as_error_resp().unwrap();
        assert_eq!(payload.code, -32000);
    }

    #[tokio::test]
    async fn request_ids_are_monotonic() {
        let (provider, asserter) = mock_provider();
        asserter.push_success(&"0x0");
        asserter.push_success(&"0x0");

        let _ = provider.get_balance(DUMMY_SENDER, BlockId::Latest).await;
        let _ = provider.get_balance(DUMMY_SENDER, BlockId::Latest).await;

        let ids: Vec<_> = asserter
            .requests()
            .iter()
            .map(|r| r.id().clone())
            .collect();
        assert_eq!(ids, vec![Id::Number(0), Id::Number(1)]);
    }
}
