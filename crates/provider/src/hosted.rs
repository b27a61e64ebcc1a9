//! Hosted endpoint helpers.
//!
//! Hosted node services address their endpoints by network label and
//! project key. Providers built through these helpers are flagged as
//! hosted: the service holds no keys, so `eth_sendTransaction` is rejected
//! locally instead of leaking an unsigned transaction to a third party.

use crate::{Provider, RpcClient, WsProvider};
use ingot_transport::{TransportErrorKind, TransportResult};
use ingot_transport_http::{Client, Http};
use ingot_transport_ws::WsConnect;
use url::Url;

/// Connection details for an Infura project.
#[derive(Clone, Debug)]
pub struct Infura {
    network: String,
    project_id: String,
}

impl Infura {
    /// Address a network (`mainnet`, `sepolia`, …) under a project key.
    pub fn new(network: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self { network: network.into(), project_id: project_id.into() }
    }

    /// The HTTPS endpoint URL.
    pub fn https_url(&self) -> Result<Url, url::ParseError> {
        format!("https://{}.infura.io/v3/{}", self.network, self.project_id).parse()
    }

    /// The websocket endpoint URL.
    pub fn wss_url(&self) -> String {
        format!("wss://{}.infura.io/ws/v3/{}", self.network, self.project_id)
    }

    /// A request/response provider over the HTTPS endpoint.
    pub fn http_provider(&self) -> TransportResult<Provider<Http<Client>>> {
        let url = self.https_url().map_err(TransportErrorKind::custom)?;
        Ok(Provider::from_client(
            RpcClient::new(Http::new(url)),
            true,
        ))
    }

    /// A streaming provider over the websocket endpoint.
    pub async fn ws_provider(&self) -> TransportResult<WsProvider> {
        WsProvider::connect_inner(WsConnect::new(self.wss_url()), 0, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_network_uris() {
        let infura = Infura::new("mainnet", "deadbeef");
        assert_eq!(
            infura.https_url().unwrap().as_str(),
            "https://mainnet.infura.io/v3/deadbeef"
        );
        assert_eq!(infura.wss_url(), "wss://mainnet.infura.io/ws/v3/deadbeef");
    }

    #[test]
    fn http_provider_is_hosted() {
        let provider = Infura::new("mainnet", "deadbeef").http_provider().unwrap();
        assert!(provider.is_hosted());
    }
}
