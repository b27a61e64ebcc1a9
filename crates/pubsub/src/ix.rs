use crate::managers::InFlight;
use alloy_primitives::U256;
use serde_json::value::RawValue;
use std::fmt;
use tokio::sync::{broadcast, oneshot};

/// Instructions from frontends to the service task.
pub(crate) enum PubSubInstruction {
    /// Dispatch a request.
    Request(InFlight),
    /// Fetch a notification receiver for a server subscription id.
    GetSub(U256, oneshot::Sender<broadcast::Receiver<Box<RawValue>>>),
    /// Forget a subscription; the caller has already issued
    /// `eth_unsubscribe` on the wire.
    RemoveSub(U256),
    /// Stop the service, emitting the session state.
    Shutdown,
}

impl fmt::Debug for PubSubInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(in_flight) => f.debug_tuple("Request").field(in_flight).finish(),
            Self::GetSub(id, _) => f.debug_tuple("GetSub").field(id).finish(),
            Self::RemoveSub(id) => f.debug_tuple("RemoveSub").field(id).finish(),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
