use crate::{managers::InFlight, PubSubFrontend, SessionState};
use ingot_json_rpc::{Id, RpcError};
use ingot_transport::TransportResult;
use tokio::sync::oneshot;

/// A running pubsub session: the frontend plus the slot the service emits
/// its residual state into when it stops.
///
/// A session is closed exactly once — by [`close`], by [`into_state`], or
/// implicitly when every frontend clone is dropped. Pending completions
/// survive inside the emitted [`SessionState`]; dropping that state (or
/// never collecting it) resolves them with the session-closed error.
///
/// [`close`]: PubSubSession::close
/// [`into_state`]: PubSubSession::into_state
#[derive(Debug)]
pub struct PubSubSession {
    frontend: PubSubFrontend,
    state: oneshot::Receiver<SessionState>,
}

impl PubSubSession {
    pub(crate) const fn new(
        frontend: PubSubFrontend,
        state: oneshot::Receiver<SessionState>,
    ) -> Self {
        Self { frontend, state }
    }

    /// A frontend handle onto this session.
    pub fn frontend(&self) -> PubSubFrontend {
        self.frontend.clone()
    }

    /// Ask the service to stop. Idempotent.
    pub fn close(&self) {
        self.frontend.close();
    }

    /// Stop the session and collect its residual state: the requests whose
    /// completions are still awaited and all live subscriptions.
    pub async fn into_state(self) -> Option<SessionState> {
        self.frontend.close();
        self.state.await.ok()
    }

    /// Adopt a predecessor session's residual state.
    ///
    /// Pending requests are re-dispatched under fresh ids drawn from
    /// `next_id`, fulfilling the *original* completions when their responses
    /// arrive. Subscriptions are re-issued keeping their notification
    /// channels, so receivers handed out by the predecessor keep delivering.
    pub fn adopt(
        &self,
        state: SessionState,
        mut next_id: impl FnMut() -> u64,
    ) -> TransportResult<()> {
        for InFlight { request, channel, tx } in state.pending {
            let request = request
                .with_id(Id::Number(next_id()))
                .map_err(RpcError::ser_err)?;
            self.frontend.send_in_flight(InFlight { request, channel, tx })?;
        }
        for sub in state.subscriptions {
            let request = sub
                .request
                .with_id(Id::Number(next_id()))
                .map_err(RpcError::ser_err)?;
            // the ack is not awaited by anyone; registration happens in the
            // service when the subscribe response lands
            let (in_flight, _ack) = InFlight::with_channel(request, sub.tx);
            self.frontend.send_in_flight(in_flight)?;
        }
        Ok(())
    }
}
