use crate::{
    handle::ConnectionHandle,
    ix::PubSubInstruction,
    managers::{ActiveSubscription, InFlight, RequestManager, SubscriptionManager},
    PubSubConnect, PubSubFrontend, PubSubSession,
};
use alloy_primitives::U256;
use ingot_json_rpc::{PubSubItem, Response, ResponsePayload, RpcError};
use ingot_transport::TransportError;
use serde_json::value::RawValue;
use tokio::sync::{mpsc, oneshot};

/// The demultiplexer task: owns the backend handle and the in-flight and
/// subscription tables, routes every inbound item to exactly one
/// destination, and packages the session state when it stops.
pub(crate) struct PubSubService {
    /// The backend handle.
    handle: ConnectionHandle,

    /// Inbound instructions from frontends.
    reqs: mpsc::UnboundedReceiver<PubSubInstruction>,

    /// The subscription table.
    subs: SubscriptionManager,

    /// The in-flight request table.
    in_flights: RequestManager,

    /// Highest request id dispatched through this session.
    max_id: Option<u64>,

    /// Where the residual session state goes at shutdown.
    state_tx: oneshot::Sender<SessionState>,
}

impl std::fmt::Debug for PubSubService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubSubService")
            .field("in_flights", &self.in_flights.len())
            .field("subs", &self.subs.len())
            .field("max_id", &self.max_id)
            .finish_non_exhaustive()
    }
}

impl PubSubService {
    /// Connect a backend and spawn the service task around it.
    pub(crate) async fn connect<C: PubSubConnect>(
        connector: C,
    ) -> Result<PubSubSession, TransportError> {
        let handle = connector.connect().await?;

        let (tx, reqs) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = oneshot::channel();
        let service = Self {
            handle,
            reqs,
            subs: SubscriptionManager::default(),
            in_flights: RequestManager::default(),
            max_id: None,
            state_tx,
        };
        tokio::spawn(service.run());
        Ok(PubSubSession::new(PubSubFrontend::new(tx), state_rx))
    }

    async fn run(mut self) {
        loop {
            // Bias inbound items over shutdown-ish signals over new work, so
            // responses already on the wire reach their completions before
            // the session winds down.
            tokio::select! {
                biased;

                item = self.handle.from_socket.recv() => match item {
                    Some(item) => self.handle_item(item),
                    None => {
                        tracing::error!("pubsub backend dropped its interface");
                        break;
                    }
                },

                _ = &mut self.handle.error => {
                    tracing::error!("pubsub backend reported a terminal error");
                    break;
                }

                ix = self.reqs.recv() => match ix {
                    Some(PubSubInstruction::Shutdown) | None => {
                        tracing::debug!("pubsub service shutting down");
                        break;
                    }
                    Some(ix) => {
                        if let Err(err) = self.service_ix(ix) {
                            tracing::error!(%err, "pubsub service dispatch failed");
                            break;
                        }
                    }
                },
            }
        }

        self.teardown();
    }

    /// Stop the backend and emit the residual session state. If the owner
    /// has no interest in the state, the pending completions are dropped
    /// and resolve as session-closed at their callers.
    fn teardown(self) {
        let Self { handle, mut in_flights, mut subs, max_id, state_tx, .. } = self;
        handle.shutdown();

        let state = SessionState {
            next_id: max_id.map_or(0, |id| id + 1),
            pending: in_flights.drain_pending(),
            subscriptions: subs.drain(),
        };
        let _ = state_tx.send(state);
    }

    fn service_ix(&mut self, ix: PubSubInstruction) -> Result<(), TransportError> {
        tracing::trace!(?ix, "servicing instruction");
        match ix {
            PubSubInstruction::Request(in_flight) => self.service_request(in_flight),
            PubSubInstruction::GetSub(id, tx) => {
                if let Some(rx) = self.subs.get_rx(id) {
                    let _ = tx.send(rx);
                }
                Ok(())
            }
            PubSubInstruction::RemoveSub(id) => {
                self.subs.remove(id);
                Ok(())
            }
            PubSubInstruction::Shutdown => unreachable!("handled by the run loop"),
        }
    }

    fn service_request(&mut self, in_flight: InFlight) -> Result<(), TransportError> {
        let Some(id) = in_flight.request.id().as_number() else {
            // ids are always allocated numerically by the client
            let _ = in_flight
                .tx
                .send(Err(ingot_transport::TransportErrorKind::custom_str(
                    "request id must be numeric",
                )));
            return Ok(());
        };
        self.max_id = Some(self.max_id.map_or(id, |max| max.max(id)));
        self.dispatch(in_flight.request.serialized().to_owned())?;
        self.in_flights.insert(id, in_flight);
        Ok(())
    }

    fn dispatch(&mut self, body: Box<RawValue>) -> Result<(), TransportError> {
        self.handle
            .to_socket
            .send(body)
            .map_err(|_| ingot_transport::TransportErrorKind::backend_gone())
    }

    fn handle_item(&mut self, item: PubSubItem) {
        match item {
            PubSubItem::Response(response) => self.handle_response(response),
            PubSubItem::Notification(notification) => {
                let sub_id = notification.subscription;
                if !self.subs.notify(notification) {
                    tracing::trace!(%sub_id, "notification for unknown subscription");
                }
            }
        }
    }

    /// Route a response to the completion registered under its id. A
    /// successful `eth_subscribe` response registers the subscription in the
    /// table *before* the caller is completed, so no notification can race
    /// past an unregistered id.
    fn handle_response(&mut self, response: Response) {
        let Some(id) = response.id.as_number() else {
            tracing::trace!(id = ?response.id, "response with non-numeric id");
            return;
        };
        let Some(in_flight) = self.in_flights.remove(id) else {
            tracing::debug!(id, "response for unknown request id");
            return;
        };

        if in_flight.request.is_subscription() {
            if let ResponsePayload::Success(raw) = &response.payload {
                match serde_json::from_str::<U256>(raw.get()) {
                    Ok(server_id) => {
                        let InFlight { request, channel, tx } = in_flight;
                        let sub = match channel {
                            Some(channel) => ActiveSubscription::with_channel(request, channel),
                            None => ActiveSubscription::new(request),
                        };
                        self.subs.upsert(server_id, sub);
                        let _ = tx.send(Ok(response));
                        return;
                    }
                    Err(err) => {
                        let text = raw.get().to_owned();
                        let _ = in_flight.tx.send(Err(RpcError::deser_err(err, text)));
                        return;
                    }
                }
            }
        }

        let _ = in_flight.tx.send(Ok(response));
    }
}

/// The residual state of a stopped session, from which a successor session
/// can be built.
///
/// Holds the completions of still-pending requests and the notification
/// channels of live subscriptions. Dropping the state fails the pending
/// completions with the session-closed error; adopting it into a new
/// session fulfills them there instead.
pub struct SessionState {
    pub(crate) next_id: u64,
    pub(crate) pending: Vec<InFlight>,
    pub(crate) subscriptions: Vec<ActiveSubscription>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("next_id", &self.next_id)
            .field("pending", &self.pending.len())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl SessionState {
    /// The first request id a successor session may use: one past the
    /// highest id this session dispatched.
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// How many requests were still awaiting responses.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// How many subscriptions were live.
    pub fn subscription_len(&self) -> usize {
        self.subscriptions.len()
    }
}
