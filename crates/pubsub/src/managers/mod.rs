mod in_flight;
pub(crate) use in_flight::InFlight;

mod active_sub;
pub(crate) use active_sub::ActiveSubscription;

use alloy_primitives::U256;
use ingot_json_rpc::EthNotification;
use serde_json::value::RawValue;
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Requests awaiting responses, keyed by numeric request id.
#[derive(Debug, Default)]
pub(crate) struct RequestManager {
    reqs: HashMap<u64, InFlight>,
}

impl RequestManager {
    pub(crate) fn insert(&mut self, id: u64, in_flight: InFlight) {
        self.reqs.insert(id, in_flight);
    }

    pub(crate) fn remove(&mut self, id: u64) -> Option<InFlight> {
        self.reqs.remove(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.reqs.len()
    }

    /// Remove every entry whose completion is still awaited. Entries whose
    /// callers have gone away are dropped.
    pub(crate) fn drain_pending(&mut self) -> Vec<InFlight> {
        self.reqs
            .drain()
            .map(|(_, in_flight)| in_flight)
            .filter(|in_flight| !in_flight.tx.is_closed())
            .collect()
    }
}

/// Established subscriptions, keyed by server subscription id.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionManager {
    subs: HashMap<U256, ActiveSubscription>,
}

impl SubscriptionManager {
    /// Register a subscription under its server id.
    pub(crate) fn upsert(&mut self, server_id: U256, sub: ActiveSubscription) {
        self.subs.insert(server_id, sub);
    }

    pub(crate) fn remove(&mut self, server_id: U256) {
        self.subs.remove(&server_id);
    }

    pub(crate) fn len(&self) -> usize {
        self.subs.len()
    }

    /// A fresh receiver for the subscription, if it exists.
    pub(crate) fn get_rx(
        &self,
        server_id: U256,
    ) -> Option<broadcast::Receiver<Box<RawValue>>> {
        self.subs.get(&server_id).map(ActiveSubscription::subscribe)
    }

    /// Route a notification to its subscription's channel.
    pub(crate) fn notify(&self, notification: EthNotification) -> bool {
        match self.subs.get(&notification.subscription) {
            Some(sub) => {
                sub.notify(notification.result);
                true
            }
            None => false,
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<ActiveSubscription> {
        self.subs.drain().map(|(_, sub)| sub).collect()
    }
}
