//! Mock transport for tests.
//!
//! [`MockTransport`] answers each request with the next payload pushed into
//! its [`Asserter`]'s FIFO queue, and records every request it serves so
//! tests can assert on the emitted wire shapes.

use crate::{Transport, TransportErrorKind, TransportFut};
use ingot_json_rpc::{Response, ResponsePayload, SerializedRequest};
use serde::Serialize;
use std::{
    collections::VecDeque,
    sync::{Arc, PoisonError, RwLock},
};

/// Container for pushing responses into a [`MockTransport`], FIFO.
#[derive(Clone, Debug, Default)]
pub struct Asserter {
    responses: Arc<RwLock<VecDeque<ResponsePayload>>>,
    requests: Arc<RwLock<Vec<SerializedRequest>>>,
}

impl Asserter {
    /// Instantiate a new asserter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a response payload into the queue.
    pub fn push(&self, payload: ResponsePayload) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(payload);
    }

    /// Push a successful response into the queue.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails.
    #[track_caller]
    pub fn push_success<R: Serialize>(&self, response: &R) {
        let raw = serde_json::value::to_raw_value(response).unwrap();
        self.push(ResponsePayload::Success(raw));
    }

    /// Push an error payload into the queue.
    pub fn push_failure(&self, error: ingot_json_rpc::ErrorPayload) {
        self.push(ResponsePayload::Failure(error));
    }

    /// Pop the next queued response.
    pub fn pop_response(&self) -> Option<ResponsePayload> {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// The requests served so far, oldest first.
    pub fn requests(&self) -> Vec<SerializedRequest> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: &SerializedRequest) {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
    }
}

/// A transport that returns responses from an associated [`Asserter`].
#[derive(Clone, Debug)]
pub struct MockTransport {
    asserter: Asserter,
}

impl MockTransport {
    /// Create a new mock transport.
    pub const fn new(asserter: Asserter) -> Self {
        Self { asserter }
    }

    /// The associated asserter.
    pub const fn asserter(&self) -> &Asserter {
        &self.asserter
    }
}

impl Transport for MockTransport {
    fn request(&self, request: SerializedRequest) -> TransportFut<'static> {
        let asserter = self.asserter.clone();
        Box::pin(async move {
            asserter.record(&request);
            let payload = asserter
                .pop_response()
                .ok_or_else(|| TransportErrorKind::custom_str("empty mock response queue"))?;
            Ok(Response { id: request.id().clone(), payload })
        })
    }
}
