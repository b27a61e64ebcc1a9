use crate::Id;
use serde::{ser::SerializeMap, Serialize};
use serde_json::value::RawValue;
use std::borrow::Cow;

/// The identifying parts of a request: method name and id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMeta {
    /// The method being called.
    pub method: Cow<'static, str>,
    /// The request id.
    pub id: Id,
}

/// A JSON-RPC 2.0 request with typed parameters.
#[derive(Clone, Debug)]
pub struct Request<Params> {
    /// Method and id.
    pub meta: RequestMeta,
    /// The request parameters.
    pub params: Params,
}

impl<Params> Request<Params> {
    /// Build a request.
    pub fn new(method: impl Into<Cow<'static, str>>, id: Id, params: Params) -> Self {
        Self { meta: RequestMeta { method: method.into(), id }, params }
    }
}

impl<Params: Serialize> Request<Params> {
    /// Serialize the parameters and the envelope, producing a
    /// [`SerializedRequest`] ready for a transport.
    pub fn serialize(self) -> serde_json::Result<SerializedRequest> {
        SerializedRequest::try_from(self)
    }
}

impl<Params: Serialize> Serialize for Request<Params> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("method", &self.meta.method)?;
        map.serialize_entry("params", &self.params)?;
        map.serialize_entry("id", &self.meta.id)?;
        map.serialize_entry("jsonrpc", "2.0")?;
        map.end()
    }
}

/// A request whose parameters and envelope have been serialized.
///
/// The raw parameters are retained alongside the full body so the request
/// can be re-issued under a fresh id during session handover.
#[derive(Clone, Debug)]
pub struct SerializedRequest {
    meta: RequestMeta,
    params: Box<RawValue>,
    serialized: Box<RawValue>,
}

impl SerializedRequest {
    /// The method being called.
    pub fn method(&self) -> &str {
        &self.meta.method
    }

    /// The request id.
    pub const fn id(&self) -> &Id {
        &self.meta.id
    }

    /// The serialized parameters.
    pub const fn params(&self) -> &RawValue {
        &self.params
    }

    /// The serialized request body, as sent over a transport.
    pub const fn serialized(&self) -> &RawValue {
        &self.serialized
    }

    /// Whether this request establishes a subscription.
    pub fn is_subscription(&self) -> bool {
        self.method() == "eth_subscribe"
    }

    /// Re-serialize under a different id, keeping method and parameters.
    pub fn with_id(&self, id: Id) -> serde_json::Result<Self> {
        Request {
            meta: RequestMeta { method: self.meta.method.clone(), id },
            params: &*self.params,
        }
        .serialize()
    }
}

impl<Params: Serialize> TryFrom<Request<Params>> for SerializedRequest {
    type Error = serde_json::Error;

    fn try_from(request: Request<Params>) -> serde_json::Result<Self> {
        let params = serde_json::value::to_raw_value(&request.params)?;
        let meta = request.meta;
        let serialized =
            serde_json::value::to_raw_value(&Request { meta: meta.clone(), params: &*params })?;
        Ok(Self { meta, params, serialized })
    }
}

impl Serialize for SerializedRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.serialized.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_the_envelope() {
        let request = Request::new("eth_getBalance", Id::Number(7), ("0x11", "latest"));
        let serialized = request.serialize().unwrap();
        assert_eq!(serialized.method(), "eth_getBalance");
        assert_eq!(serialized.id(), &Id::Number(7));
        assert_eq!(
            serialized.serialized().get(),
            r#"{"method":"eth_getBalance","params":["0x11","latest"],"id":7,"jsonrpc":"2.0"}"#
        );
    }

    #[test]
    fn reissues_under_a_new_id() {
        let request = Request::new("eth_call", Id::Number(1), ["0xdead"]);
        let serialized = request.serialize().unwrap();
        let reissued = serialized.with_id(Id::Number(9)).unwrap();
        assert_eq!(reissued.id(), &Id::Number(9));
        assert_eq!(reissued.params().get(), serialized.params().get());
        assert_eq!(
            reissued.serialized().get(),
            r#"{"method":"eth_call","params":["0xdead"],"id":9,"jsonrpc":"2.0"}"#
        );
    }
}
