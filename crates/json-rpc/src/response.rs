use crate::Id;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::value::RawValue;

/// A JSON-RPC 2.0 response: the mirrored request id and either a result or
/// an error object.
#[derive(Clone, Debug)]
pub struct Response {
    /// The id of the request being answered.
    pub id: Id,
    /// Result or error.
    pub payload: ResponsePayload,
}

/// The body of a [`Response`].
#[derive(Clone, Debug)]
pub enum ResponsePayload {
    /// The `result` member, left raw for the caller to deserialize.
    Success(Box<RawValue>),
    /// The `error` member.
    Failure(ErrorPayload),
}

impl ResponsePayload {
    /// Whether this is a success payload.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The raw result, if this is a success payload.
    pub const fn as_success(&self) -> Option<&RawValue> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The error object, if this is a failure payload.
    pub const fn as_failure(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Deserialize a success payload into a concrete type.
    pub fn deserialize_success<T: DeserializeOwned>(&self) -> Option<serde_json::Result<T>> {
        self.as_success().map(|raw| serde_json::from_str(raw.get()))
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            id: Option<Id>,
            #[serde(default)]
            result: Option<Box<RawValue>>,
            #[serde(default)]
            error: Option<ErrorPayload>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let payload = if let Some(error) = helper.error {
            ResponsePayload::Failure(error)
        } else if let Some(result) = helper.result {
            ResponsePayload::Success(result)
        } else {
            return Err(serde::de::Error::custom(
                "missing `result` or `error` field in response",
            ));
        };
        Ok(Self { id: helper.id.unwrap_or(Id::None), payload })
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Clone, Debug, Serialize, Deserialize, thiserror::Error)]
#[error("server returned error {code}: {message}")]
pub struct ErrorPayload {
    /// The error code.
    pub code: i64,
    /// The error message.
    pub message: String,
    /// Optional structured data attached to the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}
