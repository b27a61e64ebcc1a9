use crate::{Id, Response, ResponsePayload};
use alloy_primitives::U256;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Serialize,
};
use serde_json::value::RawValue;

/// An ethereum-style subscription notification, not to be confused with a
/// JSON-RPC notification: the payload nests under `params` with the server
/// subscription id alongside.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EthNotification<T = Box<RawValue>> {
    /// The server-assigned subscription id.
    pub subscription: U256,
    /// The notification payload.
    pub result: T,
}

/// An item received over a pubsub transport: either a JSON-RPC response to
/// an issued request, or a subscription notification.
#[derive(Clone, Debug)]
pub enum PubSubItem {
    /// A response, correlated by request id.
    Response(Response),
    /// A notification, correlated by subscription id.
    Notification(EthNotification),
}

impl<'de> Deserialize<'de> for PubSubItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PubSubItemVisitor;

        impl<'de> Visitor<'de> for PubSubItemVisitor {
            type Value = PubSubItem;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a JSON-RPC response or a subscription notification")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id: Option<Id> = None;
                let mut result: Option<Box<RawValue>> = None;
                let mut error = None;
                let mut params: Option<EthNotification> = None;

                while let Some(key) = map.next_key::<&str>()? {
                    match key {
                        "id" => {
                            if id.is_some() {
                                return Err(serde::de::Error::duplicate_field("id"));
                            }
                            id = Some(map.next_value()?);
                        }
                        "result" => {
                            if result.is_some() {
                                return Err(serde::de::Error::duplicate_field("result"));
                            }
                            result = Some(map.next_value()?);
                        }
                        "error" => {
                            if error.is_some() {
                                return Err(serde::de::Error::duplicate_field("error"));
                            }
                            error = Some(map.next_value()?);
                        }
                        "params" => {
                            if params.is_some() {
                                return Err(serde::de::Error::duplicate_field("params"));
                            }
                            params = Some(map.next_value()?);
                        }
                        // jsonrpc version, method name, anything else
                        _ => {
                            let _ = map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }

                // An id marks a response, even when a malformed peer also
                // attaches params.
                if let Some(id) = id {
                    let payload = if let Some(error) = error {
                        ResponsePayload::Failure(error)
                    } else if let Some(result) = result {
                        ResponsePayload::Success(result)
                    } else {
                        return Err(serde::de::Error::custom(
                            "missing `result` or `error` field in response",
                        ));
                    };
                    return Ok(PubSubItem::Response(Response { id, payload }));
                }

                params
                    .map(PubSubItem::Notification)
                    .ok_or_else(|| serde::de::Error::missing_field("params"))
            }
        }

        deserializer.deserialize_map(PubSubItemVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_responses() {
        let item: PubSubItem =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":2,"result":"0x1"}"#).unwrap();
        let PubSubItem::Response(response) = item else {
            panic!("expected a response")
        };
        assert_eq!(response.id, Id::Number(2));
        assert!(response.payload.is_success());
    }

    #[test]
    fn parses_notifications() {
        let item: PubSubItem = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"eth_subscription",
                "params":{"subscription":"0x9ce59a13059e417087c02d3236a0b1cc",
                          "result":{"number":"0x1"}}}"#,
        )
        .unwrap();
        let PubSubItem::Notification(notification) = item else {
            panic!("expected a notification")
        };
        assert_eq!(
            notification.subscription,
            U256::from_str_radix("9ce59a13059e417087c02d3236a0b1cc", 16).unwrap()
        );
        assert_eq!(notification.result.get(), r#"{"number":"0x1"}"#);
    }

    #[test]
    fn rejects_frames_with_no_destination() {
        assert!(
            serde_json::from_str::<PubSubItem>(r#"{"jsonrpc":"2.0","method":"eth_subscription"}"#)
                .is_err()
        );
    }
}
