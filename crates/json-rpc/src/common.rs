use serde::{Deserialize, Serialize};

/// A JSON-RPC 2.0 request id.
///
/// Requests issued by the clients in this workspace always carry numeric
/// ids; the other forms exist to faithfully parse server traffic and to
/// emit id-less fire-and-forget requests.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Id {
    /// A numeric id.
    Number(u64),
    /// A string id.
    String(String),
    /// A null id.
    None,
}

impl Id {
    /// Whether this is the null id.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The numeric value, if this is a numeric id.
    pub const fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}
