use alloy_primitives::{Address, Bytes, I256, U256};

/// A dynamically typed ABI value, paired with a [`DynType`] at the codec
/// boundary.
///
/// [`DynType`]: crate::DynType
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DynValue {
    /// An unsigned integer, for any `uintN`.
    Uint(U256),
    /// A signed integer, for any `intN`.
    Int(I256),
    /// A boolean.
    Bool(bool),
    /// A 20-byte account address.
    Address(Address),
    /// A fixed-size byte string, for `bytesK`.
    FixedBytes(Bytes),
    /// A dynamic byte string.
    Bytes(Bytes),
    /// A UTF-8 string.
    String(String),
    /// A fixed-size array; element count must match the descriptor.
    FixedArray(Vec<DynValue>),
    /// A dynamically sized array.
    Array(Vec<DynValue>),
}

impl DynValue {
    /// The contained unsigned integer, if any.
    pub const fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained signed integer, if any.
    pub const fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained boolean, if any.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained address, if any.
    pub const fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained byte string, fixed or dynamic, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::FixedBytes(value) | Self::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// The contained string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// The contained array elements, fixed or dynamic, if any.
    pub fn as_slice(&self) -> Option<&[DynValue]> {
        match self {
            Self::FixedArray(values) | Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// A short name for the value's variant, used in error messages.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Address(_) => "address",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::FixedArray(_) => "fixed array",
            Self::Array(_) => "array",
        }
    }
}

impl From<U256> for DynValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<u64> for DynValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<I256> for DynValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for DynValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Address> for DynValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<&str> for DynValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<DynValue>> for DynValue {
    fn from(values: Vec<DynValue>) -> Self {
        Self::Array(values)
    }
}
