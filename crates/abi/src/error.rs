/// ABI codec error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The type descriptor names a type outside the supported grammar.
    #[error("unsupported abi type `{0}`")]
    Unsupported(String),
    /// A value is not admissible for the type it is paired with.
    #[error("value does not fit type `{ty}`: {reason}")]
    TypeMismatch {
        /// The type descriptor the value was checked against.
        ty: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A type list and value list disagree in length.
    #[error("expected {expected} values, got {got}")]
    LengthMismatch {
        /// Number of types.
        expected: usize,
        /// Number of values.
        got: usize,
    },
    /// The blob is not a whole number of 32-byte words.
    #[error("abi blob length {0} is not a multiple of 32 bytes")]
    Misaligned(usize),
    /// A head word or tail offset points past the end of the blob.
    #[error("abi blob ended before offset {0}")]
    OutOfBounds(usize),
    /// No interface entry accepts the provided name and arguments.
    #[error("no function with an acceptable interface")]
    NoMatch,
    /// More than one interface entry accepts the provided arguments.
    #[error("multiple functions with acceptable interfaces")]
    Ambiguous,
    /// No event in the interface matches the log's first topic.
    #[error("no event matches topic `{0}`")]
    UnknownEvent(String),
}

impl AbiError {
    pub(crate) fn mismatch(ty: &crate::DynType, reason: impl Into<String>) -> Self {
        Self::TypeMismatch { ty: ty.to_string(), reason: reason.into() }
    }
}
