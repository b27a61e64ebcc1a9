/// RLP codec error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RlpError {
    /// A length prefix pointed past the end of the input.
    #[error("rlp input overran while decoding")]
    Truncated,
    /// The input is empty or carries data beyond the encoded item.
    #[error("malformed rlp input")]
    Malformed,
    /// A long-form length prefix would exceed eight bytes.
    #[error("rlp length prefix exceeds eight bytes")]
    Overflow,
}
