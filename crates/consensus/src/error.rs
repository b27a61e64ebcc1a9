use ingot_rlp::RlpError;
use ingot_signer::SignerError;

/// Transaction construction, serialization or signing error.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// The RLP layer rejected the payload.
    #[error(transparent)]
    Rlp(#[from] RlpError),
    /// EIP-155 requires a non-zero chain id to sign, and a recoverable one
    /// to derive a sighash from a signed transaction.
    #[error("chain id required for eip-155 signing")]
    ChainIdRequired,
    /// The signature could not be produced or recovered.
    #[error(transparent)]
    Signature(#[from] SignerError),
    /// The payload is structurally not a transaction of this kind.
    #[error("unexpected transaction encoding: {0}")]
    Format(&'static str),
}
