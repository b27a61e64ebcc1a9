/// Errors bubbled up from the secp256k1 primitives.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The curve implementation rejected a key, digest or signature.
    #[error("secp256k1 failure: {0}")]
    Ecdsa(#[from] k256::ecdsa::Error),
    /// The signature's `v` does not map onto a valid recovery id.
    #[error("signature recovery id out of range")]
    InvalidRecoveryId,
}
