#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]

//! secp256k1 signatures and local key signing.
//!
//! [`Signature`] is the `(v, r, s)` value attached to transactions, with
//! EIP-155 chain-id extraction and public-key/address recovery.
//! [`PrivateKeySigner`] signs 32-byte digests with a raw in-memory key.

mod error;
pub use error::SignerError;

mod signature;
pub use signature::Signature;

mod private_key;
pub use private_key::PrivateKeySigner;

pub mod utils;
