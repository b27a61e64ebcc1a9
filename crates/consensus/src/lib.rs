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

//! Transaction types for Ethereum-family chains.
//!
//! Two kinds are modeled: the standard legacy transaction ([`TxLegacy`])
//! and Celo's extension of it ([`TxCelo`]). Each exists unsigned — carrying
//! the chain id it is bound to — or signed, as [`Signed<T>`] pairing the
//! fields with a `(v, r, s)` signature and the cached transaction id.
//!
//! Signing follows EIP-155: the digest is the Keccak-256 of the unsigned
//! serialization (fields plus `(chain_id, 0, 0)`), and the chain id is
//! folded into the signature's `v`. Values are immutable once built;
//! signing consumes the unsigned value and yields a new signed one.

mod error;
pub use error::TxError;

mod signed;
pub use signed::Signed;

mod transaction;
pub use transaction::{SignableTransaction, Transaction, TxCelo, TxLegacy};
