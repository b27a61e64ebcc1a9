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

//! Ingot connects applications to Ethereum-family blockchains.
//!
//! This meta crate re-exports the workspace:
//!
//! - [`abi`]: the contract ABI codec, selectors and event decoding
//! - [`rlp`]: Recursive Length Prefix serialization
//! - [`consensus`]: legacy and Celo transactions with EIP-155 signing
//! - [`signer`]: secp256k1 signatures and local key signing
//! - [`json_rpc`], [`transport`], [`transport_http`], [`transport_ws`],
//!   [`pubsub`]: the RPC plumbing
//! - [`provider`]: the high-level client surface
//! - [`primitives`]: the shared integer, address and byte types

#[doc(inline)]
pub use ingot_abi as abi;

#[doc(inline)]
pub use ingot_consensus as consensus;

#[doc(inline)]
pub use ingot_json_rpc as json_rpc;

#[doc(inline)]
pub use ingot_provider as provider;

#[doc(inline)]
pub use ingot_pubsub as pubsub;

#[doc(inline)]
pub use ingot_rlp as rlp;

#[doc(inline)]
pub use ingot_signer as signer;

#[doc(inline)]
pub use ingot_transport as transport;

#[doc(inline)]
pub use ingot_transport_http as transport_http;

#[doc(inline)]
pub use ingot_transport_ws as transport_ws;

#[doc(inline)]
pub use alloy_primitives as primitives;
