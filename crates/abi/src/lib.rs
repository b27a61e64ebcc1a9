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

//! Solidity contract ABI codec.
//!
//! Argument tuples encode to the 32-byte-word head/tail layout used at
//! contract entry points: static values occupy their head slots directly,
//! dynamic values leave an offset word behind and append their payload to
//! the tail. Type descriptors ([`DynType`]) are parsed from the ABI string
//! grammar once and drive both directions of the codec over dynamically
//! typed values ([`DynValue`]).
//!
//! On top of the codec sit function selectors, JSON contract interfaces
//! with call-by-name resolution ([`Interface`]), and event log decoding.
//!
//! Tuple (`(...)`) member types and fixed-point types are not supported.

mod error;
pub use error::AbiError;

mod ty;
pub use ty::DynType;

mod value;
pub use value::DynValue;

mod encode;
pub use encode::{encode_sequence, encode_tuple};

mod decode;
pub use decode::{decode_sequence, decode_tuple};

mod interface;
pub use interface::{encode_call, Entry, Interface, Param};

mod events;
pub use events::{decode_event, event_for_topic, DecodedEvent};
