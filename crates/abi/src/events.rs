//! Event log decoding on top of the sequence codec.

use crate::{decode_sequence, AbiError, DynType, DynValue, Entry, Interface};
use alloy_primitives::{Bytes, B256};

/// A decoded event log: the event name and its inputs in declaration order
/// (indexed inputs first, as they appear in the topics).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedEvent {
    /// The matched event's name.
    pub name: String,
    /// Decoded inputs as `(name, value)` pairs.
    pub fields: Vec<(String, DynValue)>,
}

/// Find the event entry whose signature digest equals the log's first topic.
pub fn event_for_topic<'a>(
    interface: &'a Interface,
    topic0: B256,
) -> Result<&'a Entry, AbiError> {
    interface
        .events()
        .find(|event| event.topic0() == topic0)
        .ok_or_else(|| AbiError::UnknownEvent(topic0.to_string()))
}

/// Decode an event log from its topics and data blob.
///
/// Indexed inputs are read from `topics[1..]`; a dynamic indexed input is
/// stored by the node as its Keccak-256 digest and is surfaced as the raw
/// 32-byte word. Unindexed inputs are decoded from the data blob.
pub fn decode_event(
    interface: &Interface,
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedEvent, AbiError> {
    let topic0 = topics
        .first()
        .ok_or_else(|| AbiError::UnknownEvent("<no topics>".into()))?;
    let event = event_for_topic(interface, *topic0)?;

    let mut fields = Vec::with_capacity(event.inputs.len());

    let indexed = event.inputs.iter().filter(|p| p.indexed);
    for (position, param) in indexed.enumerate() {
        let topic = topics
            .get(position + 1)
            .ok_or(AbiError::OutOfBounds(position + 1))?;
        let ty = DynType::parse(&param.ty)?;
        let value = if ty.is_dynamic() || ty.head_slots() > 1 {
            // hashed in place; the preimage is unrecoverable
            DynValue::FixedBytes(Bytes::copy_from_slice(topic.as_slice()))
        } else {
            decode_sequence(&[ty], topic.as_slice())?.remove(0)
        };
        fields.push((param.name.clone(), value));
    }

    let unindexed: Vec<_> = event.inputs.iter().filter(|p| !p.indexed).collect();
    let types = unindexed
        .iter()
        .map(|p| DynType::parse(&p.ty))
        .collect::<Result<Vec<_>, _>>()?;
    let values = decode_sequence(&types, data)?;
    for (param, value) in unindexed.iter().zip(values) {
        fields.push((param.name.clone(), value));
    }

    Ok(DecodedEvent { name: event.name.clone(), fields })
}
