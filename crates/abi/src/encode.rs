//! Head/tail sequence encoding.
//!
//! A sequence encodes as a fixed-width *head* followed by a variable-width
//! *tail*. Static values sit directly in the head; dynamic values leave a
//! 32-byte offset word in the head pointing at their payload in the tail.
//! Offsets are byte distances from the start of the enclosing sequence.

use crate::{AbiError, DynType, DynValue};
use alloy_primitives::U256;

const WORD: usize = 32;

/// Encode a heterogeneous sequence of values against a type list.
pub fn encode_sequence(types: &[DynType], values: &[DynValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::LengthMismatch { expected: types.len(), got: values.len() });
    }

    let usage = types
        .iter()
        .zip(values)
        .map(|(ty, value)| slot_usage(ty, value))
        .collect::<Result<Vec<_>, _>>()?;
    let head_size: usize = usage.iter().map(|(head, _)| head).sum();

    let mut head = Vec::with_capacity(head_size * WORD);
    let mut tail = Vec::new();
    let mut tail_cursor = 0usize;
    for ((ty, value), (_, tail_slots)) in types.iter().zip(values).zip(&usage) {
        match encode_single(ty, value)? {
            Encoded::Static(words) => head.extend_from_slice(&words),
            Encoded::Dynamic(words) => {
                let offset = (head_size + tail_cursor) * WORD;
                head.extend_from_slice(&uint_word(U256::from(offset)));
                tail.extend_from_slice(&words);
            }
        }
        tail_cursor += tail_slots;
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encode against a parenthesised type tuple, e.g.
/// `encode_tuple("(uint256,uint256[])", &values)`.
pub fn encode_tuple(type_tuple: &str, values: &[DynValue]) -> Result<Vec<u8>, AbiError> {
    encode_sequence(&DynType::parse_tuple(type_tuple)?, values)
}

/// 32-byte-word usage of one (type, value) pair as `(head, tail)` slot
/// counts. Tail counts for strings, bytes and arrays include their length
/// word.
fn slot_usage(ty: &DynType, value: &DynValue) -> Result<(usize, usize), AbiError> {
    match (ty, value) {
        (DynType::Bytes, DynValue::Bytes(data)) => Ok((1, 1 + data.len().div_ceil(WORD))),
        (DynType::String, DynValue::String(text)) => Ok((1, 1 + text.len().div_ceil(WORD))),
        (DynType::Array(inner), DynValue::Array(elements)) => {
            let mut slots = 0;
            for element in elements {
                let (head, tail) = slot_usage(inner, element)?;
                slots += head + tail;
            }
            Ok((1, 1 + slots))
        }
        (DynType::FixedArray(_, len), DynValue::FixedArray(elements)) => {
            if elements.len() != *len {
                return Err(AbiError::mismatch(
                    ty,
                    format!("declared length {len}, got {}", elements.len()),
                ));
            }
            Ok((ty.head_slots(), 0))
        }
        _ => Ok((1, 0)),
    }
}

enum Encoded {
    Static(Vec<u8>),
    Dynamic(Vec<u8>),
}

fn encode_single(ty: &DynType, value: &DynValue) -> Result<Encoded, AbiError> {
    match ty {
        DynType::Uint(bits) => Ok(Encoded::Static(encode_uint(ty, *bits, value)?)),
        DynType::Int(bits) => Ok(Encoded::Static(encode_int(ty, *bits, value)?)),
        DynType::Bool => {
            let DynValue::Bool(flag) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            Ok(Encoded::Static(uint_word(U256::from(*flag as u8)).to_vec()))
        }
        DynType::Address => {
            // addresses are uint160s, not bytes20s
            let DynValue::Address(address) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            let mut word = vec![0u8; WORD];
            word[12..].copy_from_slice(address.as_slice());
            Ok(Encoded::Static(word))
        }
        DynType::FixedBytes(len) => {
            let DynValue::FixedBytes(data) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            if data.len() != *len {
                return Err(AbiError::mismatch(ty, format!("{} bytes", data.len())));
            }
            let mut word = vec![0u8; WORD];
            word[..data.len()].copy_from_slice(data);
            Ok(Encoded::Static(word))
        }
        DynType::Bytes => {
            let DynValue::Bytes(data) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            Ok(Encoded::Dynamic(length_prefixed(data)))
        }
        DynType::String => {
            let DynValue::String(text) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            Ok(Encoded::Dynamic(length_prefixed(text.as_bytes())))
        }
        DynType::FixedArray(inner, len) => {
            let DynValue::FixedArray(elements) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            if elements.len() != *len {
                return Err(AbiError::mismatch(
                    ty,
                    format!("declared length {len}, got {}", elements.len()),
                ));
            }
            // element type is static, so element encodings inline into the head
            let mut words = Vec::with_capacity(len * WORD);
            for element in elements {
                match encode_single(inner, element)? {
                    Encoded::Static(inner_words) => words.extend_from_slice(&inner_words),
                    Encoded::Dynamic(_) => unreachable!("fixed array elements are static"),
                }
            }
            Ok(Encoded::Static(words))
        }
        DynType::Array(inner) => {
            let DynValue::Array(elements) = value else {
                return Err(AbiError::mismatch(ty, value.kind()));
            };
            let element_types = vec![(**inner).clone(); elements.len()];
            let mut out = uint_word(U256::from(elements.len())).to_vec();
            out.extend_from_slice(&encode_sequence(&element_types, elements)?);
            Ok(Encoded::Dynamic(out))
        }
    }
}

fn encode_uint(ty: &DynType, bits: usize, value: &DynValue) -> Result<Vec<u8>, AbiError> {
    let DynValue::Uint(value) = value else {
        return Err(AbiError::mismatch(ty, value.kind()));
    };
    if bits < 256 && *value >= U256::ONE << bits {
        return Err(AbiError::mismatch(ty, format!("{value} out of range")));
    }
    Ok(uint_word(*value).to_vec())
}

fn encode_int(ty: &DynType, bits: usize, value: &DynValue) -> Result<Vec<u8>, AbiError> {
    let DynValue::Int(value) = value else {
        return Err(AbiError::mismatch(ty, value.kind()));
    };
    if bits < 256 {
        let bound = alloy_primitives::I256::from_raw(U256::ONE << (bits - 1));
        if *value >= bound || *value < -bound {
            return Err(AbiError::mismatch(ty, format!("{value} out of range")));
        }
    }
    // the raw limbs are the 256-bit two's complement form
    Ok(value.into_raw().to_be_bytes::<32>().to_vec())
}

/// One length word, then the payload right-padded to a word boundary.
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&uint_word(U256::from(data.len())));
    out.extend_from_slice(data);
    out.resize(WORD + padded, 0);
    out
}

pub(crate) fn uint_word(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}
