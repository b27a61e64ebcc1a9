//! Head/tail sequence decoding.

use crate::{AbiError, DynType, DynValue};
use alloy_primitives::{Address, Bytes, I256, U256};

const WORD: usize = 32;

/// Decode a blob produced by [`encode_sequence`] against the same type list.
///
/// [`encode_sequence`]: crate::encode_sequence
pub fn decode_sequence(types: &[DynType], blob: &[u8]) -> Result<Vec<DynValue>, AbiError> {
    if blob.len() % WORD != 0 {
        return Err(AbiError::Misaligned(blob.len()));
    }

    let mut values = Vec::with_capacity(types.len());
    let mut slot = 0usize;
    for ty in types {
        let (value, used) = decode_head(ty, blob, slot)?;
        values.push(value);
        slot += used;
    }
    Ok(values)
}

/// Decode against a parenthesised type tuple, e.g.
/// `decode_tuple("(uint256,uint256[])", blob)`.
pub fn decode_tuple(type_tuple: &str, blob: &[u8]) -> Result<Vec<DynValue>, AbiError> {
    decode_sequence(&DynType::parse_tuple(type_tuple)?, blob)
}

/// Decode the value whose head starts at word `slot`, returning it along
/// with the number of head words consumed.
fn decode_head(ty: &DynType, blob: &[u8], slot: usize) -> Result<(DynValue, usize), AbiError> {
    match ty {
        DynType::FixedArray(inner, len) => {
            let mut elements = Vec::with_capacity(*len);
            let mut cursor = slot;
            for _ in 0..*len {
                let (element, used) = decode_head(inner, blob, cursor)?;
                elements.push(element);
                cursor += used;
            }
            Ok((DynValue::FixedArray(elements), cursor - slot))
        }
        _ if ty.is_dynamic() => {
            // the head word is a byte offset into the enclosing sequence
            let offset = word_to_offset(word_at(blob, slot)?)?;
            if offset % WORD != 0 {
                return Err(AbiError::Misaligned(offset));
            }
            let tail = blob.get(offset..).ok_or(AbiError::OutOfBounds(offset))?;
            Ok((decode_dynamic(ty, tail)?, 1))
        }
        _ => Ok((decode_word(ty, word_at(blob, slot)?)?, 1)),
    }
}

/// Decode a dynamic value from its tail, which begins with a length word.
fn decode_dynamic(ty: &DynType, tail: &[u8]) -> Result<DynValue, AbiError> {
    let len = word_to_offset(word_at(tail, 0)?)?;
    match ty {
        DynType::Bytes => Ok(DynValue::Bytes(dynamic_payload(tail, len)?)),
        DynType::String => {
            let data = dynamic_payload(tail, len)?;
            let text = core::str::from_utf8(&data)
                .map_err(|e| AbiError::mismatch(ty, e.to_string()))?;
            Ok(DynValue::String(text.into()))
        }
        DynType::Array(inner) => {
            let element_types = vec![(**inner).clone(); len];
            let elements = decode_sequence(&element_types, &tail[WORD..])?;
            Ok(DynValue::Array(elements))
        }
        _ => unreachable!("static type in dynamic decoder"),
    }
}

fn decode_word(ty: &DynType, word: &[u8]) -> Result<DynValue, AbiError> {
    let value = match ty {
        DynType::Uint(_) => DynValue::Uint(U256::from_be_slice(word)),
        DynType::Int(_) => DynValue::Int(I256::from_raw(U256::from_be_slice(word))),
        // only the final byte is meaningful
        DynType::Bool => DynValue::Bool(word[31] == 1),
        DynType::Address => DynValue::Address(Address::from_slice(&word[12..])),
        DynType::FixedBytes(len) => DynValue::FixedBytes(Bytes::copy_from_slice(&word[..*len])),
        _ => unreachable!("dynamic type in word decoder"),
    };
    Ok(value)
}

fn word_at(blob: &[u8], slot: usize) -> Result<&[u8], AbiError> {
    blob.get(slot * WORD..(slot + 1) * WORD)
        .ok_or(AbiError::OutOfBounds(slot * WORD))
}

fn dynamic_payload(tail: &[u8], len: usize) -> Result<Bytes, AbiError> {
    let data = tail
        .get(WORD..WORD + len)
        .ok_or(AbiError::OutOfBounds(WORD + len))?;
    Ok(Bytes::copy_from_slice(data))
}

fn word_to_offset(word: &[u8]) -> Result<usize, AbiError> {
    let value = U256::from_be_slice(word);
    usize::try_from(value).map_err(|_| AbiError::OutOfBounds(usize::MAX))
}
