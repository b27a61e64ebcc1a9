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

//! Recursive Length Prefix (RLP) serialization.
//!
//! RLP is the canonical binary encoding for nested byte/list structures used
//! by Ethereum-family chains. An encoded value is either a byte string or a
//! list of encoded values, to any depth. This crate provides the item tree
//! ([`RlpItem`]), the codec ([`encode`]/[`decode`]), and the minimal
//! big-endian integer helpers used by transaction serialization.

use alloy_primitives::{Bytes, U256};

mod error;
pub use error::RlpError;

/// Tag for the empty byte string, and base tag for short strings.
const STRING_OFFSET: u8 = 0x80;
/// Base tag for long strings (length-of-length follows).
const LONG_STRING_OFFSET: u8 = 0xb7;
/// Base tag for short lists.
const LIST_OFFSET: u8 = 0xc0;
/// Base tag for long lists (length-of-length follows).
const LONG_LIST_OFFSET: u8 = 0xf7;

/// An RLP value: a finite byte string, or an ordered sequence of RLP values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string.
    Bytes(Bytes),
    /// A list of items, nested to any depth.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Create a byte-string item.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Self::Bytes(data.into())
    }

    /// Create a list item.
    pub fn list(items: impl Into<Vec<RlpItem>>) -> Self {
        Self::List(items.into())
    }

    /// The contained byte string, if this is a byte-string item.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::List(_) => None,
        }
    }

    /// The contained items, if this is a list item.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<Bytes> for RlpItem {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value.into())
    }
}

impl From<&[u8]> for RlpItem {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(value: Vec<RlpItem>) -> Self {
        Self::List(value)
    }
}

impl From<U256> for RlpItem {
    /// Integers encode as their minimal big-endian byte string.
    fn from(value: U256) -> Self {
        Self::Bytes(uint_to_be(value))
    }
}

/// Encode an item to its canonical RLP representation.
pub fn encode(item: &RlpItem) -> Result<Vec<u8>, RlpError> {
    let mut out = Vec::new();
    encode_into(item, &mut out)?;
    Ok(out)
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) -> Result<(), RlpError> {
    match item {
        RlpItem::Bytes(b) => {
            // A single byte below 0x80 is its own encoding.
            if b.len() == 1 && b[0] < STRING_OFFSET {
                out.push(b[0]);
            } else {
                encode_length(b.len(), STRING_OFFSET, out)?;
                out.extend_from_slice(b);
            }
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for inner in items {
                encode_into(inner, &mut payload)?;
            }
            encode_length(payload.len(), LIST_OFFSET, out)?;
            out.extend_from_slice(&payload);
        }
    }
    Ok(())
}

/// Write the length prefix for a payload of `len` bytes.
fn encode_length(len: usize, offset: u8, out: &mut Vec<u8>) -> Result<(), RlpError> {
    if len <= 55 {
        out.push(offset + len as u8);
        return Ok(());
    }
    let len_be = usize_to_be(len);
    if len_be.len() > 8 {
        return Err(RlpError::Overflow);
    }
    out.push(offset + 55 + len_be.len() as u8);
    out.extend_from_slice(&len_be);
    Ok(())
}

/// Decode a single item occupying the entire input.
///
/// Trailing bytes after the first complete item are rejected as
/// [`RlpError::Malformed`]; use [`decode_prefix`] when the item is embedded
/// in a larger buffer.
pub fn decode(raw: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_prefix(raw)?;
    if consumed != raw.len() {
        return Err(RlpError::Malformed);
    }
    Ok(item)
}

/// Decode the item at the head of the input, returning it along with the
/// number of bytes consumed.
pub fn decode_prefix(raw: &[u8]) -> Result<(RlpItem, usize), RlpError> {
    let header = decode_header(raw)?;
    let total = header.prefix_len + header.payload_len;
    let payload = raw
        .get(header.prefix_len..total)
        .ok_or(RlpError::Truncated)?;

    if !header.is_list {
        return Ok((RlpItem::Bytes(Bytes::copy_from_slice(payload)), total));
    }

    let mut items = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (item, used) = decode_prefix(rest)?;
        items.push(item);
        rest = &rest[used..];
    }
    Ok((RlpItem::List(items), total))
}

/// Decoded form of a leading tag byte: how many prefix bytes it spans, how
/// many payload bytes follow, and whether the payload is a list.
#[derive(Clone, Copy, Debug)]
struct Header {
    prefix_len: usize,
    payload_len: usize,
    is_list: bool,
}

fn decode_header(raw: &[u8]) -> Result<Header, RlpError> {
    let tag = *raw.first().ok_or(RlpError::Malformed)?;
    let header = match tag {
        // Single byte: the tag is the payload.
        0x00..=0x7f => Header { prefix_len: 0, payload_len: 1, is_list: false },
        0x80..=0xb7 => Header {
            prefix_len: 1,
            payload_len: (tag - STRING_OFFSET) as usize,
            is_list: false,
        },
        0xb8..=0xbf => {
            let len_of_len = (tag - LONG_STRING_OFFSET) as usize;
            Header {
                prefix_len: 1 + len_of_len,
                payload_len: read_be_length(raw, len_of_len)?,
                is_list: false,
            }
        }
        0xc0..=0xf7 => Header {
            prefix_len: 1,
            payload_len: (tag - LIST_OFFSET) as usize,
            is_list: true,
        },
        0xf8..=0xff => {
            let len_of_len = (tag - LONG_LIST_OFFSET) as usize;
            Header {
                prefix_len: 1 + len_of_len,
                payload_len: read_be_length(raw, len_of_len)?,
                is_list: true,
            }
        }
    };
    Ok(header)
}

/// Read a big-endian payload length of `len_of_len` bytes following the tag.
fn read_be_length(raw: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let enc = raw.get(1..1 + len_of_len).ok_or(RlpError::Truncated)?;
    if enc.len() > 8 {
        return Err(RlpError::Overflow);
    }
    let mut len = 0usize;
    for &b in enc {
        len = (len << 8) | b as usize;
    }
    Ok(len)
}

/// Minimal big-endian bytes of an unsigned integer; zero is the empty string.
pub fn uint_to_be(value: U256) -> Bytes {
    value.to_be_bytes_trimmed_vec().into()
}

/// Big-endian bytes of an unsigned integer, left-padded with zeroes to
/// `width` bytes. Values wider than `width` are returned in minimal form.
pub fn uint_to_be_padded(value: U256, width: usize) -> Bytes {
    let min = value.to_be_bytes_trimmed_vec();
    if min.len() >= width {
        return min.into();
    }
    let mut out = vec![0u8; width - min.len()];
    out.extend_from_slice(&min);
    out.into()
}

/// Interpret a big-endian byte string as an unsigned integer; the empty
/// string is zero.
pub fn uint_from_be(bytes: &[u8]) -> Result<U256, RlpError> {
    if bytes.len() > 32 {
        return Err(RlpError::Overflow);
    }
    Ok(U256::from_be_slice(bytes))
}

fn usize_to_be(value: usize) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    fn s(text: &str) -> RlpItem {
        RlpItem::from(text.as_bytes())
    }

    #[test]
    fn encodes_single_bytes() {
        assert_eq!(encode(&RlpItem::from(vec![0x7f])).unwrap(), hex!("7f"));
        assert_eq!(encode(&RlpItem::from(vec![0x80])).unwrap(), hex!("8180"));
        assert_eq!(encode(&RlpItem::from(vec![0x00])).unwrap(), hex!("00"));
    }

    #[test]
    fn encodes_empty_string_and_list() {
        assert_eq!(encode(&RlpItem::bytes(Vec::new())).unwrap(), hex!("80"));
        assert_eq!(encode(&RlpItem::list(Vec::new())).unwrap(), hex!("c0"));
    }

    #[test]
    fn encodes_short_string() {
        assert_eq!(encode(&s("dog")).unwrap(), hex!("83646f67"));
    }

    #[test]
    fn encodes_string_list() {
        let item = RlpItem::list(vec![s("dog"), s("god"), s("cat")]);
        assert_eq!(encode(&item).unwrap(), hex!("cc83646f6783676f6483636174"));
    }

    #[test]
    fn encodes_long_string() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let mut expected = hex!("b838").to_vec();
        expected.extend_from_slice(text.as_bytes());
        assert_eq!(encode(&s(text)).unwrap(), expected);
    }

    #[test]
    fn encodes_nested_lists() {
        // [ [], [[]], [ [], [[]] ] ]
        let item = RlpItem::list(vec![
            RlpItem::list(Vec::new()),
            RlpItem::list(vec![RlpItem::list(Vec::new())]),
            RlpItem::list(vec![
                RlpItem::list(Vec::new()),
                RlpItem::list(vec![RlpItem::list(Vec::new())]),
            ]),
        ]);
        assert_eq!(encode(&item).unwrap(), hex!("c7c0c1c0c3c0c1c0"));
    }

    #[test]
    fn integer_zero_is_empty_string() {
        assert_eq!(uint_to_be(U256::ZERO), Bytes::new());
        assert_eq!(encode(&RlpItem::from(U256::ZERO)).unwrap(), hex!("80"));
    }

    #[test]
    fn integers_are_minimal_big_endian() {
        assert_eq!(uint_to_be(U256::from(15u64)), Bytes::from(vec![0x0f]));
        assert_eq!(
            uint_to_be(U256::from(1024u64)),
            Bytes::from(vec![0x04, 0x00])
        );
        assert_eq!(uint_from_be(&[0x04, 0x00]).unwrap(), U256::from(1024u64));
        assert_eq!(uint_from_be(&[]).unwrap(), U256::ZERO);
    }

    #[test]
    fn padded_integers() {
        assert_eq!(
            uint_to_be_padded(U256::from(1u64), 4),
            Bytes::from(vec![0, 0, 0, 1])
        );
        // width smaller than the minimal form falls back to minimal
        assert_eq!(
            uint_to_be_padded(U256::from(1024u64), 1),
            Bytes::from(vec![0x04, 0x00])
        );
    }

    #[test]
    fn decodes_vectors() {
        assert_eq!(decode(&hex!("80")).unwrap(), RlpItem::bytes(Vec::new()));
        assert_eq!(decode(&hex!("7f")).unwrap(), RlpItem::from(vec![0x7f]));
        assert_eq!(decode(&hex!("83646f67")).unwrap(), s("dog"));
        assert_eq!(
            decode(&hex!("cc83646f6783676f6483636174")).unwrap(),
            RlpItem::list(vec![s("dog"), s("god"), s("cat")])
        );
    }

    #[test]
    fn roundtrips() {
        let items = [
            RlpItem::bytes(Vec::new()),
            RlpItem::from(vec![0x00]),
            RlpItem::from(vec![0x7f]),
            RlpItem::from(vec![0x80]),
            s("dog"),
            s("Lorem ipsum dolor sit amet, consectetur adipisicing elit"),
            RlpItem::list(vec![s("dog"), RlpItem::list(vec![s("god")]), s("cat")]),
            RlpItem::from(vec![0xab; 1024]),
        ];
        for item in items {
            let encoded = encode(&item).unwrap();
            let decoded = decode(&encoded).unwrap();
            assert_eq!(decoded, item);
            assert_eq!(encode(&decoded).unwrap(), encoded);
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode(&[]).unwrap_err(), RlpError::Malformed);
    }

    #[test]
    fn rejects_truncated_input() {
        // claims 3 payload bytes, provides 2
        assert_eq!(decode(&hex!("83646f")).unwrap_err(), RlpError::Truncated);
        // long form with missing length bytes
        assert_eq!(decode(&hex!("b8")).unwrap_err(), RlpError::Truncated);
        // list whose inner item overruns
        assert_eq!(decode(&hex!("c483646f")).unwrap_err(), RlpError::Truncated);
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(
            decode(&hex!("83646f6700")).unwrap_err(),
            RlpError::Malformed
        );
    }
}
