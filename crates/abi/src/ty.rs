use crate::AbiError;
use core::fmt;

/// A parsed ABI type descriptor.
///
/// Descriptors are parsed from their string grammar once and traversed as a
/// tree thereafter; no string inspection happens during encode or decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DynType {
    /// `uintN`, N a multiple of 8 in `8..=256`.
    Uint(usize),
    /// `intN`, N a multiple of 8 in `8..=256`.
    Int(usize),
    /// `bool`, encoded as `uint8` with value 0 or 1.
    Bool,
    /// `address`, encoded as `uint160`.
    Address,
    /// `bytesK`, `1 <= K <= 32`.
    FixedBytes(usize),
    /// Dynamic `bytes`.
    Bytes,
    /// UTF-8 `string`.
    String,
    /// `T[N]` with `N > 1`. The element type is always static: fixed arrays
    /// of dynamic elements are outside the supported grammar.
    FixedArray(Box<DynType>, usize),
    /// Dynamic `T[]`.
    Array(Box<DynType>),
}

impl DynType {
    /// Parse a type descriptor such as `uint256`, `bytes32` or `address[4]`.
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let s = s.trim();
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(Self::parse(inner)?)));
        }
        if let Some(open) = s.rfind('[') {
            let Some(len) = s[open + 1..].strip_suffix(']') else {
                return Err(AbiError::Unsupported(s.into()));
            };
            let len: usize = len
                .parse()
                .map_err(|_| AbiError::Unsupported(s.into()))?;
            if len < 2 {
                // one-element fixed arrays are indistinguishable from their
                // element in the head layout and are rejected outright
                return Err(AbiError::Unsupported(s.into()));
            }
            let inner = Self::parse(&s[..open])?;
            if inner.is_dynamic() {
                return Err(AbiError::Unsupported(s.into()));
            }
            return Ok(Self::FixedArray(Box::new(inner), len));
        }

        match s {
            "bool" => return Ok(Self::Bool),
            "address" => return Ok(Self::Address),
            "bytes" => return Ok(Self::Bytes),
            "string" => return Ok(Self::String),
            _ => {}
        }
        if let Some(k) = s.strip_prefix("bytes") {
            let k: usize = k.parse().map_err(|_| AbiError::Unsupported(s.into()))?;
            if !(1..=32).contains(&k) {
                return Err(AbiError::Unsupported(s.into()));
            }
            return Ok(Self::FixedBytes(k));
        }
        if let Some(bits) = s.strip_prefix("uint") {
            return Ok(Self::Uint(parse_bits(s, bits)?));
        }
        if let Some(bits) = s.strip_prefix("int") {
            return Ok(Self::Int(parse_bits(s, bits)?));
        }
        Err(AbiError::Unsupported(s.into()))
    }

    /// Parse a parenthesised comma list such as `(uint256,address[])`.
    pub fn parse_tuple(s: &str) -> Result<Vec<Self>, AbiError> {
        let s = s.trim();
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| AbiError::Unsupported(s.into()))?;
        if inner.is_empty() {
            return Ok(Vec::new());
        }
        inner.split(',').map(Self::parse).collect()
    }

    /// Whether values of this type live in the tail, reached via a head
    /// offset word.
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String | Self::Array(_))
    }

    /// Number of 32-byte head words this type occupies in a sequence.
    ///
    /// Dynamic types occupy a single offset word; fixed arrays inline the
    /// head words of each element.
    pub fn head_slots(&self) -> usize {
        match self {
            Self::FixedArray(inner, len) => len * inner.head_slots(),
            _ => 1,
        }
    }
}

fn parse_bits(whole: &str, bits: &str) -> Result<usize, AbiError> {
    let bits: usize = bits
        .parse()
        .map_err(|_| AbiError::Unsupported(whole.into()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::Unsupported(whole.into()));
    }
    Ok(bits)
}

impl fmt::Display for DynType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Bool => f.write_str("bool"),
            Self::Address => f.write_str("address"),
            Self::FixedBytes(k) => write!(f, "bytes{k}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            Self::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(DynType::parse("uint256").unwrap(), DynType::Uint(256));
        assert_eq!(DynType::parse("int8").unwrap(), DynType::Int(8));
        assert_eq!(DynType::parse("bool").unwrap(), DynType::Bool);
        assert_eq!(DynType::parse("address").unwrap(), DynType::Address);
        assert_eq!(DynType::parse("bytes32").unwrap(), DynType::FixedBytes(32));
        assert_eq!(DynType::parse("bytes").unwrap(), DynType::Bytes);
        assert_eq!(DynType::parse("string").unwrap(), DynType::String);
    }

    #[test]
    fn parses_arrays() {
        assert_eq!(
            DynType::parse("uint256[]").unwrap(),
            DynType::Array(Box::new(DynType::Uint(256)))
        );
        assert_eq!(
            DynType::parse("address[4]").unwrap(),
            DynType::FixedArray(Box::new(DynType::Address), 4)
        );
        assert_eq!(
            DynType::parse("uint8[2][]").unwrap(),
            DynType::Array(Box::new(DynType::FixedArray(
                Box::new(DynType::Uint(8)),
                2
            )))
        );
    }

    #[test]
    fn rejects_bad_descriptors() {
        for bad in [
            "uint7", "uint0", "uint264", "int12", "bytes0", "bytes33", "fixed128x18",
            "ufixed", "tuple", "uint256[1]", "uint256[0]", "string[2]", "bytes[3]",
            "uint256[][2]",
        ] {
            assert!(
                matches!(DynType::parse(bad), Err(AbiError::Unsupported(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn parses_tuples() {
        let types = DynType::parse_tuple("(uint256,uint256[])").unwrap();
        assert_eq!(
            types,
            vec![
                DynType::Uint(256),
                DynType::Array(Box::new(DynType::Uint(256)))
            ]
        );
        assert!(DynType::parse_tuple("()").unwrap().is_empty());
    }

    #[test]
    fn head_slots_inline_fixed_arrays() {
        assert_eq!(DynType::parse("uint256").unwrap().head_slots(), 1);
        assert_eq!(DynType::parse("uint256[]").unwrap().head_slots(), 1);
        assert_eq!(DynType::parse("uint256[3]").unwrap().head_slots(), 3);
        assert_eq!(DynType::parse("uint8[2][3]").unwrap().head_slots(), 6);
    }

    #[test]
    fn displays_canonical_forms() {
        for s in ["uint256", "bytes32", "address[4]", "uint8[2][]", "string"] {
            assert_eq!(DynType::parse(s).unwrap().to_string(), s);
        }
    }
}
