//! JSON contract interfaces, selectors and call-by-name resolution.

use crate::{encode_sequence, AbiError, DynType, DynValue};
use alloy_primitives::{keccak256, Bytes, B256};
use serde::{Deserialize, Serialize};

/// One input of a function or event entry.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Param {
    /// Parameter name; may be empty.
    #[serde(default)]
    pub name: String,
    /// Type descriptor string, e.g. `uint256`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether an event input is indexed into the log topics.
    #[serde(default)]
    pub indexed: bool,
}

/// One entry of a contract interface. Unknown JSON members (outputs, state
/// mutability, …) are ignored.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Entry {
    /// Entry kind: `function`, `event`, `constructor`, …
    #[serde(rename = "type")]
    pub kind: String,
    /// Entry name; absent for constructors and fallbacks.
    #[serde(default)]
    pub name: String,
    /// Declared inputs.
    #[serde(default)]
    pub inputs: Vec<Param>,
}

impl Entry {
    /// The canonical signature string, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// The 4-byte function selector: the leading bytes of the signature's
    /// Keccak-256 digest.
    pub fn selector(&self) -> [u8; 4] {
        let digest = keccak256(self.signature().as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    /// The full 32-byte signature digest, used as an event's first topic.
    pub fn topic0(&self) -> B256 {
        keccak256(self.signature().as_bytes())
    }

    /// Parse the input type descriptors.
    pub fn input_types(&self) -> Result<Vec<DynType>, AbiError> {
        self.inputs.iter().map(|p| DynType::parse(&p.ty)).collect()
    }
}

/// Encode a call to a specific entry: selector followed by the encoded
/// argument sequence.
pub fn encode_call(entry: &Entry, args: &[DynValue]) -> Result<Bytes, AbiError> {
    let mut out = entry.selector().to_vec();
    out.extend_from_slice(&encode_sequence(&entry.input_types()?, args)?);
    Ok(out.into())
}

/// A parsed contract interface.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Interface {
    entries: Vec<Entry>,
}

impl Interface {
    /// Build an interface from its entries.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parse an interface from its JSON array form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// All entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The function entries.
    pub fn functions(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.kind == "function")
    }

    /// The event entries.
    pub fn events(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.kind == "event")
    }

    /// Find a function by name, arity and argument compatibility (a trial
    /// encoding of the arguments must succeed). The first acceptable entry
    /// wins; mismatching candidates are skipped silently.
    pub fn find_function(
        &self,
        name: &str,
        args: &[DynValue],
    ) -> Result<&Entry, AbiError> {
        self.candidates(name, args).next().ok_or(AbiError::NoMatch)
    }

    /// As [`find_function`](Self::find_function), but errs with
    /// [`AbiError::Ambiguous`] when two candidates with distinct type lists
    /// both accept the arguments.
    pub fn find_function_strict(
        &self,
        name: &str,
        args: &[DynValue],
    ) -> Result<&Entry, AbiError> {
        let mut candidates = self.candidates(name, args);
        let first = candidates.next().ok_or(AbiError::NoMatch)?;
        for other in candidates {
            if other.input_types()? != first.input_types()? {
                return Err(AbiError::Ambiguous);
            }
        }
        Ok(first)
    }

    /// Encode a call by function name: resolve the entry, then prepend its
    /// selector to the encoded arguments.
    pub fn encode_call(&self, name: &str, args: &[DynValue]) -> Result<Bytes, AbiError> {
        encode_call(self.find_function(name, args)?, args)
    }

    fn candidates<'s: 'a, 'a>(
        &'s self,
        name: &'a str,
        args: &'a [DynValue],
    ) -> impl Iterator<Item = &'s Entry> + 'a {
        self.functions().filter(move |entry| {
            entry.name == name
                && entry.inputs.len() == args.len()
                && entry
                    .input_types()
                    .and_then(|types| encode_sequence(&types, args))
                    .is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex, U256};

    fn erc20() -> Interface {
        Interface::from_json(
            r#"[
                {"type": "function", "name": "transfer", "inputs": [
                    {"name": "to", "type": "address"},
                    {"name": "value", "type": "uint256"}
                ]},
                {"type": "function", "name": "balanceOf", "inputs": [
                    {"name": "owner", "type": "address"}
                ]},
                {"type": "event", "name": "Transfer", "inputs": [
                    {"name": "from", "type": "address", "indexed": true},
                    {"name": "to", "type": "address", "indexed": true},
                    {"name": "value", "type": "uint256"}
                ]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn computes_signature_and_selector() {
        let interface = erc20();
        let transfer = interface.functions().next().unwrap();
        assert_eq!(transfer.signature(), "transfer(address,uint256)");
        assert_eq!(transfer.selector(), hex!("a9059cbb"));
    }

    #[test]
    fn computes_event_topic() {
        let interface = erc20();
        let event = interface.events().next().unwrap();
        assert_eq!(
            event.topic0(),
            B256::from(hex!(
                "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
            ))
        );
    }

    #[test]
    fn encodes_call_by_name() {
        let interface = erc20();
        let args = [
            DynValue::Address(address!("abcdefabcdefabcdefabcdefabcdefabcdefabcd")),
            DynValue::Uint(U256::from(10u64).pow(U256::from(18u64))),
        ];
        let call = interface.encode_call("transfer", &args).unwrap();
        assert_eq!(
            call,
            Bytes::from(hex!(
                "a9059cbb"
                "000000000000000000000000abcdefabcdefabcdefabcdefabcdefabcdefabcd"
                "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
            ))
        );
    }

    #[test]
    fn rejects_unknown_and_mismatched_calls() {
        let interface = erc20();
        assert_eq!(
            interface.encode_call("mint", &[]).unwrap_err(),
            AbiError::NoMatch
        );
        // right name, wrong argument type
        assert_eq!(
            interface
                .encode_call("transfer", &[DynValue::Bool(true), DynValue::Bool(false)])
                .unwrap_err(),
            AbiError::NoMatch
        );
    }

    #[test]
    fn strict_mode_surfaces_ambiguity() {
        let interface = Interface::from_json(
            r#"[
                {"type": "function", "name": "f", "inputs": [{"name": "x", "type": "uint256"}]},
                {"type": "function", "name": "f", "inputs": [{"name": "x", "type": "uint128"}]}
            ]"#,
        )
        .unwrap();
        let args = [DynValue::Uint(U256::from(1u64))];
        // first success wins in the default mode
        let entry = interface.find_function("f", &args).unwrap();
        assert_eq!(entry.inputs[0].ty, "uint256");
        assert_eq!(
            interface.find_function_strict("f", &args).unwrap_err(),
            AbiError::Ambiguous
        );
    }
}
