//! Loosely-typed values as they come back from ledger queries

use crate::models::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A single raw ledger value.
///
/// Integers wider than a JSON number arrive as decimal or `0x` hex strings,
/// addresses as `0x`-prefixed hex strings. Tuples are positional lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(u64),
    Text(String),
    List(Vec<RawValue>),
    Record(BTreeMap<String, RawValue>),
}

impl RawValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            RawValue::Number(n) => Some(u128::from(*n)),
            RawValue::Text(s) => parse_uint(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_u128().and_then(|v| u64::try_from(v).ok())
    }

    pub fn as_u8(&self) -> Option<u8> {
        self.as_u128().and_then(|v| u8::try_from(v).ok())
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            RawValue::Text(s) => Address::from_str(s).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, RawValue>> {
        match self {
            RawValue::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Positional element of a tuple
    pub fn at(&self, index: usize) -> Option<&RawValue> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Named field of a record, trying each alias in turn
    pub fn field(&self, names: &[&str]) -> Option<&RawValue> {
        let fields = self.as_record()?;
        names.iter().find_map(|name| fields.get(*name))
    }

    /// Short description of the value's shape for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Bool(_) => "bool",
            RawValue::Number(_) => "number",
            RawValue::Text(_) => "text",
            RawValue::List(_) => "list",
            RawValue::Record(_) => "record",
        }
    }
}

/// Parse a decimal or `0x` hex unsigned integer
fn parse_uint(s: &str) -> Option<u128> {
    let s = s.trim();
    if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex_digits.is_empty() || hex_digits.len() > 32 {
            return None;
        }
        u128::from_str_radix(hex_digits, 16).ok()
    } else if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse::<u128>().ok()
    } else {
        None
    }
}
