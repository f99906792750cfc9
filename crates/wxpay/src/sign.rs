//! Canonical MD5 signing shared by request signing and client handoffs.
//!
//! The canonical string is every non-empty parameter except `sign`, sorted
//! by key in byte order, rendered as `k=v&` and terminated by `key=<secret>`.
//! Values are never URL-encoded. The digest is rendered as uppercase hex.

use md5::{Digest, Md5};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use subtle::ConstantTimeEq;

use crate::constants::SIGN_FIELD;

/// Signable parameter set. `BTreeMap` iterates keys in byte order, which is
/// the order the canonical string requires.
pub type Params = BTreeMap<String, ParamValue>;

/// A parameter value: the gateway mixes strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl ParamValue {
    /// Empty strings and zero integers are omitted from every signed or
    /// serialized representation.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::Int(n) => *n == 0,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

/// Build the string that gets hashed. Exposed for diagnostics; never log it
/// outside of tests since it ends with the secret key.
pub fn canonical_string(params: &Params, secret_key: &str) -> String {
    let mut out = String::new();
    for (key, value) in params
        .iter()
        .filter(|(key, value)| key.as_str() != SIGN_FIELD && !value.is_empty())
    {
        let _ = write!(out, "{key}={value}&");
    }
    out.push_str("key=");
    out.push_str(secret_key);
    out
}

/// Sign a parameter set with the merchant API key.
/// Returns the 32-character uppercase hex MD5 digest.
pub fn sign(params: &Params, secret_key: &str) -> String {
    let digest = Md5::digest(canonical_string(params, secret_key).as_bytes());
    hex::encode_upper(digest)
}

/// Check a presented signature against the parameter set.
///
/// Comparison is case-insensitive on the hex digits and runs in constant time.
pub fn verify(params: &Params, secret_key: &str, signature: &str) -> bool {
    let expected = sign(params, secret_key);
    let presented = signature.to_ascii_uppercase();
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

mod hex {
    pub fn encode_upper(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02X}");
            s
        })
    }
}
