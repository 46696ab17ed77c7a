//! Base64 wrapper shared by the trusted root and the descriptor
//!
//! Both documents carry binary data as standard-alphabet base64 strings:
//! `rawBytes` on the input side and `certChain` on the output side.

use crate::error::Result;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Base64-encoded data (standard alphabet, padded)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Base64(String);

impl Base64 {
    /// Wrap an already-encoded string
    ///
    /// Note: This does not validate the encoding. Use `decode()` for that.
    pub fn new(s: String) -> Self {
        Base64(s)
    }

    /// Encode raw bytes
    pub fn encode(bytes: impl AsRef<[u8]>) -> Self {
        Base64(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Decode the string to bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.0)?)
    }
}

impl PartialEq<str> for Base64 {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Base64 {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
