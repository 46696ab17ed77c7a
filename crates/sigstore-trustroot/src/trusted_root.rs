//! Trusted root loading and record decoding
//!
//! The trusted root is decoded one level at a time so that a malformed
//! authority or certificate only affects itself. The top-level document must
//! be a JSON object or `null`; everything below it is decoded on demand
//! through the record types in this module.

use crate::encoding::Base64;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// The two kinds of authority carried by a trusted root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorityKind {
    /// Fulcio-style certificate authorities
    CertificateAuthorities,
    /// RFC 3161 timestamp authorities
    TimestampAuthorities,
}

impl AuthorityKind {
    /// All kinds, in processing order
    pub const ALL: [AuthorityKind; 2] = [
        AuthorityKind::CertificateAuthorities,
        AuthorityKind::TimestampAuthorities,
    ];

    /// Key used for this kind in both the trusted root and the descriptor
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityKind::CertificateAuthorities => "certificateAuthorities",
            AuthorityKind::TimestampAuthorities => "timestampAuthorities",
        }
    }
}

impl fmt::Display for AuthorityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `trusted_root.json`
#[derive(Debug, Clone)]
pub struct TrustedRootDocument {
    fields: Map<String, Value>,
}

impl TrustedRootDocument {
    /// Parse a trusted root from JSON
    ///
    /// Fails if the text is not JSON or its top level is neither an object
    /// nor `null`. A `null` document holds no authorities.
    pub fn from_json(json: &str) -> Result<Self> {
        let fields: Option<Map<String, Value>> = serde_json::from_str(json)?;
        Ok(Self {
            fields: fields.unwrap_or_default(),
        })
    }

    /// Load a trusted root from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Get the raw authority entries of the given kind
    ///
    /// Entries are returned undecoded; use [`AuthorityRecord::from_value`] on
    /// each one.
    pub fn authorities(&self, kind: AuthorityKind) -> Result<&[Value]> {
        match self.fields.get(kind.as_str()) {
            None => Err(Error::MissingField(kind.as_str().to_string())),
            Some(Value::Array(entries)) => Ok(entries),
            Some(_) => Err(Error::UnexpectedType {
                field: kind.as_str().to_string(),
                expected: "sequence",
            }),
        }
    }
}

/// An authority entry, reduced to the parts needed for assembly
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityRecord {
    /// Certificate chain
    pub cert_chain: CertChainRecord,
}

impl AuthorityRecord {
    /// Decode an authority from its JSON value
    ///
    /// Fails if the value is not a mapping, or lacks a `certChain` mapping
    /// holding a `certificates` sequence.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|source| Error::Malformed {
            what: "authority",
            source,
        })
    }
}

/// Certificate chain of an authority
///
/// Certificates stay undecoded so each one can fail independently.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertChainRecord {
    /// Certificates in the chain, leaf first
    pub certificates: Vec<Value>,
}

/// A single certificate of a chain
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Raw bytes of the certificate (DER, base64-encoded)
    pub raw_bytes: Base64,
}

impl CertificateRecord {
    /// Decode a certificate from its JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|source| Error::Malformed {
            what: "certificate",
            source,
        })
    }
}
