//! TrustRoot descriptor patching
//!
//! The descriptor is kept as a generic YAML tree so that everything the
//! template carries besides the authority fields survives untouched. Only
//! `spec.sigstoreKeys.<kind>[<index>]` is written, through [`AuthorityEntry`].

use crate::encoding::Base64;
use crate::trusted_root::AuthorityKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde::ser::Error as _;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Subject of an authority in the descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoritySubject {
    /// Organization name
    pub organization: String,

    /// Common name
    pub common_name: String,
}

/// Fields written for each authority in the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityEntry {
    /// Subject information
    pub subject: AuthoritySubject,

    /// URI of the authority
    pub uri: String,

    /// Base64 of the concatenated PEM certificate chain
    pub cert_chain: Base64,
}

/// A TrustRoot descriptor loaded from YAML
#[derive(Debug, Clone, PartialEq)]
pub struct TrustRootDescriptor {
    root: Value,
}

impl TrustRootDescriptor {
    /// Parse a descriptor from YAML
    ///
    /// Only the first document of a multi-document stream is kept. Empty
    /// input yields a null tree.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root = match serde_yaml::Deserializer::from_str(yaml).next() {
            Some(document) => Value::deserialize(document)?,
            None => Value::Null,
        };
        Ok(Self { root })
    }

    /// Load a descriptor from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&yaml)
    }

    /// Serialize the descriptor to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Serialize the descriptor and overwrite `path` with it
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| Error::io(path, e))
    }

    fn sigstore_keys_mut(&mut self) -> Result<&mut Mapping> {
        let spec = self
            .root
            .get_mut("spec")
            .filter(|spec| spec.is_mapping())
            .ok_or(Error::MissingSection("spec"))?;
        spec.get_mut("sigstoreKeys")
            .and_then(Value::as_mapping_mut)
            .ok_or(Error::MissingSection("sigstoreKeys"))
    }

    /// Current entries for an authority kind, if it is a sequence
    pub fn authorities(&self, kind: AuthorityKind) -> Option<&[Value]> {
        self.root
            .get("spec")?
            .get("sigstoreKeys")?
            .get(kind.as_str())?
            .as_sequence()
            .map(Vec::as_slice)
    }

    /// Write `entry` at `spec.sigstoreKeys.<kind>[index]`
    ///
    /// The sequence is created if missing and padded with empty mappings up
    /// to `index`. An existing element at `index` keeps any keys other than
    /// `subject`, `uri` and `certChain`; a non-mapping element is replaced.
    pub fn patch_authority(
        &mut self,
        kind: AuthorityKind,
        index: usize,
        entry: &AuthorityEntry,
    ) -> Result<()> {
        let fields = match serde_yaml::to_value(entry)? {
            Value::Mapping(fields) => fields,
            other => {
                return Err(Error::Yaml(serde_yaml::Error::custom(format!(
                    "authority entry serialized to {other:?}"
                ))))
            }
        };

        let keys = self.sigstore_keys_mut()?;
        let slot = keys
            .entry(Value::String(kind.as_str().to_string()))
            .or_insert(Value::Null);
        let mut list = match std::mem::replace(slot, Value::Null) {
            Value::Sequence(list) => list,
            _ => Vec::new(),
        };

        if list.len() <= index {
            list.resize(index + 1, Value::Mapping(Mapping::new()));
        }

        let mut target = match std::mem::replace(&mut list[index], Value::Null) {
            Value::Mapping(target) => target,
            _ => Mapping::new(),
        };
        for (key, value) in fields {
            target.insert(key, value);
        }
        list[index] = Value::Mapping(target);
        *slot = Value::Sequence(list);
        Ok(())
    }
}
