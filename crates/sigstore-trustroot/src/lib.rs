//! Offline TrustRoot assembly from a Sigstore trusted root
//!
//! This crate reads a Sigstore `trusted_root.json`, re-encodes the certificate
//! chains of its authorities as PEM and writes them into a YAML `TrustRoot`
//! descriptor template:
//! - Certificate authorities (Fulcio)
//! - Timestamp authorities (RFC 3161 TSAs)
//!
//! Each authority ends up at `spec.sigstoreKeys.<kind>[<index>]` with a
//! `subject`, a `uri` and a `certChain` holding the base64 of the
//! concatenated PEM chain.
//!
//! # Example
//!
//! ```no_run
//! use sigstore_trustroot::{assemble, AssembleOptions};
//!
//! let options = AssembleOptions {
//!     template_path: "trustroot.template.yaml".into(),
//!     trusted_root_path: "trusted_root.json".into(),
//!     output_path: "trustroot.yaml".into(),
//!     ..Default::default()
//! };
//! let report = assemble(&options).unwrap();
//! println!("wrote {} authorities", report.patched.len());
//! ```

pub mod assemble;
pub mod config;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod template;
pub mod transcode;
pub mod trusted_root;

pub use assemble::{assemble, AssembleReport};
pub use config::{expand_home, AssembleOptions};
pub use descriptor::{AuthorityEntry, AuthoritySubject, TrustRootDescriptor};
pub use encoding::Base64;
pub use error::{Error, Result};
pub use template::materialize;
pub use transcode::{certificate_to_pem, transcode_chain, PemChain};
pub use trusted_root::{
    AuthorityKind, AuthorityRecord, CertChainRecord, CertificateRecord, TrustedRootDocument,
};
