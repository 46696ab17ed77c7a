//! The assembly pipeline
//!
//! Loads the trusted root, copies the template into place, patches one
//! descriptor entry per authority and writes the result once at the end.
//! Problems with individual authorities or certificates are logged and
//! skipped; only missing options and unusable files abort the run.

use crate::config::AssembleOptions;
use crate::descriptor::{AuthorityEntry, AuthoritySubject, TrustRootDescriptor};
use crate::template::materialize;
use crate::transcode::transcode_chain;
use crate::trusted_root::{AuthorityKind, AuthorityRecord, TrustedRootDocument};
use crate::{Error, Result};
use std::path::PathBuf;

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleReport {
    /// Descriptor entries that were written, in processing order
    pub patched: Vec<(AuthorityKind, usize)>,
    /// Authority entries left out of the descriptor
    pub skipped_entries: usize,
    /// Certificates left out of otherwise written chains
    pub skipped_certificates: usize,
    /// Where the descriptor was written
    pub output_path: PathBuf,
}

impl AssembleReport {
    /// Number of entries written for one authority kind
    pub fn patched_count(&self, kind: AuthorityKind) -> usize {
        self.patched.iter().filter(|(k, _)| *k == kind).count()
    }
}

/// Run the whole assembly
pub fn assemble(options: &AssembleOptions) -> Result<AssembleReport> {
    options.validate()?;

    tracing::info!("Template File Path: {}", options.template_path.display());
    tracing::info!("Trusted Root Path: {}", options.trusted_root_path.display());
    tracing::info!("Output Filename: {}", options.output_path.display());
    tracing::info!("Organization: {}", options.organization);
    tracing::info!("Common Name: {}", options.common_name);
    tracing::info!("URI: {}", options.uri);

    let trusted_root = TrustedRootDocument::from_file(&options.trusted_root_path)?;
    materialize(&options.template_path, &options.output_path)?;

    let mut descriptor = match TrustRootDescriptor::from_file(&options.output_path) {
        Ok(descriptor) => Some(descriptor),
        Err(e @ Error::Io { .. }) => return Err(e),
        Err(e) => {
            tracing::warn!(
                "Leaving {} as a copy of the template: {}",
                options.output_path.display(),
                e
            );
            None
        }
    };

    let subject = AuthoritySubject {
        organization: options.organization.clone(),
        common_name: options.common_name.clone(),
    };
    let mut report = AssembleReport {
        output_path: options.output_path.clone(),
        ..Default::default()
    };

    for kind in AuthorityKind::ALL {
        let authorities = match trusted_root.authorities(kind) {
            Ok(authorities) => authorities,
            Err(e) => {
                tracing::warn!("No {} found in trusted root: {}", kind, e);
                continue;
            }
        };
        tracing::info!("There are {} {}", authorities.len(), kind);

        for (i, value) in authorities.iter().enumerate() {
            let label = format!("{}[{}]", kind, i);
            let record = match AuthorityRecord::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", label, e);
                    report.skipped_entries += 1;
                    continue;
                }
            };

            let chain = transcode_chain(&label, &record.cert_chain);
            let entry = AuthorityEntry {
                subject: subject.clone(),
                uri: options.uri.clone(),
                cert_chain: chain.cert_chain(),
            };

            let Some(doc) = descriptor.as_mut() else {
                tracing::warn!("Skipping {}: descriptor not loaded", label);
                report.skipped_entries += 1;
                continue;
            };
            match doc.patch_authority(kind, i, &entry) {
                Ok(()) => {
                    tracing::debug!("Wrote {} with {} certificates", label, chain.included());
                    report.skipped_certificates += chain.skipped();
                    report.patched.push((kind, i));
                }
                Err(e) => {
                    tracing::warn!("Error updating YAML for {}: {}", label, e);
                    report.skipped_entries += 1;
                }
            }
        }
    }

    match descriptor {
        Some(descriptor) if !report.patched.is_empty() => {
            descriptor.write_to(&options.output_path)?;
            tracing::info!("Output written to {}", options.output_path.display());
        }
        _ => tracing::info!(
            "No authorities written; {} is a copy of the template",
            options.output_path.display()
        ),
    }

    Ok(report)
}
