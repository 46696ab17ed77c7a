//! Template materialization

use crate::{Error, Result};
use std::path::Path;

/// Copy the template to the output path, creating or truncating it
///
/// The template is read in full before the output is touched, so a missing
/// template never leaves an output file behind. Returns the number of bytes
/// written.
pub fn materialize(template: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
    let (template, output) = (template.as_ref(), output.as_ref());

    let contents = std::fs::read(template).map_err(|e| Error::io(template, e))?;
    std::fs::write(output, &contents).map_err(|e| Error::io(output, e))?;

    tracing::debug!(
        "Copied template {} to {} ({} bytes)",
        template.display(),
        output.display(),
        contents.len()
    );
    Ok(contents.len() as u64)
}
