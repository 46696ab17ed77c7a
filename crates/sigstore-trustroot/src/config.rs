//! Assembly options

use crate::{Error, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Default output location of the assembled descriptor
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/trustroot.yaml";
/// Default descriptor template
pub const DEFAULT_TEMPLATE_PATH: &str = "trustroot.template.yaml";
/// Default trusted root, as laid out by a TUF client
pub const DEFAULT_TRUSTED_ROOT_PATH: &str = "~/.sigstore/root/targets/trusted_root.json";
pub const DEFAULT_ORGANIZATION: &str = "GitHub, Inc.";
pub const DEFAULT_COMMON_NAME: &str = "Internal Services Root";
pub const DEFAULT_URI: &str = "https://fulcio.githubapp.com";

/// Everything needed for one assembly run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Where the assembled descriptor is written
    pub output_path: PathBuf,
    /// Descriptor template copied to `output_path` before patching
    pub template_path: PathBuf,
    /// The `trusted_root.json` to read authorities from
    pub trusted_root_path: PathBuf,
    /// Subject organization written for every authority
    pub organization: String,
    /// Subject common name written for every authority
    pub common_name: String,
    /// URI written for every authority
    pub uri: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            trusted_root_path: PathBuf::from(DEFAULT_TRUSTED_ROOT_PATH),
            organization: DEFAULT_ORGANIZATION.to_string(),
            common_name: DEFAULT_COMMON_NAME.to_string(),
            uri: DEFAULT_URI.to_string(),
        }
    }
}

impl AssembleOptions {
    /// Check that the required paths were provided
    ///
    /// An empty path counts as not provided.
    pub fn validate(&self) -> Result<()> {
        if self.template_path.as_os_str().is_empty() {
            return Err(Error::MissingArgument("template-filepath"));
        }
        if self.trusted_root_path.as_os_str().is_empty() {
            return Err(Error::MissingArgument("trusted-root-path"));
        }
        Ok(())
    }

    /// Expand a leading `~` in every path
    pub fn with_expanded_paths(mut self) -> Self {
        self.output_path = expand_home(&self.output_path);
        self.template_path = expand_home(&self.template_path);
        self.trusted_root_path = expand_home(&self.trusted_root_path);
        self
    }
}

/// Replace a leading `~` component with the current user's home directory
///
/// Paths that do not start with `~`, or a home directory that cannot be
/// determined, leave the path unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) if rest.as_os_str().is_empty() => dirs.home_dir().to_path_buf(),
        Some(dirs) => dirs.home_dir().join(rest),
        None => {
            tracing::warn!("Could not determine home directory for {}", path.display());
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        AssembleOptions::default().validate().unwrap();
    }

    #[test]
    fn test_empty_template_path_is_missing() {
        let options = AssembleOptions {
            template_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(Error::MissingArgument("template-filepath"))
        ));
    }

    #[test]
    fn test_empty_trusted_root_path_is_missing() {
        let options = AssembleOptions {
            trusted_root_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(Error::MissingArgument("trusted-root-path"))
        ));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(
            expand_home(Path::new("/etc/trustroot.yaml")),
            PathBuf::from("/etc/trustroot.yaml")
        );
        assert_eq!(
            expand_home(Path::new("~other/file")),
            PathBuf::from("~other/file")
        );

        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(
                expand_home(Path::new("~/.sigstore/root")),
                dirs.home_dir().join(".sigstore/root")
            );
            assert_eq!(expand_home(Path::new("~")), dirs.home_dir());
        }
    }
}
