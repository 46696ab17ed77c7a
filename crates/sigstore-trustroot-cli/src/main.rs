//! assemble-offline-trustroot
//!
//! Builds a TrustRoot descriptor from a Sigstore `trusted_root.json` and a
//! YAML template. All diagnostics go to stderr.

use clap::Parser;
use sigstore_trustroot::config::{
    DEFAULT_COMMON_NAME, DEFAULT_ORGANIZATION, DEFAULT_OUTPUT_PATH, DEFAULT_TEMPLATE_PATH,
    DEFAULT_TRUSTED_ROOT_PATH, DEFAULT_URI,
};
use sigstore_trustroot::{assemble, AssembleOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Assemble an offline TrustRoot from a Sigstore trusted root
#[derive(Parser, Debug)]
#[command(name = "assemble-offline-trustroot", version, about, long_about = None)]
struct Args {
    /// The name of the output TrustRoot file
    #[arg(long = "output-trustroot-filepath", default_value = DEFAULT_OUTPUT_PATH)]
    output_trustroot_filepath: PathBuf,

    /// The path to the template file
    #[arg(long = "template-filepath", default_value = DEFAULT_TEMPLATE_PATH)]
    template_filepath: PathBuf,

    /// The path to the trusted_root.json file
    #[arg(long = "trusted-root-path", default_value = DEFAULT_TRUSTED_ROOT_PATH)]
    trusted_root_path: PathBuf,

    /// The organization name
    #[arg(long, default_value = DEFAULT_ORGANIZATION)]
    organization: String,

    /// The common name
    #[arg(long = "commonName", default_value = DEFAULT_COMMON_NAME)]
    common_name: String,

    /// The URI
    #[arg(long, default_value = DEFAULT_URI)]
    uri: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for AssembleOptions {
    fn from(args: Args) -> Self {
        AssembleOptions {
            output_path: args.output_trustroot_filepath,
            template_path: args.template_filepath,
            trusted_root_path: args.trusted_root_path,
            organization: args.organization,
            common_name: args.common_name,
            uri: args.uri,
        }
    }
}

/// Initialize tracing subscriber for logging to stderr
fn init_logging(verbose: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = AssembleOptions::from(args).with_expanded_paths();
    match assemble(&options) {
        Ok(report) => {
            tracing::info!(
                "Wrote {} authorities ({} entries and {} certificates skipped)",
                report.patched.len(),
                report.skipped_entries,
                report.skipped_certificates
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
