// crates/policy-generator-cli/src/main.rs
// ============================================================================
// Module: Policy Generator CLI Entry Point
// Description: Plugin-host and standalone runner for the policy generator.
// Purpose: Render generator configs to stdout with fail-closed exit codes.
// Dependencies: clap, policy-generator, tracing, tracing-subscriber.
// ============================================================================

//! ## Overview
//! Kustomize-style plugin hosts invoke the binary with the cached generator
//! manifest as the first argument; `--standalone` treats every argument as a
//! config path instead. The generated YAML stream goes to stdout; logs and
//! errors go to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as _;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use policy_generator_cli::CliError;
use policy_generator_cli::CliResult;
use policy_generator_cli::render_paths;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "policy-generator", version)]
struct Cli {
    /// Print the full error chain with error messages.
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,
    /// Run outside of a plugin host; every argument is a config path.
    #[arg(long, action = ArgAction::SetTrue)]
    standalone: bool,
    /// Generator config files or directories.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl Cli {
    /// Returns the config paths, skipping the plugin host's cached manifest.
    fn config_paths(&self) -> &[PathBuf] {
        if self.standalone { &self.paths } else { self.paths.get(1..).unwrap_or_default() }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    match run(&cli) {
        Ok(code) => code,
        Err(err) => emit_error(&err, cli.debug),
    }
}

/// Renders every config path and writes the stream to stdout.
fn run(cli: &Cli) -> CliResult<ExitCode> {
    let paths = cli.config_paths();
    if paths.is_empty() {
        return Err(CliError::new("no generator config paths were provided".to_string()));
    }
    let mut output = render_paths(paths)?;
    output.push(b'\n');
    let mut stdout = std::io::stdout();
    stdout
        .write_all(&output)
        .and_then(|()| stdout.flush())
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(err: &CliError, debug: bool) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "{err}");
    if debug {
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(&mut stderr, "  caused by: {cause}");
            source = cause.source();
        }
    }
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions are permitted.")]

    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn plugin_mode_skips_cached_manifest() {
        let cli = Cli::parse_from(["policy-generator", "cached.yaml", "config.yaml"]);
        assert_eq!(cli.config_paths(), &[PathBuf::from("config.yaml")]);
    }

    #[test]
    fn plugin_mode_without_arguments_has_no_paths() {
        let cli = Cli::parse_from(["policy-generator"]);
        assert!(cli.config_paths().is_empty());
    }

    #[test]
    fn standalone_mode_keeps_every_path() {
        let cli = Cli::parse_from(["policy-generator", "--standalone", "a.yaml", "b"]);
        assert_eq!(cli.config_paths(), &[PathBuf::from("a.yaml"), PathBuf::from("b")]);
        assert!(!cli.debug);
    }
}
