// crates/policy-generator-cli/src/render.rs
// ============================================================================
// Module: Config Rendering
// Description: Runs generator configs through the policy generator.
// Purpose: Map each config file to its document stream with CLI-level errors.
// Dependencies: policy-generator, thiserror, tracing
// ============================================================================

//! ## Overview
//! Each config file gets its own generator instance; nothing is shared
//! between files. Errors name the config file and keep the generator error as
//! their source so `--debug` can print the full chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use policy_generator::GeneratorError;
use policy_generator::PolicyGenerator;
use thiserror::Error;
use tracing::info;

use crate::discovery::collect_config_paths;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message and the underlying cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Human-readable error message.
    message: String,
    /// Generator failure behind the message, when there is one.
    #[source]
    source: Option<GeneratorError>,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self {
            message,
            source: None,
        }
    }

    /// Constructs a [`CliError`] wrapping a generator failure.
    #[must_use]
    pub const fn with_source(message: String, source: GeneratorError) -> Self {
        Self {
            message,
            source: Some(source),
        }
    }
}

/// CLI result alias for fallible operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Expands every path and renders each discovered config in order.
///
/// # Errors
///
/// Returns the first [`CliError`] raised by discovery or rendering.
pub fn render_paths(paths: &[PathBuf]) -> CliResult<Vec<u8>> {
    let mut output = Vec::new();
    for path in paths {
        for config in collect_config_paths(path)? {
            output.extend(render_config(&config)?);
        }
    }
    Ok(output)
}

/// Reads one generator config and returns its generated documents.
///
/// # Errors
///
/// Returns [`CliError`] when the file cannot be read, the config is invalid,
/// or generation fails.
pub fn render_config(path: &Path) -> CliResult<Vec<u8>> {
    let shown = path.display();
    let bytes = fs::read(path)
        .map_err(|err| CliError::new(format!("failed to read file '{shown}': {err}")))?;
    let generator = PolicyGenerator::from_yaml(&bytes).map_err(|err| {
        CliError::with_source(format!("error parsing config file '{shown}': {err}"), err)
    })?;
    let output = generator.generate().map_err(|err| {
        CliError::with_source(
            format!("error generating policies from config file '{shown}': {err}"),
            err,
        )
    })?;
    info!(config = %shown, bytes = output.len(), "rendered generator config");
    Ok(output)
}
