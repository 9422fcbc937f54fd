// crates/policy-generator/src/error.rs
// ============================================================================
// Module: Policy Generator Errors
// Description: Error kinds surfaced by the generation pipeline.
// Purpose: Give every component one fail-closed error type to propagate.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every stage of the pipeline returns [`GeneratorError`]. Errors are terminal
//! for the current invocation: callers must discard any partially written
//! output buffer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while decoding, validating, or generating policies.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A referenced path could not be read.
    #[error("read error: {0}")]
    Read(String),
    /// Input bytes are not valid YAML or a document is not a YAML object.
    #[error("format error: {0}")]
    Format(String),
    /// A semantic configuration rule was violated.
    #[error("config error: {0}")]
    Config(String),
    /// A generated document could not be converted to YAML.
    #[error("an unexpected error occurred when converting the {kind} to YAML: {message}")]
    Serialize {
        /// Document kind being serialized.
        kind: &'static str,
        /// Underlying encoder message.
        message: String,
    },
}

impl GeneratorError {
    /// Builds a [`GeneratorError::Config`] from any displayable message.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
