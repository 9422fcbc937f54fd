// crates/policy-generator-cli/src/lib.rs
// ============================================================================
// Module: Policy Generator CLI Library
// Description: Config discovery and rendering helpers for the CLI binary.
// Purpose: Keep filesystem glue testable outside of the entry point.
// Dependencies: policy-generator, thiserror, tracing
// ============================================================================

//! ## Overview
//! The binary accepts generator config files or directories. This library
//! expands them into config files and runs each one through an independent
//! [`policy_generator::PolicyGenerator`], concatenating the results.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod discovery;
pub mod render;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use discovery::collect_config_paths;
pub use render::CliError;
pub use render::CliResult;
pub use render::render_config;
pub use render::render_paths;
