// crates/policy-generator/src/lib.rs
// ============================================================================
// Module: Policy Generator Library
// Description: Config model, defaulting, validation, and document generation.
// Purpose: Turn a declarative policy config into Policy, PlacementRule, and
//          PlacementBinding manifests.
// Dependencies: serde, serde_yaml, thiserror, tracing
// ============================================================================

//! ## Overview
//! `policy-generator` reads a generator configuration listing policies and
//! their manifests, fills in defaults, validates it fail-closed, and emits a
//! multi-document YAML stream: one `Policy` per policy, the placement rules
//! they resolve to, and the `PlacementBinding`s that tie them together.
//!
//! The library only consumes a byte buffer and produces a byte buffer; config
//! discovery and plugin-host conventions live in `policy-generator-cli`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod binding;
pub mod config;
pub mod defaults;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod placement;
pub mod policy;
mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use defaults::apply_defaults;
pub use error::GeneratorError;
pub use error::GeneratorResult;
pub use generator::OutputStream;
pub use generator::PolicyGenerator;
pub use generator::generate;
pub use manifest::Document;
pub use manifest::load_manifest;
