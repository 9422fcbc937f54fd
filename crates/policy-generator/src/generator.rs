// crates/policy-generator/src/generator.rs
// ============================================================================
// Module: Policy Generator Pipeline
// Description: Decode, default, validate, and emit the document stream.
// Purpose: Turn generator config bytes into a multi-document YAML buffer.
// Dependencies: serde_yaml, tracing
// ============================================================================

//! ## Overview
//! [`PolicyGenerator`] owns one defaulted, validated [`Config`]. Generation
//! writes every Policy in declaration order, then every placement rule in
//! first-resolution order, then one PlacementBinding per placement group.
//! Each document is preceded by a `---` line. On error the partial buffer is
//! dropped; callers never observe incomplete output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use tracing::debug;
use tracing::info;

use crate::binding::PlacementGroups;
use crate::binding::binding_name;
use crate::binding::build_placement_binding;
use crate::config::Config;
use crate::error::GeneratorError;
use crate::error::GeneratorResult;
use crate::manifest::Document;
use crate::placement::resolve_placement;
use crate::policy::build_policy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator written before every document.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

// ============================================================================
// SECTION: Output Stream
// ============================================================================

/// Append-only multi-document YAML buffer.
#[derive(Debug, Default)]
pub struct OutputStream {
    /// Serialized documents.
    buffer: Vec<u8>,
    /// Number of documents written.
    documents: usize,
}

impl OutputStream {
    /// Creates an empty stream.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            documents: 0,
        }
    }

    /// Appends a document preceded by a separator line.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Serialize`] when the document cannot be encoded.
    pub fn push(&mut self, kind: &'static str, document: &Document) -> GeneratorResult<()> {
        let yaml = serde_yaml::to_string(document).map_err(|err| GeneratorError::Serialize {
            kind,
            message: err.to_string(),
        })?;
        self.buffer.extend_from_slice(DOCUMENT_SEPARATOR.as_bytes());
        self.buffer.extend_from_slice(yaml.as_bytes());
        self.documents += 1;
        Ok(())
    }

    /// Returns the number of documents written.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.documents
    }

    /// Returns true when nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.documents == 0
    }

    /// Consumes the stream and returns the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Generator over one defaulted and validated configuration.
#[derive(Debug, Clone)]
pub struct PolicyGenerator {
    /// Defaulted, validated configuration.
    config: Config,
}

impl PolicyGenerator {
    /// Decodes, defaults, and validates a generator configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Format`] when the bytes cannot be decoded and
    /// [`GeneratorError::Config`] when validation fails.
    pub fn from_yaml(bytes: &[u8]) -> GeneratorResult<Self> {
        Self::new(Config::from_yaml(bytes)?)
    }

    /// Defaults and validates an already decoded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Config`] when validation fails.
    pub fn new(config: Config) -> GeneratorResult<Self> {
        let config = config.with_defaults();
        config.validate()?;
        Ok(Self {
            config,
        })
    }

    /// Returns the defaulted configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generates the policy, placement rule, and binding documents.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeneratorError`] raised while reading manifests or
    /// building documents.
    pub fn generate(&self) -> GeneratorResult<Vec<u8>> {
        let namespace = self.config.policy_defaults.namespace.as_str();
        let policies = &self.config.policies;
        let mut output = OutputStream::new();

        for policy in policies {
            let document = build_policy(policy, namespace)?;
            output.push("policy", &document)?;
            debug!(policy = %policy.name, "emitted policy");
        }

        let mut emitted = BTreeSet::new();
        let mut groups = PlacementGroups::new();
        for (index, policy) in policies.iter().enumerate() {
            let placement = resolve_placement(policy, namespace, &emitted)?;
            if let Some(document) = &placement.document {
                output.push("placement rule", document)?;
                debug!(placement = %placement.name, "emitted placement rule");
            }
            groups.add(&placement.name, index);
            emitted.insert(placement.name);
        }

        let base_name = self.config.placement_binding_defaults.name.as_str();
        for (position, group) in groups.groups().iter().enumerate() {
            let name = binding_name(base_name, position);
            let subjects: Vec<&str> =
                group.policies.iter().map(|index| policies[*index].name.as_str()).collect();
            let document = build_placement_binding(&name, namespace, &group.placement, &subjects);
            output.push("placement binding", &document)?;
            debug!(binding = %name, placement = %group.placement, "emitted placement binding");
        }

        info!(
            policies = policies.len(),
            placement_rules = emitted.len(),
            bindings = groups.len(),
            documents = output.len(),
            "generated policy documents"
        );
        Ok(output.into_bytes())
    }
}

/// Runs the whole pipeline over raw generator config bytes.
///
/// # Errors
///
/// Returns the first [`GeneratorError`] from decoding, validation, or
/// generation.
pub fn generate(config: &[u8]) -> GeneratorResult<Vec<u8>> {
    PolicyGenerator::from_yaml(config)?.generate()
}
