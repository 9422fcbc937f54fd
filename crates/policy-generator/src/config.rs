// crates/policy-generator/src/config.rs
// ============================================================================
// Module: Policy Generator Configuration
// Description: Typed model of the generator's own input configuration.
// Purpose: Decode the YAML wire contract into strongly typed settings.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! The generator config is a single YAML document holding a list of policies
//! plus shared defaults. Set-like fields are `Option<Vec<String>>` so an
//! explicit empty list stays distinguishable from an unset one; the defaulting
//! pass only fills fields that are unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::GeneratorError;
use crate::error::GeneratorResult;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Complete generator configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Optional API version header (plugin hosts require one).
    #[serde(default)]
    pub api_version: Option<String>,
    /// Optional kind header (plugin hosts require one).
    #[serde(default)]
    pub kind: Option<String>,
    /// Generator metadata.
    #[serde(default)]
    pub metadata: GeneratorMetadata,
    /// Defaults for emitted placement bindings.
    #[serde(default)]
    pub placement_binding_defaults: PlacementBindingDefaults,
    /// Fallback values shared by every policy.
    #[serde(default)]
    pub policy_defaults: PolicyDefaults,
    /// Policies to generate, in declaration order.
    #[serde(default)]
    pub policies: Vec<PolicyConfig>,
}

impl Config {
    /// Decodes a generator configuration from raw YAML bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Format`] when the bytes are not valid YAML or
    /// do not match the configuration shape.
    pub fn from_yaml(bytes: &[u8]) -> GeneratorResult<Self> {
        serde_yaml::from_slice(bytes).map_err(|err| GeneratorError::Format(err.to_string()))
    }
}

/// Metadata describing the generator itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorMetadata {
    /// Generator name.
    #[serde(default)]
    pub name: String,
}

/// Defaults applied to placement bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlacementBindingDefaults {
    /// Base name for the first binding; later bindings gain a numeric suffix.
    #[serde(default)]
    pub name: String,
}

/// Shared fallback values for every policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDefaults {
    /// Default policy categories.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Default object-template compliance type.
    #[serde(default)]
    pub compliance_type: String,
    /// Default policy controls.
    #[serde(default)]
    pub controls: Option<Vec<String>>,
    /// Namespace every generated document lands in.
    #[serde(default)]
    pub namespace: String,
    /// Default namespace selector.
    #[serde(default)]
    pub namespace_selector: NamespaceSelector,
    /// Default placement.
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Default remediation action.
    #[serde(default)]
    pub remediation_action: String,
    /// Default severity.
    #[serde(default)]
    pub severity: String,
    /// Default policy standards.
    #[serde(default)]
    pub standards: Option<Vec<String>>,
}

/// One policy to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Policy categories.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Compliance type applied to wrapped manifests.
    #[serde(default)]
    pub compliance_type: String,
    /// Policy controls.
    #[serde(default)]
    pub controls: Option<Vec<String>>,
    /// Whether the policy is disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Manifest files or directories wrapped by the policy.
    #[serde(default)]
    pub manifests: Vec<ManifestEntry>,
    /// Policy name, unique within a config.
    #[serde(default)]
    pub name: String,
    /// Namespace selector for the configuration policy.
    #[serde(default)]
    pub namespace_selector: NamespaceSelector,
    /// Placement for the policy.
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Remediation action.
    #[serde(default)]
    pub remediation_action: String,
    /// Severity.
    #[serde(default)]
    pub severity: String,
    /// Policy standards.
    #[serde(default)]
    pub standards: Option<Vec<String>>,
}

/// A manifest reference; the path is a file or a directory of YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Filesystem path to the manifest file or directory.
    #[serde(default)]
    pub path: String,
}

impl ManifestEntry {
    /// Creates a manifest entry for the given path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

/// Include/exclude namespace lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamespaceSelector {
    /// Namespaces to exclude.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Namespaces to include.
    #[serde(default)]
    pub include: Option<Vec<String>>,
}

impl NamespaceSelector {
    /// Returns true when neither list is set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.exclude.is_none() && self.include.is_none()
    }

    /// Returns true when at least one list has entries.
    #[must_use]
    pub fn has_entries(&self) -> bool {
        self.exclude.as_ref().is_some_and(|list| !list.is_empty())
            || self.include.as_ref().is_some_and(|list| !list.is_empty())
    }
}

/// Placement settings; the two mechanisms are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Cluster label selectors used to synthesize a placement rule.
    #[serde(default)]
    pub cluster_selectors: BTreeMap<String, String>,
    /// Path to an externally authored placement rule manifest.
    #[serde(default)]
    pub placement_rule_path: String,
}

impl PlacementConfig {
    /// Returns true when cluster selectors are present.
    #[must_use]
    pub fn has_cluster_selectors(&self) -> bool {
        !self.cluster_selectors.is_empty()
    }

    /// Returns true when an external placement rule path is present.
    #[must_use]
    pub const fn has_placement_rule_path(&self) -> bool {
        !self.placement_rule_path.is_empty()
    }

    /// Returns true when neither mechanism is configured.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        !self.has_cluster_selectors() && !self.has_placement_rule_path()
    }
}
