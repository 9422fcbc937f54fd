// crates/policy-generator/src/validation.rs
// ============================================================================
// Module: Config Validation
// Description: Required-field, uniqueness, and reachability checks.
// Purpose: Reject an invalid configuration before any document is generated.
// Dependencies: std::fs
// ============================================================================

//! ## Overview
//! Validation runs strictly after defaulting and stops at the first failure.
//! Referenced manifest and placement paths must be reachable on the local
//! filesystem; their contents are only read later, during generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::config::PolicyConfig;
use crate::error::GeneratorError;
use crate::error::GeneratorResult;

// ============================================================================
// SECTION: Validation
// ============================================================================

impl Config {
    /// Validates a defaulted configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Config`] for the first rule that is violated.
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.placement_binding_defaults.name.is_empty() && self.policies.len() > 1 {
            return Err(GeneratorError::config(
                "placementBindingDefaults.name must be set when there are multiple policies",
            ));
        }
        if self.policy_defaults.namespace.is_empty() {
            return Err(GeneratorError::config(
                "policyDefaults.namespace is empty but it must be set",
            ));
        }
        if self.policies.is_empty() {
            return Err(GeneratorError::config("policies is empty but it must be set"));
        }

        let mut seen = BTreeSet::new();
        for policy in &self.policies {
            validate_policy(policy, &mut seen)?;
        }
        Ok(())
    }
}

/// Validates a single policy and records its name in `seen`.
fn validate_policy<'a>(
    policy: &'a PolicyConfig,
    seen: &mut BTreeSet<&'a str>,
) -> GeneratorResult<()> {
    if policy.placement.has_cluster_selectors() && policy.placement.has_placement_rule_path() {
        return Err(GeneratorError::config(
            "a policy may not specify placement.clusterSelectors and placement.placementRulePath \
             together",
        ));
    }
    if policy.manifests.is_empty() {
        return Err(GeneratorError::config("each policy must have at least one manifest"));
    }
    for manifest in &policy.manifests {
        if manifest.path.is_empty() {
            return Err(GeneratorError::config("each policy manifest entry must have path set"));
        }
        if !path_exists(&manifest.path) {
            return Err(GeneratorError::config(format!(
                "could not read the manifest path {}",
                manifest.path
            )));
        }
    }
    if policy.name.is_empty() {
        return Err(GeneratorError::config("each policy must have a name set"));
    }
    if !seen.insert(policy.name.as_str()) {
        return Err(GeneratorError::config(format!(
            "each policy must have a unique name set: {}",
            policy.name
        )));
    }
    let rule_path = &policy.placement.placement_rule_path;
    if policy.placement.has_placement_rule_path() && !path_exists(rule_path) {
        return Err(GeneratorError::config(format!(
            "could not read the placement rule path {rule_path}"
        )));
    }
    Ok(())
}

/// Returns true when the path can be stat'ed.
fn path_exists(path: &str) -> bool {
    fs::metadata(Path::new(path)).is_ok()
}
