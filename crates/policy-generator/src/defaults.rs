// crates/policy-generator/src/defaults.rs
// ============================================================================
// Module: Defaulting Engine
// Description: Two-level default cascade for generator configuration.
// Purpose: Resolve every policy field from policy, then global, then built-in values.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Defaulting runs before validation and never fails: missing required
//! fields are left for the validator to report. Built-in values fill unset
//! global defaults, then global defaults fill unset policy fields. A field
//! that is set, even to an empty list, is never overwritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::Config;
use crate::config::PolicyConfig;
use crate::config::PolicyDefaults;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Built-in policy category.
pub const DEFAULT_CATEGORY: &str = "CM Configuration Management";
/// Built-in policy control.
pub const DEFAULT_CONTROL: &str = "CM-2 Baseline Configuration";
/// Built-in policy standard.
pub const DEFAULT_STANDARD: &str = "NIST SP 800-53";
/// Built-in compliance type.
pub const DEFAULT_COMPLIANCE_TYPE: &str = "musthave";
/// Built-in remediation action.
pub const DEFAULT_REMEDIATION_ACTION: &str = "inform";
/// Built-in severity.
pub const DEFAULT_SEVERITY: &str = "low";
/// Prefix for a binding name derived from the only policy.
const BINDING_NAME_PREFIX: &str = "binding-";

// ============================================================================
// SECTION: Defaulting
// ============================================================================

impl Config {
    /// Returns a copy of the configuration with every default applied.
    #[must_use]
    pub fn with_defaults(self) -> Self {
        apply_defaults(self)
    }
}

/// Applies the default cascade and returns the fully defaulted config.
#[must_use]
pub fn apply_defaults(mut config: Config) -> Config {
    if config.policies.is_empty() {
        return config;
    }

    if config.placement_binding_defaults.name.is_empty() && config.policies.len() == 1 {
        config.placement_binding_defaults.name =
            format!("{BINDING_NAME_PREFIX}{}", config.policies[0].name);
    }

    config.policy_defaults = default_globals(config.policy_defaults);
    let defaults = &config.policy_defaults;
    config.policies =
        config.policies.into_iter().map(|policy| default_policy(policy, defaults)).collect();
    config
}

/// Fills unset global defaults with built-in values.
fn default_globals(mut defaults: PolicyDefaults) -> PolicyDefaults {
    fill_unset(&mut defaults.categories, DEFAULT_CATEGORY);
    fill_unset(&mut defaults.controls, DEFAULT_CONTROL);
    fill_unset(&mut defaults.standards, DEFAULT_STANDARD);
    fill_empty(&mut defaults.compliance_type, DEFAULT_COMPLIANCE_TYPE);
    fill_empty(&mut defaults.remediation_action, DEFAULT_REMEDIATION_ACTION);
    fill_empty(&mut defaults.severity, DEFAULT_SEVERITY);
    defaults
}

/// Fills unset policy fields from the already defaulted globals.
fn default_policy(mut policy: PolicyConfig, defaults: &PolicyDefaults) -> PolicyConfig {
    if policy.categories.is_none() {
        policy.categories.clone_from(&defaults.categories);
    }
    if policy.controls.is_none() {
        policy.controls.clone_from(&defaults.controls);
    }
    if policy.standards.is_none() {
        policy.standards.clone_from(&defaults.standards);
    }
    fill_empty(&mut policy.compliance_type, &defaults.compliance_type);
    fill_empty(&mut policy.remediation_action, &defaults.remediation_action);
    fill_empty(&mut policy.severity, &defaults.severity);

    // The placement rule path wins when both defaults are present.
    if policy.placement.is_unset() {
        if defaults.placement.has_placement_rule_path() {
            policy.placement.placement_rule_path.clone_from(&defaults.placement.placement_rule_path);
        } else if defaults.placement.has_cluster_selectors() {
            policy.placement.cluster_selectors.clone_from(&defaults.placement.cluster_selectors);
        }
    }

    if policy.namespace_selector.is_unset() {
        policy.namespace_selector.clone_from(&defaults.namespace_selector);
    }
    policy
}

/// Sets an unset list to a single fallback entry; an empty list stays empty.
fn fill_unset(values: &mut Option<Vec<String>>, fallback: &str) {
    if values.is_none() {
        *values = Some(vec![fallback.to_string()]);
    }
}

/// Replaces an empty string with the fallback value.
fn fill_empty(value: &mut String, fallback: &str) {
    if value.is_empty() {
        fallback.clone_into(value);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
