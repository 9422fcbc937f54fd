//! Defaulting tests for policy-generator.
// crates/policy-generator/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaulting Tests
// Description: Validate the built-in, global, and policy-level default cascade.
// Purpose: Ensure set fields are never overwritten and unset fields resolve.
// =============================================================================

use std::collections::BTreeMap;

use policy_generator::Config;
use policy_generator::NamespaceSelector;
use policy_generator::apply_defaults;

mod common;
use common::TestResult;
use common::config_with;
use common::policy;

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|value| (*value).to_string()).collect())
}

#[test]
fn unset_fields_resolve_to_built_in_defaults() -> TestResult {
    let config = config_with(vec![policy("policy-a", &["a.yaml"])]).with_defaults();
    let resolved = &config.policies[0];
    if resolved.categories != strings(&["CM Configuration Management"]) {
        return Err(format!("unexpected categories {:?}", resolved.categories));
    }
    if resolved.controls != strings(&["CM-2 Baseline Configuration"]) {
        return Err(format!("unexpected controls {:?}", resolved.controls));
    }
    if resolved.standards != strings(&["NIST SP 800-53"]) {
        return Err(format!("unexpected standards {:?}", resolved.standards));
    }
    if resolved.compliance_type != "musthave" {
        return Err(format!("unexpected compliance type {}", resolved.compliance_type));
    }
    if resolved.remediation_action != "inform" {
        return Err(format!("unexpected remediation action {}", resolved.remediation_action));
    }
    if resolved.severity != "low" {
        return Err(format!("unexpected severity {}", resolved.severity));
    }
    if resolved.disabled {
        return Err("disabled should default to false".to_string());
    }
    Ok(())
}

#[test]
fn global_defaults_fill_unset_policy_fields() -> TestResult {
    let mut config = config_with(vec![policy("policy-a", &["a.yaml"])]);
    config.policy_defaults.categories = strings(&["SI System and Information Integrity"]);
    config.policy_defaults.severity = "high".to_string();
    config.policy_defaults.remediation_action = "enforce".to_string();
    let config = config.with_defaults();
    let resolved = &config.policies[0];
    if resolved.categories != strings(&["SI System and Information Integrity"]) {
        return Err(format!("unexpected categories {:?}", resolved.categories));
    }
    if resolved.severity != "high" || resolved.remediation_action != "enforce" {
        return Err("global defaults were not copied to the policy".to_string());
    }
    if config.policy_defaults.controls != strings(&["CM-2 Baseline Configuration"]) {
        return Err("unset global controls should take the built-in default".to_string());
    }
    Ok(())
}

#[test]
fn policy_values_win_over_global_defaults() -> TestResult {
    let mut overridden = policy("policy-a", &["a.yaml"]);
    overridden.categories = strings(&["PR.IP Information Protection"]);
    overridden.compliance_type = "mustnothave".to_string();
    overridden.severity = "critical".to_string();
    let mut config = config_with(vec![overridden]);
    config.policy_defaults.categories = strings(&["Global"]);
    config.policy_defaults.compliance_type = "mustonlyhave".to_string();
    config.policy_defaults.severity = "medium".to_string();
    let config = config.with_defaults();
    let resolved = &config.policies[0];
    if resolved.categories != strings(&["PR.IP Information Protection"]) {
        return Err(format!("policy categories overwritten: {:?}", resolved.categories));
    }
    if resolved.compliance_type != "mustnothave" || resolved.severity != "critical" {
        return Err("policy scalar fields were overwritten".to_string());
    }
    Ok(())
}

#[test]
fn explicit_empty_lists_are_not_defaulted() -> TestResult {
    let mut empty = policy("policy-a", &["a.yaml"]);
    empty.standards = Some(Vec::new());
    let mut config = config_with(vec![empty]);
    config.policy_defaults.controls = Some(Vec::new());
    let config = config.with_defaults();
    if config.policy_defaults.controls != Some(Vec::new()) {
        return Err("explicit empty global controls were overwritten".to_string());
    }
    let resolved = &config.policies[0];
    if resolved.standards != Some(Vec::new()) {
        return Err("explicit empty policy standards were overwritten".to_string());
    }
    if resolved.controls != Some(Vec::new()) {
        return Err("policy controls should copy the empty global list".to_string());
    }
    Ok(())
}

#[test]
fn single_policy_derives_binding_name() -> TestResult {
    let config = config_with(vec![policy("policy-app-config", &["a.yaml"])]).with_defaults();
    if config.placement_binding_defaults.name != "binding-policy-app-config" {
        return Err(format!(
            "unexpected binding name {}",
            config.placement_binding_defaults.name
        ));
    }
    Ok(())
}

#[test]
fn multiple_policies_leave_binding_name_empty() -> TestResult {
    let config =
        config_with(vec![policy("policy-a", &["a.yaml"]), policy("policy-b", &["b.yaml"])])
            .with_defaults();
    if !config.placement_binding_defaults.name.is_empty() {
        return Err("binding name should stay empty with multiple policies".to_string());
    }
    Ok(())
}

#[test]
fn explicit_binding_name_is_kept() -> TestResult {
    let mut config = config_with(vec![policy("policy-a", &["a.yaml"])]);
    config.placement_binding_defaults.name = "my-binding".to_string();
    let config = config.with_defaults();
    if config.placement_binding_defaults.name != "my-binding" {
        return Err("explicit binding name was overwritten".to_string());
    }
    Ok(())
}

#[test]
fn placement_rule_path_default_wins_over_cluster_selectors() -> TestResult {
    let mut config = config_with(vec![policy("policy-a", &["a.yaml"])]);
    config.policy_defaults.placement.placement_rule_path = "plr.yaml".to_string();
    config.policy_defaults.placement.cluster_selectors =
        BTreeMap::from([("cloud".to_string(), "red hat".to_string())]);
    let config = config.with_defaults();
    let placement = &config.policies[0].placement;
    if placement.placement_rule_path != "plr.yaml" {
        return Err("default placement rule path was not applied".to_string());
    }
    if placement.has_cluster_selectors() {
        return Err("cluster selectors should not be applied with a rule path".to_string());
    }
    Ok(())
}

#[test]
fn cluster_selector_default_applies_without_rule_path() -> TestResult {
    let mut config = config_with(vec![policy("policy-a", &["a.yaml"])]);
    config.policy_defaults.placement.cluster_selectors =
        BTreeMap::from([("cloud".to_string(), "red hat".to_string())]);
    let config = config.with_defaults();
    let selectors = &config.policies[0].placement.cluster_selectors;
    if selectors.get("cloud").map(String::as_str) != Some("red hat") {
        return Err(format!("unexpected selectors {selectors:?}"));
    }
    Ok(())
}

#[test]
fn policy_placement_is_never_replaced() -> TestResult {
    let mut own = policy("policy-a", &["a.yaml"]);
    own.placement.cluster_selectors = BTreeMap::from([("env".to_string(), "dev".to_string())]);
    let mut config = config_with(vec![own]);
    config.policy_defaults.placement.placement_rule_path = "plr.yaml".to_string();
    let config = config.with_defaults();
    let placement = &config.policies[0].placement;
    if placement.has_placement_rule_path() {
        return Err("default rule path leaked into a policy with selectors".to_string());
    }
    if placement.cluster_selectors.len() != 1 {
        return Err("policy selectors were replaced".to_string());
    }
    Ok(())
}

#[test]
fn namespace_selector_defaults_only_when_both_lists_unset() -> TestResult {
    let mut partial = policy("policy-a", &["a.yaml"]);
    partial.namespace_selector.exclude = strings(&["kube-system"]);
    let unset = policy("policy-b", &["b.yaml"]);
    let mut config = config_with(vec![partial, unset]);
    config.policy_defaults.namespace_selector = NamespaceSelector {
        exclude: None,
        include: strings(&["default"]),
    };
    let config = config.with_defaults();
    let partial = &config.policies[0].namespace_selector;
    if partial.include.is_some() || partial.exclude != strings(&["kube-system"]) {
        return Err(format!("partial selector was modified: {partial:?}"));
    }
    let unset = &config.policies[1].namespace_selector;
    if unset.include != strings(&["default"]) {
        return Err(format!("unset selector was not defaulted: {unset:?}"));
    }
    Ok(())
}

#[test]
fn config_without_policies_is_returned_unchanged() -> TestResult {
    let config = Config::default();
    if apply_defaults(config.clone()) != config {
        return Err("defaulting an empty config should be a no-op".to_string());
    }
    Ok(())
}

#[test]
fn defaults_decode_from_yaml() -> TestResult {
    let yaml = b"
apiVersion: policy.open-cluster-management.io/v1
kind: PolicyGenerator
metadata:
  name: config-data-policies
placementBindingDefaults:
  name: my-placement-binding
policyDefaults:
  namespace: my-policies
  controls: []
  placement:
    clusterSelectors:
      cloud: red hat
policies:
  - name: policy-app-config
    disabled: true
    manifests:
      - path: input/
";
    let config = Config::from_yaml(yaml).map_err(|err| err.to_string())?.with_defaults();
    if config.metadata.name != "config-data-policies" {
        return Err("metadata.name was not decoded".to_string());
    }
    let resolved = &config.policies[0];
    if !resolved.disabled || resolved.manifests[0].path != "input/" {
        return Err(format!("policy fields were not decoded: {resolved:?}"));
    }
    if resolved.controls != Some(Vec::new()) {
        return Err("explicit empty controls should survive decoding".to_string());
    }
    if resolved.placement.cluster_selectors.get("cloud").map(String::as_str) != Some("red hat") {
        return Err("default cluster selectors were not applied".to_string());
    }
    Ok(())
}
