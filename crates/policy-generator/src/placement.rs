// crates/policy-generator/src/placement.rs
// ============================================================================
// Module: Placement Resolver
// Description: Reuses an external PlacementRule or synthesizes one from selectors.
// Purpose: Give every policy a placement rule name, emitting each rule once.
// Dependencies: serde_yaml, tracing
// ============================================================================

//! ## Overview
//! A policy either points at an externally authored placement rule file or
//! carries cluster label selectors. External rules must live in the policy
//! namespace and are emitted once even when several policies share them.
//! Synthesized rules are named after their policy and are always emitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::error::GeneratorError;
use crate::error::GeneratorResult;
use crate::manifest::Document;
use crate::manifest::load_manifest;
use crate::manifest::nested_str;
use crate::manifest::object;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// API version of the PlacementRule kind.
pub const PLACEMENT_RULE_API_VERSION: &str = "apps.open-cluster-management.io/v1";
/// PlacementRule kind.
pub const PLACEMENT_RULE_KIND: &str = "PlacementRule";
/// Prefix for synthesized placement rule names.
const PLACEMENT_NAME_PREFIX: &str = "placement-";
/// Cluster condition required of every selected cluster.
const CLUSTER_CONDITION_TYPE: &str = "ManagedClusterConditionAvailable";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Outcome of resolving a policy's placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlacement {
    /// Name of the placement rule the policy binds to.
    pub name: String,
    /// Placement rule document to emit, absent when already emitted.
    pub document: Option<Document>,
}

/// Resolves the placement rule for a policy.
///
/// `emitted` holds the names of placement rules already written to the
/// output; an external rule whose name is in the set is reused without being
/// emitted again.
///
/// # Errors
///
/// Returns [`GeneratorError::Config`] when an external rule is missing,
/// unnamed, or in a different namespace, and loader errors when the rule
/// file cannot be read.
pub fn resolve_placement(
    policy: &PolicyConfig,
    namespace: &str,
    emitted: &BTreeSet<String>,
) -> GeneratorResult<ResolvedPlacement> {
    if policy.placement.has_placement_rule_path() {
        let (name, document) =
            external_placement_rule(Path::new(&policy.placement.placement_rule_path), namespace)?;
        if emitted.contains(&name) {
            debug!(policy = %policy.name, placement = %name, "reusing placement rule");
            return Ok(ResolvedPlacement {
                name,
                document: None,
            });
        }
        return Ok(ResolvedPlacement {
            name,
            document: Some(document),
        });
    }

    let name = format!("{PLACEMENT_NAME_PREFIX}{}", policy.name);
    let document = synthesize_placement_rule(&name, namespace, &policy.placement.cluster_selectors);
    Ok(ResolvedPlacement {
        name,
        document: Some(document),
    })
}

/// Finds the first PlacementRule in an external manifest file.
fn external_placement_rule(path: &Path, namespace: &str) -> GeneratorResult<(String, Document)> {
    let display = path.display();
    let rule = load_manifest(path)?
        .into_iter()
        .find(|document| nested_str(document, &["kind"]) == Some(PLACEMENT_RULE_KIND))
        .ok_or_else(|| {
            GeneratorError::config(format!(
                "the placement manifest {display} did not have a placement rule"
            ))
        })?;

    let name = nested_str(&rule, &["metadata", "name"])
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            GeneratorError::config(format!("the placement {display} must have a name set"))
        })?
        .to_string();
    let rule_namespace = nested_str(&rule, &["metadata", "namespace"]).ok_or_else(|| {
        GeneratorError::config(format!("the placement {display} must have a namespace set"))
    })?;
    if rule_namespace != namespace {
        return Err(GeneratorError::config(format!(
            "the placement {display} must have the same namespace as the policy ({namespace})"
        )));
    }
    Ok((name, rule))
}

/// Builds a PlacementRule selecting clusters by label.
///
/// Match expressions follow the lexicographic order of the label keys.
#[must_use]
pub fn synthesize_placement_rule(
    name: &str,
    namespace: &str,
    cluster_selectors: &BTreeMap<String, String>,
) -> Document {
    let match_expressions = cluster_selectors
        .iter()
        .map(|(label, value)| {
            Value::Mapping(object([
                ("key", Value::from(label.as_str())),
                ("operator", Value::from("In")),
                ("values", Value::Sequence(vec![Value::from(value.as_str())])),
            ]))
        })
        .collect();

    object([
        ("apiVersion", Value::from(PLACEMENT_RULE_API_VERSION)),
        ("kind", Value::from(PLACEMENT_RULE_KIND)),
        (
            "metadata",
            Value::Mapping(object([
                ("name", Value::from(name)),
                ("namespace", Value::from(namespace)),
            ])),
        ),
        (
            "spec",
            Value::Mapping(object([
                (
                    "clusterConditions",
                    Value::Sequence(vec![Value::Mapping(object([
                        ("status", Value::from("True")),
                        ("type", Value::from(CLUSTER_CONDITION_TYPE)),
                    ]))]),
                ),
                (
                    "clusterSelector",
                    Value::Mapping(object([(
                        "matchExpressions",
                        Value::Sequence(match_expressions),
                    )])),
                ),
            ])),
        ),
    ])
}
