// crates/policy-generator/src/policy.rs
// ============================================================================
// Module: Policy Builder
// Description: Wraps manifests into a Policy with one ConfigurationPolicy template.
// Purpose: Produce the Policy document for a single defaulted policy config.
// Dependencies: serde_yaml, tracing
// ============================================================================

//! ## Overview
//! Each manifest entry expands to one or more YAML files whose documents
//! become object templates of a `ConfigurationPolicy`. That configuration
//! policy is wrapped as the single policy template of a `Policy`. Keys are
//! written in lexicographic order at every level.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::config::NamespaceSelector;
use crate::config::PolicyConfig;
use crate::error::GeneratorError;
use crate::error::GeneratorResult;
use crate::manifest::Document;
use crate::manifest::expand_manifest_path;
use crate::manifest::load_manifest;
use crate::manifest::object;
use crate::manifest::string_list;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// API version of the Policy kind.
pub const POLICY_API_VERSION: &str = "policy.open-cluster-management.io/v1";
/// Policy kind.
pub const POLICY_KIND: &str = "Policy";
/// Kind of the wrapped configuration policy.
pub const CONFIG_POLICY_KIND: &str = "ConfigurationPolicy";
/// Annotation carrying the comma-joined categories.
pub const CATEGORIES_ANNOTATION: &str = "policy.open-cluster-management.io/categories";
/// Annotation carrying the comma-joined controls.
pub const CONTROLS_ANNOTATION: &str = "policy.open-cluster-management.io/controls";
/// Annotation carrying the comma-joined standards.
pub const STANDARDS_ANNOTATION: &str = "policy.open-cluster-management.io/standards";

/// Key marking a document that is already an object template.
const OBJECT_DEFINITION_KEY: &str = "objectDefinition";
/// Key holding an object template's compliance type.
const COMPLIANCE_TYPE_KEY: &str = "complianceType";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the Policy document for a defaulted policy.
///
/// # Errors
///
/// Returns [`GeneratorError::Read`] or [`GeneratorError::Format`] when a
/// manifest cannot be loaded, and [`GeneratorError::Config`] when every
/// manifest file is empty.
pub fn build_policy(policy: &PolicyConfig, namespace: &str) -> GeneratorResult<Document> {
    let object_templates = collect_object_templates(policy)?;
    if object_templates.is_empty() {
        return Err(GeneratorError::config(format!(
            "the policy {} must specify at least one non-empty manifest file",
            policy.name
        )));
    }
    debug!(policy = %policy.name, templates = object_templates.len(), "built object templates");

    let mut config_spec = Document::new();
    if policy.namespace_selector.has_entries() {
        config_spec.insert(
            Value::from("namespaceSelector"),
            namespace_selector(&policy.namespace_selector),
        );
    }
    config_spec.insert(Value::from("object-templates"), Value::Sequence(object_templates));
    config_spec
        .insert(Value::from("remediationAction"), Value::from(policy.remediation_action.as_str()));
    config_spec.insert(Value::from("severity"), Value::from(policy.severity.as_str()));

    let policy_template = object([(
        OBJECT_DEFINITION_KEY,
        Value::Mapping(object([
            ("apiVersion", Value::from(POLICY_API_VERSION)),
            ("kind", Value::from(CONFIG_POLICY_KIND)),
            ("metadata", Value::Mapping(object([("name", Value::from(policy.name.as_str()))]))),
            ("spec", Value::Mapping(config_spec)),
        ])),
    )]);

    let annotations = object([
        (CATEGORIES_ANNOTATION, joined(policy.categories.as_deref())),
        (CONTROLS_ANNOTATION, joined(policy.controls.as_deref())),
        (STANDARDS_ANNOTATION, joined(policy.standards.as_deref())),
    ]);

    Ok(object([
        ("apiVersion", Value::from(POLICY_API_VERSION)),
        ("kind", Value::from(POLICY_KIND)),
        (
            "metadata",
            Value::Mapping(object([
                ("annotations", Value::Mapping(annotations)),
                ("name", Value::from(policy.name.as_str())),
                ("namespace", Value::from(namespace)),
            ])),
        ),
        (
            "spec",
            Value::Mapping(object([
                ("disabled", Value::from(policy.disabled)),
                ("policy-templates", Value::Sequence(vec![Value::Mapping(policy_template)])),
                ("remediationAction", Value::from(policy.remediation_action.as_str())),
            ])),
        ),
    ]))
}

/// Loads every manifest of the policy as object templates, in declaration order.
fn collect_object_templates(policy: &PolicyConfig) -> GeneratorResult<Vec<Value>> {
    let mut templates = Vec::new();
    for manifest in &policy.manifests {
        for path in expand_manifest_path(Path::new(&manifest.path))? {
            let documents = load_manifest(&path)?;
            if documents.is_empty() {
                debug!(path = %path.display(), "skipping empty manifest file");
                continue;
            }
            templates.extend(
                documents
                    .into_iter()
                    .map(|document| object_template(document, &policy.compliance_type)),
            );
        }
    }
    Ok(templates)
}

/// Wraps a manifest document as an object template.
///
/// A document that already has an `objectDefinition` keeps its own compliance
/// type and only gains the policy's when it has none.
fn object_template(document: Document, compliance_type: &str) -> Value {
    if !document.contains_key(OBJECT_DEFINITION_KEY) {
        return Value::Mapping(object([
            (COMPLIANCE_TYPE_KEY, Value::from(compliance_type)),
            (OBJECT_DEFINITION_KEY, Value::Mapping(document)),
        ]));
    }
    if document.contains_key(COMPLIANCE_TYPE_KEY) {
        return Value::Mapping(document);
    }
    let mut template = object([(COMPLIANCE_TYPE_KEY, Value::from(compliance_type))]);
    template.extend(document);
    Value::Mapping(template)
}

/// Renders the namespace selector, omitting unset lists.
fn namespace_selector(selector: &NamespaceSelector) -> Value {
    let mut rendered = Document::new();
    if let Some(exclude) = &selector.exclude {
        rendered.insert(Value::from("exclude"), string_list(exclude));
    }
    if let Some(include) = &selector.include {
        rendered.insert(Value::from("include"), string_list(include));
    }
    Value::Mapping(rendered)
}

/// Joins an optional list with commas.
fn joined(values: Option<&[String]>) -> Value {
    Value::from(values.unwrap_or_default().join(","))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
