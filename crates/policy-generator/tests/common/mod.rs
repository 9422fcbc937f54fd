// crates/policy-generator/tests/common/mod.rs
// =============================================================================
// Module: Generator Test Helpers
// Description: Shared fixtures for policy-generator integration tests.
// Purpose: Reduce duplication across integration test suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;

use policy_generator::Config;
use policy_generator::Document;
use policy_generator::GeneratorError;
use policy_generator::ManifestEntry;
use policy_generator::PolicyConfig;
use policy_generator::manifest::parse_documents;

/// Result type shared by integration tests.
pub type TestResult = Result<(), String>;

/// ConfigMap manifest used across suites.
pub const CONFIGMAP_YAML: &str = "apiVersion: v1
kind: ConfigMap
metadata:
  name: my-configmap
data:
  game.properties: enemies=potato
";

/// Writes a file below `dir` and returns its path as a string.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<String, String> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    path.to_str().map(str::to_string).ok_or_else(|| "non-utf8 temp path".to_string())
}

/// Writes the shared ConfigMap manifest below `dir`.
pub fn write_configmap(dir: &Path, name: &str) -> Result<String, String> {
    write_file(dir, name, CONFIGMAP_YAML)
}

/// Writes a PlacementRule manifest below `dir`.
pub fn write_placement_rule(
    dir: &Path,
    file: &str,
    name: &str,
    namespace: &str,
) -> Result<String, String> {
    let contents = format!(
        "apiVersion: apps.open-cluster-management.io/v1
kind: PlacementRule
metadata:
  name: {name}
  namespace: {namespace}
spec:
  clusterSelector:
    matchExpressions: []
"
    );
    write_file(dir, file, &contents)
}

/// Builds a policy config with the given manifest paths.
pub fn policy(name: &str, manifests: &[&str]) -> PolicyConfig {
    PolicyConfig {
        name: name.to_string(),
        manifests: manifests.iter().map(|path| ManifestEntry::new(*path)).collect(),
        ..PolicyConfig::default()
    }
}

/// Builds a config in the `my-policies` namespace with the given policies.
pub fn config_with(policies: Vec<PolicyConfig>) -> Config {
    let mut config = Config::default();
    config.policy_defaults.namespace = "my-policies".to_string();
    config.policies = policies;
    config
}

/// Asserts that a result failed with a message containing `needle`.
pub fn assert_error<T>(result: Result<T, GeneratorError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected error containing {needle}")),
    }
}

/// Parses generated output back into documents.
pub fn output_documents(output: &[u8]) -> Result<Vec<Document>, String> {
    parse_documents(output).map_err(|err| err.to_string())
}

/// Returns a nested string value from a document.
pub fn nested<'a>(document: &'a Document, keys: &[&str]) -> Option<&'a str> {
    let (last, parents) = keys.split_last()?;
    let mut current = document;
    for key in parents {
        current = current.get(*key)?.as_mapping()?;
    }
    current.get(*last)?.as_str()
}

/// Returns the top-level keys of a document in order.
pub fn keys(document: &Document) -> Vec<String> {
    document.keys().filter_map(|key| key.as_str().map(str::to_string)).collect()
}

/// Returns the kinds of the documents in order.
pub fn kinds(documents: &[Document]) -> Vec<String> {
    documents.iter().filter_map(|doc| nested(doc, &["kind"]).map(str::to_string)).collect()
}

/// Returns the metadata names of the documents in order.
pub fn names(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|doc| nested(doc, &["metadata", "name"]).map(str::to_string))
        .collect()
}
