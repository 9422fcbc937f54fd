// crates/policy-generator/src/manifest.rs
// ============================================================================
// Module: Manifest Loader
// Description: Reads multi-document YAML manifest files into object documents.
// Purpose: Provide ordered, map-only documents to the policy and placement builders.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! A manifest file holds zero or more YAML documents separated by `---`.
//! Every document must be a YAML object; scalars and sequences are rejected.
//! Documents are kept as [`Document`] values, whose mappings preserve key
//! order so re-serialization is stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Mapping;
use serde_yaml::Value;

use crate::error::GeneratorError;
use crate::error::GeneratorResult;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A decoded or generated YAML object with ordered keys.
pub type Document = Mapping;

/// File extensions picked up when a manifest path is a directory.
const MANIFEST_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads every object document from a manifest file.
///
/// An empty file yields no documents. Empty documents between separators are
/// skipped; an explicit `null` or `~` document is rejected like any scalar.
///
/// # Errors
///
/// Returns [`GeneratorError::Read`] when the file cannot be read and
/// [`GeneratorError::Format`] when the contents are not YAML objects.
pub fn load_manifest(path: &Path) -> GeneratorResult<Vec<Document>> {
    let bytes = fs::read(path).map_err(|err| {
        GeneratorError::Read(format!("failed to read the manifest file {}: {err}", path.display()))
    })?;
    parse_documents(&bytes).map_err(|err| match err {
        GeneratorError::Format(message) => {
            GeneratorError::Format(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Parses a YAML stream into object documents.
///
/// # Errors
///
/// Returns [`GeneratorError::Format`] when the stream is not valid YAML or a
/// document is not an object.
pub fn parse_documents(bytes: &[u8]) -> GeneratorResult<Vec<Document>> {
    let mut documents = Vec::new();
    for (index, deserializer) in serde_yaml::Deserializer::from_slice(bytes).enumerate() {
        let value =
            Value::deserialize(deserializer).map_err(|err| GeneratorError::Format(err.to_string()))?;
        match value {
            Value::Mapping(mapping) => documents.push(mapping),
            Value::Null if is_blank_document(bytes, index) => {}
            _ => return Err(not_an_object()),
        }
    }
    Ok(documents)
}

/// Reports whether the null document at `index` has no content at all.
///
/// Blank documents and explicit `null`/`~` scalars both decode to
/// [`Value::Null`]; only a blank one also decodes as an empty mapping.
fn is_blank_document(bytes: &[u8], index: usize) -> bool {
    serde_yaml::Deserializer::from_slice(bytes)
        .nth(index)
        .is_some_and(|deserializer| Mapping::deserialize(deserializer).is_ok())
}

/// Error for a manifest document that is not a YAML object.
fn not_an_object() -> GeneratorError {
    GeneratorError::Format("the input manifests must be in the format of YAML objects".to_string())
}

/// Expands a manifest path into the files it refers to.
///
/// A directory expands to its `.yaml`/`.yml` files (not recursive), sorted by
/// file name. Any other path is returned unchanged.
///
/// # Errors
///
/// Returns [`GeneratorError::Read`] when the path or directory cannot be read.
pub fn expand_manifest_path(path: &Path) -> GeneratorResult<Vec<PathBuf>> {
    let read_error = || {
        GeneratorError::Read(format!("failed to read the manifest directory {}", path.display()))
    };
    let metadata = fs::metadata(path).map_err(|_| read_error())?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(|_| read_error())? {
        let entry = entry.map_err(|_| read_error())?;
        let file_type = entry.file_type().map_err(|_| read_error())?;
        if file_type.is_dir() {
            continue;
        }
        let file_path = entry.path();
        if has_manifest_extension(&file_path) {
            files.push(file_path);
        }
    }
    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    Ok(files)
}

/// Returns true when the path ends in a YAML extension.
fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext))
}

/// Builds a document from key/value pairs, keeping the given key order.
pub(crate) fn object<const N: usize>(entries: [(&str, Value); N]) -> Document {
    entries.into_iter().map(|(key, value)| (Value::from(key), value)).collect()
}

/// Builds a sequence of strings.
pub(crate) fn string_list(values: &[String]) -> Value {
    Value::Sequence(values.iter().map(|value| Value::from(value.as_str())).collect())
}

/// Looks up a nested string value by key path.
pub(crate) fn nested_str<'a>(document: &'a Document, keys: &[&str]) -> Option<&'a str> {
    let (last, parents) = keys.split_last()?;
    let mut current = document;
    for key in parents {
        current = current.get(*key)?.as_mapping()?;
    }
    current.get(*last)?.as_str()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
