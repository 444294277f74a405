//! Walking the exported blueprint trees and reading their loosely typed fields.
//!
//! The exports nest folders as JSON objects (`races/german/infantry/...`) until
//! a node that carries the kind's container key, which is one blueprint. Reads
//! never fail: absent or mistyped fields fall back to empty values.

use serde_json::{Map, Value};

/// Position of one blueprint node within its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    /// Object key of the blueprint, i.e. the source filename.
    pub key: String,
    /// Slash-joined folder path above the blueprint, starting at the top-level key.
    pub path: String,
    /// Nearest ancestor folder name.
    pub parent: String,
}

impl NodeContext {
    /// Path segment 1 (`races/german/infantry` -> `german`), or the whole path when shallower.
    pub fn faction_segment(&self) -> &str {
        self.path.split('/').nth(1).unwrap_or(&self.path)
    }
}

/// A node qualifies as a blueprint when its key set includes `container_key`.
pub fn is_container(node: &Map<String, Value>, container_key: &str) -> bool {
    node.contains_key(container_key)
}

/// Visit every blueprint node in `document`, in document order.
///
/// Each top-level key starts its own walk with that key as both path and parent.
pub fn walk_document<'a, F>(document: &'a Value, container_key: &str, mut visit: F)
where
    F: FnMut(NodeContext, &'a Map<String, Value>),
{
    let Some(root) = document.as_object() else {
        return;
    };
    for (key, child) in root {
        walk_tree(child, container_key, key, key, &mut visit);
    }
}

fn walk_tree<'a, F>(node: &'a Value, container_key: &str, path: &str, parent: &str, visit: &mut F)
where
    F: FnMut(NodeContext, &'a Map<String, Value>),
{
    let Some(object) = node.as_object() else {
        return;
    };
    for (key, child) in object {
        let Some(child_object) = child.as_object() else {
            continue;
        };
        if is_container(child_object, container_key) {
            visit(
                NodeContext {
                    key: key.clone(),
                    path: path.to_string(),
                    parent: parent.to_string(),
                },
                child_object,
            );
        } else {
            let child_path = format!("{path}/{key}");
            walk_tree(child, container_key, &child_path, key, visit);
        }
    }
}

/// Final segment of a reference or template path; both separators occur in the exports.
pub fn last_segment(reference: &str) -> &str {
    reference
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(reference)
}

/// Normalize backslash separators to forward slashes.
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

pub fn value_at<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(node, |current, key| current.get(*key))
}

pub fn str_at<'a>(node: &'a Value, path: &[&str]) -> &'a str {
    value_at(node, path).and_then(Value::as_str).unwrap_or("")
}

pub fn number_at(node: &Value, path: &[&str]) -> f64 {
    value_at(node, path).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn array_at<'a>(node: &'a Value, path: &[&str]) -> &'a [Value] {
    value_at(node, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Every extension wrapper of a blueprint node as `(kind, wrapper)`.
///
/// An `extensions` entry is either the wrapper itself or an object holding the
/// wrapper under a nesting key such as `squadexts` or `exts`. The kind is the
/// last segment of `template_reference.value`. Entries without a template
/// reference are skipped.
pub fn extension_wrappers(node: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let Some(extensions) = node.get("extensions") else {
        return Vec::new();
    };
    let entries: Vec<&Value> = match extensions {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(|entry| {
            let wrapper = if entry.get("template_reference").is_some() {
                entry
            } else {
                entry
                    .as_object()?
                    .values()
                    .find(|inner| inner.get("template_reference").is_some())?
            };
            let template = str_at(wrapper, &["template_reference", "value"]);
            if template.is_empty() {
                return None;
            }
            Some((last_segment(template), wrapper))
        })
        .collect()
}
