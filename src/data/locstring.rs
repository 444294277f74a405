//! Locstring table: numeric token -> localized display string.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct LocstringTable {
    entries: HashMap<String, String>,
}

impl LocstringTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        LocstringTable { entries }
    }

    /// Build from the `locstring` dataset: `{ "11234530": "text", ... }`.
    /// Non-string values are skipped.
    pub fn from_document(document: &Value) -> Self {
        let entries = document
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(id, text)| Some((id.clone(), text.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        LocstringTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Resolve a locstring field as it appears in the blueprint exports.
    ///
    /// Accepts `"$11234530"`, `"11234530"`, `11234530`, or an object carrying
    /// `locstring.value` / `value`. Absent, empty and `0` tokens resolve to an
    /// empty string; ids missing from the table resolve to the literal `$<id>`.
    pub fn resolve(&self, field: Option<&Value>) -> String {
        let Some(id) = field.and_then(locstring_id) else {
            return String::new();
        };
        match self.entries.get(&id) {
            Some(text) => text.clone(),
            None => format!("${id}"),
        }
    }
}

fn locstring_id(field: &Value) -> Option<String> {
    let raw = match field {
        Value::String(token) => token.trim().trim_start_matches('$').to_string(),
        Value::Number(number) => number.to_string(),
        Value::Object(map) => {
            let inner = map
                .get("locstring")
                .and_then(|loc| loc.get("value"))
                .or_else(|| map.get("value"))?;
            return locstring_id(inner);
        }
        _ => return None,
    };
    if raw.is_empty() || raw == "0" {
        None
    } else {
        Some(raw)
    }
}
