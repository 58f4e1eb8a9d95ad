//! Change calculation between two versions of an object
//!
//! Produces the field-level `{before, after}` map stored in the metadata of
//! `updated` activities, plus a human-readable rendering of it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::BaseObject;

/// Key under which a tag-set change is reported
pub const TAGS_KEY: &str = "tags";

/// Key used when the fields document is not a JSON object on either side
pub const FIELDS_KEY: &str = "fields";

/// Before/after values of one changed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub before: Value,
    pub after: Value,
}

/// Changed fields keyed by field name
pub type Changes = BTreeMap<String, FieldChange>;

/// Compute the changes between two versions of an object
///
/// Top-level keys of `fields` are compared by deep equality; a key missing on
/// one side compares as `null`. Tags are compared as a set and reported as a
/// single `tags` entry carrying both full lists. Identical inputs yield an
/// empty map.
pub fn calculate_changes(old: &BaseObject, new: &BaseObject) -> Changes {
    let mut changes = Changes::new();

    match (&old.fields, &new.fields) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let after_val = after_obj.get(key).unwrap_or(&Value::Null);
                if before_val != after_val {
                    changes.insert(
                        key.clone(),
                        FieldChange {
                            before: before_val.clone(),
                            after: after_val.clone(),
                        },
                    );
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !after_val.is_null() {
                    changes.insert(
                        key.clone(),
                        FieldChange {
                            before: Value::Null,
                            after: after_val.clone(),
                        },
                    );
                }
            }
        }
        (before, after) => {
            if before != after {
                changes.insert(
                    FIELDS_KEY.to_string(),
                    FieldChange {
                        before: before.clone(),
                        after: after.clone(),
                    },
                );
            }
        }
    }

    if tag_set(old) != tag_set(new) {
        changes.insert(
            TAGS_KEY.to_string(),
            FieldChange {
                before: tag_list(old),
                after: tag_list(new),
            },
        );
    }

    changes
}

fn tag_set(object: &BaseObject) -> BTreeSet<&str> {
    object.tags.iter().map(String::as_str).collect()
}

fn tag_list(object: &BaseObject) -> Value {
    Value::Array(object.tags.iter().cloned().map(Value::String).collect())
}

/// Render changes as `key: before -> after`, comma separated
///
/// Returns `None` when there are no changes.
pub fn format_changes(changes: &Changes) -> Option<String> {
    if changes.is_empty() {
        return None;
    }

    let parts: Vec<String> = changes
        .iter()
        .map(|(key, change)| {
            format!(
                "{}: {} -> {}",
                key,
                format_value(&change.before),
                format_value(&change.after)
            )
        })
        .collect();

    Some(parts.join(", "))
}

/// Format a JSON value for human-readable display
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
