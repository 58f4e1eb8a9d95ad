//! Object display formatting
//!
//! Formats stored objects for terminal output in list and detail views.

use super::format_timestamp;
use crate::models::{BaseObject, ObjectKind, RecordFields, TaskFields, UserFields};

/// One-line description from the kind's typed fields, if they decode
pub fn headline(object: &BaseObject) -> Option<String> {
    let with_email = |name: String, email: Option<String>| match email {
        Some(email) => format!("{} <{}>", name, email),
        None => name,
    };

    match object.kind() {
        ObjectKind::Task => object.typed_fields::<TaskFields>().ok().map(|task| {
            let mut line = format!("{} [{}]", task.title, task.status.as_str());
            if let Some(due) = task.due_date {
                line.push_str(&format!(" due {}", due));
            }
            line
        }),
        ObjectKind::Record => object
            .typed_fields::<RecordFields>()
            .ok()
            .map(|record| match record.company {
                Some(company) => format!("{} ({})", with_email(record.name, record.email), company),
                None => with_email(record.name, record.email),
            }),
        ObjectKind::User => object
            .typed_fields::<UserFields>()
            .ok()
            .map(|user| with_email(user.display_name, user.email)),
        _ => None,
    }
}

/// Format a list of objects, one per line
pub fn format_object_list(objects: &[BaseObject]) -> String {
    if objects.is_empty() {
        return "No objects found.".to_string();
    }

    let id_width = objects
        .iter()
        .map(|o| o.id().as_str().chars().count())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    for object in objects {
        let tags = if object.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", object.tags.join(", "))
        };
        let summary = headline(object).unwrap_or_else(|| object.fields.to_string());
        output.push_str(&format!(
            "  {:<id_width$}  {}{}\n",
            object.id().as_str(),
            summary,
            tags,
        ));
    }
    output
}

/// Format a single object's details
pub fn format_object_details(object: &BaseObject, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Object: {}\n", object.id()));
    output.push_str(&format!("  Kind:       {}\n", object.kind()));
    if let Some(summary) = headline(object) {
        output.push_str(&format!("  Summary:    {}\n", summary));
    }
    output.push_str(&format!("  Created by: {}\n", object.created_by));
    output.push_str(&format!(
        "  Created:    {}\n",
        format_timestamp(object.created_at, date_format)
    ));
    output.push_str(&format!(
        "  Modified:   {}\n",
        format_timestamp(object.updated_at, date_format)
    ));

    if !object.tags.is_empty() {
        output.push_str(&format!("  Tags:       {}\n", object.tags.join(", ")));
    }

    if !object.acl.is_empty() {
        output.push_str("  Access:\n");
        for entry in &object.acl {
            output.push_str(&format!("    {} ({})\n", entry.actor_id, entry.role));
        }
    }

    let fields = serde_json::to_string_pretty(&object.fields)
        .unwrap_or_else(|_| object.fields.to_string());
    output.push_str("  Fields:\n");
    for line in fields.lines() {
        output.push_str(&format!("    {}\n", line));
    }

    output
}
