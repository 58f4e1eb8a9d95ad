//! Timeline display formatting
//!
//! Formats activities for terminal output as an aligned table.

use super::format_timestamp;
use crate::activity::{format_changes, ActivityObject};

/// Format activities as a table, one row per activity
pub fn format_timeline(activities: &[ActivityObject], date_format: &str) -> String {
    if activities.is_empty() {
        return "No activity found.".to_string();
    }

    let rows: Vec<[String; 5]> = activities
        .iter()
        .map(|a| {
            [
                format_timestamp(a.created_at(), date_format),
                a.actor_id().to_string(),
                a.verb().to_string(),
                format!("{} {}", a.object_kind(), a.object_id()),
                detail(a),
            ]
        })
        .collect();

    let width = |col: usize, header: &str| {
        rows.iter()
            .map(|r| r[col].chars().count())
            .max()
            .unwrap_or(0)
            .max(header.len())
    };
    let when_width = width(0, "When");
    let actor_width = width(1, "Actor");
    let verb_width = width(2, "Verb");
    let object_width = width(3, "Object");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<when_width$}  {:<actor_width$}  {:<verb_width$}  {:<object_width$}  {}\n",
        "When", "Actor", "Verb", "Object", "Details",
    ));
    output.push_str(&format!(
        "{:-<when_width$}  {:-<actor_width$}  {:-<verb_width$}  {:-<object_width$}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for row in &rows {
        let line = format!(
            "{:<when_width$}  {:<actor_width$}  {:<verb_width$}  {:<object_width$}  {}",
            row[0], row[1], row[2], row[3], row[4],
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Short per-verb detail column
fn detail(activity: &ActivityObject) -> String {
    if let Some(diff) = activity.changes().ok().as_ref().and_then(format_changes) {
        return diff;
    }

    match (
        activity.metadata().get("grantee").and_then(|v| v.as_str()),
        activity.metadata().get("role").and_then(|v| v.as_str()),
    ) {
        (Some(grantee), Some(role)) => format!("{} as {}", grantee, role),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{Verb, CHANGES_KEY};
    use crate::models::{ObjectId, ObjectKind};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Map};

    #[test]
    fn test_empty_timeline() {
        assert_eq!(format_timeline(&[], "%Y"), "No activity found.");
    }

    #[test]
    fn test_timeline_table() {
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 8, 0, 0).unwrap();
        let mut metadata = Map::new();
        metadata.insert(
            CHANGES_KEY.into(),
            json!({"title": {"before": "Call", "after": "Email"}}),
        );

        let activities = vec![
            ActivityObject::new(
                "alice",
                Verb::Updated,
                ObjectId::from("task-1"),
                ObjectKind::Task,
                metadata,
            )
            .unwrap()
            .recorded_at(at),
            ActivityObject::new(
                "alice",
                Verb::Created,
                ObjectId::from("task-1"),
                ObjectKind::Task,
                Map::new(),
            )
            .unwrap()
            .recorded_at(at),
        ];

        let output = format_timeline(&activities, "%Y-%m-%d");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("When"));
        assert!(lines[2].contains("updated"));
        assert!(lines[2].contains("title: \"Call\" -> \"Email\""));
        assert!(lines[3].contains("created"));
        assert!(lines[3].contains("task task-1"));
    }

    #[test]
    fn test_share_detail() {
        let mut metadata = Map::new();
        metadata.insert("grantee".into(), json!("bob"));
        metadata.insert("role".into(), json!("editor"));
        let activity = ActivityObject::new(
            "alice",
            Verb::Shared,
            ObjectId::from("rec-1"),
            ObjectKind::Record,
            metadata,
        )
        .unwrap();

        assert_eq!(detail(&activity), "bob as editor");
    }
}
