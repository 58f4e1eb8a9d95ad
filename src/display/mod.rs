//! Display formatting for terminal output
//!
//! Formats objects and activity timelines for the CLI.

pub mod activity;
pub mod object;

pub use activity::format_timeline;
pub use object::{format_object_details, format_object_list};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Format a timestamp, falling back to RFC 3339 when `date_format` is not a
/// valid strftime pattern
pub fn format_timestamp(ts: DateTime<Utc>, date_format: &str) -> String {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return ts.to_rfc3339();
    }
    ts.format(date_format).to_string()
}
