//! Timeline CLI commands
//!
//! Query the activity trail with any combination of filters.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Args;

use crate::activity::Verb;
use crate::config::Settings;
use crate::display::format_timeline;
use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::ObjectKind;
use crate::storage::ObjectStore;
use crate::timeline::{Timeline, TimelineFilter};

/// Timeline filters
#[derive(Args, Debug, Default)]
pub struct TimelineArgs {
    /// Only activity about this object ID
    #[arg(short, long)]
    pub object: Option<String>,
    /// Only activity by this actor
    #[arg(short, long)]
    pub actor: Option<String>,
    /// Only this verb (created, updated, deleted, viewed, shared)
    #[arg(short, long)]
    pub verb: Option<String>,
    /// Only activity about objects of this kind
    #[arg(short, long)]
    pub kind: Option<String>,
    /// Earliest time, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub since: Option<String>,
    /// Latest time, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub until: Option<String>,
    /// Maximum number of entries (0 for all)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl TimelineArgs {
    /// Build a filter, falling back to the configured default limit
    pub fn to_filter(&self, settings: &Settings) -> ObjtrailResult<TimelineFilter> {
        let mut filter =
            TimelineFilter::new().limit(self.limit.unwrap_or(settings.default_timeline_limit));

        if let Some(object) = &self.object {
            filter = filter.object(object.as_str());
        }
        if let Some(actor) = &self.actor {
            filter = filter.actor(actor.as_str());
        }
        if let Some(verb) = &self.verb {
            let parsed = Verb::parse(verb).ok_or_else(|| {
                ObjtrailError::Validation(format!(
                    "Invalid verb: '{}'. Valid verbs: created, updated, deleted, viewed, shared",
                    verb
                ))
            })?;
            filter = filter.verb(parsed);
        }
        if let Some(kind) = &self.kind {
            filter = filter.kind(ObjectKind::parse(kind));
        }
        if let Some(since) = &self.since {
            filter = filter.since(parse_time(since, NaiveTime::MIN)?);
        }
        if let Some(until) = &self.until {
            let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap_or(NaiveTime::MIN);
            filter = filter.until(parse_time(until, end_of_day)?);
        }

        Ok(filter)
    }
}

/// Handle the timeline command
pub fn handle_timeline_command<S: ObjectStore + ?Sized>(
    store: &S,
    settings: &Settings,
    args: &TimelineArgs,
) -> ObjtrailResult<()> {
    let filter = args.to_filter(settings)?;
    let activities = Timeline::new(store).get_timeline(&filter)?;
    print!("{}", format_timeline(&activities, &settings.date_format));
    Ok(())
}

/// Handle the recent command
pub fn handle_recent_command<S: ObjectStore + ?Sized>(
    store: &S,
    settings: &Settings,
    limit: Option<usize>,
) -> ObjtrailResult<()> {
    let activities = Timeline::new(store)
        .get_recent_activities(limit.unwrap_or(settings.default_timeline_limit))?;
    print!("{}", format_timeline(&activities, &settings.date_format));
    Ok(())
}

/// Parse an RFC 3339 timestamp, or a bare date at `time_of_day` UTC
fn parse_time(s: &str, time_of_day: NaiveTime) -> ObjtrailResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(time_of_day).and_utc())
        .map_err(|_| {
            ObjtrailError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD or RFC 3339",
                s
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_limit_from_settings() {
        let settings = Settings {
            default_timeline_limit: 7,
            ..Settings::default()
        };
        let filter = TimelineArgs::default().to_filter(&settings).unwrap();
        assert_eq!(filter, TimelineFilter::new().limit(7));
    }

    #[test]
    fn test_all_dimensions() {
        let args = TimelineArgs {
            object: Some("task-1".into()),
            actor: Some("alice".into()),
            verb: Some("Updated".into()),
            kind: Some("task".into()),
            since: Some("2026-10-01".into()),
            until: Some("2026-10-02T08:00:00Z".into()),
            limit: Some(0),
        };
        let filter = args.to_filter(&Settings::default()).unwrap();

        assert_eq!(filter.object_id.unwrap().as_str(), "task-1");
        assert_eq!(filter.actor_id.unwrap().as_str(), "alice");
        assert_eq!(filter.verb, Some(Verb::Updated));
        assert_eq!(filter.object_kind, Some(ObjectKind::Task));
        assert_eq!(
            filter.start_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            filter.end_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap())
        );
        assert_eq!(filter.limit, 0);
    }

    #[test]
    fn test_until_bare_date_is_end_of_day() {
        let args = TimelineArgs {
            until: Some("2026-10-02".into()),
            ..TimelineArgs::default()
        };
        let end = args.to_filter(&Settings::default()).unwrap().end_date.unwrap();
        assert!(end > Utc.with_ymd_and_hms(2026, 10, 2, 23, 59, 59).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2026, 10, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_inputs() {
        let bad_verb = TimelineArgs {
            verb: Some("liked".into()),
            ..TimelineArgs::default()
        };
        assert!(matches!(
            bad_verb.to_filter(&Settings::default()),
            Err(ObjtrailError::Validation(_))
        ));

        let bad_date = TimelineArgs {
            since: Some("yesterday".into()),
            ..TimelineArgs::default()
        };
        assert!(matches!(
            bad_date.to_filter(&Settings::default()),
            Err(ObjtrailError::Validation(_))
        ));
    }
}
