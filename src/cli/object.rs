//! Object CLI commands
//!
//! Implements CLI commands for creating, editing and inspecting objects.
//! Every mutation goes through [`ObjectService`], so each one lands in the
//! activity timeline.

use clap::Subcommand;
use serde_json::Value;

use crate::config::Settings;
use crate::display::{format_object_details, format_object_list};
use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{ActorId, BaseObject, ObjectId, ObjectKind};
use crate::services::ObjectService;
use crate::storage::ObjectStore;

/// Object subcommands
#[derive(Subcommand)]
pub enum ObjectCommands {
    /// Create a new object
    Create {
        /// Object kind (user, record, task, event, message, notification, or any custom kind)
        kind: String,
        /// Object ID (generated if omitted)
        #[arg(long)]
        id: Option<String>,
        /// Acting user
        #[arg(short, long, env = "OBJTRAIL_ACTOR", default_value = "cli")]
        actor: String,
        /// Field assignment, e.g. --set title="Call Ada" --set priority=2
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tag: Vec<String>,
    },
    /// Edit an object's fields and tags
    Update {
        /// Object ID
        id: String,
        /// Field assignment (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Field to remove (repeatable)
        #[arg(long = "unset", value_name = "KEY")]
        unset: Vec<String>,
        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tag: Vec<String>,
        /// Tag to remove (repeatable)
        #[arg(long = "untag")]
        untag: Vec<String>,
    },
    /// Delete an object
    Delete {
        /// Object ID
        id: String,
    },
    /// Grant another user a role on an object
    Share {
        /// Object ID
        id: String,
        /// User receiving access
        #[arg(short = 'w', long = "with")]
        grantee: String,
        /// Role to grant
        #[arg(short, long, default_value = "viewer")]
        role: String,
        /// Acting user
        #[arg(short, long, env = "OBJTRAIL_ACTOR", default_value = "cli")]
        actor: String,
    },
    /// Show object details
    Show {
        /// Object ID
        id: String,
    },
    /// List objects of one kind
    List {
        /// Object kind
        kind: String,
    },
}

/// Handle an object command
pub fn handle_object_command<S: ObjectStore + ?Sized>(
    store: &S,
    settings: &Settings,
    cmd: ObjectCommands,
) -> ObjtrailResult<()> {
    let service = ObjectService::new(store);

    match cmd {
        ObjectCommands::Create {
            kind,
            id,
            actor,
            set,
            tag,
        } => {
            let kind = ObjectKind::parse(&kind);
            let mut object = match id {
                Some(id) => BaseObject::with_id(id, kind, actor),
                None => BaseObject::new(kind, actor),
            };
            for assignment in &set {
                let (key, value) = parse_assignment(assignment)?;
                object.set_field(key, value);
            }
            for t in tag {
                object.add_tag(t);
            }

            let created = service.create(object)?;
            println!("Created {}: {}", created.kind(), created.id());
        }

        ObjectCommands::Update {
            id,
            set,
            unset,
            tag,
            untag,
        } => {
            let id = ObjectId::from(id);
            let before = service.get(&id)?;

            let assignments = set
                .iter()
                .map(String::as_str)
                .map(parse_assignment)
                .collect::<ObjtrailResult<Vec<_>>>()?;

            let after = service.update(&id, |object| {
                for (key, value) in assignments {
                    object.set_field(key, value);
                }
                for key in &unset {
                    object.remove_field(key);
                }
                for t in tag {
                    object.add_tag(t);
                }
                for t in &untag {
                    object.remove_tag(t);
                }
            })?;

            if after == before {
                println!("No changes to {}", id);
            } else {
                println!("Updated {}: {}", after.kind(), after.id());
            }
        }

        ObjectCommands::Delete { id } => {
            let deleted = service.delete(&ObjectId::from(id))?;
            println!("Deleted {}: {}", deleted.kind(), deleted.id());
        }

        ObjectCommands::Share {
            id,
            grantee,
            role,
            actor,
        } => {
            let id = ObjectId::from(id);
            let grantee = ActorId::from(grantee);
            service.share(&id, &ActorId::from(actor), &grantee, &role)?;
            println!("Shared {} with {} as {}", id, grantee, role);
        }

        ObjectCommands::Show { id } => {
            let object = service.get(&ObjectId::from(id))?;
            print!("{}", format_object_details(&object, &settings.date_format));
        }

        ObjectCommands::List { kind } => {
            let objects = service.list(&ObjectKind::parse(&kind))?;
            print!("{}", format_object_list(&objects));
        }
    }

    Ok(())
}

/// Parse `key=value`; the value is read as JSON, falling back to a plain string
pub fn parse_assignment(assignment: &str) -> ObjtrailResult<(String, Value)> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| {
        ObjtrailError::Validation(format!(
            "Invalid field assignment: '{}'. Use KEY=VALUE",
            assignment
        ))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ObjtrailError::Validation(format!(
            "Missing field name in '{}'",
            assignment
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
