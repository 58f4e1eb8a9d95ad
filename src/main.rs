use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use objtrail::cli::{
    handle_object_command, handle_recent_command, handle_timeline_command, ObjectCommands,
    TimelineArgs,
};
use objtrail::config::{ObjtrailPaths, Settings};
use objtrail::storage::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "objtrail",
    version,
    about = "Schema-free object store with an activity timeline",
    long_about = "objtrail stores contacts, tasks and any other kind of object as \
                  schema-free documents and keeps an activity trail of every \
                  change, queryable as a timeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Object management commands
    #[command(subcommand, alias = "obj")]
    Object(ObjectCommands),

    /// Show the activity timeline
    #[command(alias = "log")]
    Timeline(TimelineArgs),

    /// Show the most recent activity
    Recent {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Initialize the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ObjtrailPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Some(Commands::Object(cmd)) => {
            let store = JsonFileStore::open(paths.objects_file())?;
            handle_object_command(&store, &settings, cmd)?;
        }
        Some(Commands::Timeline(args)) => {
            let store = JsonFileStore::open(paths.objects_file())?;
            handle_timeline_command(&store, &settings, &args)?;
        }
        Some(Commands::Recent { limit }) => {
            let store = JsonFileStore::open(paths.objects_file())?;
            handle_recent_command(&store, &settings, limit)?;
        }
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized objtrail at: {}", paths.base_dir().display());
        }
        Some(Commands::Config) => {
            println!("objtrail Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Objects file:   {}", paths.objects_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default timeline limit: {}", settings.default_timeline_limit);
            println!("  Date format:            {}", settings.date_format);
            println!("  Log filter:             {}", settings.log_filter);
        }
        None => {
            println!("objtrail - schema-free objects with an activity timeline");
            println!();
            println!("Run 'objtrail --help' for usage information.");
        }
    }

    Ok(())
}
