pub mod dashboard;
pub mod entries;
pub mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard::{process_dashboard_command, DashboardCommand};
use entries::{
    process_add_command, process_delete_command, process_edit_command, process_list_command,
    process_tags_command, AddCommand, EditCommand, ListCommand,
};
use settings::{
    process_export_command, process_import_command, process_reset_command, process_seed_command,
};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    config::EngineConfig,
    query::collation::DEFAULT_COLLATION_LOCALE,
    session::Session,
    store::entry_store::{EntryStore, FileStorage},
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Habitlog", version, long_about = None)]
#[command(about = "Personal habit and activity log", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        env = "HABITLOG_DIR",
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "HABITLOG_LOCALE",
        default_value = DEFAULT_COLLATION_LOCALE,
        help = "Locale used to order titles, for example \"ja\" or \"en\""
    )]
    locale: String,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show streak, weekly goal and daily activity. Fills an empty log with demo data")]
    Dashboard {
        #[command(flatten)]
        command: DashboardCommand,
    },
    #[command(about = "List entries")]
    List {
        #[command(flatten)]
        command: ListCommand,
    },
    #[command(about = "List every tag in use")]
    Tags {},
    #[command(about = "Log a new entry dated now")]
    Add {
        #[command(flatten)]
        command: AddCommand,
    },
    #[command(about = "Change fields of an entry")]
    Edit {
        #[command(flatten)]
        command: EditCommand,
    },
    #[command(about = "Delete an entry")]
    Delete { id: String },
    #[command(about = "Print all entries as JSON")]
    Export {
        #[arg(short, long, help = "Write into a file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(about = "Replace all entries with the ones in an exported JSON file")]
    Import { file: PathBuf },
    #[command(about = "Replace all entries with demo data")]
    Seed {},
    #[command(about = "Delete all entries")]
    Reset {
        #[arg(long, help = "Confirm deleting everything")]
        yes: bool,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let config = EngineConfig {
        collation_locale: args.locale,
    };
    let storage = FileStorage::new(app_dir.join("data"))?;
    let session = Session::new(EntryStore::new(storage), Box::new(DefaultClock));

    match args.commands {
        Commands::Dashboard { command } => process_dashboard_command(command, &session).await,
        Commands::List { command } => process_list_command(command, &session, &config).await,
        Commands::Tags {} => process_tags_command(&session).await,
        Commands::Add { command } => process_add_command(command, &session).await,
        Commands::Edit { command } => process_edit_command(command, &session).await,
        Commands::Delete { id } => process_delete_command(&id, &session).await,
        Commands::Export { output } => process_export_command(output, &session).await,
        Commands::Import { file } => process_import_command(&file, &session).await,
        Commands::Seed {} => process_seed_command(&session).await,
        Commands::Reset { yes } => process_reset_command(yes, &session).await,
    }
}
