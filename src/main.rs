use anyhow::Result;
use clap::{Parser, Subcommand};

use duospend::cli::{
    handle_balance_command, handle_expense_command, handle_project_command, ExpenseCommands,
    ProjectCommands,
};
use duospend::config::{paths::DuoSpendPaths, settings::Settings};
use duospend::services::ProjectService;
use duospend::storage::{initialize_storage, sample_project, Storage};

/// Environment variable holding the log filter (e.g. `debug`, `duospend=info`)
const LOG_ENV: &str = "DUOSPEND_LOG";

#[derive(Parser)]
#[command(
    name = "duospend",
    version,
    about = "Shared expense tracking for two",
    long_about = "DuoSpend tracks the expenses two people share on a project \
                  (a wedding, a trip, a renovation) and tells you at any time \
                  who owes whom, to the cent."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management commands
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show who owes whom in a project
    Balance {
        /// Project name or ID
        project: String,
        /// Print the balance as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the demo project
    Sample,

    /// Initialize DuoSpend
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = DuoSpendPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Project(cmd)) => {
            handle_project_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Balance { project, json }) => {
            handle_balance_command(&storage, &settings, &project, json)?;
        }
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Sample) => {
            let project = ProjectService::new(&storage).insert(sample_project())?;
            println!("Created sample project: {} {}", project.emoji, project.name);
            println!(
                "  {} expense(s) between {} and {}",
                project.expenses.len(),
                project.party1_name,
                project.party2_name
            );
            println!();
            println!("Run 'duospend balance \"{}\"' to see who owes whom.", project.name);
        }
        Some(Commands::Init) => {
            println!("Initializing DuoSpend at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Run 'duospend project create <name> --party1 <name> --party2 <name>' to start."
            );
        }
        Some(Commands::Config) => {
            println!("DuoSpend Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!(
                "Initialized:     {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Default expense sort: {}", settings.default_expense_sort);
            if let Some(name) = &settings.default_party1_name {
                println!("  Default party 1:      {}", name);
            }
            if let Some(name) = &settings.default_party2_name {
                println!("  Default party 2:      {}", name);
            }
        }
        None => {
            println!("DuoSpend - shared expenses for two");
            println!();
            println!("Run 'duospend --help' for usage information.");
            println!("Run 'duospend sample' to create a demo project.");
        }
    }

    Ok(())
}
