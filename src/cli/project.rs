//! Project CLI commands
//!
//! Implements CLI commands for project management and the balance view.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::balance::format_balance_report;
use crate::display::project::{format_project_details, format_project_list};
use crate::error::{DuoSpendError, DuoSpendResult};
use crate::services::{NewProject, ProjectService, ProjectUpdate};
use crate::storage::Storage;

use super::parse_money;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Total budget (e.g., "5000" or "5000.00"); 0 disables budget tracking
        #[arg(short, long, default_value = "0")]
        budget: String,
        /// Name of the first party
        #[arg(long = "party1")]
        party1: Option<String>,
        /// Name of the second party
        #[arg(long = "party2")]
        party2: Option<String>,
        /// Emoji shown next to the project name
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// List all projects
    List,
    /// Show project details
    Show {
        /// Project name or ID
        project: String,
    },
    /// Edit a project
    Edit {
        /// Project name or ID
        project: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New budget
        #[arg(short, long)]
        budget: Option<String>,
        /// New name for the first party
        #[arg(long = "party1")]
        party1: Option<String>,
        /// New name for the second party
        #[arg(long = "party2")]
        party2: Option<String>,
        /// New emoji
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// Delete a project and all of its expenses
    Delete {
        /// Project name or ID
        project: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a project command
pub fn handle_project_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> DuoSpendResult<()> {
    let service = ProjectService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ProjectCommands::Create {
            name,
            budget,
            party1,
            party2,
            emoji,
        } => {
            let budget = parse_money(&budget, "budget")?;

            let party1_name = party1
                .or_else(|| settings.default_party1_name.clone())
                .ok_or_else(|| {
                    DuoSpendError::Validation(
                        "Missing party 1 name. Use --party1 or set default_party1_name".into(),
                    )
                })?;
            let party2_name = party2
                .or_else(|| settings.default_party2_name.clone())
                .ok_or_else(|| {
                    DuoSpendError::Validation(
                        "Missing party 2 name. Use --party2 or set default_party2_name".into(),
                    )
                })?;

            let project = service.create(NewProject {
                name,
                emoji,
                budget,
                party1_name,
                party2_name,
            })?;

            println!("Created project: {} {}", project.emoji, project.name);
            println!("  Parties: {} & {}", project.party1_name, project.party2_name);
            if project.has_budget() {
                println!("  Budget:  {}", project.budget.format_with_symbol(symbol));
            }
            println!("  ID:      {}", project.id);
        }

        ProjectCommands::List => {
            let summaries = service.list_with_summaries()?;
            print!("{}", format_project_list(&summaries, symbol));
        }

        ProjectCommands::Show { project } => {
            let found = service.require(&project)?;
            let summary = service.summary(found.id)?;
            print!("{}", format_project_details(&summary, settings));
        }

        ProjectCommands::Edit {
            project,
            name,
            budget,
            party1,
            party2,
            emoji,
        } => {
            let found = service.require(&project)?;

            let changes = ProjectUpdate {
                name,
                emoji,
                budget: budget
                    .as_deref()
                    .map(|b| parse_money(b, "budget"))
                    .transpose()?,
                party1_name: party1,
                party2_name: party2,
            };

            if changes.is_empty() {
                println!(
                    "No changes specified. Use --name, --budget, --party1, --party2 or --emoji."
                );
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated project: {} {}", updated.emoji, updated.name);
        }

        ProjectCommands::Delete { project, force } => {
            let found = service.require(&project)?;

            if !found.expenses.is_empty() && !force {
                println!(
                    "Project '{}' has {} expense(s) that will be deleted with it.",
                    found.name,
                    found.expenses.len()
                );
                println!("To proceed, run again with --force flag:");
                println!("  duospend project delete \"{}\" --force", found.name);
                return Ok(());
            }

            let deleted = service.delete(found.id)?;
            println!(
                "Deleted project: {} ({} expense(s) removed)",
                deleted.name,
                deleted.expenses.len()
            );
        }
    }

    Ok(())
}

/// Show who owes whom in a project
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    project: &str,
    json: bool,
) -> DuoSpendResult<()> {
    let service = ProjectService::new(storage);
    let found = service.require(project)?;
    let balance = service.balance(found.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balance)?);
    } else {
        print!(
            "{}",
            format_balance_report(&balance, &found, &settings.currency_symbol)
        );
    }

    Ok(())
}

