//! Storage initialization
//!
//! Handles first-run setup and the demo project

use rust_decimal_macros::dec;

use crate::config::paths::DuoSpendPaths;
use crate::error::DuoSpendError;
use crate::models::{Expense, Money, Party, Project, SplitRatio};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the data directory and an empty project file
pub fn initialize_storage(paths: &DuoSpendPaths) -> Result<(), DuoSpendError> {
    paths.ensure_directories()?;

    if !paths.projects_file().exists() {
        write_json_atomic(paths.projects_file(), &serde_json::json!({ "projects": [] }))?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &DuoSpendPaths) -> bool {
    !paths.is_initialized() || !paths.projects_file().exists()
}

/// Demo project: a wedding budget shared by Marie and Thomas
///
/// Balance: Thomas owes Marie 70.
pub fn sample_project() -> Project {
    let mut project = Project::new("Wedding", Money::new(dec!(5000)), "Marie", "Thomas")
        .with_emoji("💒");

    project.add_expense(
        Expense::new("Dinner at Le Zinc", Money::new(dec!(80)), Party::Party1)
            .with_category("Food"),
    );
    project.add_expense(
        Expense::new("Fuel", Money::new(dec!(60)), Party::Party2).with_category("Transport"),
    );
    project.add_expense(
        Expense::new("Weekend hotel", Money::new(dec!(200)), Party::Party1)
            .with_split(SplitRatio::custom(dec!(70), dec!(30)))
            .with_category("Lodging"),
    );

    project
}
