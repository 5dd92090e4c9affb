//! Display formatting for terminal output
//!
//! Provides utilities for formatting projects, expenses and balances for
//! terminal display as plain-text tables.

pub mod balance;
pub mod expense;
pub mod format;
pub mod project;

pub use balance::{format_balance_banner, format_balance_report};
pub use expense::{format_expense_details, format_expense_list};
pub use project::{format_budget_progress, format_project_details, format_project_list};
