//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::balance::format_balance_banner;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{DuoSpendError, DuoSpendResult};
use crate::models::{ExpenseSort, Project};
use crate::services::{ExpenseService, ExpenseUpdate, NewExpense, ProjectService};
use crate::storage::Storage;

use super::{parse_date, parse_money, parse_payer, parse_split};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Project name or ID
        project: String,
        /// What the money was spent on
        title: String,
        /// Amount paid (e.g., "80" or "80,50")
        amount: String,
        /// Who paid: a party name, or 1 / 2
        #[arg(short, long)]
        paid_by: String,
        /// Split: "equal", party 1's percentage ("70") or weights ("70/30")
        #[arg(short, long, default_value = "equal")]
        split: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List the expenses of a project
    List {
        /// Project name or ID
        project: String,
        /// Sort order: date, amount or payer
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Show expense details
    Show {
        /// Project name or ID
        project: String,
        /// Expense ID (short form accepted)
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Project name or ID
        project: String,
        /// Expense ID (short form accepted)
        expense: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New payer
        #[arg(short, long)]
        paid_by: Option<String>,
        /// New split
        #[arg(short, long)]
        split: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category (empty string clears it)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Project name or ID
        project: String,
        /// Expense ID (short form accepted)
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> DuoSpendResult<()> {
    let projects = ProjectService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            project,
            title,
            amount,
            paid_by,
            split,
            date,
            category,
        } => {
            let found = projects.require(&project)?;

            let input = NewExpense {
                title,
                amount: parse_money(&amount, "amount")?,
                payer: parse_payer(&found, &paid_by)?,
                split_ratio: parse_split(&split)?,
                date: date.as_deref().map(parse_date).transpose()?,
                category,
            };

            let expense = service.add(found.id, input)?;
            println!(
                "Added expense: {} {} paid by {} (split {})",
                expense.title,
                expense.amount.format_with_symbol(symbol),
                found.party_name(expense.payer),
                expense.split_ratio
            );
            println!("  ID: {}", expense.id);
            print_balance(&projects, &found, symbol)?;
        }

        ExpenseCommands::List { project, sort } => {
            let found = projects.require(&project)?;
            let sort = match sort {
                Some(s) => ExpenseSort::parse(&s).ok_or_else(|| {
                    DuoSpendError::Validation(format!(
                        "Invalid sort order: '{}'. Valid orders: date, amount, payer",
                        s
                    ))
                })?,
                None => settings.default_expense_sort,
            };

            let expenses = service.list(found.id, sort)?;
            print!("{}", format_expense_list(&found, &expenses, settings));
        }

        ExpenseCommands::Show { project, expense } => {
            let found = projects.require(&project)?;
            let item = service
                .find(found.id, &expense)?
                .ok_or_else(|| DuoSpendError::expense_not_found(&expense))?;
            print!("{}", format_expense_details(&found, &item, settings));
        }

        ExpenseCommands::Edit {
            project,
            expense,
            title,
            amount,
            paid_by,
            split,
            date,
            category,
        } => {
            let found = projects.require(&project)?;
            let item = service
                .find(found.id, &expense)?
                .ok_or_else(|| DuoSpendError::expense_not_found(&expense))?;

            let changes = ExpenseUpdate {
                title,
                amount: amount
                    .as_deref()
                    .map(|a| parse_money(a, "amount"))
                    .transpose()?,
                payer: paid_by
                    .as_deref()
                    .map(|p| parse_payer(&found, p))
                    .transpose()?,
                split_ratio: split.as_deref().map(parse_split).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category: category.map(Some),
            };

            let updated = service.update(found.id, item.id, changes)?;
            println!("Updated expense: {}", updated.title);
            print_balance(&projects, &found, symbol)?;
        }

        ExpenseCommands::Delete { project, expense } => {
            let found = projects.require(&project)?;
            let item = service
                .find(found.id, &expense)?
                .ok_or_else(|| DuoSpendError::expense_not_found(&expense))?;

            let deleted = service.delete(found.id, item.id)?;
            println!(
                "Deleted expense: {} ({})",
                deleted.title,
                deleted.amount.format_with_symbol(symbol)
            );
            print_balance(&projects, &found, symbol)?;
        }
    }

    Ok(())
}

fn print_balance(projects: &ProjectService, project: &Project, symbol: &str) -> DuoSpendResult<()> {
    let summary = projects.summary(project.id)?;
    println!(
        "Balance: {}",
        format_balance_banner(&summary.balance, &summary.project, symbol)
    );
    Ok(())
}
