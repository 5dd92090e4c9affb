//! Project display formatting
//!
//! Formats projects for terminal output in table and detail views.

use crate::config::Settings;
use crate::models::BudgetProgress;
use crate::services::project::ProjectSummary;

use super::balance::format_balance_banner;
use super::format::{column_width, format_bar, format_date, left_align, separator};

const BAR_WIDTH: usize = 20;

/// Format a list of projects with their balances as a table
pub fn format_project_list(summaries: &[ProjectSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No projects found.\n".to_string();
    }

    let labels: Vec<String> = summaries
        .iter()
        .map(|s| format!("{} {}", s.project.emoji, s.project.name))
        .collect();
    let name_width = column_width(labels.iter().map(String::as_str), 7);

    let mut output = String::new();
    output.push_str(&format!(
        "{}  {:>12}  {:>12}  {:>8}  {}\n",
        left_align("Project", name_width),
        "Spent",
        "Budget",
        "Expenses",
        "Balance",
    ));
    output.push_str(&format!("{}\n", separator(name_width + 60)));

    for (summary, label) in summaries.iter().zip(&labels) {
        let budget = if summary.budget.is_tracked() {
            summary.project.budget.format_with_symbol(symbol)
        } else {
            "-".to_string()
        };

        output.push_str(&format!(
            "{}  {:>12}  {:>12}  {:>8}  {}\n",
            left_align(label, name_width),
            summary.balance.total_spent.format_with_symbol(symbol),
            budget,
            summary.project.expenses.len(),
            format_balance_banner(&summary.balance, &summary.project, symbol),
        ));
    }

    output
}

/// Format budget consumption as a bar with figures
pub fn format_budget_progress(progress: &BudgetProgress, symbol: &str) -> String {
    if !progress.is_tracked() {
        return "No budget set".to_string();
    }

    let mut line = format!(
        "{} {}%  {} of {}",
        format_bar(progress.fraction, BAR_WIDTH),
        progress.percentage,
        progress.spent.format_with_symbol(symbol),
        progress.budget.format_with_symbol(symbol),
    );

    if progress.over_budget {
        line.push_str(&format!(
            "  (over by {})",
            (-progress.remaining).format_with_symbol(symbol)
        ));
    } else {
        line.push_str(&format!(
            "  ({} left)",
            progress.remaining.format_with_symbol(symbol)
        ));
    }

    line
}

/// Format a single project's details
pub fn format_project_details(summary: &ProjectSummary, settings: &Settings) -> String {
    let project = &summary.project;
    let symbol = settings.currency_symbol.as_str();

    let mut output = String::new();

    output.push_str(&format!("{} {}\n", project.emoji, project.name));
    output.push_str(&format!("  ID:        {}\n", project.id));
    output.push_str(&format!(
        "  Party 1:   {} ({} expense(s))\n",
        project.party1_name, summary.party1_expense_count
    ));
    output.push_str(&format!(
        "  Party 2:   {} ({} expense(s))\n",
        project.party2_name, summary.party2_expense_count
    ));
    output.push_str(&format!(
        "  Created:   {}\n",
        format_date(&project.created_at, &settings.date_format)
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Balance:   {}\n",
        format_balance_banner(&summary.balance, project, symbol)
    ));
    output.push_str(&format!(
        "  Spent:     {}\n",
        summary.balance.total_spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Budget:    {}\n",
        format_budget_progress(&summary.budget, symbol)
    ));

    output
}
