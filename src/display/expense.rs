//! Expense display formatting

use crate::config::Settings;
use crate::models::{Expense, Project};

use super::format::{column_width, format_date, left_align, separator, truncate};

const TITLE_WIDTH: usize = 28;

/// Format a project's expenses as a register
pub fn format_expense_list(project: &Project, expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return format!("No expenses recorded for {}.\n", project.name);
    }

    let symbol = settings.currency_symbol.as_str();
    let payer_width = column_width(
        [project.party1_name.as_str(), project.party2_name.as_str()].into_iter(),
        7,
    );
    let title_width = column_width(expenses.iter().map(|e| e.title.as_str()), 5).min(TITLE_WIDTH);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {}  {:>12}  {}  {:>7}\n",
        "ID",
        "Date",
        left_align("Title", title_width),
        "Amount",
        left_align("Paid by", payer_width),
        "Split",
    ));
    output.push_str(&format!("{}\n", separator(title_width + payer_width + 55)));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {}  {:>12}  {}  {:>7}\n",
            expense.id.short(),
            format_date(&expense.date, &settings.date_format),
            left_align(&truncate(&expense.title, title_width), title_width),
            expense.amount.format_with_symbol(symbol),
            left_align(project.party_name(expense.payer), payer_width),
            expense.split_ratio.to_string(),
        ));
    }

    output
}

/// Format a single expense's details
pub fn format_expense_details(project: &Project, expense: &Expense, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let (party1_share, party2_share) = expense.shares();

    let mut output = String::new();
    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!(
        "  Date:     {}\n",
        format_date(&expense.date, &settings.date_format)
    ));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Paid by:  {}\n",
        project.party_name(expense.payer)
    ));
    output.push_str(&format!("  Split:    {}\n", expense.split_ratio));
    output.push_str(&format!(
        "  Shares:   {} {} / {} {}\n",
        project.party1_name,
        party1_share.format_with_symbol(symbol),
        project.party2_name,
        party2_share.format_with_symbol(symbol),
    ));

    if let Some(category) = &expense.category {
        output.push_str(&format!("  Category: {}\n", category));
    }

    output
}
