//! Balance display formatting

use crate::models::{Party, Project};
use crate::services::balance::BalanceResult;

use super::format::{column_width, left_align};

/// One-line summary of who owes whom
pub fn format_balance_banner(balance: &BalanceResult, project: &Project, symbol: &str) -> String {
    let status = balance.status;
    match (status.debtor(), status.creditor()) {
        (Some(debtor), Some(creditor)) => format!(
            "{} owes {} {}",
            project.party_name(debtor),
            project.party_name(creditor),
            status.amount().format_with_symbol(symbol)
        ),
        _ => "All square: nobody owes anything".to_string(),
    }
}

/// Banner followed by what each party paid and owes
pub fn format_balance_report(balance: &BalanceResult, project: &Project, symbol: &str) -> String {
    let name_width = column_width(
        [project.party1_name.as_str(), project.party2_name.as_str(), "Total"].into_iter(),
        5,
    );

    let mut output = String::new();
    output.push_str(&format!("{} {}\n", project.emoji, project.name));
    output.push_str(&format!("  {}\n\n", format_balance_banner(balance, project, symbol)));

    output.push_str(&format!(
        "  {}  {:>12}  {:>12}\n",
        left_align("", name_width),
        "Paid",
        "Share"
    ));

    for party in [Party::Party1, Party::Party2] {
        output.push_str(&format!(
            "  {}  {:>12}  {:>12}\n",
            left_align(project.party_name(party), name_width),
            balance.spent_by(party).format_with_symbol(symbol),
            balance.share_of(party).format_with_symbol(symbol),
        ));
    }

    output.push_str(&format!(
        "  {}  {:>12}\n",
        left_align("Total", name_width),
        balance.total_spent.format_with_symbol(symbol)
    ));

    output
}
