//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod project;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use project::{handle_balance_command, handle_project_command, ProjectCommands};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{DuoSpendError, DuoSpendResult};
use crate::models::{Money, Party, Project, SplitRatio};

/// Parse a money argument, naming the field in the error
pub(crate) fn parse_money(input: &str, field: &str) -> DuoSpendResult<Money> {
    Money::parse(input).map_err(|e| {
        DuoSpendError::Validation(format!(
            "Invalid {}: '{}'. Use a format like '12.50' or '12,50'. Error: {}",
            field, input, e
        ))
    })
}

/// Parse a split argument: "equal", "70" or "70/30"
pub(crate) fn parse_split(input: &str) -> DuoSpendResult<SplitRatio> {
    SplitRatio::parse(input).map_err(|e| {
        DuoSpendError::Validation(format!(
            "Invalid split: {}. Try 'equal', '70' or '70/30'",
            e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date; the expense is stamped at noon UTC
pub(crate) fn parse_date(input: &str) -> DuoSpendResult<DateTime<Utc>> {
    let invalid = || {
        DuoSpendError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            input
        ))
    };

    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let noon = date.and_hms_opt(12, 0, 0).ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&noon))
}

/// Resolve a payer given by role ("1", "p2") or by party name
pub(crate) fn parse_payer(project: &Project, input: &str) -> DuoSpendResult<Party> {
    project.resolve_party(input).ok_or_else(|| {
        DuoSpendError::Validation(format!(
            "Unknown payer: '{}'. Use '{}', '{}', '1' or '2'",
            input, project.party1_name, project.party2_name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("12,50", "amount").unwrap(), Money::new(dec!(12.50)));
        assert!(parse_money("abc", "amount").unwrap_err().is_validation());

        let err = parse_money("2000000000", "amount").unwrap_err();
        assert!(err.to_string().contains("exceeds the limit of 1000000000.00"));
    }

    #[test]
    fn test_parse_split() {
        assert_eq!(parse_split("equal").unwrap(), SplitRatio::Equal);
        assert_eq!(parse_split("70").unwrap(), SplitRatio::custom(dec!(70), dec!(30)));
        assert_eq!(parse_split("2/1").unwrap(), SplitRatio::custom(dec!(2), dec!(1)));
        assert!(parse_split("150").unwrap_err().is_validation());
        assert!(parse_split("half").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-06-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 6, 1));
        assert!(parse_date("01/06/2024").is_err());
    }

    #[test]
    fn test_parse_payer() {
        let project = Project::new("Trip", Money::zero(), "Marie", "Thomas");
        assert_eq!(parse_payer(&project, "thomas").unwrap(), Party::Party2);
        assert_eq!(parse_payer(&project, "1").unwrap(), Party::Party1);
        assert!(parse_payer(&project, "Paul").is_err());
    }
}
