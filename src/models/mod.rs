//! Core data models for DuoSpend
//!
//! Projects own their expenses; each expense names a payer and a split ratio.

pub mod expense;
pub mod ids;
pub mod money;
pub mod project;
pub mod split;

pub use expense::{Expense, ExpenseSort, Party};
pub use ids::{ExpenseId, ProjectId};
pub use money::{Money, MoneyParseError};
pub use project::{BudgetProgress, Project};
pub use split::{SplitRatio, SplitRatioParseError};
