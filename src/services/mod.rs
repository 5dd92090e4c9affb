//! Service layer for DuoSpend
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields (balances, budget progress) and
//! audit logging.

pub mod balance;
pub mod expense;
pub mod project;

pub use balance::{BalanceCalculator, BalanceResult, BalanceStatus};
pub use expense::{ExpenseService, ExpenseUpdate, NewExpense};
pub use project::{NewProject, ProjectService, ProjectSummary, ProjectUpdate};
