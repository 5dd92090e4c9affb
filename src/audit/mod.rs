//! Audit logging for DuoSpend
//!
//! Records every create, update and delete of projects and expenses, with
//! before/after values, in an append-only JSONL file. The log is an operator
//! trail only; balances are always recomputed from the current records.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
