//! DuoSpend - shared expense tracking for two
//!
//! This library provides the core functionality for DuoSpend: two parties
//! record what they paid on a shared project, and the balance engine tells
//! them who owes whom, computed with exact decimal arithmetic.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (projects, expenses, split ratios, money)
//! - `services`: Balance engine and business logic
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use duospend::models::{Expense, Money, Party, SplitRatio};
//! use duospend::services::{BalanceCalculator, BalanceStatus};
//! use rust_decimal_macros::dec;
//!
//! let expenses = vec![
//!     Expense::new("Dinner", Money::new(dec!(80)), Party::Party1),
//!     Expense::new("Fuel", Money::new(dec!(60)), Party::Party2),
//!     Expense::new("Hotel", Money::new(dec!(200)), Party::Party1)
//!         .with_split(SplitRatio::custom(dec!(70), dec!(30))),
//! ];
//!
//! let balance = BalanceCalculator::calculate(&expenses);
//! assert_eq!(balance.status, BalanceStatus::Party2OwesParty1(Money::new(dec!(70))));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::DuoSpendError;
