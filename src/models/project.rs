//! Project model
//!
//! A project groups the shared expenses of two parties, together with an
//! optional budget. Expenses are owned values, so removing a project removes
//! every expense it holds.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use super::expense::{Expense, ExpenseSort, Party};
use super::ids::{ExpenseId, ProjectId};
use super::money::Money;

/// Emoji used when none is chosen
pub const DEFAULT_EMOJI: &str = "💰";

/// A shared project between two parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name (e.g., "Wedding")
    pub name: String,

    /// Display emoji
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Planned budget; zero disables budget tracking
    #[serde(default)]
    pub budget: Money,

    /// Name of party 1
    pub party1_name: String,

    /// Name of party 2
    pub party2_name: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// Expenses in insertion order
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

impl Project {
    /// Create a project with no expenses
    pub fn new(
        name: impl Into<String>,
        budget: Money,
        party1_name: impl Into<String>,
        party2_name: impl Into<String>,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            emoji: default_emoji(),
            budget,
            party1_name: party1_name.into(),
            party2_name: party2_name.into(),
            created_at: Utc::now(),
            expenses: Vec::new(),
        }
    }

    /// Set the emoji
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Display name of a party
    pub fn party_name(&self, party: Party) -> &str {
        match party {
            Party::Party1 => &self.party1_name,
            Party::Party2 => &self.party2_name,
        }
    }

    /// Resolve a party from one of the party names or a role keyword
    ///
    /// Names win, so a party called "2" is still found by its name.
    pub fn resolve_party(&self, s: &str) -> Option<Party> {
        let name = s.trim();
        if self.party1_name.eq_ignore_ascii_case(name) {
            Some(Party::Party1)
        } else if self.party2_name.eq_ignore_ascii_case(name) {
            Some(Party::Party2)
        } else {
            Party::parse(s)
        }
    }

    /// Append an expense
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Get an expense by ID
    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Get a mutable expense by ID
    pub fn expense_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    /// Find an expense by full or short ID
    pub fn find_expense(&self, identifier: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id.matches(identifier))
    }

    /// Remove an expense, returning it if it existed
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(index))
    }

    /// Expenses in display order
    pub fn sorted_expenses(&self, sort: ExpenseSort) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses.iter().collect();
        match sort {
            ExpenseSort::Date => expenses.sort_by_key(|e| Reverse(e.date)),
            ExpenseSort::Amount => expenses.sort_by_key(|e| Reverse(e.amount)),
            ExpenseSort::Payer => expenses.sort_by_key(|e| e.payer),
        }
        expenses
    }

    /// Number of expenses fronted by `party`
    pub fn expense_count_by(&self, party: Party) -> usize {
        self.expenses.iter().filter(|e| e.payer == party).count()
    }

    /// Whether the project tracks a budget
    pub fn has_budget(&self) -> bool {
        self.budget.is_positive()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} & {})",
            self.emoji, self.name, self.party1_name, self.party2_name
        )
    }
}

/// Budget consumption of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetProgress {
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spent; negative once over budget
    pub remaining: Money,
    /// `spent / budget`, capped at 1; zero without a budget
    pub fraction: Decimal,
    /// `spent / budget` as a whole percentage, truncated, not capped
    pub percentage: i64,
    pub over_budget: bool,
}

impl BudgetProgress {
    /// Compute progress of `spent` against `budget`
    pub fn new(budget: Money, spent: Money) -> Self {
        if !budget.is_positive() {
            return Self {
                budget,
                spent,
                remaining: budget - spent,
                fraction: Decimal::ZERO,
                percentage: 0,
                over_budget: false,
            };
        }

        let ratio = spent
            .amount()
            .checked_div(budget.amount())
            .unwrap_or(Decimal::ZERO);
        let percentage = (ratio * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(i64::MAX);

        Self {
            budget,
            spent,
            remaining: budget - spent,
            fraction: ratio.min(Decimal::ONE),
            percentage,
            over_budget: spent > budget,
        }
    }

    /// Whether a budget is being tracked
    pub fn is_tracked(&self) -> bool {
        self.budget.is_positive()
    }
}
