//! Expense model
//!
//! One spend event inside a project: who paid, how much, and how the cost
//! divides between the two parties.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use super::split::{self, SplitRatio};

/// Decimal places kept for a party's share of a single expense
///
/// Shares are rounded here once, per expense, so that summing them stays
/// exact and order-independent.
pub const SHARE_SCALE: u32 = 12;

/// One of the two fixed participants of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Party1,
    Party2,
}

impl Party {
    /// The other party
    pub fn other(&self) -> Self {
        match self {
            Self::Party1 => Self::Party2,
            Self::Party2 => Self::Party1,
        }
    }

    /// Parse a role keyword ("1", "p1", "party1")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "p1" | "party1" => Some(Self::Party1),
            "2" | "p2" | "party2" => Some(Self::Party2),
            _ => None,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Party1 => write!(f, "Party 1"),
            Self::Party2 => write!(f, "Party 2"),
        }
    }
}

/// Display ordering for a project's expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseSort {
    /// Newest first
    #[default]
    Date,
    /// Largest first
    Amount,
    /// Party 1's expenses, then party 2's
    Payer,
}

impl ExpenseSort {
    /// Parse sort order from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "payer" | "paid_by" => Some(Self::Payer),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
            Self::Payer => write!(f, "payer"),
        }
    }
}

/// A single shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Display label
    pub title: String,

    /// Amount spent
    pub amount: Money,

    /// Who fronted the money
    pub payer: Party,

    /// How the cost divides between the parties
    #[serde(default, deserialize_with = "split::deserialize_or_equal")]
    pub split_ratio: SplitRatio,

    /// When the expense happened
    pub date: DateTime<Utc>,

    /// Optional free-form category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Expense {
    /// Create an equally split expense dated now
    pub fn new(title: impl Into<String>, amount: Money, payer: Party) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            payer,
            split_ratio: SplitRatio::Equal,
            date: Utc::now(),
            category: None,
        }
    }

    /// Set the split ratio
    pub fn with_split(mut self, split_ratio: SplitRatio) -> Self {
        self.split_ratio = split_ratio;
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Portions of the amount owed by party 1 and party 2
    ///
    /// Party 2's portion is the remainder, so the two always add back up to
    /// `amount` exactly.
    pub fn shares(&self) -> (Money, Money) {
        let (fraction1, _) = self.split_ratio.fractions();
        let party1 = (self.amount.amount() * fraction1).round_dp(SHARE_SCALE);
        let party1 = Money::new(party1);
        (party1, self.amount - party1)
    }

    /// Portion of the amount owed by `party`
    pub fn share_of(&self, party: Party) -> Money {
        let (party1, party2) = self.shares();
        match party {
            Party::Party1 => party1,
            Party::Party2 => party2,
        }
    }

    /// Amount the non-paying party owes the payer for this expense
    pub fn owed_to_payer(&self) -> Money {
        self.share_of(self.payer.other())
    }

    /// Party 1's fraction as a whole percentage, for display
    pub fn party1_percent(&self) -> Decimal {
        (self.split_ratio.party1_fraction() * Decimal::ONE_HUNDRED).round_dp(1)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}
