//! Balance calculation
//!
//! Reduces a project's expenses into who owes whom. The computation is a pure
//! single pass over the expenses; the result is never stored and is always
//! recomputed from the current records.

use serde::Serialize;
use std::fmt;

use crate::models::{Expense, Money, Party};

/// Direction of the debt between the two parties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case", tag = "status", content = "amount")]
pub enum BalanceStatus {
    /// Party 2 owes party 1 the given (strictly positive) amount
    Party2OwesParty1(Money),
    /// Party 1 owes party 2 the given (strictly positive) amount
    Party1OwesParty2(Money),
    /// Nobody owes anything
    #[default]
    Balanced,
}

impl BalanceStatus {
    /// Derive the status from a signed net balance
    pub fn from_net(net_balance: Money) -> Self {
        if net_balance.is_positive() {
            Self::Party2OwesParty1(net_balance)
        } else if net_balance.is_negative() {
            Self::Party1OwesParty2(net_balance.abs())
        } else {
            Self::Balanced
        }
    }

    /// Amount owed, zero when balanced
    pub fn amount(&self) -> Money {
        match self {
            Self::Party2OwesParty1(amount) | Self::Party1OwesParty2(amount) => *amount,
            Self::Balanced => Money::zero(),
        }
    }

    /// Party that owes money
    pub fn debtor(&self) -> Option<Party> {
        match self {
            Self::Party2OwesParty1(_) => Some(Party::Party2),
            Self::Party1OwesParty2(_) => Some(Party::Party1),
            Self::Balanced => None,
        }
    }

    /// Party that is owed money
    pub fn creditor(&self) -> Option<Party> {
        self.debtor().map(|p| p.other())
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Party2OwesParty1(amount) => write!(f, "Party 2 owes Party 1 {}", amount),
            Self::Party1OwesParty2(amount) => write!(f, "Party 1 owes Party 2 {}", amount),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Totals for a set of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct BalanceResult {
    /// Sum of all amounts
    pub total_spent: Money,
    /// Sum of amounts fronted by party 1
    pub party1_spent: Money,
    /// Sum of amounts fronted by party 2
    pub party2_spent: Money,
    /// What party 1 owes across all expenses, whoever paid
    pub party1_share: Money,
    /// What party 2 owes across all expenses, whoever paid
    pub party2_share: Money,
    /// Positive: party 2 owes party 1. Negative: party 1 owes party 2.
    pub net_balance: Money,
    pub status: BalanceStatus,
}

impl BalanceResult {
    /// Amount fronted by `party`
    pub fn spent_by(&self, party: Party) -> Money {
        match party {
            Party::Party1 => self.party1_spent,
            Party::Party2 => self.party2_spent,
        }
    }

    /// Share owed by `party`
    pub fn share_of(&self, party: Party) -> Money {
        match party {
            Party::Party1 => self.party1_share,
            Party::Party2 => self.party2_share,
        }
    }
}

/// Pure balance calculator
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Compute the balance of a collection of expenses
    ///
    /// The result does not depend on iteration order. Amounts are taken as
    /// given; zero or negative amounts are summed like any other.
    pub fn calculate<'a, I>(expenses: I) -> BalanceResult
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut total_spent = Money::zero();
        let mut party1_spent = Money::zero();
        let mut party2_spent = Money::zero();
        let mut party1_share = Money::zero();
        let mut party2_share = Money::zero();
        let mut net_balance = Money::zero();

        for expense in expenses {
            let amount = expense.amount;
            total_spent += amount;

            let (p1_part, p2_part) = expense.shares();
            party1_share += p1_part;
            party2_share += p2_part;

            match expense.payer {
                Party::Party1 => {
                    party1_spent += amount;
                    net_balance += p2_part;
                }
                Party::Party2 => {
                    party2_spent += amount;
                    net_balance -= p1_part;
                }
            }
        }

        BalanceResult {
            total_spent,
            party1_spent,
            party2_spent,
            party1_share,
            party2_share,
            net_balance,
            status: BalanceStatus::from_net(net_balance),
        }
    }
}
