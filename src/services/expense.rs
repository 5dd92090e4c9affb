//! Expense service
//!
//! Adds, edits and removes expenses inside a project. Every mutation
//! rewrites the owning project, so the balance derived from it is always
//! computed from the stored expense list.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::{generate_diff, EntityType};
use crate::error::{DuoSpendError, DuoSpendResult};
use crate::models::{Expense, ExpenseId, ExpenseSort, Money, Party, Project, ProjectId, SplitRatio};
use crate::storage::Storage;

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub payer: Party,
    pub split_ratio: SplitRatio,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl NewExpense {
    /// An equally split expense dated now
    pub fn new(title: impl Into<String>, amount: Money, payer: Party) -> Self {
        Self {
            title: title.into(),
            amount,
            payer,
            split_ratio: SplitRatio::Equal,
            date: None,
            category: None,
        }
    }
}

/// Changes to apply to an expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub payer: Option<Party>,
    pub split_ratio: Option<SplitRatio>,
    pub date: Option<DateTime<Utc>>,
    /// `Some(None)` clears the category
    pub category: Option<Option<String>>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense in a project
    pub fn add(&self, project_id: ProjectId, input: NewExpense) -> DuoSpendResult<Expense> {
        let mut project = self.load_project(project_id)?;

        let title = validate_title(&input.title)?;
        validate_amount(input.amount)?;
        validate_split(&input.split_ratio)?;

        let mut expense =
            Expense::new(title, input.amount, input.payer).with_split(input.split_ratio);
        if let Some(date) = input.date {
            expense = expense.with_date(date);
        }
        if let Some(category) = normalize_category(input.category) {
            expense = expense.with_category(category);
        }

        project.add_expense(expense.clone());
        self.storage.projects.upsert(project)?;
        self.storage.projects.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
        )?;

        info!(
            project = %project_id,
            expense = %expense.id,
            amount = %expense.amount,
            payer = ?expense.payer,
            "expense added"
        );
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(
        &self,
        project_id: ProjectId,
        expense_id: ExpenseId,
    ) -> DuoSpendResult<Option<Expense>> {
        let project = self.load_project(project_id)?;
        Ok(project.expense(expense_id).cloned())
    }

    /// Find an expense by full or short ID
    pub fn find(&self, project_id: ProjectId, identifier: &str) -> DuoSpendResult<Option<Expense>> {
        let project = self.load_project(project_id)?;
        Ok(project.find_expense(identifier).cloned())
    }

    /// Expenses of a project in the requested order
    pub fn list(&self, project_id: ProjectId, sort: ExpenseSort) -> DuoSpendResult<Vec<Expense>> {
        let project = self.load_project(project_id)?;
        Ok(project.sorted_expenses(sort).into_iter().cloned().collect())
    }

    /// Update an expense
    pub fn update(
        &self,
        project_id: ProjectId,
        expense_id: ExpenseId,
        changes: ExpenseUpdate,
    ) -> DuoSpendResult<Expense> {
        let mut project = self.load_project(project_id)?;
        let expense = project
            .expense_mut(expense_id)
            .ok_or_else(|| DuoSpendError::expense_not_found(expense_id.to_string()))?;

        let before = expense.clone();

        if let Some(title) = changes.title.as_deref() {
            expense.title = validate_title(title)?;
        }
        if let Some(amount) = changes.amount {
            validate_amount(amount)?;
            expense.amount = amount;
        }
        if let Some(payer) = changes.payer {
            expense.payer = payer;
        }
        if let Some(split_ratio) = changes.split_ratio {
            validate_split(&split_ratio)?;
            expense.split_ratio = split_ratio;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(category) = changes.category {
            expense.category = normalize_category(category);
        }

        let after = expense.clone();
        self.storage.projects.upsert(project)?;
        self.storage.projects.save()?;

        let diff = generate_diff(
            &serde_json::to_value(&before)?,
            &serde_json::to_value(&after)?,
        );
        self.storage.log_update(
            EntityType::Expense,
            after.id.to_string(),
            Some(after.title.clone()),
            &before,
            &after,
            diff,
        )?;

        info!(project = %project_id, expense = %after.id, "expense updated");
        Ok(after)
    }

    /// Delete an expense
    pub fn delete(&self, project_id: ProjectId, expense_id: ExpenseId) -> DuoSpendResult<Expense> {
        let mut project = self.load_project(project_id)?;
        let expense = project
            .remove_expense(expense_id)
            .ok_or_else(|| DuoSpendError::expense_not_found(expense_id.to_string()))?;

        self.storage.projects.upsert(project)?;
        self.storage.projects.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
            None,
        )?;

        info!(project = %project_id, expense = %expense.id, "expense deleted");
        Ok(expense)
    }

    fn load_project(&self, project_id: ProjectId) -> DuoSpendResult<Project> {
        self.storage
            .projects
            .get(project_id)?
            .ok_or_else(|| DuoSpendError::project_not_found(project_id.to_string()))
    }
}

fn validate_title(title: &str) -> DuoSpendResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DuoSpendError::Validation(
            "Expense title cannot be empty".into(),
        ));
    }
    Ok(title.to_string())
}

fn validate_amount(amount: Money) -> DuoSpendResult<()> {
    if !amount.is_positive() {
        return Err(DuoSpendError::Validation(format!(
            "Expense amount must be positive, got {}",
            amount
        )));
    }
    if !amount.is_within_limit() {
        return Err(DuoSpendError::Validation(format!(
            "Expense amount cannot exceed {}, got {}",
            Money::MAX_AMOUNT,
            amount
        )));
    }
    Ok(())
}

/// Custom weights must be non-negative and not both zero; the balance engine
/// would silently treat such a ratio as 50/50
fn validate_split(split_ratio: &SplitRatio) -> DuoSpendResult<()> {
    if split_ratio.is_degenerate() {
        return Err(DuoSpendError::Validation(format!(
            "Invalid split ratio: {:?}",
            split_ratio
        )));
    }
    Ok(())
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuoSpendPaths;
    use crate::services::project::{NewProject, ProjectService};
    use crate::services::{BalanceCalculator, BalanceStatus};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, ProjectId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let project = ProjectService::new(&storage)
            .create(NewProject {
                name: "Wedding".into(),
                emoji: None,
                budget: Money::new(dec!(5000)),
                party1_name: "Marie".into(),
                party2_name: "Thomas".into(),
            })
            .unwrap();

        (temp_dir, storage, project.id)
    }

    #[test]
    fn test_add_expense() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let mut input = NewExpense::new(" Venue deposit ", Money::new(dec!(200)), Party::Party1);
        input.split_ratio = SplitRatio::custom(dec!(70), dec!(30));
        input.category = Some("  ".into());
        let expense = service.add(project_id, input).unwrap();

        assert_eq!(expense.title, "Venue deposit");
        assert!(expense.category.is_none());

        let stored = service.get(project_id, expense.id).unwrap().unwrap();
        assert_eq!(stored.split_ratio, SplitRatio::custom(dec!(70), dec!(30)));
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let empty_title = NewExpense::new("", Money::new(dec!(10)), Party::Party1);
        assert!(service.add(project_id, empty_title).unwrap_err().is_validation());

        let zero = NewExpense::new("Cake", Money::zero(), Party::Party1);
        assert!(service.add(project_id, zero).unwrap_err().is_validation());

        let negative = NewExpense::new("Cake", Money::new(dec!(-5)), Party::Party1);
        assert!(service.add(project_id, negative).unwrap_err().is_validation());

        let mut degenerate = NewExpense::new("Cake", Money::new(dec!(10)), Party::Party1);
        degenerate.split_ratio = SplitRatio::custom(dec!(0), dec!(0));
        assert!(service.add(project_id, degenerate).unwrap_err().is_validation());

        assert!(service.list(project_id, ExpenseSort::Date).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_amount_over_limit() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let huge = Money::new(dec!(50000000000000000000000000000));
        for _ in 0..2 {
            let input = NewExpense::new("Castle", huge, Party::Party1);
            let err = service.add(project_id, input).unwrap_err();
            assert!(err.is_validation());
        }

        let just_over = Money::MAX_AMOUNT + Money::new(dec!(0.01));
        let input = NewExpense::new("Castle", just_over, Party::Party2);
        assert!(service.add(project_id, input).unwrap_err().is_validation());

        let at_limit = NewExpense::new("Castle", Money::MAX_AMOUNT, Party::Party1);
        service.add(project_id, at_limit).unwrap();

        let project = storage.projects.get(project_id).unwrap().unwrap();
        let balance = BalanceCalculator::calculate(&project.expenses);
        assert_eq!(balance.total_spent, Money::MAX_AMOUNT);
    }

    #[test]
    fn test_add_to_missing_project() {
        let (_temp_dir, storage, _project_id) = setup();
        let service = ExpenseService::new(&storage);

        let input = NewExpense::new("Cake", Money::new(dec!(10)), Party::Party1);
        assert!(service.add(ProjectId::new(), input).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_sorted() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let day = |d| Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap();
        for (title, amount, d) in [("A", dec!(10), 1), ("B", dec!(30), 3), ("C", dec!(20), 2)] {
            let mut input = NewExpense::new(title, Money::new(amount), Party::Party1);
            input.date = Some(day(d));
            service.add(project_id, input).unwrap();
        }

        let by_date: Vec<_> = service
            .list(project_id, ExpenseSort::Date)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(by_date, vec!["B", "C", "A"]);

        let by_amount: Vec<_> = service
            .list(project_id, ExpenseSort::Amount)
            .unwrap()
            .into_iter()
            .map(|e| e.amount.amount())
            .collect();
        assert_eq!(by_amount, vec![dec!(30), dec!(20), dec!(10)]);
    }

    #[test]
    fn test_update_changes_balance() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);
        let projects = ProjectService::new(&storage);

        let expense = service
            .add(project_id, NewExpense::new("Flowers", Money::new(dec!(100)), Party::Party1))
            .unwrap();
        assert_eq!(
            projects.balance(project_id).unwrap().status,
            BalanceStatus::Party2OwesParty1(Money::new(dec!(50)))
        );

        let updated = service
            .update(
                project_id,
                expense.id,
                ExpenseUpdate {
                    payer: Some(Party::Party2),
                    split_ratio: Some(SplitRatio::custom(dec!(1), dec!(3))),
                    category: Some(Some("Decor".into())),
                    ..ExpenseUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.payer, Party::Party2);
        assert_eq!(updated.category.as_deref(), Some("Decor"));
        assert_eq!(
            projects.balance(project_id).unwrap().status,
            BalanceStatus::Party1OwesParty2(Money::new(dec!(25)))
        );

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert!(last.diff_summary.as_deref().unwrap_or("").contains("payer"));
    }

    #[test]
    fn test_update_rejects_invalid_amount() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project_id, NewExpense::new("Flowers", Money::new(dec!(100)), Party::Party1))
            .unwrap();

        let err = service
            .update(
                project_id,
                expense.id,
                ExpenseUpdate {
                    amount: Some(Money::zero()),
                    ..ExpenseUpdate::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let stored = service.get(project_id, expense.id).unwrap().unwrap();
        assert_eq!(stored.amount, Money::new(dec!(100)));
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project_id, NewExpense::new("Flowers", Money::new(dec!(100)), Party::Party1))
            .unwrap();

        service.delete(project_id, expense.id).unwrap();
        assert!(service.get(project_id, expense.id).unwrap().is_none());
        assert!(service.delete(project_id, expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage, project_id) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project_id, NewExpense::new("Flowers", Money::new(dec!(100)), Party::Party1))
            .unwrap();

        let found = service.find(project_id, &expense.id.to_string()).unwrap();
        assert_eq!(found.map(|e| e.id), Some(expense.id));
    }
}
