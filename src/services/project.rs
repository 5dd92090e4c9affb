//! Project service
//!
//! Validated CRUD for projects, plus the computed summary (balance and budget
//! progress) shown for a project.

use tracing::{debug, info};

use crate::audit::{generate_diff, EntityType};
use crate::error::{DuoSpendError, DuoSpendResult};
use crate::models::{BudgetProgress, Money, Party, Project, ProjectId};
use crate::storage::Storage;

use super::balance::{BalanceCalculator, BalanceResult};

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub emoji: Option<String>,
    pub budget: Money,
    pub party1_name: String,
    pub party2_name: String,
}

/// Changes to apply to a project; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub budget: Option<Money>,
    pub party1_name: Option<String>,
    pub party2_name: Option<String>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.emoji.is_none()
            && self.budget.is_none()
            && self.party1_name.is_none()
            && self.party2_name.is_none()
    }
}

/// A project with its computed fields
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub project: Project,
    pub balance: BalanceResult,
    pub budget: BudgetProgress,
    pub party1_expense_count: usize,
    pub party2_expense_count: usize,
}

impl ProjectSummary {
    /// Compute the summary of a project snapshot
    pub fn of(project: Project) -> Self {
        let balance = BalanceCalculator::calculate(&project.expenses);
        let budget = BudgetProgress::new(project.budget, balance.total_spent);
        Self {
            party1_expense_count: project.expense_count_by(Party::Party1),
            party2_expense_count: project.expense_count_by(Party::Party2),
            project,
            balance,
            budget,
        }
    }
}

/// Service for project management
pub struct ProjectService<'a> {
    storage: &'a Storage,
}

impl<'a> ProjectService<'a> {
    /// Create a new project service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new project
    pub fn create(&self, input: NewProject) -> DuoSpendResult<Project> {
        let name = validate_name(&input.name)?;
        let (party1_name, party2_name) = validate_parties(&input.party1_name, &input.party2_name)?;
        validate_budget(input.budget)?;

        let mut project = Project::new(name, input.budget, party1_name, party2_name);
        if let Some(emoji) = input.emoji.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            project.emoji = emoji.to_string();
        }

        self.insert(project)
    }

    /// Persist a fully built project (e.g. sample data) after validating it
    pub fn insert(&self, project: Project) -> DuoSpendResult<Project> {
        validate_name(&project.name)?;
        validate_parties(&project.party1_name, &project.party2_name)?;
        validate_budget(project.budget)?;

        if self.storage.projects.name_exists(&project.name, Some(project.id))? {
            return Err(DuoSpendError::Duplicate {
                entity_type: "Project",
                identifier: project.name.clone(),
            });
        }

        self.storage.projects.upsert(project.clone())?;
        self.storage.projects.save()?;

        self.storage.log_create(
            EntityType::Project,
            project.id.to_string(),
            Some(project.name.clone()),
            &project,
        )?;

        info!(project = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    /// Get a project by ID
    pub fn get(&self, id: ProjectId) -> DuoSpendResult<Option<Project>> {
        self.storage.projects.get(id)
    }

    /// Find a project by name or ID string
    pub fn find(&self, identifier: &str) -> DuoSpendResult<Option<Project>> {
        if let Some(project) = self.storage.projects.get_by_name(identifier)? {
            return Ok(Some(project));
        }

        if let Ok(id) = identifier.trim().parse::<ProjectId>() {
            return self.storage.projects.get(id);
        }

        Ok(self
            .storage
            .projects
            .get_all()?
            .into_iter()
            .find(|p| p.id.matches(identifier)))
    }

    /// Find a project or fail with a "not found" error
    pub fn require(&self, identifier: &str) -> DuoSpendResult<Project> {
        self.find(identifier)?
            .ok_or_else(|| DuoSpendError::project_not_found(identifier))
    }

    /// All projects, newest first
    pub fn list(&self) -> DuoSpendResult<Vec<Project>> {
        self.storage.projects.get_all()
    }

    /// All projects with their computed summaries
    pub fn list_with_summaries(&self) -> DuoSpendResult<Vec<ProjectSummary>> {
        Ok(self.list()?.into_iter().map(ProjectSummary::of).collect())
    }

    /// Summary (balance, budget progress, counts) of one project
    pub fn summary(&self, id: ProjectId) -> DuoSpendResult<ProjectSummary> {
        let project = self
            .get(id)?
            .ok_or_else(|| DuoSpendError::project_not_found(id.to_string()))?;

        let summary = ProjectSummary::of(project);
        debug!(project = %id, status = ?summary.balance.status, "balance computed");
        Ok(summary)
    }

    /// Balance of one project
    pub fn balance(&self, id: ProjectId) -> DuoSpendResult<BalanceResult> {
        Ok(self.summary(id)?.balance)
    }

    /// Update a project
    pub fn update(&self, id: ProjectId, changes: ProjectUpdate) -> DuoSpendResult<Project> {
        let mut project = self
            .get(id)?
            .ok_or_else(|| DuoSpendError::project_not_found(id.to_string()))?;

        let before = project.clone();

        if let Some(name) = changes.name.as_deref() {
            let name = validate_name(name)?;
            if self.storage.projects.name_exists(&name, Some(id))? {
                return Err(DuoSpendError::Duplicate {
                    entity_type: "Project",
                    identifier: name,
                });
            }
            project.name = name;
        }

        if let Some(emoji) = changes.emoji.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            project.emoji = emoji.to_string();
        }

        if let Some(budget) = changes.budget {
            validate_budget(budget)?;
            project.budget = budget;
        }

        let party1 = changes.party1_name.as_deref().unwrap_or(&project.party1_name);
        let party2 = changes.party2_name.as_deref().unwrap_or(&project.party2_name);
        let (party1_name, party2_name) = validate_parties(party1, party2)?;
        project.party1_name = party1_name;
        project.party2_name = party2_name;

        self.storage.projects.upsert(project.clone())?;
        self.storage.projects.save()?;

        let diff = diff_without_expenses(&before, &project);
        self.storage.log_update(
            EntityType::Project,
            project.id.to_string(),
            Some(project.name.clone()),
            &before,
            &project,
            diff,
        )?;

        info!(project = %project.id, "project updated");
        Ok(project)
    }

    /// Delete a project together with all of its expenses
    pub fn delete(&self, id: ProjectId) -> DuoSpendResult<Project> {
        let project = self
            .storage
            .projects
            .delete(id)?
            .ok_or_else(|| DuoSpendError::project_not_found(id.to_string()))?;

        self.storage.projects.save()?;

        self.storage.log_delete(
            EntityType::Project,
            project.id.to_string(),
            Some(project.name.clone()),
            &project,
            Some(format!("{} expense(s) removed", project.expenses.len())),
        )?;

        info!(project = %project.id, expenses = project.expenses.len(), "project deleted");
        Ok(project)
    }
}

fn diff_without_expenses(before: &Project, after: &Project) -> Option<String> {
    let strip = |p: &Project| {
        let mut value = serde_json::to_value(p).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.remove("expenses");
        }
        value
    };
    generate_diff(&strip(before), &strip(after))
}

fn validate_name(name: &str) -> DuoSpendResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DuoSpendError::Validation(
            "Project name cannot be empty".into(),
        ));
    }
    Ok(name.to_string())
}

/// Party names must be non-empty and differ (ignoring case and surrounding
/// whitespace)
fn validate_parties(party1: &str, party2: &str) -> DuoSpendResult<(String, String)> {
    let party1 = party1.trim();
    let party2 = party2.trim();

    if party1.is_empty() || party2.is_empty() {
        return Err(DuoSpendError::Validation(
            "Both party names are required".into(),
        ));
    }

    if party1.to_lowercase() == party2.to_lowercase() {
        return Err(DuoSpendError::Validation(format!(
            "Party names must be different (both are '{}')",
            party1
        )));
    }

    Ok((party1.to_string(), party2.to_string()))
}

fn validate_budget(budget: Money) -> DuoSpendResult<()> {
    if budget.is_negative() {
        return Err(DuoSpendError::Validation(format!(
            "Budget cannot be negative: {}",
            budget
        )));
    }
    if !budget.is_within_limit() {
        return Err(DuoSpendError::Validation(format!(
            "Budget cannot exceed {}, got {}",
            Money::MAX_AMOUNT,
            budget
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuoSpendPaths;
    use crate::models::Expense;
    use crate::services::balance::BalanceStatus;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn new_project(name: &str, budget: Decimal) -> NewProject {
        NewProject {
            name: name.into(),
            emoji: None,
            budget: Money::new(budget),
            party1_name: "Marie".into(),
            party2_name: "Thomas".into(),
        }
    }

    #[test]
    fn test_create_project() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        let mut input = new_project("  Wedding ", dec!(5000));
        input.emoji = Some("💒".into());
        let project = service.create(input).unwrap();

        assert_eq!(project.name, "Wedding");
        assert_eq!(project.emoji, "💒");
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        assert!(service.create(new_project("   ", dec!(10))).unwrap_err().is_validation());
        assert!(service.create(new_project("Trip", dec!(-1))).unwrap_err().is_validation());
        assert!(service
            .create(new_project("Trip", dec!(1000000000.01)))
            .unwrap_err()
            .is_validation());

        let mut same_names = new_project("Trip", dec!(10));
        same_names.party2_name = " marie ".into();
        assert!(service.create(same_names).unwrap_err().is_validation());

        let mut missing = new_project("Trip", dec!(10));
        missing.party1_name = "".into();
        assert!(service.create(missing).unwrap_err().is_validation());
    }

    #[test]
    fn test_zero_budget_disables_tracking() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        let project = service.create(new_project("Flat", dec!(0))).unwrap();
        let summary = service.summary(project.id).unwrap();
        assert!(!summary.budget.is_tracked());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        service.create(new_project("Trip", dec!(100))).unwrap();
        let err = service.create(new_project("TRIP", dec!(100))).unwrap_err();
        assert!(matches!(err, DuoSpendError::Duplicate { .. }));
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);
        let project = service.create(new_project("Trip", dec!(100))).unwrap();

        assert_eq!(service.find("trip").unwrap().unwrap().id, project.id);
        assert_eq!(
            service.find(&project.id.to_string()).unwrap().unwrap().id,
            project.id
        );
        assert!(service.find("Nope").unwrap().is_none());
        assert!(service.require("Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_project() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);
        let project = service.create(new_project("Trip", dec!(100))).unwrap();

        let updated = service
            .update(
                project.id,
                ProjectUpdate {
                    name: Some("Road trip".into()),
                    budget: Some(Money::new(dec!(250))),
                    party2_name: Some("Tom".into()),
                    ..ProjectUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Road trip");
        assert_eq!(updated.budget, Money::new(dec!(250)));
        assert_eq!(updated.party1_name, "Marie");
        assert_eq!(updated.party2_name, "Tom");

        let entries = storage.audit().read_all().unwrap();
        let diff = entries.last().unwrap().diff_summary.clone().unwrap();
        assert!(diff.contains("name"));
        assert!(!diff.contains("expenses"));
    }

    #[test]
    fn test_update_rejects_clashing_party_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);
        let project = service.create(new_project("Trip", dec!(100))).unwrap();

        let err = service
            .update(
                project.id,
                ProjectUpdate {
                    party2_name: Some("MARIE".into()),
                    ..ProjectUpdate::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_cascades_to_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        let mut project = Project::new("Trip", Money::new(dec!(100)), "Ana", "Ben");
        project.add_expense(Expense::new("Fuel", Money::new(dec!(60)), Party::Party1));
        let project = service.insert(project).unwrap();

        let deleted = service.delete(project.id).unwrap();
        assert_eq!(deleted.expenses.len(), 1);
        assert!(service.get(project.id).unwrap().is_none());
        assert!(service.delete(project.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProjectService::new(&storage);

        let mut project = Project::new("Trip", Money::new(dec!(100)), "Ana", "Ben");
        project.add_expense(Expense::new("Dinner", Money::new(dec!(80)), Party::Party1));
        project.add_expense(Expense::new("Fuel", Money::new(dec!(60)), Party::Party2));
        let project = service.insert(project).unwrap();

        let summary = service.summary(project.id).unwrap();
        assert_eq!(
            summary.balance.status,
            BalanceStatus::Party2OwesParty1(Money::new(dec!(10)))
        );
        assert!(summary.budget.over_budget);
        assert_eq!(summary.budget.percentage, 140);
        assert_eq!(summary.party1_expense_count, 1);
        assert_eq!(summary.party2_expense_count, 1);
    }
}
