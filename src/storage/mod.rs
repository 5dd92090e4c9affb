//! Storage layer for DuoSpend
//!
//! JSON file storage with atomic writes, plus the audit trail of every
//! change made through it.

pub mod file_io;
pub mod init;
pub mod projects;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, sample_project};
pub use projects::ProjectRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::DuoSpendPaths;
use crate::error::DuoSpendError;

/// Main storage coordinator
pub struct Storage {
    paths: DuoSpendPaths,
    pub projects: ProjectRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: DuoSpendPaths) -> Result<Self, DuoSpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            projects: ProjectRepository::new(paths.projects_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &DuoSpendPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DuoSpendError> {
        self.projects.load()?;
        tracing::debug!(projects = self.projects.count()?, "storage loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DuoSpendError> {
        self.projects.save()
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), DuoSpendError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), DuoSpendError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
        diff_summary: Option<String>,
    ) -> Result<(), DuoSpendError> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
            diff_summary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.projects.count().unwrap(), 0);
    }

    #[test]
    fn test_log_create_appends_to_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoSpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_create(
                EntityType::Project,
                "prj-00000000".into(),
                Some("Trip".into()),
                &serde_json::json!({"name": "Trip"}),
            )
            .unwrap();

        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }
}
