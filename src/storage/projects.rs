//! Project repository for JSON storage
//!
//! Manages loading and saving projects (with their expenses) to projects.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DuoSpendError;
use crate::models::{Project, ProjectId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable project data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProjectData {
    projects: Vec<Project>,
}

/// Repository for project persistence
///
/// Readers get cloned snapshots, so a balance computed from them never
/// observes a concurrent write.
pub struct ProjectRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProjectId, Project>>,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load projects from disk
    pub fn load(&self) -> Result<(), DuoSpendError> {
        let file_data: ProjectData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for project in file_data.projects {
            data.insert(project.id, project);
        }

        Ok(())
    }

    /// Save projects to disk
    pub fn save(&self) -> Result<(), DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut projects: Vec<_> = data.values().cloned().collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &ProjectData { projects })
    }

    /// Get a project by ID
    pub fn get(&self, id: ProjectId) -> Result<Option<Project>, DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get a project by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Project>, DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Get all projects, newest first
    pub fn get_all(&self) -> Result<Vec<Project>, DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut projects: Vec<_> = data.values().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    /// Insert or update a project
    pub fn upsert(&self, project: Project) -> Result<(), DuoSpendError> {
        let mut data = self.data.write().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(project.id, project);
        Ok(())
    }

    /// Delete a project and everything it owns
    pub fn delete(&self, id: ProjectId) -> Result<Option<Project>, DuoSpendError> {
        let mut data = self.data.write().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Check whether another project already uses `name` (case-insensitive)
    pub fn name_exists(
        &self,
        name: &str,
        exclude: Option<ProjectId>,
    ) -> Result<bool, DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .any(|p| Some(p.id) != exclude && p.name.eq_ignore_ascii_case(name)))
    }

    /// Count projects
    pub fn count(&self) -> Result<usize, DuoSpendError> {
        let data = self.data.read().map_err(|e| {
            DuoSpendError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
