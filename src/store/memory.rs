use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::ProjectStore;
use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};

/// Process-local store used when no database is configured.
pub struct MemoryProjectStore {
    projects: DashMap<Uuid, Project>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
        }
    }
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Project>, AppError> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        projects.sort_by_key(|p| (p.created_at, p.id));
        Ok(projects)
    }

    async fn insert(&self, new: NewProject) -> Result<Project, AppError> {
        let project = Project::from_new(Uuid::now_v7(), Utc::now(), new);
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        Ok(self.projects.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, AppError> {
        // The shard lock is held from read to write.
        let Some(mut entry) = self.projects.get_mut(&id) else {
            return Ok(None);
        };
        let mut project = entry.value().clone();
        project.apply(patch);
        project.validate()?;
        *entry = project.clone();
        Ok(Some(project))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.projects.remove(&id).is_some())
    }
}
