use reqwest::StatusCode;
use uuid::Uuid;

use super::api::{ClientError, ProjectsClient};
use super::form::{FormOutcome, ProjectForm};
use crate::models::{Project, ProjectPatch};

/// The project list as currently displayed.
#[derive(Debug, Clone, Default)]
pub struct ProjectBoard {
    projects: Vec<Project>,
}

impl ProjectBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub async fn refresh(&mut self, client: &ProjectsClient) -> Result<(), ClientError> {
        self.projects = client.list().await?;
        Ok(())
    }

    /// Flips `completed` on the server and merges the stored record back in.
    pub async fn toggle_completed(
        &mut self,
        client: &ProjectsClient,
        id: Uuid,
    ) -> Result<&Project, ClientError> {
        let completed = self.find(id).map(|p| p.completed).ok_or_else(|| ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Project not found".to_string(),
        })?;

        let patch = ProjectPatch {
            completed: Some(!completed),
            ..Default::default()
        };
        let updated = client.update(id, &patch).await?;
        Ok(self.merge(updated))
    }

    /// Removes the project locally once the server confirms the delete.
    pub async fn delete(&mut self, client: &ProjectsClient, id: Uuid) -> Result<(), ClientError> {
        client.delete(id).await?;
        self.projects.retain(|p| p.id != id);
        Ok(())
    }

    pub fn new_form(&self) -> ProjectForm {
        ProjectForm::create()
    }

    pub fn edit_form(&self, id: Uuid) -> Option<ProjectForm> {
        self.find(id).map(ProjectForm::edit)
    }

    /// Applies a settled form submission: a successful one triggers a re-fetch.
    pub async fn after_submit(
        &mut self,
        client: &ProjectsClient,
        outcome: &FormOutcome,
    ) -> Result<(), ClientError> {
        if outcome.refresh {
            self.refresh(client).await?;
        }
        Ok(())
    }

    fn merge(&mut self, project: Project) -> &Project {
        match self.projects.iter().position(|p| p.id == project.id) {
            Some(index) => {
                self.projects[index] = project;
                &self.projects[index]
            }
            None => {
                self.projects.push(project);
                &self.projects[self.projects.len() - 1]
            }
        }
    }
}
