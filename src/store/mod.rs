pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};

pub use memory::MemoryProjectStore;

/// Document storage for projects. Each call is a single atomic document
/// operation; nothing spans calls.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// All projects in creation order.
    async fn list(&self) -> Result<Vec<Project>, AppError>;

    /// Stores a validated payload, assigning `id` and `created_at`.
    async fn insert(&self, new: NewProject) -> Result<Project, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<Project>, AppError>;

    /// Applies `patch` to the stored project, validates the result and writes
    /// it back without letting another update interleave. Returns `None` when
    /// no project has `id`; an invalid result leaves the record untouched.
    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, AppError>;

    /// Hard delete. Returns whether a project was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

// Lifecycle operations shared by the JSON API and the HTML views.

pub async fn create_project(store: &dyn ProjectStore, new: NewProject) -> Result<Project, AppError> {
    new.validate()?;
    let project = store.insert(new.normalized()).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "Project created");
    Ok(project)
}

pub async fn get_project(store: &dyn ProjectStore, id: Uuid) -> Result<Project, AppError> {
    store
        .find(id)
        .await?
        .ok_or_else(AppError::project_not_found)
}

pub async fn update_project(
    store: &dyn ProjectStore,
    id: Uuid,
    patch: ProjectPatch,
) -> Result<Project, AppError> {
    let project = store
        .update(id, patch)
        .await?
        .ok_or_else(AppError::project_not_found)?;
    tracing::info!(project_id = %project.id, "Project updated");
    Ok(project)
}

pub async fn delete_project(store: &dyn ProjectStore, id: Uuid) -> Result<(), AppError> {
    if !store.delete(id).await? {
        return Err(AppError::project_not_found());
    }
    tracing::info!(project_id = %id, "Project deleted");
    Ok(())
}

/// Path ids that are not well-formed cannot name a stored project.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::project_not_found())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::AirdropStatus;

    /// Memory store whose reads lag, widening any read-modify-write window.
    struct SlowReads(MemoryProjectStore);

    #[async_trait]
    impl ProjectStore for SlowReads {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn list(&self) -> Result<Vec<Project>, AppError> {
            self.0.list().await
        }

        async fn insert(&self, new: NewProject) -> Result<Project, AppError> {
            self.0.insert(new).await
        }

        async fn find(&self, id: Uuid) -> Result<Option<Project>, AppError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.0.find(id).await
        }

        async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, AppError> {
            self.0.update(id, patch).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
            self.0.delete(id).await
        }
    }

    fn named(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryProjectStore::new();
        let created = create_project(&store, named("Berachain")).await.unwrap();
        let fetched = get_project(&store, created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let store = MemoryProjectStore::new();
        let err = create_project(&store, named("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_identity_and_rejects_invalid_result() {
        let store = MemoryProjectStore::new();
        let created = create_project(&store, named("Monad")).await.unwrap();

        let updated = update_project(
            &store,
            created.id,
            ProjectPatch {
                airdrop_status: Some(AirdropStatus::Scheduled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.airdrop_status, AirdropStatus::Scheduled);

        let err = update_project(
            &store,
            created.id,
            ProjectPatch {
                name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(get_project(&store, created.id).await.unwrap().name, "Monad");
    }

    #[tokio::test]
    async fn concurrent_updates_to_different_fields_both_land() {
        let store = SlowReads(MemoryProjectStore::new());
        let created = create_project(&store, named("A")).await.unwrap();

        let (completed, renamed) = tokio::join!(
            update_project(
                &store,
                created.id,
                ProjectPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            ),
            update_project(
                &store,
                created.id,
                ProjectPatch {
                    name: Some("B".to_string()),
                    ..Default::default()
                },
            ),
        );
        completed.unwrap();
        renamed.unwrap();

        let stored = get_project(&store, created.id).await.unwrap();
        assert_eq!(stored.name, "B");
        assert!(stored.completed);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryProjectStore::new();
        let id = Uuid::now_v7();
        assert!(matches!(get_project(&store, id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            update_project(&store, id, ProjectPatch::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(delete_project(&store, id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_second_time() {
        let store = MemoryProjectStore::new();
        let created = create_project(&store, named("Linea")).await.unwrap();
        delete_project(&store, created.id).await.unwrap();
        assert!(matches!(
            delete_project(&store, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert!(parse_id(&Uuid::now_v7().to_string()).is_ok());
    }
}
