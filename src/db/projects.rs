use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::store::ProjectStore;

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    discord_link: Option<String>,
    x_link: Option<String>,
    website: Option<String>,
    wallet: Option<String>,
    email: Option<String>,
    completed: bool,
    airdrop_status: String,
    airdrop_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let airdrop_status = row.airdrop_status.parse().map_err(|_| {
            AppError::Storage(format!(
                "Project {} has unknown airdrop status `{}`",
                row.id, row.airdrop_status
            ))
        })?;

        Ok(Project {
            id: row.id,
            name: row.name,
            discord_link: row.discord_link,
            x_link: row.x_link,
            website: row.website,
            wallet: row.wallet,
            email: row.email,
            completed: row.completed,
            airdrop_status,
            airdrop_date: row.airdrop_date,
            created_at: row.created_at,
        })
    }
}

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, AppError> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Project::try_from).collect()
}

pub async fn create(pool: &PgPool, new: &NewProject) -> Result<Project, AppError> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "INSERT INTO projects
            (id, name, discord_link, x_link, website, wallet, email,
             completed, airdrop_status, airdrop_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&new.name)
    .bind(&new.discord_link)
    .bind(&new.x_link)
    .bind(&new.website)
    .bind(&new.wallet)
    .bind(&new.email)
    .bind(new.completed)
    .bind(new.airdrop_status.as_str())
    .bind(new.airdrop_date)
    .fetch_one(pool)
    .await?;
    row.try_into()
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, AppError> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Project::try_from)
        .transpose()
}

/// Patches one row under `FOR UPDATE` so concurrent patches serialise.
pub async fn update(pool: &PgPool, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, AppError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let mut project = Project::try_from(row)?;
    project.apply(patch);
    project.validate()?;

    let row = sqlx::query_as::<_, ProjectRow>(
        "UPDATE projects SET
            name = $2, discord_link = $3, x_link = $4, website = $5, wallet = $6,
            email = $7, completed = $8, airdrop_status = $9, airdrop_date = $10
         WHERE id = $1 RETURNING *",
    )
    .bind(project.id)
    .bind(&project.name)
    .bind(&project.discord_link)
    .bind(&project.x_link)
    .bind(&project.website)
    .bind(&project.wallet)
    .bind(&project.email)
    .bind(project.completed)
    .bind(project.airdrop_status.as_str())
    .bind(project.airdrop_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Project::try_from(row).map(Some)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Project>, AppError> {
        list(&self.pool).await
    }

    async fn insert(&self, new: NewProject) -> Result<Project, AppError> {
        create(&self.pool, &new).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        find_by_id(&self.pool, id).await
    }

    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, AppError> {
        update(&self.pool, id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        delete(&self.pool, id).await
    }
}
