use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    projects: Vec<ProjectCard>,
    notice: Option<String>,
}

struct ProjectCard {
    id: String,
    name: String,
    discord_link: String,
    x_link: String,
    website: String,
    wallet: String,
    email: String,
    completed: bool,
    airdrop_status: String,
    airdrop_date: String,
    created_at: String,
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        ProjectCard {
            id: project.id.to_string(),
            name: project.name,
            discord_link: project.discord_link.unwrap_or_default(),
            x_link: project.x_link.unwrap_or_default(),
            website: project.website.unwrap_or_default(),
            wallet: project.wallet.unwrap_or_default(),
            email: project.email.unwrap_or_default(),
            completed: project.completed,
            airdrop_status: project.airdrop_status.to_string(),
            airdrop_date: project
                .airdrop_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            created_at: project.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

pub async fn index(
    State(state): State<SharedState>,
    Query(q): Query<NoticeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.store.list().await?;

    let template = DashboardTemplate {
        projects: projects.into_iter().map(ProjectCard::from).collect(),
        notice: q.notice.as_deref().and_then(notice_text).map(str::to_string),
    };
    Ok(Html(template.render().unwrap_or_default()))
}

fn notice_text(code: &str) -> Option<&'static str> {
    match code {
        "created" => Some("Project created successfully"),
        "updated" => Some("Project updated successfully"),
        "deleted" => Some("Project deleted"),
        _ => None,
    }
}
