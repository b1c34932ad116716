use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::client::form::{FormData, FormMode, ProjectForm, SAVE_FAILED};
use crate::error::AppError;
use crate::models::{AirdropStatus, ProjectPatch};
use crate::state::SharedState;
use crate::store;

#[derive(Template)]
#[template(path = "dashboard/project_form.html")]
struct ProjectFormTemplate {
    title: &'static str,
    action: String,
    submit_label: &'static str,
    show_airdrop_date: bool,
    data: FormData,
    statuses: Vec<StatusOption>,
    error: Option<String>,
}

struct StatusOption {
    value: &'static str,
    selected: bool,
}

fn render_form(form: &ProjectForm, error: Option<String>) -> Html<String> {
    let action = match form.mode() {
        FormMode::Create => "/dashboard/projects/new".to_string(),
        FormMode::Edit(id) => format!("/dashboard/projects/{id}/edit"),
    };
    let statuses = AirdropStatus::ALL
        .into_iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            selected: status == form.data().airdrop_status,
        })
        .collect();

    let template = ProjectFormTemplate {
        title: form.title(),
        action,
        submit_label: form.submit_label(),
        show_airdrop_date: form.show_airdrop_date(),
        data: form.data().clone(),
        statuses,
        error,
    };
    Html(template.render().unwrap_or_default())
}

/// Re-renders a rejected form with the submitted values kept.
fn failed(form: ProjectForm, err: impl std::fmt::Display) -> Response {
    tracing::warn!("Error saving project: {err}");
    let body = render_form(&form, Some(format!("{SAVE_FAILED} ({err})")));
    (StatusCode::BAD_REQUEST, body).into_response()
}

pub async fn new_page() -> impl IntoResponse {
    render_form(&ProjectForm::create(), None)
}

pub async fn edit_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = store::parse_id(&id)?;
    let project = store::get_project(state.store.as_ref(), id).await?;
    Ok(render_form(&ProjectForm::edit(&project), None))
}

pub async fn create(State(state): State<SharedState>, Form(data): Form<FormData>) -> Response {
    let form = ProjectForm::with_data(FormMode::Create, data);
    let new = match form.data().to_new_project() {
        Ok(new) => new,
        Err(msg) => return failed(form, msg),
    };

    match store::create_project(state.store.as_ref(), new).await {
        Ok(_) => Redirect::to("/?notice=created").into_response(),
        Err(err) => failed(form, err.message()),
    }
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let id = store::parse_id(&id)?;
    let form = ProjectForm::with_data(FormMode::Edit(id), data);
    let patch = match form.data().to_patch() {
        Ok(patch) => patch,
        Err(msg) => return Ok(failed(form, msg)),
    };

    match store::update_project(state.store.as_ref(), id, patch).await {
        Ok(_) => Ok(Redirect::to("/?notice=updated").into_response()),
        Err(err @ AppError::NotFound(_)) => Err(err),
        Err(err) => Ok(failed(form, err.message())),
    }
}

pub async fn toggle(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = store::parse_id(&id)?;
    let project = store::get_project(state.store.as_ref(), id).await?;
    let patch = ProjectPatch {
        completed: Some(!project.completed),
        ..Default::default()
    };
    store::update_project(state.store.as_ref(), id, patch).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = store::parse_id(&id)?;
    store::delete_project(state.store.as_ref(), id).await?;
    Ok(Redirect::to("/?notice=deleted"))
}
