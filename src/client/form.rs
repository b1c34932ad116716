use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::api::{ClientError, ProjectsClient};
use crate::models::project::parse_date;
use crate::models::{AirdropStatus, NewProject, Project, ProjectPatch};

/// Raw form inputs, as typed by the user. Field names match the HTML form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub discord_link: String,
    #[serde(default)]
    pub x_link: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub wallet: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub completed: bool,
    #[serde(default)]
    pub airdrop_status: AirdropStatus,
    /// `YYYY-MM-DD`, or empty for no date.
    #[serde(default)]
    pub airdrop_date: String,
}

impl FormData {
    pub fn from_project(project: &Project) -> Self {
        FormData {
            name: project.name.clone(),
            discord_link: project.discord_link.clone().unwrap_or_default(),
            x_link: project.x_link.clone().unwrap_or_default(),
            website: project.website.clone().unwrap_or_default(),
            wallet: project.wallet.clone().unwrap_or_default(),
            email: project.email.clone().unwrap_or_default(),
            completed: project.completed,
            airdrop_status: project.airdrop_status,
            airdrop_date: project
                .airdrop_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    pub fn to_new_project(&self) -> Result<NewProject, String> {
        Ok(NewProject {
            name: self.name.clone(),
            discord_link: Some(self.discord_link.clone()),
            x_link: Some(self.x_link.clone()),
            website: Some(self.website.clone()),
            wallet: Some(self.wallet.clone()),
            email: Some(self.email.clone()),
            completed: self.completed,
            airdrop_status: self.airdrop_status,
            airdrop_date: self.parsed_date()?,
        }
        .normalized())
    }

    /// Every field is sent; an empty input clears the stored value.
    pub fn to_patch(&self) -> Result<ProjectPatch, String> {
        Ok(ProjectPatch {
            name: Some(self.name.clone()),
            discord_link: Some(self.discord_link.clone()),
            x_link: Some(self.x_link.clone()),
            website: Some(self.website.clone()),
            wallet: Some(self.wallet.clone()),
            email: Some(self.email.clone()),
            completed: Some(self.completed),
            airdrop_status: Some(self.airdrop_status),
            airdrop_date: Some(self.parsed_date()?),
        })
    }

    fn parsed_date(&self) -> Result<Option<chrono::NaiveDate>, String> {
        match self.airdrop_date.trim() {
            "" => Ok(None),
            raw => parse_date(raw).map(Some),
        }
    }
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(raw.as_deref(), Some("on" | "true" | "1")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// What the caller should do once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub close: bool,
    pub refresh: bool,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewProject),
    Update(Uuid, ProjectPatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A submission from this form is already outstanding.
    InFlight,
    /// The inputs could not be turned into a payload.
    Invalid(String),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::InFlight => write!(f, "A submission is already in progress"),
            FormError::Invalid(msg) => write!(f, "Invalid form input: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}

pub const SAVE_FAILED: &str = "Failed to save project. Please try again.";

/// Create/edit form for a single project.
///
/// Idle → Submitting → Success | Failed. Inputs are locked while a submission
/// is in flight; a failed form stays open and can be submitted again.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    mode: FormMode,
    data: FormData,
    state: FormState,
}

impl ProjectForm {
    pub fn create() -> Self {
        Self::with_data(FormMode::Create, FormData::default())
    }

    pub fn edit(project: &Project) -> Self {
        Self::with_data(FormMode::Edit(project.id), FormData::from_project(project))
    }

    pub fn with_data(mode: FormMode, data: FormData) -> Self {
        Self {
            mode,
            data,
            state: FormState::Idle,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Editable inputs, or `None` while a submission is in flight.
    pub fn data_mut(&mut self) -> Option<&mut FormData> {
        if self.inputs_enabled() {
            Some(&mut self.data)
        } else {
            None
        }
    }

    pub fn inputs_enabled(&self) -> bool {
        self.state != FormState::Submitting
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Project"
        } else {
            "Add New Project"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_edit(), &self.state) {
            (true, FormState::Submitting) => "Updating...",
            (false, FormState::Submitting) => "Creating...",
            (true, _) => "Update Project",
            (false, _) => "Add Project",
        }
    }

    /// The date input only applies to scheduled airdrops. Changing the status
    /// does not clear a date that was already entered.
    pub fn show_airdrop_date(&self) -> bool {
        self.data.airdrop_status == AirdropStatus::Scheduled
    }

    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::InFlight);
        }

        let submission = match self.mode {
            FormMode::Create => self.data.to_new_project().map(Submission::Create),
            FormMode::Edit(id) => self.data.to_patch().map(|patch| Submission::Update(id, patch)),
        };

        match submission {
            Ok(submission) => {
                self.state = FormState::Submitting;
                Ok(submission)
            }
            Err(msg) => {
                self.state = FormState::Failed(msg.clone());
                Err(FormError::Invalid(msg))
            }
        }
    }

    pub fn finish(&mut self, result: Result<Project, ClientError>) -> FormOutcome {
        match result {
            Ok(project) => {
                self.state = FormState::Success;
                self.data = FormData::from_project(&project);
                let message = if self.is_edit() {
                    "Project updated successfully"
                } else {
                    "Project created successfully"
                };
                tracing::info!(project_id = %project.id, "{message}");
                FormOutcome {
                    close: true,
                    refresh: true,
                    notification: Notification::Success(message.to_string()),
                }
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, reason: String) -> FormOutcome {
        tracing::warn!("Error saving project: {reason}");
        self.state = FormState::Failed(reason);
        FormOutcome {
            close: false,
            refresh: false,
            notification: Notification::Error(SAVE_FAILED.to_string()),
        }
    }

    /// Runs one submission against the API. Only an in-flight submission is
    /// reported as an error; every other failure settles the form as Failed.
    pub async fn submit(&mut self, client: &ProjectsClient) -> Result<FormOutcome, FormError> {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(FormError::Invalid(msg)) => return Ok(self.fail(msg)),
            Err(err) => return Err(err),
        };

        let result = match submission {
            Submission::Create(new) => client.create(&new).await,
            Submission::Update(id, patch) => client.update(id, &patch).await,
        };
        Ok(self.finish(result))
    }
}
