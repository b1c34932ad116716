use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AirdropStatus {
    #[default]
    #[serde(rename = "Not Airdropped")]
    NotAirdropped,
    Airdropped,
    Scheduled,
}

impl AirdropStatus {
    pub const ALL: [AirdropStatus; 3] = [
        AirdropStatus::NotAirdropped,
        AirdropStatus::Airdropped,
        AirdropStatus::Scheduled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AirdropStatus::NotAirdropped => "Not Airdropped",
            AirdropStatus::Airdropped => "Airdropped",
            AirdropStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for AirdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirdropStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AirdropStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("`{s}` is not a valid airdropStatus")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub discord_link: Option<String>,
    pub x_link: Option<String>,
    pub website: Option<String>,
    pub wallet: Option<String>,
    pub email: Option<String>,
    pub completed: bool,
    pub airdrop_status: AirdropStatus,
    pub airdrop_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Create payload: a project without the store-assigned `id` and `createdAt`.
/// Unknown keys (including `id`/`createdAt`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub name: String,
    pub discord_link: Option<String>,
    pub x_link: Option<String>,
    pub website: Option<String>,
    pub wallet: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub airdrop_status: AirdropStatus,
    #[serde(default, deserialize_with = "optional_date")]
    pub airdrop_date: Option<NaiveDate>,
}

/// Partial update. Absent fields are left untouched; an empty string clears an
/// optional text field and an explicit `null` clears `airdropDate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airdrop_status: Option<AirdropStatus>,
    #[serde(
        default,
        deserialize_with = "patched_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub airdrop_date: Option<Option<NaiveDate>>,
}

impl Project {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: NewProject) -> Self {
        let new = new.normalized();
        Project {
            id,
            name: new.name,
            discord_link: new.discord_link,
            x_link: new.x_link,
            website: new.website,
            wallet: new.wallet,
            email: new.email,
            completed: new.completed,
            airdrop_status: new.airdrop_status,
            airdrop_date: new.airdrop_date,
            created_at,
        }
    }

    /// Shallow field overwrite. `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        overwrite_text(&mut self.discord_link, patch.discord_link);
        overwrite_text(&mut self.x_link, patch.x_link);
        overwrite_text(&mut self.website, patch.website);
        overwrite_text(&mut self.wallet, patch.wallet);
        overwrite_text(&mut self.email, patch.email);
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(status) = patch.airdrop_status {
            self.airdrop_status = status;
        }
        if let Some(date) = patch.airdrop_date {
            self.airdrop_date = date;
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(&self.name)
    }
}

impl NewProject {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(&self.name)
    }

    /// Trims the name and stores blank optional inputs as absent.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        for field in [
            &mut self.discord_link,
            &mut self.x_link,
            &mut self.website,
            &mut self.wallet,
            &mut self.email,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, which keeps its UTC date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| format!("Invalid airdropDate `{raw}`, expected YYYY-MM-DD"))
}

fn validate_fields(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Project name is required".to_string()));
    }
    Ok(())
}

fn overwrite_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = if value.trim().is_empty() { None } else { Some(value) };
    }
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn patched_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_date(deserializer).map(Some)
}
