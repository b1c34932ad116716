use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{NewProject, Project, ProjectPatch};

#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Api { status: StatusCode, message: String },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(err) => write!(f, "Request failed: {err}"),
            ClientError::Api { status, message } => write!(f, "{status}: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<serde_json::Value>,
}

/// Typed client for the `/projects` resource.
#[derive(Clone)]
pub struct ProjectsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProjectsClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/projects{path}", self.base_url)
    }

    pub async fn list(&self) -> Result<Vec<Project>, ClientError> {
        let resp = self.client.get(self.url("")).send().await?;
        decode(resp).await
    }

    pub async fn create(&self, project: &NewProject) -> Result<Project, ClientError> {
        let resp = self.client.post(self.url("")).json(project).send().await?;
        decode(resp).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, ClientError> {
        let resp = self.client.get(self.url(&format!("/{id}"))).send().await?;
        decode(resp).await
    }

    pub async fn update(&self, id: Uuid, patch: &ProjectPatch) -> Result<Project, ClientError> {
        let resp = self
            .client
            .put(self.url(&format!("/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?;
        decode::<serde_json::Value>(resp).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body: ApiEnvelope<T> = resp.json().await?;

    match body.data {
        Some(data) if body.success && status.is_success() => Ok(data),
        _ => {
            let message = match body.error {
                Some(serde_json::Value::String(msg)) => msg,
                Some(other) => other.to_string(),
                None => status.to_string(),
            };
            Err(ClientError::Api { status, message })
        }
    }
}
