use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{Tracker, TrackerError};
use crate::domain::{IssueKey, ProjectKey, Release};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials for the Jira REST API (user email plus API token).
#[derive(Clone)]
pub struct JiraCredentials {
    user: String,
    token: String,
}

impl JiraCredentials {
    /// Credentials for basic authentication.
    #[must_use]
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A blocking client for the Jira Cloud REST API (v3), scoped to one project.
#[derive(Debug)]
pub struct JiraClient {
    base_url: String,
    project: ProjectKey,
    credentials: JiraCredentials,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct Project {
    id: String,
}

impl JiraClient {
    /// Create a client for the Jira site at `base_url`, e.g.
    /// `https://example.atlassian.net`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        project: ProjectKey,
        credentials: JiraCredentials,
    ) -> Result<Self, TrackerError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project,
            credentials,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/3/{path}", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, TrackerError> {
        let response = request
            .basic_auth(&self.credentials.user, Some(&self.credentials.token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn releases(&self) -> Result<Vec<Release>, TrackerError> {
        let url = self.url(&format!("project/{}/versions", self.project));
        Ok(self.send(self.http.get(url))?.json()?)
    }

    fn project_id(&self) -> Result<u64, TrackerError> {
        let url = self.url(&format!("project/{}", self.project));
        let project: Project = self.send(self.http.get(url))?.json()?;
        project.id.parse().map_err(|_| {
            TrackerError::Response(format!(
                "project {} has non-numeric id '{}'",
                self.project, project.id
            ))
        })
    }
}

impl Tracker for JiraClient {
    #[instrument(skip(self))]
    fn resolve_or_create_release(&self, name: &str) -> Result<Release, TrackerError> {
        if let Some(release) = self.releases()?.into_iter().find(|r| r.name == name) {
            tracing::info!(id = %release.id, "found existing release");
            return Ok(release);
        }

        let project_id = self.project_id()?;
        let body = json!({ "name": name, "projectId": project_id });
        let release: Release = self
            .send(self.http.post(self.url("version")).json(&body))?
            .json()?;
        tracing::info!(id = %release.id, "created release");
        Ok(release)
    }

    #[instrument(skip(self))]
    fn mark_release_released(&self, id: &str) -> Result<Release, TrackerError> {
        let body = json!({
            "released": true,
            "releaseDate": Utc::now().date_naive(),
        });
        Ok(self
            .send(self.http.put(self.url(&format!("version/{id}"))).json(&body))?
            .json()?)
    }

    #[instrument(skip(self, issue), fields(issue = %issue))]
    fn attach_issue_to_release(
        &self,
        release_name: &str,
        issue: &IssueKey,
    ) -> Result<(), TrackerError> {
        let body = json!({
            "update": {
                "fixVersions": [{ "add": { "name": release_name } }],
            },
        });
        self.send(self.http.put(self.url(&format!("issue/{issue}"))).json(&body))?;
        Ok(())
    }
}
