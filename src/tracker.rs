//! The issue tracker a release is recorded in.
//!
//! [`Tracker`] is the seam between release syncing and the tracker's API;
//! [`JiraClient`] implements it against Jira Cloud.

mod jira;

pub use jira::{JiraClient, JiraCredentials};

use crate::domain::{IssueKey, Release};

/// Operations release syncing needs from an issue tracker.
pub trait Tracker {
    /// Returns the release called `name`, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be reached or rejects the
    /// request.
    fn resolve_or_create_release(&self, name: &str) -> Result<Release, TrackerError>;

    /// Marks the release with the given id as released.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be reached or rejects the
    /// request.
    fn mark_release_released(&self, id: &str) -> Result<Release, TrackerError>;

    /// Adds the release called `release_name` to the fix versions of `issue`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be reached or rejects the
    /// request, for example because the issue does not exist.
    fn attach_issue_to_release(
        &self,
        release_name: &str,
        issue: &IssueKey,
    ) -> Result<(), TrackerError>;
}

/// Errors returned by a [`Tracker`].
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The request could not be sent or its response could not be decoded.
    #[error("request to issue tracker failed")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("issue tracker responded with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The tracker answered successfully but with data that makes no sense.
    #[error("unexpected response from issue tracker: {0}")]
    Response(String),
}
