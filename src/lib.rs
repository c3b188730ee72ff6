//! Link the issues mentioned in release notes to a Jira release.
//!
//! Release notes are parsed into change records, the Jira issue keys in their
//! titles are collected, and each issue gets the release added to its fix
//! versions.

pub mod domain;
pub use domain::{ChangeRecord, IssueKey, ProjectKey, Release, Settings};

/// Release notes parsing and issue key extraction.
pub mod notes;
pub use notes::{Changes, IssuePattern, parse_changes};

pub mod release;
pub use release::{Plan, ReleaseSync, SyncReport};

pub mod tracker;
pub use tracker::{JiraClient, JiraCredentials, Tracker, TrackerError};
