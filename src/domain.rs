//! Domain models for release syncing.
//!
//! This module contains the values that flow through the pipeline: change
//! records parsed from a changelog, the issue keys found in them, the Jira
//! release they are linked to, and the settings that drive a run.

mod change;
pub use change::{ChangeKind, ChangeRecord};

/// Project prefixes and issue keys.
pub mod issue_key;
pub use issue_key::{Error as IssueKeyError, InvalidProjectKey, IssueKey, ProjectKey};

mod release;
pub use release::Release;

mod settings;
pub use settings::{DEFAULT_NOTES_PATH, Settings};
