use std::path::PathBuf;

use super::ProjectKey;

/// The notes file written by the release step when none is configured.
pub const DEFAULT_NOTES_PATH: &str = "notes.md";

/// Process-wide settings for a release sync.
///
/// Built once at startup and passed by reference; nothing below the command
/// line reads the environment directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The Jira project whose issue keys are linked.
    pub project: ProjectKey,

    /// The git ref (tag or branch) being released. Also the release name.
    pub ref_name: String,

    /// Whether the release should be marked as released once resolved.
    pub mark_released: bool,

    /// Location of the changelog to parse.
    pub notes_path: PathBuf,
}

impl Settings {
    /// Settings for `project` and `ref_name`, with defaults for the rest.
    #[must_use]
    pub fn new(project: ProjectKey, ref_name: impl Into<String>) -> Self {
        Self {
            project,
            ref_name: ref_name.into(),
            mark_released: false,
            notes_path: PathBuf::from(DEFAULT_NOTES_PATH),
        }
    }

    /// Enables or disables marking the release as released.
    #[must_use]
    pub fn with_mark_released(mut self, mark_released: bool) -> Self {
        self.mark_released = mark_released;
        self
    }

    /// Overrides the changelog location.
    #[must_use]
    pub fn with_notes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.notes_path = path.into();
        self
    }
}
