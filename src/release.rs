//! Linking a changelog's issues to a tracker release.
//!
//! A sync resolves (or creates) the release named after the git ref,
//! optionally marks it released, reads the release notes and adds the release
//! to the fix versions of every issue the notes mention.

use tracing::instrument;

use crate::{
    domain::{ChangeRecord, IssueKey, ProjectKey, Release, Settings},
    notes::{self, Changes, IssuePattern, NotesError},
    tracker::{Tracker, TrackerError},
};

/// What a set of release notes would link, worked out without touching the
/// tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Every change parsed from the notes, and any section failures.
    pub changes: Changes,

    /// Distinct issue keys, in first-seen order.
    pub issue_keys: Vec<IssueKey>,

    /// Changes that mention no issue of the project.
    pub unlinked: Vec<ChangeRecord>,
}

impl Plan {
    /// Parse `document` and pick out the issues of `project`.
    #[must_use]
    pub fn new(document: &str, project: &ProjectKey) -> Self {
        let changes = notes::parse_changes(document);
        let pattern = IssuePattern::new(project);
        let selection = notes::collect_issue_keys(&changes.records, &pattern);
        let issue_keys = selection.keys;
        let unlinked = selection.unlinked.into_iter().cloned().collect();

        Self {
            changes,
            issue_keys,
            unlinked,
        }
    }
}

/// An issue that could not be linked to the release.
#[derive(Debug)]
pub struct AttachFailure {
    /// The issue that was not updated.
    pub issue: IssueKey,

    /// Why the tracker refused.
    pub error: TrackerError,
}

/// The outcome of a completed sync.
#[derive(Debug)]
pub struct SyncReport {
    /// The release the issues were linked to, as last returned by the
    /// tracker.
    pub release: Release,

    /// Whether the release was marked released during this sync.
    pub marked_released: bool,

    /// What was parsed from the notes.
    pub plan: Plan,

    /// Issues linked successfully, in order.
    pub attached: Vec<IssueKey>,

    /// Issues that could not be linked.
    pub failures: Vec<AttachFailure>,
}

impl SyncReport {
    /// True when every issue was linked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Errors that stop a sync before issues are linked.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The release could not be found or created.
    #[error("failed to resolve release '{name}'")]
    Resolve {
        /// The release name.
        name: String,
        /// The tracker error.
        #[source]
        source: TrackerError,
    },

    /// The release could not be marked released.
    #[error("failed to mark release '{name}' as released")]
    MarkReleased {
        /// The release name.
        name: String,
        /// The tracker error.
        #[source]
        source: TrackerError,
    },

    /// The release notes could not be read.
    #[error(transparent)]
    Notes(#[from] NotesError),
}

/// Runs a release sync against a [`Tracker`].
pub struct ReleaseSync<'a, T: ?Sized> {
    settings: &'a Settings,
    tracker: &'a T,
}

impl<'a, T> ReleaseSync<'a, T>
where
    T: Tracker + ?Sized,
{
    /// Create a sync for `settings` using `tracker`.
    #[must_use]
    pub const fn new(settings: &'a Settings, tracker: &'a T) -> Self {
        Self { settings, tracker }
    }

    /// Run the sync.
    ///
    /// Every issue is attempted even if linking an earlier one fails; those
    /// failures are collected in [`SyncReport::failures`].
    ///
    /// # Errors
    ///
    /// Fails without linking anything if the release cannot be resolved or
    /// marked released, or if the release notes cannot be read.
    #[instrument(skip(self), fields(release = %self.settings.ref_name))]
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        let name = &self.settings.ref_name;

        let mut release = self
            .tracker
            .resolve_or_create_release(name)
            .map_err(|source| SyncError::Resolve {
                name: name.clone(),
                source,
            })?;

        let marked_released = self.settings.mark_released;
        if marked_released {
            tracing::info!(id = %release.id, "marking release as released");
            release = self
                .tracker
                .mark_release_released(&release.id)
                .map_err(|source| SyncError::MarkReleased {
                    name: name.clone(),
                    source,
                })?;
        }

        let document = notes::load_notes(&self.settings.notes_path)?;
        let plan = Plan::new(&document, &self.settings.project);

        let mut attached = Vec::new();
        let mut failures = Vec::new();
        for issue in &plan.issue_keys {
            match self.tracker.attach_issue_to_release(name, issue) {
                Ok(()) => {
                    tracing::info!(%issue, "linked issue");
                    attached.push(issue.clone());
                }
                Err(error) => {
                    tracing::warn!(%issue, %error, "failed to link issue");
                    failures.push(AttachFailure {
                        issue: issue.clone(),
                        error,
                    });
                }
            }
        }

        Ok(SyncReport {
            release,
            marked_released,
            plan,
            attached,
            failures,
        })
    }
}
