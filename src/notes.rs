//! Release notes parsing.
//!
//! Release notes are Markdown documents with a `## What's Changed` section of
//! pull request bullets and a `## Commits` section of commit bullets. This
//! module turns them into [`ChangeRecord`]s and finds the issue keys they
//! reference.

mod issues;
mod line;
mod section;

use std::{
    io,
    path::{Path, PathBuf},
};

pub use issues::{IssuePattern, IssueSelection, collect_issue_keys};
pub use line::classify_line;
pub use section::{CHANGES_SECTION, COMMITS_SECTION, SectionError, section};
use tracing::instrument;

use crate::domain::ChangeRecord;

/// Sections read from the notes, in output order.
pub const SECTIONS: [&str; 2] = [CHANGES_SECTION, COMMITS_SECTION];

/// The changes parsed from a release notes document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Every change, pull requests first, then commits, each in document
    /// order.
    pub records: Vec<ChangeRecord>,

    /// Sections that were present but could not be read.
    pub failures: Vec<SectionError>,
}

/// Parses every recognised section of `document`.
///
/// A missing section contributes nothing. A section that is present but
/// malformed is recorded in [`Changes::failures`] and skipped; the remaining
/// sections are still read.
#[must_use]
#[instrument(level = "debug", skip(document))]
pub fn parse_changes(document: &str) -> Changes {
    let mut changes = Changes::default();

    for title in SECTIONS {
        match section(document, title) {
            Ok(Some(body)) => {
                let before = changes.records.len();
                changes
                    .records
                    .extend(body.lines().filter_map(classify_line));
                tracing::debug!(
                    section = title,
                    items = changes.records.len() - before,
                    "parsed section"
                );
            }
            Ok(None) => tracing::trace!(section = title, "section not present"),
            Err(error) => {
                tracing::warn!(section = title, %error, "failed to parse section");
                changes.failures.push(error);
            }
        }
    }

    changes
}

/// Errors that can occur when reading release notes.
#[derive(Debug, thiserror::Error)]
#[error("failed to read release notes from {}", .path.display())]
pub struct NotesError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl NotesError {
    /// The path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads the whole release notes document at `path`.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read as UTF-8.
pub fn load_notes(path: &Path) -> Result<String, NotesError> {
    std::fs::read_to_string(path).map_err(|source| NotesError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::ProjectKey;

    fn issue_keys(document: &str) -> Vec<String> {
        let changes = parse_changes(document);
        let pattern = IssuePattern::new(&ProjectKey::try_from("TEST").unwrap());
        collect_issue_keys(&changes.records, &pattern)
            .keys
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn pull_request_section() {
        let document = "## What's Changed\n\n- TEST-123 Fix login bug by @alice in https://x/pull/1\n\n";

        let changes = parse_changes(document);

        assert_eq!(
            changes.records,
            vec![ChangeRecord::pull_request(
                "TEST-123 Fix login bug",
                "alice",
                "https://x/pull/1"
            )]
        );
        assert!(changes.failures.is_empty());
        assert_eq!(issue_keys(document), ["TEST-123"]);
    }

    #[test]
    fn commit_section() {
        let document = "## Commits\n\n- 1234567 - TEST-789 Update docs\n\n";

        let changes = parse_changes(document);

        assert_eq!(
            changes.records,
            vec![ChangeRecord::commit("TEST-789 Update docs")]
        );
        assert_eq!(issue_keys(document), ["TEST-789"]);
    }

    #[test]
    fn footer_is_not_a_change() {
        let document = r"## What's Changed

- TEST-123 Fix login bug by @alice in https://github.com/org/repo/pull/1
- TEST-456 Add new feature by @bob in https://github.com/org/repo/pull/2

**Full Changelog**: https://github.com/org/repo/compare/v1.0.0...v1.0.1
";

        let changes = parse_changes(document);

        assert_eq!(changes.records.len(), 2);
        assert_eq!(changes.records[1].author(), Some("bob"));
        assert_eq!(issue_keys(document), ["TEST-123", "TEST-456"]);
    }

    #[test]
    fn pull_requests_come_before_commits() {
        // Commits listed first in the document are still reported last.
        let document = r"## Commits

- abc1234 - TEST-300 Hotfix for issue

## What's Changed

- TEST-100 Feature A by @user1 in https://github.com/org/repo/pull/10

";

        let titles: Vec<_> = parse_changes(document)
            .records
            .iter()
            .map(|record| record.title().to_string())
            .collect();

        assert_eq!(titles, ["TEST-100 Feature A", "TEST-300 Hotfix for issue"]);
    }

    #[test]
    fn duplicate_keys_across_sections() {
        let document = r"## What's Changed

- TEST-500 Initial fix by @user1 in https://github.com/org/repo/pull/1

## Commits

- abc1234 - TEST-500 Follow-up commit for same issue
- def5678: TEST-600 Different issue

**Full Changelog**: https://github.com/org/repo/compare/v1.0.0...v1.0.1
";

        assert_eq!(parse_changes(document).records.len(), 3);
        assert_eq!(issue_keys(document), ["TEST-500", "TEST-600"]);
    }

    #[test]
    fn changes_without_keys_are_still_counted() {
        let document = r"## What's Changed

- Some change without issue key by @user1 in https://github.com/org/repo/pull/1

## Commits

- abc1234 - Another change without key

";

        assert_eq!(parse_changes(document).records.len(), 2);
        assert!(issue_keys(document).is_empty());
    }

    #[test]
    fn malformed_section_does_not_stop_the_others() {
        // The commits section runs to the end of the file without a blank line.
        let document = "## What's Changed\n- TEST-1 A by @a in https://x/1\n\n## Commits\n- abc1234 - TEST-2";

        let changes = parse_changes(document);

        assert_eq!(changes.records.len(), 1);
        assert_eq!(
            changes.failures,
            vec![SectionError::Unterminated(COMMITS_SECTION.to_string())]
        );
    }

    #[test]
    fn section_failures_are_kept_by_clones() {
        let document = "## Commits\n- abc1234 - TEST-2";

        let changes = parse_changes(document);
        let copy = changes.clone();

        assert_eq!(copy, changes);
        assert_eq!(copy.failures.len(), 1);
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let document = "## New Contributors\n- @carol made their first contribution\n\n";
        assert_eq!(parse_changes(document), Changes::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"## Commits\n- abc1234 - TEST-1 x\n\n").unwrap();

        let document = load_notes(file.path()).unwrap();

        assert_eq!(parse_changes(&document).records.len(), 1);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("notes.md");

        let error = load_notes(&missing).unwrap_err();

        assert_eq!(error.path(), missing);
        assert_eq!(error.source.kind(), io::ErrorKind::NotFound);
    }
}
