use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::{ChangeRecord, IssueKey, ProjectKey};

/// Finds issue keys (`<PROJECT>-<digits>`) for one project in free text.
///
/// Matching is case-sensitive and unanchored, so `XTEST-1` contains a match
/// for project `TEST`.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    project: ProjectKey,
    regex: Regex,
}

impl IssuePattern {
    /// Builds the pattern for `project`.
    #[must_use]
    pub fn new(project: &ProjectKey) -> Self {
        let regex = Regex::new(&format!("{}-([0-9]+)", regex::escape(project)))
            .expect("escaped project key always forms a valid pattern");
        Self {
            project: project.clone(),
            regex,
        }
    }

    /// Returns the leftmost issue key in `text`, if any.
    ///
    /// When a title mentions several issues only the first one is returned;
    /// a squashed commit is linked to its first ticket alone.
    #[must_use]
    pub fn first_in(&self, text: &str) -> Option<IssueKey> {
        let digits = self.regex.captures(text)?.get(1)?.as_str();
        IssueKey::new(self.project.clone(), digits).ok()
    }
}

/// The issue keys referenced by a changelog, and the changes that had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSelection<'a> {
    /// Distinct issue keys in the order they first appear.
    pub keys: Vec<IssueKey>,

    /// Changes whose title carries no issue key.
    pub unlinked: Vec<&'a ChangeRecord>,
}

/// Extracts one issue key per change and removes repeats, keeping the order
/// in which keys are first seen.
#[must_use]
pub fn collect_issue_keys<'a>(
    changes: &'a [ChangeRecord],
    pattern: &IssuePattern,
) -> IssueSelection<'a> {
    let mut seen = BTreeSet::new();
    let mut keys = Vec::new();
    let mut unlinked = Vec::new();

    for change in changes {
        match pattern.first_in(change.title()) {
            Some(key) => {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
            None => {
                tracing::debug!(title = change.title(), "no issue key in change");
                unlinked.push(change);
            }
        }
    }

    IssueSelection { keys, unlinked }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(project: &str) -> IssuePattern {
        IssuePattern::new(&ProjectKey::try_from(project).unwrap())
    }

    fn keys(selection: &IssueSelection<'_>) -> Vec<String> {
        selection.keys.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_key_is_found() {
        let key = pattern("TEST").first_in("TEST-123 Fix login bug").unwrap();
        assert_eq!(key.to_string(), "TEST-123");
    }

    #[test]
    fn no_key_is_none() {
        assert_eq!(pattern("TEST").first_in("Some change without key"), None);
    }

    #[test]
    fn first_of_several_keys_wins() {
        let key = pattern("TEST")
            .first_in("Squash TEST-9, TEST-2 and TEST-5")
            .unwrap();
        assert_eq!(key.to_string(), "TEST-9");
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(pattern("TEST").first_in("test-123 lower case"), None);
    }

    #[test]
    fn other_projects_are_ignored() {
        let key = pattern("TEST").first_in("OPS-1 then TEST-2").unwrap();
        assert_eq!(key.to_string(), "TEST-2");
    }

    #[test]
    fn match_is_not_word_bounded() {
        let key = pattern("TEST").first_in("XTEST-42").unwrap();
        assert_eq!(key.to_string(), "TEST-42");
    }

    #[test]
    fn prefix_metacharacters_are_literal() {
        let p = pattern("A.B");
        assert_eq!(p.first_in("AXB-1"), None);
        assert_eq!(p.first_in("A.B-1").unwrap().to_string(), "A.B-1");
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let changes = vec![
            ChangeRecord::commit("TEST-3 a"),
            ChangeRecord::commit("TEST-1 b"),
            ChangeRecord::commit("TEST-3 c"),
            ChangeRecord::commit("TEST-2 d"),
        ];

        let selection = collect_issue_keys(&changes, &pattern("TEST"));

        assert_eq!(keys(&selection), ["TEST-3", "TEST-1", "TEST-2"]);
        assert!(selection.unlinked.is_empty());
    }

    #[test]
    fn changes_without_keys_are_reported() {
        let changes = vec![
            ChangeRecord::pull_request("No key here", "alice", "https://x/pull/1"),
            ChangeRecord::commit("TEST-7 has one"),
        ];

        let selection = collect_issue_keys(&changes, &pattern("TEST"));

        assert_eq!(keys(&selection), ["TEST-7"]);
        assert_eq!(selection.unlinked, vec![&changes[0]]);
    }
}
