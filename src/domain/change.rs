use serde::Serialize;

/// One entry of a release changelog, normalised from either a pull request
/// line or a raw commit line.
///
/// Pull request entries carry the author and the link to the pull request.
/// Commit entries carry only a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

/// The shape of changelog line a [`ChangeRecord`] was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// `- <title> by @<author> in <link>`
    PullRequest,
    /// `- <sha> - <message>` or any other bullet
    Commit,
}

impl ChangeRecord {
    /// Create a record for a pull request line.
    #[must_use]
    pub fn pull_request(
        title: impl Into<String>,
        author: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: Some(author.into()),
            link: Some(link.into()),
        }
    }

    /// Create a record for a commit line.
    #[must_use]
    pub fn commit(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            link: None,
        }
    }

    /// The change title, used for issue key lookup.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The pull request author, without the leading `@`.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The pull request link.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Which kind of changelog line produced this record.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        if self.author.is_some() {
            ChangeKind::PullRequest
        } else {
            ChangeKind::Commit
        }
    }
}
