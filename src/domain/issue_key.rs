use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated Jira project prefix, such as `PROJ` in `PROJ-123`.
///
/// The prefix is matched case-sensitively and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectKey(NonEmptyString);

impl ProjectKey {
    /// Creates a new `ProjectKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProjectKey` if the string is empty or contains
    /// whitespace.
    pub fn new(s: String) -> Result<Self, InvalidProjectKey> {
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidProjectKey(s));
        }
        NonEmptyString::new(s.clone())
            .map(Self)
            .map_err(|_| InvalidProjectKey(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for ProjectKey {
    type Error = InvalidProjectKey;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for ProjectKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectKey {
    type Err = InvalidProjectKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a project prefix is empty or contains whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid project key '{0}': must be non-empty and contain no whitespace")]
pub struct InvalidProjectKey(String);

/// A Jira issue key, such as `PROJ-123`.
///
/// The numeric part is kept exactly as it appeared in the source text, so
/// `PROJ-007` displays as `PROJ-007`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueKey {
    project: ProjectKey,
    number: String,
}

impl IssueKey {
    /// Create an issue key from a project prefix and its digit string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Number`] if `number` is empty or contains anything
    /// other than ASCII digits.
    pub fn new(project: ProjectKey, number: impl Into<String>) -> Result<Self, Error> {
        let number = number.into();
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Number(format!("{project}-{number}"), number));
        }
        Ok(Self { project, number })
    }

    /// Returns the project prefix.
    #[must_use]
    pub const fn project(&self) -> &ProjectKey {
        &self.project
    }

    /// Returns the digits following the project prefix.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.project, self.number)
    }
}

impl serde::Serialize for IssueKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Errors that can occur while parsing an issue key.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The key has no `-` separating project and number.
    #[error("Invalid issue key format: {0}")]
    Syntax(String),

    /// The number part is missing or not made of digits.
    #[error("Invalid number in issue key '{0}': expected digits, got '{1}'")]
    Number(String, String),

    /// The project part is not a valid project key.
    #[error(transparent)]
    Project(#[from] InvalidProjectKey),
}

impl FromStr for IssueKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (project, number) = s
            .rsplit_once('-')
            .ok_or_else(|| Error::Syntax(s.to_string()))?;
        if project.is_empty() {
            return Err(Error::Syntax(s.to_string()));
        }
        Self::new(ProjectKey::try_from(project)?, number)
    }
}

impl TryFrom<&str> for IssueKey {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}
