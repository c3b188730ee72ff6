use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A Jira release (a project "version").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// The tracker-assigned identifier.
    pub id: String,

    /// The release name, matching the git ref it was created for.
    pub name: String,

    /// Whether the release has shipped.
    #[serde(default)]
    pub released: bool,

    /// Whether the release has been archived.
    #[serde(default)]
    pub archived: bool,

    /// The date the release shipped, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}
