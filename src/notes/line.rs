use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ChangeRecord;

/// A leading abbreviated commit hash and its separator, e.g. `1a2b3c4 - `.
static COMMIT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{7,}\s*[:\-]\s*").expect("commit prefix pattern is valid")
});

/// Classifies one changelog line.
///
/// Only bullet lines (`- ...`, surrounding whitespace ignored) produce a
/// record; prose, blank lines and footer links are skipped. A bullet is read
/// as a pull request line when it has the shape
/// `<title> by @<author> in <link>`, and as a commit line otherwise.
///
/// Trailing whitespace only matters for eligibility. The text after the
/// marker keeps it, so a trailing `" in "` still splits off an empty link.
#[must_use]
pub fn classify_line(line: &str) -> Option<ChangeRecord> {
    if !line.trim().starts_with("- ") {
        return None;
    }
    let raw = line.trim_start().strip_prefix("- ")?;
    Some(parse_pull_request(raw).unwrap_or_else(|| parse_commit(raw)))
}

/// `<title> by @<author> in <link>`
fn parse_pull_request(raw: &str) -> Option<ChangeRecord> {
    let (title, tail) = raw.split_once(" by @")?;
    let (author, link) = tail.split_once(" in ")?;
    if title.trim().is_empty() {
        return None;
    }
    Some(ChangeRecord::pull_request(title, author, link))
}

/// `<sha>[:-] <message>`, or any bullet text at all.
///
/// The title is never empty: if stripping the hash leaves nothing, the whole
/// bullet text is kept so it can still be searched for issue keys.
fn parse_commit(raw: &str) -> ChangeRecord {
    let message = COMMIT_PREFIX.replace(raw, "");
    let message = message.trim();
    if message.is_empty() {
        ChangeRecord::commit(raw)
    } else {
        ChangeRecord::commit(message)
    }
}
