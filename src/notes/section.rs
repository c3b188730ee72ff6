/// The section listing merged pull requests.
pub const CHANGES_SECTION: &str = "What's Changed";

/// The section listing raw commits.
pub const COMMITS_SECTION: &str = "Commits";

/// A section heading was found but its body never ends.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SectionError {
    /// No blank line follows the heading, so the section has no end.
    #[error("section '{0}' is not terminated by a blank line")]
    Unterminated(String),
}

/// Returns the body of the section headed `## {title}`.
///
/// The body starts right after the heading line and ends at the first blank
/// line (`\n\n`). The heading must match exactly, including case.
///
/// Returns `Ok(None)` when the heading does not appear in `document`.
///
/// # Errors
///
/// Returns [`SectionError::Unterminated`] if the heading is present but no
/// blank line follows it.
pub fn section<'a>(document: &'a str, title: &str) -> Result<Option<&'a str>, SectionError> {
    let marker = format!("## {title}\n");
    let Some((_, rest)) = document.split_once(&marker) else {
        return Ok(None);
    };

    rest.split_once("\n\n")
        .map(|(body, _)| Some(body))
        .ok_or_else(|| SectionError::Unterminated(title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_heading_is_none() {
        let document = "## Something Else\n\n- a\n\n";
        assert_eq!(section(document, CHANGES_SECTION), Ok(None));
    }

    #[test]
    fn body_ends_at_first_blank_line() {
        let document = "## What's Changed\n- one\n- two\n\n**Full Changelog**: x\n";
        assert_eq!(
            section(document, CHANGES_SECTION),
            Ok(Some("- one\n- two"))
        );
    }

    #[test]
    fn leading_newline_after_heading_is_kept() {
        // A single blank line under the heading reads as "\n- one", which is
        // not a paragraph break.
        let document = "## Commits\n\n- one\n\n";
        assert_eq!(section(document, COMMITS_SECTION), Ok(Some("\n- one")));
    }

    #[test]
    fn heading_is_case_sensitive() {
        let document = "## what's changed\n- one\n\n";
        assert_eq!(section(document, CHANGES_SECTION), Ok(None));
    }

    #[test]
    fn heading_needs_trailing_newline() {
        assert_eq!(section("## Commits", COMMITS_SECTION), Ok(None));
    }

    #[test]
    fn unterminated_section_is_an_error() {
        let document = "## Commits\n- abc1234 - fix";
        assert_eq!(
            section(document, COMMITS_SECTION),
            Err(SectionError::Unterminated("Commits".to_string()))
        );
    }

    #[test]
    fn sections_are_independent() {
        let document = "## What's Changed\n- pr\n\n## Commits\n- commit\n\n";
        assert_eq!(section(document, CHANGES_SECTION), Ok(Some("- pr")));
        assert_eq!(section(document, COMMITS_SECTION), Ok(Some("- commit")));
    }
}
