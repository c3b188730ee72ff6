//! Coloured progress output

use owo_colors::{OwoColorize, colors::css};

/// The roles text plays in the sync report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Linked,
    Skipped,
    Highlight,
    Detail,
}

impl Tone {
    fn paint(self, text: &str, colour: bool) -> String {
        if !colour {
            return text.to_owned();
        }
        match self {
            Self::Linked => text.fg::<css::Green>().to_string(),
            Self::Skipped => text.fg::<css::Orange>().to_string(),
            Self::Highlight => text.fg::<css::LightBlue>().to_string(),
            Self::Detail => text.dimmed().to_string(),
        }
    }
}

/// Colour is only written when stdout is a terminal that supports it.
fn colour_enabled() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colouring progress output.
pub trait Colorize {
    /// Green, for issues that were linked
    fn success(&self) -> String;
    /// Amber, for skipped items and failures
    fn warning(&self) -> String;
    /// Blue, for release names and issue keys
    fn info(&self) -> String;
    /// Dimmed, for secondary detail
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        Tone::Linked.paint(self.as_ref(), colour_enabled())
    }

    fn warning(&self) -> String {
        Tone::Skipped.paint(self.as_ref(), colour_enabled())
    }

    fn info(&self) -> String {
        Tone::Highlight.paint(self.as_ref(), colour_enabled())
    }

    fn dim(&self) -> String {
        Tone::Detail.paint(self.as_ref(), colour_enabled())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Tone::Linked; "linked")]
    #[test_case(Tone::Skipped; "skipped")]
    #[test_case(Tone::Highlight; "highlight")]
    #[test_case(Tone::Detail; "detail")]
    fn plain_without_colour(tone: Tone) {
        assert_eq!(tone.paint("TEST-1", false), "TEST-1");
    }

    #[test_case(Tone::Linked; "linked")]
    #[test_case(Tone::Skipped; "skipped")]
    #[test_case(Tone::Highlight; "highlight")]
    #[test_case(Tone::Detail; "detail")]
    fn escaped_with_colour(tone: Tone) {
        let painted = tone.paint("TEST-1", true);
        assert!(painted.starts_with('\u{1b}'));
        assert!(painted.contains("TEST-1"));
    }
}
