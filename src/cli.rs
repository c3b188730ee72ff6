use std::path::PathBuf;

mod parse;
mod sync;
mod terminal;

use clap::ArgAction;
use jira_release::{ProjectKey, domain::DEFAULT_NOTES_PATH};
use parse::Parse;
use sync::Sync;

/// Parse a project key, as used in issue keys like `PROJ-123`.
fn parse_project(s: &str) -> Result<ProjectKey, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a boolean the way the release workflow passes them: only `true`
/// (in any case) is true.
fn parse_flag(s: &str) -> Result<bool, String> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The Jira project whose issues are linked
    #[arg(long, env = "INPUT_JIRA_PROJECT", value_parser = parse_project, global = true)]
    project: Option<ProjectKey>,

    /// The release notes to read
    #[arg(long, env = "INPUT_NOTES_PATH", default_value = DEFAULT_NOTES_PATH, global = true)]
    notes: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let project = self.project.ok_or_else(|| {
            anyhow::anyhow!("no Jira project given (set --project or INPUT_JIRA_PROJECT)")
        })?;

        match self.command {
            Some(Command::Parse(command)) => command.run(&project, &self.notes),
            Some(Command::Sync(command)) => command.run(project, self.notes),
            None => Sync::from_env()?.run(project, self.notes),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Link the issues in the release notes to the Jira release (default)
    ///
    /// The release is named after the git ref and created if it does not
    /// exist yet.
    Sync(Sync),

    /// Parse the release notes and show the changes and issue keys found
    Parse(Parse),
}
