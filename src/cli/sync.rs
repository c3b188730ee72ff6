use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jira_release::{
    JiraClient, JiraCredentials, Plan, ProjectKey, ReleaseSync, Settings, SyncReport,
    notes::load_notes,
};
use tracing::instrument;

use super::{
    parse::{print_changes, print_issue_keys, print_unlinked},
    parse_flag,
    terminal::Colorize,
};

#[derive(Debug, Parser)]
#[command(about = "Link the issues in the release notes to the Jira release")]
pub struct Sync {
    /// The git ref being released; also the name of the Jira release
    #[arg(long, env = "GITHUB_REF_NAME")]
    ref_name: Option<String>,

    /// Mark the release as released
    #[arg(
        long,
        env = "INPUT_JIRA_MARK_RELEASED",
        action = clap::ArgAction::SetTrue,
        value_parser = parse_flag
    )]
    mark_released: bool,

    /// Base URL of the Jira site, e.g. https://example.atlassian.net
    #[arg(long, env = "INPUT_JIRA_BASE_URL")]
    jira_url: Option<String>,

    /// Email address of the Jira user
    #[arg(long, env = "INPUT_JIRA_USER_EMAIL")]
    jira_user: Option<String>,

    /// API token of the Jira user
    #[arg(long, env = "INPUT_JIRA_API_TOKEN", hide_env_values = true)]
    jira_token: Option<String>,

    /// Show what would be linked without calling Jira
    #[arg(long)]
    dry_run: bool,
}

impl Sync {
    /// Build the sync options from the environment alone.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["sync"])
    }

    #[instrument(level = "debug", skip(self))]
    pub fn run(self, project: ProjectKey, notes: PathBuf) -> anyhow::Result<()> {
        let ref_name = self
            .ref_name
            .clone()
            .context("no release name given (set --ref-name or GITHUB_REF_NAME)")?;

        let settings = Settings::new(project, ref_name)
            .with_mark_released(self.mark_released)
            .with_notes_path(notes);

        if self.dry_run {
            return Self::preview(&settings);
        }

        let client = self.client(&settings)?;
        let report = ReleaseSync::new(&settings, &client).run()?;
        Self::print_report(&report);

        if report.is_complete() {
            Ok(())
        } else {
            anyhow::bail!(
                "failed to update {} of {} issues",
                report.failures.len(),
                report.plan.issue_keys.len()
            )
        }
    }

    fn client(&self, settings: &Settings) -> anyhow::Result<JiraClient> {
        let url = self
            .jira_url
            .as_deref()
            .context("no Jira URL given (set --jira-url or INPUT_JIRA_BASE_URL)")?;
        let user = self
            .jira_user
            .as_deref()
            .context("no Jira user given (set --jira-user or INPUT_JIRA_USER_EMAIL)")?;
        let token = self
            .jira_token
            .as_deref()
            .context("no Jira API token given (set --jira-token or INPUT_JIRA_API_TOKEN)")?;

        JiraClient::new(
            url,
            settings.project.clone(),
            JiraCredentials::new(user, token),
        )
        .context("failed to create Jira client")
    }

    fn preview(settings: &Settings) -> anyhow::Result<()> {
        let document = load_notes(&settings.notes_path)?;
        let plan = Plan::new(&document, &settings.project);

        println!("{}", format!("Dry run for release {}", settings.ref_name).info());
        if settings.mark_released {
            println!("Would mark {} as released", settings.ref_name);
        }
        print_changes(&plan);
        print_unlinked(&plan);
        print_issue_keys(&plan);
        Ok(())
    }

    fn print_report(report: &SyncReport) {
        println!(
            "Jira release: {} (id {})",
            report.release.name.info(),
            report.release.id
        );
        if report.marked_released {
            println!("Version {} marked as released", report.release.name);
        }

        print_changes(&report.plan);
        print_unlinked(&report.plan);
        print_issue_keys(&report.plan);

        for issue in &report.attached {
            println!("  {} {issue}", "✓".success());
        }
        for failure in &report.failures {
            println!(
                "  {} {}: {}",
                "✗".warning(),
                failure.issue,
                failure.error
            );
        }

        if !report.is_complete() {
            println!(
                "{}",
                format!(
                    "{} of {} issues could not be updated",
                    report.failures.len(),
                    report.plan.issue_keys.len()
                )
                .warning()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let sync = Sync::try_parse_from([
            "sync",
            "--ref-name",
            "v1.2.3",
            "--mark-released",
            "--jira-url",
            "https://example.atlassian.net",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(sync.ref_name.as_deref(), Some("v1.2.3"));
        assert!(sync.mark_released);
        assert!(sync.dry_run);
    }

    #[test]
    fn missing_credentials_are_reported() {
        let sync = Sync::try_parse_from([
            "sync",
            "--ref-name",
            "v1.2.3",
            "--jira-url",
            "https://example.atlassian.net",
            "--jira-user",
            "me@example.com",
        ])
        .unwrap();
        let sync = Sync {
            jira_token: None,
            ..sync
        };
        let settings = Settings::new(ProjectKey::try_from("TEST").unwrap(), "v1.2.3");

        let error = sync.client(&settings).unwrap_err();

        assert!(error.to_string().contains("INPUT_JIRA_API_TOKEN"));
    }
}
