use std::path::Path;

use clap::Parser;
use jira_release::{ChangeRecord, Plan, ProjectKey, notes::load_notes};
use serde_json::json;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show the changes and issue keys found in the release notes")]
pub struct Parse {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Parse {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, project: &ProjectKey, notes: &Path) -> anyhow::Result<()> {
        let document = load_notes(notes)?;
        let plan = Plan::new(&document, project);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&plan))?),
            OutputFormat::Table => {
                print_changes(&plan);
                print_unlinked(&plan);
                print_issue_keys(&plan);
            }
        }
        Ok(())
    }
}

fn to_json(plan: &Plan) -> serde_json::Value {
    let failures: Vec<_> = plan
        .changes
        .failures
        .iter()
        .map(ToString::to_string)
        .collect();

    json!({
        "changes": plan.changes.records,
        "issues": plan.issue_keys,
        "unlinked": plan.unlinked.iter().map(ChangeRecord::title).collect::<Vec<_>>(),
        "section_failures": failures,
    })
}

pub fn print_changes(plan: &Plan) {
    println!("Parsed release items (PRs and commits):");
    if plan.changes.records.is_empty() {
        println!("  {}", "none".dim());
    }
    for change in &plan.changes.records {
        match (change.author(), change.link()) {
            (Some(author), Some(link)) => println!(
                "  - {} {}",
                change.title(),
                format!("(@{author}, {link})").dim()
            ),
            _ => println!("  - {}", change.title()),
        }
    }
    for failure in &plan.changes.failures {
        println!("  {}", failure.to_string().warning());
    }
}

pub fn print_unlinked(plan: &Plan) {
    for change in &plan.unlinked {
        println!("{} {}", "No issue id:".warning(), change.title());
    }
}

pub fn print_issue_keys(plan: &Plan) {
    println!("Issues to update:");
    if plan.issue_keys.is_empty() {
        println!("  {}", "none".dim());
    }
    for issue in &plan.issue_keys {
        println!("  - {}", issue.to_string().info());
    }
}
