//! Label command implementation.
//!
//! Provides label management: set (full replacement) and list.

use crate::cli::{LabelCommands, LabelListArgs, LabelSetArgs};
use crate::config;
use crate::error::{DocketError, Result};
use crate::storage::SqliteStorage;
use crate::validation::LabelValidator;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Execute the label command.
///
/// # Errors
///
/// Returns an error if database operations fail or if inputs are invalid.
pub fn execute(command: &LabelCommands, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    match command {
        LabelCommands::Set(args) => label_set(args, &mut storage, json),
        LabelCommands::List(args) => label_list(args, &storage, json),
    }
}

/// JSON output for label set.
#[derive(Serialize)]
struct LabelSetResult {
    issue_id: i64,
    labels: Vec<String>,
}

/// JSON output for project-wide counts.
#[derive(Serialize)]
struct LabelCount {
    label: String,
    count: i64,
}

fn label_set(args: &LabelSetArgs, storage: &mut SqliteStorage, json: bool) -> Result<()> {
    LabelValidator::validate_all(&args.labels).map_err(DocketError::from_validation_errors)?;

    info!(issue_id = args.id, count = args.labels.len(), "Replacing label set");

    let labels = storage.replace_labels(args.id, &args.labels)?;

    if json {
        let result = LabelSetResult {
            issue_id: args.id,
            labels: labels.into_iter().map(|label| label.name).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if labels.is_empty() {
        println!("Cleared labels for #{}", args.id);
    } else {
        let names: Vec<&str> = labels.iter().map(|label| label.name.as_str()).collect();
        println!("Labels for #{}: {}", args.id, names.join(", "));
    }

    Ok(())
}

fn label_list(args: &LabelListArgs, storage: &SqliteStorage, json: bool) -> Result<()> {
    if let Some(issue_id) = args.id {
        storage
            .get_issue(issue_id)?
            .ok_or(DocketError::IssueNotFound { id: issue_id })?;
        let labels = storage.get_labels(issue_id)?;
        let names: Vec<String> = labels.into_iter().map(|label| label.name).collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else if names.is_empty() {
            println!("No labels for #{issue_id}.");
        } else {
            println!("Labels for #{issue_id}:");
            for name in &names {
                println!("  {name}");
            }
        }
    } else {
        let label_counts: Vec<LabelCount> = storage
            .list_labels_with_counts()?
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&label_counts)?);
        } else if label_counts.is_empty() {
            println!("No labels in project.");
        } else {
            println!("Labels ({} total):", label_counts.len());
            for lc in &label_counts {
                println!(
                    "  {} ({} issue{})",
                    lc.label,
                    lc.count,
                    if lc.count == 1 { "" } else { "s" }
                );
            }
        }
    }

    Ok(())
}
