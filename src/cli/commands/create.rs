use crate::cli::CreateArgs;
use crate::config;
use crate::error::{DocketError, Result};
use crate::model::Status;
use crate::storage::NewIssue;
use crate::validation::{IssueValidator, LabelValidator};
use std::path::Path;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if validation fails, the database cannot be opened, or
/// the issue cannot be created.
pub fn execute(args: CreateArgs, cli: &config::CliOverrides) -> Result<()> {
    let json = cli.json.unwrap_or(false);
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    let layer = config::load_config(&docket_dir, Some(&storage), cli)?;

    let status = match args.status.as_deref() {
        Some(raw) => parse_status_arg(raw)?,
        None => config::default_status_from_layer(&layer),
    };

    let new = NewIssue {
        title: args.title,
        description: args.description,
        status,
        assignee_id: args.assignee,
    };

    IssueValidator::validate(&new).map_err(DocketError::from_validation_errors)?;

    let labels: Vec<String> = args
        .labels
        .iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();
    LabelValidator::validate_all(&labels).map_err(DocketError::from_validation_errors)?;

    let issue = storage.create_issue(&new)?;

    if !labels.is_empty() {
        storage.replace_labels(issue.id, &labels)?;
    }

    if args.silent {
        println!("{}", issue.id);
    } else if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("Created #{}: {}", issue.id, issue.title);
        if !labels.is_empty() {
            println!("  labels: {}", labels.join(", "));
        }
    }

    Ok(())
}

fn parse_status_arg(raw: &str) -> Result<Status> {
    if raw.trim().is_empty() {
        return Err(DocketError::validation("status", "cannot be blank"));
    }
    raw.parse()
}
