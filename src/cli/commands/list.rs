//! List command implementation.
//!
//! Primary discovery interface. All filters are pushed down to SQL.

use crate::cli::ListArgs;
use crate::config;
use crate::error::{DocketError, Result};
use crate::model::{Issue, Status};
use crate::storage::ListFilters;
use std::fmt::Write as _;
use std::path::Path;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
pub fn execute(args: &ListArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (storage, _paths) = config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    validate_sort_key(args.sort.as_deref())?;
    let filters = build_filters(args);

    let issues = storage.list_issues(&filters)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else if issues.is_empty() {
        println!("No issues found.");
    } else {
        for issue in &issues {
            println!("{}", format_issue_line(issue));
        }
        println!("\n{} issue(s)", issues.len());
    }

    Ok(())
}

/// Convert CLI args to storage filters.
fn build_filters(args: &ListArgs) -> ListFilters {
    let statuses = if args.status.is_empty() {
        None
    } else {
        Some(
            args.status
                .iter()
                .map(|s| {
                    s.parse()
                        .unwrap_or_else(|_| Status::Custom(s.to_lowercase()))
                })
                .collect::<Vec<Status>>(),
        )
    };

    ListFilters {
        statuses,
        assignee_id: args.assignee,
        unassigned: args.unassigned,
        label: args.label.clone(),
        title_contains: args.title_contains.clone(),
        limit: args.limit,
        sort: args.sort.clone(),
        reverse: args.reverse,
    }
}

fn validate_sort_key(sort: Option<&str>) -> Result<()> {
    let Some(sort_key) = sort else {
        return Ok(());
    };

    match sort_key {
        "created" | "created_at" | "updated" | "updated_at" | "title" | "id" => Ok(()),
        _ => Err(DocketError::Validation {
            field: "sort".to_string(),
            reason: format!("invalid sort field '{sort_key}'"),
        }),
    }
}

/// One-line text rendering: `#id [status] title (v3, @assignee)`.
fn format_issue_line(issue: &Issue) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "#{:<5} {:<12} {}",
        issue.id,
        issue.status.as_str(),
        issue.title
    );
    let _ = write!(line, "  (v{}", issue.version);
    if let Some(assignee_id) = issue.assignee_id {
        let _ = write!(line, ", @{assignee_id}");
    }
    line.push(')');
    line
}
