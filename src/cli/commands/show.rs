//! Show command implementation.

use crate::config;
use crate::error::{DocketError, Result};
use crate::model::{Comment, Issue, Label};
use serde::Serialize;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Full issue view for JSON output.
#[derive(Serialize)]
struct IssueDetails {
    #[serde(flatten)]
    issue: Issue,
    labels: Vec<String>,
    comments: Vec<Comment>,
}

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the issue is not found.
pub fn execute(id: i64, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (storage, _paths) = config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    let issue = storage
        .get_issue(id)?
        .ok_or(DocketError::IssueNotFound { id })?;
    let labels = storage.get_labels(id)?;
    let comments = storage.get_comments(id)?;

    if json {
        let details = IssueDetails {
            issue,
            labels: labels.into_iter().map(|label| label.name).collect(),
            comments,
        };
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print!("{}", format_issue_details(&issue, &labels, &comments));
    }

    Ok(())
}

fn format_issue_details(issue: &Issue, labels: &[Label], comments: &[Comment]) -> String {
    let mut output = String::new();
    let status_upper = issue.status.as_str().to_uppercase();

    let _ = writeln!(
        output,
        "#{} · {}   [{} · v{}]",
        issue.id, issue.title, status_upper, issue.version
    );

    let _ = writeln!(
        output,
        "Created: {} · Updated: {}",
        issue.created_at.format("%Y-%m-%d %H:%M"),
        issue.updated_at.format("%Y-%m-%d %H:%M")
    );

    if let Some(assignee_id) = issue.assignee_id {
        let _ = writeln!(output, "Assignee: user {assignee_id}");
    }

    if !labels.is_empty() {
        let names: Vec<&str> = labels.iter().map(|label| label.name.as_str()).collect();
        let _ = writeln!(output, "Labels: {}", names.join(", "));
    }

    if let Some(desc) = &issue.description {
        output.push('\n');
        let _ = writeln!(output, "{desc}");
    }

    if !comments.is_empty() {
        output.push('\n');
        let _ = writeln!(output, "Comments:");
        for comment in comments {
            let _ = writeln!(
                output,
                "  [{}] user {}: {}",
                comment.created_at.format("%Y-%m-%d %H:%M UTC"),
                comment.author_id,
                comment.body
            );
        }
    }

    output
}
