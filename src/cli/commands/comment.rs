//! Comment command implementation.

use crate::cli::CommentArgs;
use crate::config;
use crate::error::{DocketError, Result};
use crate::model::Comment;
use std::path::Path;

/// Execute the comment command.
///
/// With a body, adds a comment; without one, lists existing comments.
///
/// # Errors
///
/// Returns an error if the issue or author is missing, the body is blank,
/// or the database cannot be opened.
pub fn execute(args: &CommentArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    match &args.body {
        Some(body) => {
            let author_id = args.author.ok_or_else(|| {
                DocketError::validation("author", "required when adding a comment")
            })?;

            let comment = storage.add_comment(args.id, author_id, body)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&comment)?);
            } else {
                println!("Comment added to #{}", args.id);
            }
        }
        None => {
            storage
                .get_issue(args.id)?
                .ok_or(DocketError::IssueNotFound { id: args.id })?;
            let comments = storage.get_comments(args.id)?;
            print_comments(args.id, &comments, json)?;
        }
    }

    Ok(())
}

fn print_comments(issue_id: i64, comments: &[Comment], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(comments)?);
    } else if comments.is_empty() {
        println!("No comments for #{issue_id}.");
    } else {
        for comment in comments {
            println!(
                "[user {}] at {}",
                comment.author_id,
                comment.created_at.format("%Y-%m-%d %H:%M")
            );
            println!("  {}", comment.body);
        }
    }
    Ok(())
}
