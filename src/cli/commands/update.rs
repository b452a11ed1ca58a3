//! Update command implementation.

use crate::cli::UpdateArgs;
use crate::config;
use crate::error::{DocketError, Result};
use crate::model::Issue;
use crate::storage::IssueUpdate;
use crate::validation::IssueValidator;
use std::path::Path;

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if the patch is empty, validation fails, the issue is
/// missing, or the expected version does not match.
pub fn execute(args: &UpdateArgs, cli: &config::CliOverrides) -> Result<()> {
    let json = cli.json.unwrap_or(false);
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    let update = build_update(args);
    if update.is_empty() {
        return Err(DocketError::validation("update", "nothing to update"));
    }
    IssueValidator::validate_update(&update).map_err(DocketError::from_validation_errors)?;

    // Snapshot for the change summary; the guarded write re-reads inside its
    // own transaction.
    let before = storage.get_issue(args.id)?;

    let issue = storage.update_issue(args.id, &update, args.expect_version)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        print_update_summary(before.as_ref(), &issue);
    }

    Ok(())
}

/// Print a summary of what changed for the issue.
fn print_update_summary(before: Option<&Issue>, after: &Issue) {
    println!("Updated #{}: {} (v{})", after.id, after.title, after.version);

    if let Some(before) = before {
        if before.title != after.title {
            println!("  title: {} -> {}", before.title, after.title);
        }
        if before.status != after.status {
            println!(
                "  status: {} -> {}",
                before.status.as_str(),
                after.status.as_str()
            );
        }
        if before.assignee_id != after.assignee_id {
            let old = before
                .assignee_id
                .map_or_else(|| "(none)".to_string(), |id| format!("user {id}"));
            let new = after
                .assignee_id
                .map_or_else(|| "(none)".to_string(), |id| format!("user {id}"));
            println!("  assignee: {old} -> {new}");
        }
        if before.description != after.description {
            println!("  description updated");
        }
    }
}

fn build_update(args: &UpdateArgs) -> IssueUpdate {
    let description = if args.clear_description {
        Some(None)
    } else {
        optional_string_field(args.description.as_deref())
    };

    let assignee_id = if args.unassign {
        Some(None)
    } else {
        args.assignee.map(Some)
    };

    IssueUpdate {
        title: args.title.clone(),
        description,
        status: args
            .status
            .as_deref()
            .map(|raw| raw.parse())
            .and_then(std::result::Result::ok),
        assignee_id,
    }
}

#[allow(clippy::option_option, clippy::single_option_map)]
fn optional_string_field(value: Option<&str>) -> Option<Option<String>> {
    value.map(|v| {
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::model::Status;
    use tracing::info;

    #[test]
    fn test_optional_string_field_with_value() {
        init_test_logging();
        info!("test_optional_string_field_with_value: starting");
        let result = optional_string_field(Some("test"));
        assert_eq!(result, Some(Some("test".to_string())));
        info!("test_optional_string_field_with_value: assertions passed");
    }

    #[test]
    fn test_optional_string_field_with_empty() {
        init_test_logging();
        info!("test_optional_string_field_with_empty: starting");
        let result = optional_string_field(Some(""));
        assert_eq!(result, Some(None));
        info!("test_optional_string_field_with_empty: assertions passed");
    }

    #[test]
    fn test_optional_string_field_with_none() {
        init_test_logging();
        info!("test_optional_string_field_with_none: starting");
        let result = optional_string_field(None);
        assert_eq!(result, None);
        info!("test_optional_string_field_with_none: assertions passed");
    }

    #[test]
    fn test_build_update_with_status() {
        init_test_logging();
        info!("test_build_update_with_status: starting");
        let args = UpdateArgs {
            status: Some("closed".to_string()),
            ..Default::default()
        };
        let update = build_update(&args);
        assert_eq!(update.status, Some(Status::Closed));
        assert!(update.title.is_none());
        info!("test_build_update_with_status: assertions passed");
    }

    #[test]
    fn test_build_update_clear_description() {
        init_test_logging();
        info!("test_build_update_clear_description: starting");
        let args = UpdateArgs {
            clear_description: true,
            ..Default::default()
        };
        let update = build_update(&args);
        assert_eq!(update.description, Some(None));
        info!("test_build_update_clear_description: assertions passed");
    }

    #[test]
    fn test_build_update_empty_description_clears() {
        init_test_logging();
        info!("test_build_update_empty_description_clears: starting");
        let args = UpdateArgs {
            description: Some(String::new()),
            ..Default::default()
        };
        let update = build_update(&args);
        assert_eq!(update.description, Some(None));
        info!("test_build_update_empty_description_clears: assertions passed");
    }

    #[test]
    fn test_build_update_unassign() {
        init_test_logging();
        info!("test_build_update_unassign: starting");
        let args = UpdateArgs {
            unassign: true,
            ..Default::default()
        };
        let update = build_update(&args);
        assert_eq!(update.assignee_id, Some(None));
        info!("test_build_update_unassign: assertions passed");
    }

    #[test]
    fn test_build_update_assign() {
        init_test_logging();
        info!("test_build_update_assign: starting");
        let args = UpdateArgs {
            assignee: Some(4),
            ..Default::default()
        };
        let update = build_update(&args);
        assert_eq!(update.assignee_id, Some(Some(4)));
        info!("test_build_update_assign: assertions passed");
    }

    #[test]
    fn test_build_update_empty() {
        init_test_logging();
        info!("test_build_update_empty: starting");
        let args = UpdateArgs::default();
        let update = build_update(&args);
        assert!(update.is_empty());
        info!("test_build_update_empty: assertions passed");
    }
}
