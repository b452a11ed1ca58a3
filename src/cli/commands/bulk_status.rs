//! Bulk status command implementation.

use crate::cli::BulkStatusArgs;
use crate::config;
use crate::error::{DocketError, Result};
use crate::model::Status;
use serde::Serialize;
use std::path::Path;

/// JSON output for a committed bulk update.
#[derive(Serialize)]
struct BulkStatusResult {
    updated_count: usize,
    failed_ids: Vec<i64>,
    status: String,
}

/// Execute the bulk-status command.
///
/// # Errors
///
/// Returns [`DocketError::PartialFailure`] with the missing ids if any issue
/// does not exist; nothing is persisted in that case.
pub fn execute(args: &BulkStatusArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let status = parse_status_arg(&args.status)?;

    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    let updated_count = storage.bulk_update_status(&args.ids, &status)?;

    if json {
        let result = BulkStatusResult {
            updated_count,
            failed_ids: Vec::new(),
            status: status.as_str().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Updated {updated_count} issue(s) to {}",
            status.as_str()
        );
    }

    Ok(())
}

fn parse_status_arg(raw: &str) -> Result<Status> {
    if raw.trim().is_empty() {
        return Err(DocketError::validation("status", "cannot be blank"));
    }
    raw.parse()
}
