//! User command implementation.

use crate::cli::{UserAddArgs, UserCommands};
use crate::config;
use crate::error::{DocketError, Result};
use crate::storage::SqliteStorage;
use std::path::Path;

/// Execute the user command.
///
/// # Errors
///
/// Returns an error if validation fails or database operations fail.
pub fn execute(command: &UserCommands, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let docket_dir = config::discover_docket_dir(Some(Path::new(".")))?;
    let (mut storage, _paths) =
        config::open_storage(&docket_dir, cli.db.as_ref(), cli.lock_timeout)?;

    match command {
        UserCommands::Add(args) => user_add(args, &mut storage, json),
        UserCommands::List => user_list(&storage, json),
    }
}

fn user_add(args: &UserAddArgs, storage: &mut SqliteStorage, json: bool) -> Result<()> {
    crate::validation::UserValidator::validate(&args.name, &args.email)
        .map_err(DocketError::from_validation_errors)?;

    let user = storage.create_user(&args.name, &args.email)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("Added user #{}: {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

fn user_list(storage: &SqliteStorage, json: bool) -> Result<()> {
    let users = storage.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else if users.is_empty() {
        println!("No users registered.");
    } else {
        for user in &users {
            println!("#{:<5} {} <{}>", user.id, user.name, user.email);
        }
    }

    Ok(())
}
