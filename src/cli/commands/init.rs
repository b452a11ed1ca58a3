use crate::error::{DocketError, Result};
use crate::storage::SqliteStorage;
use std::fs;
use std::path::Path;

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
pub fn execute(force: bool, root_dir: Option<&Path>) -> Result<()> {
    let base_dir = root_dir.unwrap_or_else(|| Path::new("."));
    let docket_dir = base_dir.join(".docket");

    if docket_dir.exists() {
        let db_path = docket_dir.join("docket.db");
        if db_path.exists() && !force {
            return Err(DocketError::AlreadyInitialized { path: db_path });
        }
    } else {
        fs::create_dir(&docket_dir)?;
    }

    let db_path = docket_dir.join("docket.db");

    // Creates the file and applies the schema
    let _storage = SqliteStorage::open(&db_path)?;

    let metadata_path = docket_dir.join("metadata.json");
    if !metadata_path.exists() || force {
        let metadata = r#"{
  "database": "docket.db"
}"#;
        fs::write(metadata_path, metadata)?;
    }

    let config_path = docket_dir.join("config.yaml");
    if !config_path.exists() {
        let config = r"# Docket Project Configuration
# default_status: open
# lock-timeout: 30000
";
        fs::write(config_path, config)?;
    }

    let gitignore_path = docket_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let gitignore = r"# Database
*.db
*.db-shm
*.db-wal

# Temporary
*.tmp
";
        fs::write(gitignore_path, gitignore)?;
    }

    println!("Initialized docket workspace in .docket/");
    Ok(())
}
