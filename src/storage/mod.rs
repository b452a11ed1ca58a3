//! Storage layer backed by `SQLite`.

pub mod schema;
pub mod sqlite;

pub use sqlite::{IssueUpdate, ListFilters, NewIssue, SqliteStorage};
