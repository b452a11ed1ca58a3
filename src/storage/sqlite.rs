//! `SQLite` storage implementation.
//!
//! All mutations run inside an immediate transaction so the
//! read-compare-write cycle of the optimistic update engine cannot
//! interleave with another writer.

use crate::error::{DocketError, Result};
use crate::model::{Comment, Issue, Label, Status, User};
use crate::storage::schema::apply_schema;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a new connection to the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema application fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a new connection with an optional busy timeout (ms).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema application fails.
    pub fn open_with_timeout(path: &Path, lock_timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;
        if let Some(timeout) = lock_timeout_ms {
            conn.busy_timeout(Duration::from_millis(timeout))?;
        }
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Execute a mutation inside an immediate transaction.
    ///
    /// The transaction takes the write lock up front, so every read the
    /// closure performs sees the same snapshot it will write against.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails (e.g. database error, logic error).
    /// The transaction is rolled back on error.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let result = f(&tx)?;

        tx.commit()?;
        tracing::debug!(op, "mutation committed");

        Ok(result)
    }

    // ========================================================================
    // Issues
    // ========================================================================

    /// Create a new issue.
    ///
    /// The row starts at version 1 with server-assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignee does not exist or the insert fails.
    pub fn create_issue(&mut self, new: &NewIssue) -> Result<Issue> {
        self.mutate("create_issue", |tx| {
            if let Some(assignee_id) = new.assignee_id {
                if !Self::user_exists_in_tx(tx, assignee_id)? {
                    return Err(DocketError::validation(
                        "assignee_id",
                        format!("user {assignee_id} does not exist"),
                    ));
                }
            }

            let now = Utc::now().to_rfc3339();
            tx.execute(
                "INSERT INTO issues (title, description, status, assignee_id, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    new.title,
                    new.description,
                    new.status.as_str(),
                    new.assignee_id,
                    now,
                    now
                ],
            )?;

            let id = tx.last_insert_rowid();
            Self::fetch_issue(tx, id)?.ok_or(DocketError::IssueNotFound { id })
        })
    }

    /// Get an issue by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_issue(&self, id: i64) -> Result<Option<Issue>> {
        Self::fetch_issue(&self.conn, id)
    }

    /// List issues with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_issues(&self, filters: &ListFilters) -> Result<Vec<Issue>> {
        let mut sql = String::from(
            "SELECT id, title, description, status, assignee_id, version, created_at, updated_at
             FROM issues WHERE 1=1",
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref statuses) = filters.statuses {
            if !statuses.is_empty() {
                let placeholders: Vec<String> = statuses.iter().map(|_| "?".to_string()).collect();
                let _ = write!(sql, " AND status IN ({})", placeholders.join(","));
                for s in statuses {
                    params.push(Box::new(s.as_str().to_string()));
                }
            }
        }

        if let Some(assignee_id) = filters.assignee_id {
            sql.push_str(" AND assignee_id = ?");
            params.push(Box::new(assignee_id));
        }

        if filters.unassigned {
            sql.push_str(" AND assignee_id IS NULL");
        }

        if let Some(ref title_contains) = filters.title_contains {
            sql.push_str(" AND title LIKE ?");
            params.push(Box::new(format!("%{title_contains}%")));
        }

        if let Some(ref label) = filters.label {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM issue_labels il
                    JOIN labels l ON l.id = il.label_id
                    WHERE il.issue_id = issues.id AND l.name = ?
                 )",
            );
            params.push(Box::new(label.clone()));
        }

        // Apply custom sort if provided
        if let Some(ref sort_field) = filters.sort {
            let order = if filters.reverse { "DESC" } else { "ASC" };
            // Column names can't be parameterized, so only known fields pass through
            match sort_field.as_str() {
                "created_at" | "created" => {
                    let _ = write!(sql, " ORDER BY created_at {order}, id {order}");
                }
                "updated_at" | "updated" => {
                    let _ = write!(sql, " ORDER BY updated_at {order}, id {order}");
                }
                "title" => {
                    // Case-insensitive sort for title
                    let _ = write!(sql, " ORDER BY title COLLATE NOCASE {order}");
                }
                _ => {
                    let _ = write!(sql, " ORDER BY id {order}");
                }
            }
        } else {
            sql.push_str(" ORDER BY id ASC");
        }

        if let Some(limit) = filters.limit {
            if limit > 0 {
                sql.push_str(" LIMIT ?");
                params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
            }
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(AsRef::as_ref).collect();
        let mut stmt = self.conn.prepare(&sql)?;
        let issues = stmt
            .query_map(params_refs.as_slice(), issue_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(issues)
    }

    /// Update an issue's fields under optimistic concurrency control.
    ///
    /// Only the fields present in `updates` are changed; everything else is
    /// left untouched. A successful update always increments `version` by
    /// exactly 1 and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::IssueNotFound`] if the issue does not exist and
    /// [`DocketError::VersionConflict`] if `expected_version` does not match
    /// the stored version. In both cases no row is written.
    pub fn update_issue(
        &mut self,
        id: i64,
        updates: &IssueUpdate,
        expected_version: i64,
    ) -> Result<Issue> {
        self.mutate("update_issue", |tx| {
            let issue =
                Self::fetch_issue(tx, id)?.ok_or(DocketError::IssueNotFound { id })?;

            if issue.version != expected_version {
                return Err(DocketError::VersionConflict {
                    id,
                    expected: expected_version,
                    actual: issue.version,
                });
            }

            if let Some(Some(assignee_id)) = updates.assignee_id {
                if !Self::user_exists_in_tx(tx, assignee_id)? {
                    return Err(DocketError::validation(
                        "assignee_id",
                        format!("user {assignee_id} does not exist"),
                    ));
                }
            }

            let mut set_clauses: Vec<String> = vec![];
            let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];

            // Helper to add update
            let mut add_update = |field: &str, val: Box<dyn rusqlite::ToSql>| {
                set_clauses.push(format!("{field} = ?"));
                params.push(val);
            };

            if let Some(ref title) = updates.title {
                add_update("title", Box::new(title.clone()));
            }
            if let Some(ref val) = updates.description {
                add_update("description", Box::new(val.clone()));
            }
            if let Some(ref status) = updates.status {
                add_update("status", Box::new(status.as_str().to_string()));
            }
            if let Some(ref val) = updates.assignee_id {
                add_update("assignee_id", Box::new(*val));
            }

            // Every successful update bumps the version token and updated_at,
            // even when the patch carries no fields
            set_clauses.push("version = version + 1".to_string());
            set_clauses.push("updated_at = ?".to_string());
            params.push(Box::new(Utc::now().to_rfc3339()));

            let sql = format!(
                "UPDATE issues SET {} WHERE id = ? AND version = ?",
                set_clauses.join(", ")
            );
            params.push(Box::new(id));
            params.push(Box::new(expected_version));

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params.iter().map(AsRef::as_ref).collect();
            let changed = tx.execute(&sql, params_refs.as_slice())?;

            // The write is guarded on the version we just read; zero rows
            // means the token went stale before the statement ran
            if changed == 0 {
                let actual =
                    Self::fetch_issue(tx, id)?.map_or(expected_version, |i| i.version);
                return Err(DocketError::VersionConflict {
                    id,
                    expected: expected_version,
                    actual,
                });
            }

            Self::fetch_issue(tx, id)?.ok_or(DocketError::IssueNotFound { id })
        })
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Get comments for an issue, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_comments(&self, issue_id: i64) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, author_id, body, created_at
             FROM comments
             WHERE issue_id = ?
             ORDER BY created_at ASC, id ASC",
        )?;

        let comments = stmt
            .query_map([issue_id], comment_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    /// Add a comment to an issue.
    ///
    /// Comments are not issue mutations: the issue row keeps its version
    /// and `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::IssueNotFound`] if the issue is absent,
    /// a validation error if the body is blank, and
    /// [`DocketError::InvalidAuthor`] if the author is not a known user.
    pub fn add_comment(&mut self, issue_id: i64, author_id: i64, body: &str) -> Result<Comment> {
        self.mutate("add_comment", |tx| {
            if !Self::issue_exists_in_tx(tx, issue_id)? {
                return Err(DocketError::IssueNotFound { id: issue_id });
            }

            if body.trim().is_empty() {
                return Err(DocketError::validation("body", "comment body cannot be blank"));
            }

            if !Self::user_exists_in_tx(tx, author_id)? {
                return Err(DocketError::InvalidAuthor { id: author_id });
            }

            let comment_id = insert_comment_row(tx, issue_id, author_id, body)?;

            fetch_comment(tx, comment_id)
        })
    }

    // ========================================================================
    // Labels
    // ========================================================================

    /// Replace the full label set of an issue in one transaction.
    ///
    /// Missing labels are created in the shared catalog on the fly; a
    /// duplicate-name failure from a concurrent creator is treated as
    /// "label now exists" and resolved by re-querying. Duplicate names in
    /// the input collapse to a single assignment.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::IssueNotFound`] if the issue is absent (checked
    /// before the transaction). Any other failure rolls the transaction back,
    /// leaving the previous label set intact, and is reported as
    /// [`DocketError::ReplaceFailed`] wrapping the cause.
    pub fn replace_labels(&mut self, issue_id: i64, names: &[String]) -> Result<Vec<Label>> {
        if !self.issue_exists(issue_id)? {
            return Err(DocketError::IssueNotFound { id: issue_id });
        }

        let desired: BTreeSet<&str> = names.iter().map(String::as_str).collect();

        self.mutate("replace_labels", |tx| {
            let old: Vec<String> = Self::labels_in_tx(tx, issue_id)?
                .into_iter()
                .map(|l| l.name)
                .collect();

            tx.execute("DELETE FROM issue_labels WHERE issue_id = ?", [issue_id])?;

            for name in &desired {
                let label_id = resolve_label_id(tx, name)?;
                tx.execute(
                    "INSERT INTO issue_labels (issue_id, label_id) VALUES (?, ?)",
                    rusqlite::params![issue_id, label_id],
                )?;
            }

            // Bump updated_at only when the set actually changed
            let changed = old.iter().map(String::as_str).ne(desired.iter().copied());
            if changed {
                tx.execute(
                    "UPDATE issues SET updated_at = ? WHERE id = ?",
                    rusqlite::params![Utc::now().to_rfc3339(), issue_id],
                )?;
            }

            Self::labels_in_tx(tx, issue_id)
        })
        .map_err(|err| DocketError::replace_failed(issue_id, err))
    }

    /// Get labels for an issue, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_labels(&self, issue_id: i64) -> Result<Vec<Label>> {
        Self::labels_in_tx(&self.conn, issue_id)
    }

    /// Get all catalog labels with their issue counts.
    ///
    /// Returns (name, count) pairs sorted alphabetically. Labels no issue
    /// currently carries appear with a count of 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_labels_with_counts(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT l.name, COUNT(il.issue_id) as count
             FROM labels l
             LEFT JOIN issue_labels il ON il.label_id = l.id
             GROUP BY l.name
             ORDER BY l.name",
        )?;
        let results = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Set the status of every listed issue in one transaction.
    ///
    /// Ids are processed in the given order; each hit bumps the issue's
    /// version by 1. Missing ids are collected while the rest of the
    /// sequence is still processed, and any miss rolls the whole
    /// transaction back: either every id updates or none do.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::PartialFailure`] carrying the missing ids when
    /// the rollback path is taken, or a database error if the transaction
    /// itself fails.
    pub fn bulk_update_status(&mut self, issue_ids: &[i64], new_status: &Status) -> Result<usize> {
        self.mutate("bulk_update_status", |tx| {
            let now = Utc::now().to_rfc3339();
            let mut updated = 0usize;
            let mut failed_ids: Vec<i64> = Vec::new();

            for &id in issue_ids {
                let changed = tx.execute(
                    "UPDATE issues SET status = ?, version = version + 1, updated_at = ?
                     WHERE id = ?",
                    rusqlite::params![new_status.as_str(), now, id],
                )?;

                if changed == 0 {
                    failed_ids.push(id);
                } else {
                    updated += 1;
                }
            }

            if !failed_ids.is_empty() {
                return Err(DocketError::PartialFailure { failed_ids });
            }

            tracing::debug!(updated, status = new_status.as_str(), "bulk status change");
            Ok(updated)
        })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email is already registered, or a
    /// database error if the insert fails.
    pub fn create_user(&mut self, name: &str, email: &str) -> Result<User> {
        self.mutate("create_user", |tx| {
            let inserted = tx.execute(
                "INSERT INTO users (name, email) VALUES (?, ?)",
                rusqlite::params![name, email],
            );

            match inserted {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    return Err(DocketError::validation(
                        "email",
                        format!("'{email}' is already registered"),
                    ));
                }
                Err(e) => return Err(e.into()),
            }

            let id = tx.last_insert_rowid();
            fetch_user(tx, id)
        })
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    // ========================================================================
    // Config
    // ========================================================================

    /// Fetch a config value from the config table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_config(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Fetch all config values from the config table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_all_config(&self) -> Result<HashMap<String, String>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM config")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Set a config value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO config (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn issue_exists(&self, id: i64) -> Result<bool> {
        Self::issue_exists_in_tx(&self.conn, id)
    }

    fn issue_exists_in_tx(conn: &Connection, id: i64) -> Result<bool> {
        let count: i64 =
            conn.query_row("SELECT count(*) FROM issues WHERE id = ?", [id], |row| {
                row.get(0)
            })?;
        Ok(count > 0)
    }

    fn user_exists_in_tx(conn: &Connection, id: i64) -> Result<bool> {
        let count: i64 =
            conn.query_row("SELECT count(*) FROM users WHERE id = ?", [id], |row| {
                row.get(0)
            })?;
        Ok(count > 0)
    }

    fn fetch_issue(conn: &Connection, id: i64) -> Result<Option<Issue>> {
        let result = conn.query_row(
            "SELECT id, title, description, status, assignee_id, version, created_at, updated_at
             FROM issues WHERE id = ?",
            [id],
            issue_from_row,
        );

        match result {
            Ok(issue) => Ok(Some(issue)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn labels_in_tx(conn: &Connection, issue_id: i64) -> Result<Vec<Label>> {
        let mut stmt = conn.prepare(
            "SELECT l.id, l.name
             FROM labels l
             JOIN issue_labels il ON il.label_id = l.id
             WHERE il.issue_id = ?
             ORDER BY l.name",
        )?;
        let labels = stmt
            .query_map([issue_id], |row| {
                Ok(Label {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(labels)
    }
}

/// Filter options for listing issues.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub statuses: Option<Vec<Status>>,
    pub assignee_id: Option<i64>,
    pub unassigned: bool,
    pub label: Option<String>,
    pub title_contains: Option<String>,
    pub limit: Option<usize>,
    /// Sort field (`created_at`, `updated_at`, title)
    pub sort: Option<String>,
    /// Reverse sort order
    pub reverse: bool,
}

/// Fields for creating an issue.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub assignee_id: Option<i64>,
}

/// Fields to update on an issue.
///
/// The outer `Option` distinguishes "absent from the patch" from "set this
/// field"; for clearable columns the inner `Option` carries NULL.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub assignee_id: Option<Option<i64>>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignee_id.is_none()
    }
}

fn parse_status(s: Option<&str>) -> Status {
    s.map_or_else(Status::default, |val| {
        val.parse()
            .unwrap_or_else(|_| Status::Custom(val.to_string()))
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Utc.from_utc_datetime(&naive);
    }

    Utc::now()
}

fn issue_from_row(row: &rusqlite::Row) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_status(row.get::<_, Option<String>>(3)?.as_deref()),
        assignee_id: row.get(4)?,
        version: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
        updated_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

fn comment_from_row(row: &rusqlite::Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        author_id: row.get(2)?,
        body: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
    })
}

fn insert_comment_row(
    tx: &Transaction<'_>,
    issue_id: i64,
    author_id: i64,
    body: &str,
) -> Result<i64> {
    tx.execute(
        "INSERT INTO comments (issue_id, author_id, body, created_at)
         VALUES (?, ?, ?, CURRENT_TIMESTAMP)",
        rusqlite::params![issue_id, author_id, body],
    )?;
    Ok(tx.last_insert_rowid())
}

fn fetch_comment(tx: &Transaction<'_>, comment_id: i64) -> Result<Comment> {
    tx.query_row(
        "SELECT id, issue_id, author_id, body, created_at FROM comments WHERE id = ?",
        rusqlite::params![comment_id],
        comment_from_row,
    )
    .map_err(DocketError::from)
}

fn fetch_user(tx: &Transaction<'_>, user_id: i64) -> Result<User> {
    tx.query_row(
        "SELECT id, name, email FROM users WHERE id = ?",
        rusqlite::params![user_id],
        user_from_row,
    )
    .map_err(DocketError::from)
}

fn user_from_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

/// Look up a catalog label by name, creating it when absent.
///
/// A UNIQUE violation on the insert means another writer created the name
/// first; the id is then obtained by re-querying.
fn resolve_label_id(tx: &Transaction<'_>, name: &str) -> Result<i64> {
    let existing: Option<i64> = tx
        .query_row("SELECT id FROM labels WHERE name = ?", [name], |row| {
            row.get(0)
        })
        .optional()?;

    if let Some(id) = existing {
        return Ok(id);
    }

    match tx.execute("INSERT INTO labels (name) VALUES (?)", [name]) {
        Ok(_) => Ok(tx.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            // Lost the create race; the label exists now
            tx.query_row("SELECT id FROM labels WHERE name = ?", [name], |row| {
                row.get(0)
            })
            .map_err(DocketError::from)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
impl SqliteStorage {
    /// Execute raw SQL for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQL execution fails.
    pub fn execute_test_sql(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}
