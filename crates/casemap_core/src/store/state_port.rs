//! Injected persistence port and SQLite implementation.
//!
//! # Responsibility
//! - Define the key-value blob contract the annotation store persists through.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ports store opaque text blobs; they never interpret annotation content.
//! - The SQLite port refuses connections without an up-to-date schema.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STATE_TABLE: &str = "app_state";
const STATE_COLUMNS: &[&str] = &["key", "value", "updated_at"];

/// State port error for blob reads, writes and port construction.
#[derive(Debug)]
pub enum StateError {
    Db(DbError),
    /// Connection has not run migrations up to the supported version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Non-SQLite backends report failures as plain text.
    Backend(String),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column: {table}.{column}")
            }
            Self::Backend(message) => write!(f, "state backend failure: {message}"),
        }
    }
}

impl Error for StateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read/write contract for persisted whole-blob state.
///
/// Tests substitute in-memory fakes; production uses [`SqliteStatePort`].
pub trait StatePort {
    fn read_state(&self, key: &str) -> Result<Option<String>, StateError>;
    fn write_state(&self, key: &str, value: &str) -> Result<(), StateError>;
}

/// SQLite-backed state port over the `app_state` table.
pub struct SqliteStatePort<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatePort<'conn> {
    /// Wraps a migrated connection after validating the expected schema.
    ///
    /// # Errors
    /// - [`StateError::UninitializedConnection`] when migrations have not run.
    /// - [`StateError::MissingRequiredTable`] / [`StateError::MissingRequiredColumn`]
    ///   when the state table shape is unexpected.
    pub fn try_new(conn: &'conn Connection) -> Result<Self, StateError> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StateError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, STATE_TABLE)? {
            return Err(StateError::MissingRequiredTable(STATE_TABLE));
        }
        for &column in STATE_COLUMNS {
            if !column_exists(conn, STATE_TABLE, column)? {
                return Err(StateError::MissingRequiredColumn {
                    table: STATE_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl StatePort for SqliteStatePort<'_> {
    fn read_state(&self, key: &str) -> Result<Option<String>, StateError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1;")?;

        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }

        Ok(None)
    }

    fn write_state(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;

        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, StateError> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, StateError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
