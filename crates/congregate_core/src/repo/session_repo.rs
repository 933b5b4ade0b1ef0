//! Durable session record contract and SQLite key/value implementation.
//!
//! # Responsibility
//! - Load, save and clear the single serialized session record.
//!
//! # Invariants
//! - `save_record` is durable when it returns `Ok`.
//! - `clear_record` on an absent record succeeds.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized active session.
pub const SESSION_RECORD_KEY: &str = "session.current";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for durable record access.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the single durable session record.
pub trait SessionRecordRepository {
    fn load_record(&self) -> RepoResult<Option<String>>;
    fn save_record(&self, payload: &str) -> RepoResult<()>;
    fn clear_record(&self) -> RepoResult<()>;
}

/// SQLite-backed session record repository over the `kv_store` table.
pub struct SqliteSessionRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SessionRecordRepository for SqliteSessionRecordRepository<'_> {
    fn load_record(&self) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [SESSION_RECORD_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_record(&self, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SESSION_RECORD_KEY, payload],
        )?;
        Ok(())
    }

    fn clear_record(&self) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [SESSION_RECORD_KEY])?;
        Ok(())
    }
}

impl<R: SessionRecordRepository + ?Sized> SessionRecordRepository for &R {
    fn load_record(&self) -> RepoResult<Option<String>> {
        (**self).load_record()
    }

    fn save_record(&self, payload: &str) -> RepoResult<()> {
        (**self).save_record(payload)
    }

    fn clear_record(&self) -> RepoResult<()> {
        (**self).clear_record()
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionRecordRepository, SqliteSessionRecordRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn save_overwrites_single_record() {
        let conn = open_db_in_memory().expect("in-memory db");
        let repo = SqliteSessionRecordRepository::new(&conn);

        repo.save_record("first").expect("first save");
        repo.save_record("second").expect("second save");

        assert_eq!(
            repo.load_record().expect("load").as_deref(),
            Some("second")
        );
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn clear_is_idempotent() {
        let conn = open_db_in_memory().expect("in-memory db");
        let repo = SqliteSessionRecordRepository::new(&conn);

        repo.clear_record().expect("clear on empty store");
        repo.save_record("payload").expect("save");
        repo.clear_record().expect("clear");
        repo.clear_record().expect("second clear");

        assert_eq!(repo.load_record().expect("load"), None);
    }
}
