//! Repository pattern implementation for data access
//!
//! Repositories hold an `Arc<DatabaseManager>` and run their statements
//! through the async executor. They are injected into the auth gateway and
//! the API state at construction, never reached through globals.

use crate::core::error::{AdminError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::models::{Account, Record};
use rusqlite::OptionalExtension;
use std::sync::Arc;

/// Repository for login accounts. Read-only: accounts are provisioned
/// out-of-band (or by the startup bootstrap), never mutated by the panel.
pub struct AccountRepository {
    db: Arc<DatabaseManager>,
}

impl AccountRepository {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find an account by exact, case-sensitive username match
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let username = username.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, username, password_hash, created_at \
                     FROM accounts WHERE username = ?",
                    [&username],
                    |row| {
                        Ok(Account {
                            id: row.get(0)?,
                            username: row.get(1)?,
                            password_hash: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    },
                )
                .optional()
                .map_err(AdminError::DatabaseError)
            })
            .await
    }

    /// Count provisioned accounts
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
                    .map_err(AdminError::DatabaseError)
            })
            .await
    }

    /// Insert an account. Used only by the startup bootstrap and tests.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<i64> {
        let username = username.to_string();
        let password_hash = password_hash.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO accounts (username, password_hash) VALUES (?, ?)",
                    [&username, &password_hash],
                )
                .map_err(AdminError::DatabaseError)?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }
}

/// Repository for managed records
pub struct RecordRepository {
    db: Arc<DatabaseManager>,
}

impl RecordRepository {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// List all records, newest first (id descending). No pagination.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare("SELECT id, name, email FROM records ORDER BY id DESC")
                    .map_err(AdminError::DatabaseError)?;

                let records = stmt
                    .query_map([], |row| {
                        Ok(Record {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                        })
                    })
                    .map_err(AdminError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(AdminError::DatabaseError)?;

                Ok(records)
            })
            .await
    }

    /// Find a record by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Record>> {
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, name, email FROM records WHERE id = ?",
                    [id],
                    |row| {
                        Ok(Record {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                        })
                    },
                )
                .optional()
                .map_err(AdminError::DatabaseError)
            })
            .await
    }

    /// Insert a record and return it with its store-assigned id
    pub async fn create(&self, name: &str, email: &str) -> Result<Record> {
        let name = name.to_string();
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO records (name, email) VALUES (?, ?)",
                    [&name, &email],
                )
                .map_err(AdminError::DatabaseError)?;

                Ok(Record {
                    id: conn.last_insert_rowid(),
                    name,
                    email,
                })
            })
            .await
    }

    /// Overwrite a record's name and email in place.
    ///
    /// Last-writer-wins: there is no version check. Updating a non-existent
    /// id is a no-op and still reports success.
    pub async fn update(&self, id: i64, name: &str, email: &str) -> Result<()> {
        let name = name.to_string();
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE records SET name = ?, email = ? WHERE id = ?",
                    rusqlite::params![&name, &email, id],
                )
                .map_err(AdminError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    /// Delete a record. Deleting an absent id is indistinguishable from
    /// success (idempotent).
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.db
            .execute(move |conn| {
                conn.execute("DELETE FROM records WHERE id = ?", [id])
                    .map_err(AdminError::DatabaseError)?;
                Ok(())
            })
            .await
    }
}
