//! Directory repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load the whole directory at session start and save it wholesale.
//! - Keep the on-disk shape private to this module; it is a serialization of
//!   the directory, not an interchange format.
//!
//! # Invariants
//! - Loaded rows must pass the same field validation as fresh input.
//! - `save` replaces both tables inside one transaction.
//! - Phone order within a contact survives a save/load round trip.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::directory::Directory;
use crate::model::field::Birthday;
use crate::model::record::ContactRecord;
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for directory persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data no longer satisfies a field invariant.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "directory repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "directory repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
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

/// Load/save contract injected into the interactive session.
///
/// `load` returns the persisted directory (empty when nothing was saved yet);
/// `save` serializes the given directory wholesale.
pub trait DirectoryRepository {
    fn load(&self) -> RepoResult<Directory>;
    fn save(&mut self, directory: &Directory) -> RepoResult<()>;
}

/// SQLite-backed directory repository.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    /// Wraps a bootstrapped connection after checking its schema.
    ///
    /// # Errors
    /// Rejects connections whose schema version or tables do not match what
    /// the migrations produce, so a raw unmigrated connection fails here
    /// instead of at first query.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn load(&self) -> RepoResult<Directory> {
        let mut directory = Directory::new();

        let mut contact_stmt = self
            .conn
            .prepare("SELECT name, birthday FROM contacts;")?;
        let mut rows = contact_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let birthday: Option<String> = row.get("birthday")?;

            let mut record = ContactRecord::new(name.as_str())
                .map_err(|err| RepoError::InvalidData(format!("contact `{name}`: {err}")))?;
            if let Some(value) = &birthday {
                record
                    .set_birthday(value)
                    .map_err(|err| RepoError::InvalidData(format!("contact `{name}`: {err}")))?;
            }
            directory.add_record(record);
        }

        let mut phone_stmt = self
            .conn
            .prepare("SELECT contact_name, value FROM phones ORDER BY contact_name, position;")?;
        let mut rows = phone_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let contact_name: String = row.get("contact_name")?;
            let value: String = row.get("value")?;

            let record = directory.find_mut(&contact_name).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "phone row references unknown contact `{contact_name}`"
                ))
            })?;
            record.add_phone(&value).map_err(|err| {
                RepoError::InvalidData(format!("contact `{contact_name}`: {err}"))
            })?;
        }

        Ok(directory)
    }

    fn save(&mut self, directory: &Directory) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM phones;", [])?;
        tx.execute("DELETE FROM contacts;", [])?;

        {
            let mut contact_stmt =
                tx.prepare("INSERT INTO contacts (name, birthday) VALUES (?1, ?2);")?;
            let mut phone_stmt = tx.prepare(
                "INSERT INTO phones (contact_name, position, value) VALUES (?1, ?2, ?3);",
            )?;

            for record in directory.records() {
                contact_stmt.execute(params![
                    record.name().as_str(),
                    record.birthday().map(Birthday::as_str),
                ])?;
                for (position, phone) in record.phones().iter().enumerate() {
                    phone_stmt.execute(params![
                        record.name().as_str(),
                        position as i64,
                        phone.as_str(),
                    ])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["contacts", "phones"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &'static str) -> RepoResult<bool> {
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
