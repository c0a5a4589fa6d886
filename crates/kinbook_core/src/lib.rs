//! Core domain logic for Kinbook.
//! This crate is the single source of truth for business invariants.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use command::{error_reply, execute, respond, CommandError, CommandOutcome};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging};
pub use model::directory::{BirthdayGreeting, Directory};
pub use model::field::{Birthday, FieldError, FieldResult, Name, Phone, PHONE_LEN};
pub use model::record::ContactRecord;
pub use model::{DirectoryError, DirectoryResult};
pub use repo::directory_repo::{
    DirectoryRepository, RepoError, RepoResult, SqliteDirectoryRepository,
};
