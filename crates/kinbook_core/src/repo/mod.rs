//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the directory load/save contract injected into the session.
//! - Keep SQLite query details out of the domain model.
//!
//! # Invariants
//! - `load` re-validates persisted values instead of masking bad rows.
//! - `save` rewrites the whole directory atomically; partial states are never
//!   observable on disk.

pub mod directory_repo;
