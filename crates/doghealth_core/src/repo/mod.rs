//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts consumed by services.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Write paths call the entity's `validate()` before SQL mutations.
//! - Repositories require a fully migrated connection (`try_new`).
//! - Child rows are removed by the schema's `ON DELETE CASCADE`, never by
//!   repository code.

mod columns;
pub mod document_repo;
pub mod dog_repo;
pub mod error;
pub mod medical_event_repo;

pub use error::{RepoError, RepoResult};
