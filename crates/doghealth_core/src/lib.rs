//! Core domain logic for the dog health tracker.
//! This crate is the single source of truth for treatment and renewal rules.

pub mod age;
pub mod aggregate;
pub mod classify;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use age::{age, AgeResult};
pub use aggregate::{
    latest_event_of_category, latest_vet_visit_date, protection_status,
    unique_vaccines_sorted_by_expiration, ProtectionStatus, StatusBoard, TreatmentRow,
};
pub use classify::classify;
pub use config::CoreConfig;
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::{Document, DocumentId};
pub use model::dog::{Dog, DogId};
pub use model::event_type::MedicalEventType;
pub use model::medical_event::{MedicalEvent, MedicalEventId};
pub use model::validation::ValidationError;
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
