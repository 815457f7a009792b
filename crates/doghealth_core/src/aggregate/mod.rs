//! Derived views over a dog's medical history.
//!
//! # Responsibility
//! - Select the most recent event per category.
//! - Build the vaccine renewal worklist (one current shot per sub-kind,
//!   soonest expiration first).
//! - Classify protection/reminder state and assemble the profile status
//!   board.
//!
//! # Invariants
//! - Every function is pure and total over an in-memory snapshot; missing
//!   dates degrade to "no data" or "sorts last".
//! - Ties on `occurrence_date` resolve to the event that appears first in the
//!   input slice.

pub mod board;
pub mod latest;
pub mod vaccines;

pub use board::{protection_status, ProtectionStatus, StatusBoard, TreatmentRow};
pub use latest::{latest_event_of_category, latest_vet_visit_date};
pub use vaccines::unique_vaccines_sorted_by_expiration;
