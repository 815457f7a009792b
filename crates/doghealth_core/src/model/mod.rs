//! Domain model for dog profiles, medical events and document records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Provide write-boundary validation helpers for each entity.
//!
//! # Invariants
//! - Every entity is identified by a stable, non-nil UUID.
//! - Child entities (`MedicalEvent`, `Document`) reference exactly one dog by
//!   foreign key and never own it.
//! - Deleting a dog cascades to its children (enforced by storage).

pub mod document;
pub mod dog;
pub mod event_type;
pub mod medical_event;
pub mod validation;
