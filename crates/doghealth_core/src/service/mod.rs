//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own cross-entity rules such as the last-vet-visit cache.

pub mod document_service;
pub mod dog_service;
pub mod medical_event_service;
pub mod profile_service;
