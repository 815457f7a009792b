//! Dog profile model.
//!
//! # Invariants
//! - `id` is stable and never reused for another dog.
//! - `weight` is expressed in pounds and is finite and non-negative.
//! - `last_vet_visit` is a cache of the latest `VetVisit` event date. It is
//!   written only by the medical event service, never by profile edits.

use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a dog profile.
pub type DogId = Uuid;

/// One profile per pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    /// Display name. May be empty.
    pub name: String,
    /// `None` renders as "Unknown age".
    pub birthday: Option<NaiveDate>,
    /// Weight in pounds.
    pub weight: f64,
    /// Raw image bytes; `None` renders a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
    /// Denormalized latest vet visit date.
    pub last_vet_visit: Option<NaiveDate>,
}

impl Dog {
    /// Creates a new profile with a generated id and empty optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            birthday: None,
            weight: 0.0,
            photo: None,
            last_vet_visit: None,
        }
    }

    /// Creates a new profile with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: DogId, name: impl Into<String>) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId("dog.id"));
        }
        let mut dog = Self::new(name);
        dog.id = id;
        Ok(dog)
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("dog.id"));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ValidationError::InvalidWeight(self.weight));
        }
        Ok(())
    }

    pub fn has_photo(&self) -> bool {
        self.photo.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}
