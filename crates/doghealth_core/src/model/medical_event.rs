//! Medical event model.
//!
//! # Responsibility
//! - Represent one occurrence of a vaccine, treatment, visit or other action.
//! - Keep category/sub-kind coupling consistent on every mutation.
//!
//! # Invariants
//! - `sub_kind` is `None` unless `category == Vaccine`.
//! - For protective categories, `expiration_date >= occurrence_date` when set.
//!   Only write paths enforce this; aggregation tolerates legacy rows.

use crate::model::dog::DogId;
use crate::model::event_type::MedicalEventType;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a medical event.
pub type MedicalEventId = Uuid;

/// Group key and display name for vaccines recorded without a sub-kind.
pub const UNKNOWN_SUB_KIND: &str = "Unknown";

/// One occurrence of a medical action for a single dog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalEvent {
    pub id: MedicalEventId,
    /// Exclusive parent.
    pub dog_id: DogId,
    pub category: MedicalEventType,
    /// Vaccine name, e.g. "Rabies". Meaningful only for vaccines.
    pub sub_kind: Option<String>,
    pub description: Option<String>,
    pub occurrence_date: NaiveDate,
    /// Date protection lapses.
    pub expiration_date: Option<NaiveDate>,
    /// Date the owner wants to be reminded to renew.
    pub reminder_date: Option<NaiveDate>,
}

impl MedicalEvent {
    /// Creates an event with a generated id and no optional fields set.
    pub fn new(dog_id: DogId, category: MedicalEventType, occurrence_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            dog_id,
            category,
            sub_kind: None,
            description: None,
            occurrence_date,
            expiration_date: None,
            reminder_date: None,
        }
    }

    /// Creates a vaccine event for the given sub-kind.
    pub fn vaccine(dog_id: DogId, sub_kind: &str, occurrence_date: NaiveDate) -> Self {
        let mut event = Self::new(dog_id, MedicalEventType::Vaccine, occurrence_date);
        event.set_sub_kind(Some(sub_kind));
        event
    }

    /// Changes the category, clearing `sub_kind` unless the new category is
    /// `Vaccine`.
    pub fn set_category(&mut self, category: MedicalEventType) {
        self.category = category;
        if !category.accepts_sub_kind() {
            self.sub_kind = None;
        }
    }

    /// Sets a trimmed sub-kind. Blank values and non-vaccine categories store
    /// `None`.
    pub fn set_sub_kind(&mut self, sub_kind: Option<&str>) {
        self.sub_kind = if self.category.accepts_sub_kind() {
            normalize_sub_kind(sub_kind)
        } else {
            None
        };
    }

    /// Sub-kind for display and grouping, `"Unknown"` when absent.
    pub fn sub_kind_label(&self) -> &str {
        self.sub_kind
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_SUB_KIND)
    }

    /// Fills expiration and reminder dates for categories that do not track
    /// protection, mirroring the add-event flow: both default to the
    /// occurrence date.
    pub fn apply_schedule_defaults(&mut self) {
        if self.category.is_protective() {
            return;
        }
        self.expiration_date.get_or_insert(self.occurrence_date);
        self.reminder_date.get_or_insert(self.occurrence_date);
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("medical_event.id"));
        }
        if self.dog_id.is_nil() {
            return Err(ValidationError::NilId("medical_event.dog_id"));
        }
        if self.category.is_protective() {
            if let Some(expiration) = self.expiration_date {
                if expiration < self.occurrence_date {
                    return Err(ValidationError::ExpirationBeforeOccurrence {
                        occurrence: self.occurrence_date,
                        expiration,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Trims a sub-kind and maps blank input to `None`.
pub fn normalize_sub_kind(sub_kind: Option<&str>) -> Option<String> {
    sub_kind
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
