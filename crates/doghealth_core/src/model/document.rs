//! Document record model.
//!
//! A document points at file content owned by the host (a URL or path); core
//! never reads the bytes behind `location_ref`.

use crate::model::dog::DogId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a document record.
pub type DocumentId = Uuid;

/// Title used when the owner leaves the title blank.
pub const UNTITLED_DOCUMENT: &str = "Untitled";

/// Attached record file belonging to exactly one dog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub dog_id: DogId,
    pub title: String,
    /// Opaque content reference resolved by the host.
    pub location_ref: String,
}

impl Document {
    /// Creates a document record with a generated id and normalized title.
    pub fn new(dog_id: DogId, title: &str, location_ref: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            dog_id,
            title: normalize_title(title),
            location_ref: location_ref.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId("document.id"));
        }
        if self.dog_id.is_nil() {
            return Err(ValidationError::NilId("document.dog_id"));
        }
        if self.location_ref.trim().is_empty() {
            return Err(ValidationError::BlankLocationRef);
        }
        Ok(())
    }
}

/// Trims `title`, falling back to [`UNTITLED_DOCUMENT`] when blank.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_DOCUMENT.to_string()
    } else {
        trimmed.to_string()
    }
}
