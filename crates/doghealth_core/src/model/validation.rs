//! Validation errors shared by all domain entities.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Entity invariant violations detected at the write boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Entity or parent reference uses the nil UUID.
    NilId(&'static str),
    /// Dog weight is negative, NaN or infinite.
    InvalidWeight(f64),
    /// Protective event expires before it occurred.
    ExpirationBeforeOccurrence {
        occurrence: NaiveDate,
        expiration: NaiveDate,
    },
    /// Document has no content reference.
    BlankLocationRef,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId(field) => write!(f, "{field} must not be the nil uuid"),
            Self::InvalidWeight(weight) => {
                write!(f, "weight must be a finite, non-negative number, got {weight}")
            }
            Self::ExpirationBeforeOccurrence {
                occurrence,
                expiration,
            } => write!(
                f,
                "expiration_date ({expiration}) must be >= occurrence_date ({occurrence})"
            ),
            Self::BlankLocationRef => write!(f, "document location_ref must not be blank"),
        }
    }
}

impl Error for ValidationError {}
