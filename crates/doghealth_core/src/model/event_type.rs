//! Closed classification of medical events.
//!
//! # Invariants
//! - `Other` doubles as the decode-failure variant; downstream code never
//!   distinguishes "recorded as other" from "unrecognized".
//! - Deserialization is tolerant: any string decodes via
//!   [`crate::classify::classify`].

use crate::classify::classify;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Recognized medical event categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum MedicalEventType {
    #[serde(rename = "Vaccine")]
    Vaccine,
    #[serde(rename = "Heartworm Treatment")]
    HeartwormTreatment,
    #[serde(rename = "Flea Preventative")]
    FleaPreventative,
    #[serde(rename = "Vet Visit")]
    VetVisit,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl MedicalEventType {
    /// Every variant, in picker order.
    pub const ALL: [MedicalEventType; 5] = [
        Self::Vaccine,
        Self::HeartwormTreatment,
        Self::FleaPreventative,
        Self::VetVisit,
        Self::Other,
    ];

    /// Canonical display label, also the stored encoding.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vaccine => "Vaccine",
            Self::HeartwormTreatment => "Heartworm Treatment",
            Self::FleaPreventative => "Flea Preventative",
            Self::VetVisit => "Vet Visit",
            Self::Other => "Other",
        }
    }

    /// Whether events of this category confer protection that lapses on
    /// `expiration_date` and is renewed on `reminder_date`.
    pub fn is_protective(self) -> bool {
        matches!(
            self,
            Self::Vaccine | Self::HeartwormTreatment | Self::FleaPreventative
        )
    }

    /// Only vaccines carry a sub-kind (e.g. "Rabies").
    pub fn accepts_sub_kind(self) -> bool {
        self == Self::Vaccine
    }
}

impl Display for MedicalEventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MedicalEventType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(classify(s))
    }
}

impl From<String> for MedicalEventType {
    fn from(value: String) -> Self {
        classify(&value)
    }
}
