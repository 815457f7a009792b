//! Label classifier.
//!
//! Accepts canonical labels, snake/kebab-case spellings and the legacy picker
//! labels (the event form offered "Flea Treatment" while storage used
//! "Flea Preventative").

use crate::model::event_type::MedicalEventType;
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_\-]+").expect("valid separator regex"));

/// Classifies a stored or display label. Unrecognized input maps to
/// [`MedicalEventType::Other`].
pub fn classify(raw: &str) -> MedicalEventType {
    match normalize_label(raw).as_str() {
        "vaccine" | "vaccination" => MedicalEventType::Vaccine,
        "heartworm treatment" | "heartworm" => MedicalEventType::HeartwormTreatment,
        "flea preventative" | "flea preventive" | "flea treatment" | "flea" => {
            MedicalEventType::FleaPreventative
        }
        "vet visit" | "vet" | "checkup" => MedicalEventType::VetVisit,
        _ => MedicalEventType::Other,
    }
}

/// Classifies a possibly missing label; `None` maps to `Other`.
pub fn classify_optional(raw: Option<&str>) -> MedicalEventType {
    raw.map_or(MedicalEventType::Other, classify)
}

fn normalize_label(raw: &str) -> String {
    SEPARATOR_RE
        .replace_all(raw, " ")
        .trim()
        .to_lowercase()
}
