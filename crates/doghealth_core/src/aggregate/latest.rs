//! Latest-event selection.

use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::MedicalEvent;
use chrono::NaiveDate;

/// Returns the `category` event with the greatest `occurrence_date`, or
/// `None` when the dog has no event of that category.
pub fn latest_event_of_category(
    events: &[MedicalEvent],
    category: MedicalEventType,
) -> Option<&MedicalEvent> {
    latest_by_occurrence(events.iter().filter(|event| event.category == category))
}

/// Occurrence date of the most recent vet visit.
pub fn latest_vet_visit_date(events: &[MedicalEvent]) -> Option<NaiveDate> {
    latest_event_of_category(events, MedicalEventType::VetVisit).map(|event| event.occurrence_date)
}

/// Max by `occurrence_date`, keeping the earliest candidate on ties.
pub(crate) fn latest_by_occurrence<'a>(
    events: impl Iterator<Item = &'a MedicalEvent>,
) -> Option<&'a MedicalEvent> {
    events.fold(None, |latest: Option<&'a MedicalEvent>, event| match latest {
        Some(current) if current.occurrence_date >= event.occurrence_date => Some(current),
        _ => Some(event),
    })
}
