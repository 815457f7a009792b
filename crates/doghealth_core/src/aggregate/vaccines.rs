//! Vaccine renewal worklist.

use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::MedicalEvent;
use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Returns the current (most recent) shot for every vaccine sub-kind, ordered
/// by ascending `expiration_date` with missing expirations last.
///
/// Vaccines without a sub-kind form a single `"Unknown"` group. Equal
/// expirations are ordered by sub-kind. A fresh vector is built per call.
pub fn unique_vaccines_sorted_by_expiration(events: &[MedicalEvent]) -> Vec<&MedicalEvent> {
    let mut current_by_sub_kind: BTreeMap<&str, &MedicalEvent> = BTreeMap::new();

    for event in events
        .iter()
        .filter(|event| event.category == MedicalEventType::Vaccine)
    {
        match current_by_sub_kind.entry(event.sub_kind_label()) {
            Entry::Vacant(slot) => {
                slot.insert(event);
            }
            Entry::Occupied(mut slot) => {
                if event.occurrence_date > slot.get().occurrence_date {
                    slot.insert(event);
                }
            }
        }
    }

    let mut worklist = current_by_sub_kind.into_values().collect::<Vec<_>>();
    // Stable sort keeps sub-kind order among equal expirations.
    worklist.sort_by_key(|event| expiration_sort_key(event.expiration_date));
    worklist
}

fn expiration_sort_key(expiration: Option<NaiveDate>) -> (bool, Option<NaiveDate>) {
    (expiration.is_none(), expiration)
}
