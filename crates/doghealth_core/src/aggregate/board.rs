//! Protection lifecycle and the profile status board.

use crate::aggregate::latest::{latest_event_of_category, latest_vet_visit_date};
use crate::aggregate::vaccines::unique_vaccines_sorted_by_expiration;
use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::MedicalEvent;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Renewal state of one event relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionStatus {
    /// Category does not lapse, or no expiration date was recorded.
    Untracked,
    /// Protection in effect, reminder date not reached yet.
    Active,
    /// Reminder date reached, protection still in effect.
    ReminderDue,
    /// Reference date is after the expiration date.
    Expired,
}

impl Display for ProtectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Untracked => "untracked",
            Self::Active => "active",
            Self::ReminderDue => "reminder due",
            Self::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// Classifies `event` as of `as_of`. Protection holds through the expiration
/// date itself.
pub fn protection_status(event: &MedicalEvent, as_of: NaiveDate) -> ProtectionStatus {
    if !event.category.is_protective() {
        return ProtectionStatus::Untracked;
    }
    let Some(expiration) = event.expiration_date else {
        return ProtectionStatus::Untracked;
    };
    if as_of > expiration {
        return ProtectionStatus::Expired;
    }
    match event.reminder_date {
        Some(reminder) if as_of >= reminder => ProtectionStatus::ReminderDue,
        _ => ProtectionStatus::Active,
    }
}

/// One line of the treatment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentRow {
    /// Display name, e.g. `"Flea Preventative"` or `"Rabies Vaccine"`.
    pub name: String,
    pub event: MedicalEvent,
    /// Expiration date of `event`; `None` renders as "No data".
    pub renewal_date: Option<NaiveDate>,
    pub status: ProtectionStatus,
}

impl TreatmentRow {
    fn from_event(event: &MedicalEvent, as_of: NaiveDate) -> Self {
        let name = match event.category {
            MedicalEventType::Vaccine => format!("{} Vaccine", event.sub_kind_label()),
            other => other.label().to_string(),
        };
        Self {
            name,
            event: event.clone(),
            renewal_date: event.expiration_date,
            status: protection_status(event, as_of),
        }
    }

    /// Whether the owner should act on this row now.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self.status,
            ProtectionStatus::ReminderDue | ProtectionStatus::Expired
        )
    }
}

/// Snapshot of a dog's treatment information as of one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    pub as_of: NaiveDate,
    /// Derived from events; authoritative over `Dog::last_vet_visit`.
    pub last_vet_visit: Option<NaiveDate>,
    pub flea_preventative: Option<TreatmentRow>,
    pub heartworm_treatment: Option<TreatmentRow>,
    /// Renewal worklist, soonest expiration first.
    pub vaccines: Vec<TreatmentRow>,
}

impl StatusBoard {
    /// Builds the board from a dog's full, unsorted event set.
    pub fn build(events: &[MedicalEvent], as_of: NaiveDate) -> Self {
        let row = |category| {
            latest_event_of_category(events, category)
                .map(|event| TreatmentRow::from_event(event, as_of))
        };

        Self {
            as_of,
            last_vet_visit: latest_vet_visit_date(events),
            flea_preventative: row(MedicalEventType::FleaPreventative),
            heartworm_treatment: row(MedicalEventType::HeartwormTreatment),
            vaccines: unique_vaccines_sorted_by_expiration(events)
                .into_iter()
                .map(|event| TreatmentRow::from_event(event, as_of))
                .collect(),
        }
    }

    /// All rows in display order: flea, heartworm, then vaccines.
    pub fn rows(&self) -> impl Iterator<Item = &TreatmentRow> {
        self.flea_preventative
            .iter()
            .chain(self.heartworm_treatment.iter())
            .chain(self.vaccines.iter())
    }

    /// Rows whose reminder date has been reached or that have expired.
    pub fn renewals_due(&self) -> Vec<&TreatmentRow> {
        self.rows().filter(|row| row.needs_attention()).collect()
    }
}
