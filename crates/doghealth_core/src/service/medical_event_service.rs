//! Medical event use-case service.
//!
//! # Responsibility
//! - Provide add/edit/delete flows and the per-dog history listing.
//! - Keep `Dog::last_vet_visit` synchronized with the event history.
//!
//! # Invariants
//! - This service is the only writer of `Dog::last_vet_visit`. Any mutation
//!   touching a `VetVisit` event (before or after the change) recomputes it
//!   from stored events inside the same transaction as the event write, so a
//!   failed refresh leaves nothing committed.
//! - Category changes clear the sub-kind unless the new category is
//!   `Vaccine`.
//! - Protective events whose expiration precedes their occurrence are
//!   rejected here; reads stay tolerant of such legacy rows.

use crate::aggregate::latest_vet_visit_date;
use crate::model::dog::DogId;
use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::{MedicalEvent, MedicalEventId};
use crate::model::validation::ValidationError;
use crate::repo::dog_repo::DogRepository;
use crate::repo::error::RepoError;
use crate::repo::medical_event_repo::{MedicalEventQuery, MedicalEventRepository};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for medical event use-cases.
#[derive(Debug)]
pub enum MedicalEventServiceError {
    DogNotFound(DogId),
    EventNotFound(MedicalEventId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for MedicalEventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DogNotFound(id) => write!(f, "dog not found: {id}"),
            Self::EventNotFound(id) => write!(f, "medical event not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MedicalEventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for MedicalEventServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for MedicalEventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "dog", id } => Self::DogNotFound(id),
            RepoError::NotFound { id, .. } => Self::EventNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Input of the add-event flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicalEvent {
    pub dog_id: DogId,
    pub category: MedicalEventType,
    /// Ignored unless `category` is `Vaccine`.
    pub sub_kind: Option<String>,
    pub description: Option<String>,
    pub occurrence_date: NaiveDate,
    /// Defaults to `occurrence_date` for non-protective categories.
    pub expiration_date: Option<NaiveDate>,
    /// Defaults to `occurrence_date` for non-protective categories.
    pub reminder_date: Option<NaiveDate>,
}

impl NewMedicalEvent {
    pub fn new(dog_id: DogId, category: MedicalEventType, occurrence_date: NaiveDate) -> Self {
        Self {
            dog_id,
            category,
            sub_kind: None,
            description: None,
            occurrence_date,
            expiration_date: None,
            reminder_date: None,
        }
    }
}

/// Edit of an existing event. `None` leaves a field unchanged; the inner
/// `Option` clears optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalEventEdit {
    pub category: Option<MedicalEventType>,
    pub sub_kind: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub occurrence_date: Option<NaiveDate>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub reminder_date: Option<Option<NaiveDate>>,
}

impl MedicalEventEdit {
    fn apply_to(self, event: &mut MedicalEvent) {
        if let Some(category) = self.category {
            event.set_category(category);
        }
        if let Some(sub_kind) = self.sub_kind {
            event.set_sub_kind(sub_kind.as_deref());
        }
        if let Some(description) = self.description {
            event.description = normalize_description(description);
        }
        if let Some(occurrence_date) = self.occurrence_date {
            event.occurrence_date = occurrence_date;
        }
        if let Some(expiration_date) = self.expiration_date {
            event.expiration_date = expiration_date;
        }
        if let Some(reminder_date) = self.reminder_date {
            event.reminder_date = reminder_date;
        }
    }
}

/// Medical event service over event and dog repositories.
pub struct MedicalEventService<E: MedicalEventRepository, D: DogRepository> {
    events: E,
    dogs: D,
}

impl<E: MedicalEventRepository, D: DogRepository> MedicalEventService<E, D> {
    pub fn new(events: E, dogs: D) -> Self {
        Self { events, dogs }
    }

    /// Records a new event for an existing dog.
    pub fn add_event(
        &self,
        request: NewMedicalEvent,
    ) -> Result<MedicalEvent, MedicalEventServiceError> {
        self.ensure_dog_exists(request.dog_id)?;

        let mut event = MedicalEvent::new(request.dog_id, request.category, request.occurrence_date);
        event.set_sub_kind(request.sub_kind.as_deref());
        event.description = normalize_description(request.description);
        event.expiration_date = request.expiration_date;
        event.reminder_date = request.reminder_date;
        event.apply_schedule_defaults();
        event.validate()?;

        self.events.in_transaction(|| {
            self.events.create_event(&event)?;
            if event.category == MedicalEventType::VetVisit {
                self.refresh_last_vet_visit(event.dog_id)?;
            }
            Ok::<_, MedicalEventServiceError>(())
        })?;
        info!(
            "event=medical_event_create module=service status=ok dog_id={} event_id={} category={}",
            event.dog_id,
            event.id,
            event.category.label()
        );
        Ok(event)
    }

    /// Applies an edit and returns the stored event.
    pub fn edit_event(
        &self,
        id: MedicalEventId,
        edit: MedicalEventEdit,
    ) -> Result<MedicalEvent, MedicalEventServiceError> {
        let mut event = self
            .events
            .get_event(id)?
            .ok_or(MedicalEventServiceError::EventNotFound(id))?;
        let previous_category = event.category;

        edit.apply_to(&mut event);
        event.apply_schedule_defaults();
        event.validate()?;
        let touches_vet_visit = previous_category == MedicalEventType::VetVisit
            || event.category == MedicalEventType::VetVisit;
        self.events.in_transaction(|| {
            self.events.update_event(&event)?;
            if touches_vet_visit {
                self.refresh_last_vet_visit(event.dog_id)?;
            }
            Ok::<_, MedicalEventServiceError>(())
        })?;
        info!(
            "event=medical_event_update module=service status=ok dog_id={} event_id={} category={}",
            event.dog_id,
            event.id,
            event.category.label()
        );
        Ok(event)
    }

    /// Deletes one event.
    pub fn delete_event(&self, id: MedicalEventId) -> Result<(), MedicalEventServiceError> {
        let event = self
            .events
            .get_event(id)?
            .ok_or(MedicalEventServiceError::EventNotFound(id))?;
        self.events.in_transaction(|| {
            self.events.delete_event(id)?;
            if event.category == MedicalEventType::VetVisit {
                self.refresh_last_vet_visit(event.dog_id)?;
            }
            Ok::<_, MedicalEventServiceError>(())
        })?;
        info!(
            "event=medical_event_delete module=service status=ok dog_id={} event_id={id}",
            event.dog_id
        );
        Ok(())
    }

    pub fn get_event(
        &self,
        id: MedicalEventId,
    ) -> Result<Option<MedicalEvent>, MedicalEventServiceError> {
        Ok(self.events.get_event(id)?)
    }

    /// Medical history of one dog, most recent first.
    pub fn history(&self, dog_id: DogId) -> Result<Vec<MedicalEvent>, MedicalEventServiceError> {
        self.ensure_dog_exists(dog_id)?;
        Ok(self.events.list_events(&MedicalEventQuery::for_dog(dog_id))?)
    }

    /// Recomputes and stores `Dog::last_vet_visit` from the event history.
    ///
    /// Also usable to repair stores written by older builds.
    pub fn refresh_last_vet_visit(
        &self,
        dog_id: DogId,
    ) -> Result<Option<NaiveDate>, MedicalEventServiceError> {
        let visits = self.events.list_events(
            &MedicalEventQuery::for_dog(dog_id).with_category(MedicalEventType::VetVisit),
        )?;
        let latest = latest_vet_visit_date(&visits);
        self.dogs.set_last_vet_visit(dog_id, latest)?;
        debug!(
            "event=last_vet_visit_refresh module=service status=ok dog_id={dog_id} visit_count={}",
            visits.len()
        );
        Ok(latest)
    }

    fn ensure_dog_exists(&self, dog_id: DogId) -> Result<(), MedicalEventServiceError> {
        match self.dogs.get_dog(dog_id)? {
            Some(_) => Ok(()),
            None => Err(MedicalEventServiceError::DogNotFound(dog_id)),
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|value| !value.trim().is_empty())
}
