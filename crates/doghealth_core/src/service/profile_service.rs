//! Read-only profile screen composition.
//!
//! # Responsibility
//! - Combine a dog record, its age and its status board for one date.
//!
//! # Invariants
//! - The board is built from stored events; a stale `Dog::last_vet_visit`
//!   cache is reported but never trusted over the events.

use crate::age::{age, AgeResult};
use crate::aggregate::StatusBoard;
use crate::model::dog::{Dog, DogId};
use crate::repo::dog_repo::DogRepository;
use crate::repo::error::RepoError;
use crate::repo::medical_event_repo::{MedicalEventQuery, MedicalEventRepository};
use chrono::NaiveDate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for profile composition.
#[derive(Debug)]
pub enum ProfileServiceError {
    DogNotFound(DogId),
    Repo(RepoError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DogNotFound(id) => write!(f, "dog not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DogNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Everything the profile screen shows for one dog.
#[derive(Debug, Clone, PartialEq)]
pub struct DogProfile {
    pub dog: Dog,
    pub age: AgeResult,
    pub board: StatusBoard,
}

impl DogProfile {
    /// Whether the cached last-visit date disagrees with the event history.
    pub fn vet_visit_cache_is_stale(&self) -> bool {
        self.dog.last_vet_visit != self.board.last_vet_visit
    }
}

/// Profile composition over dog and event repositories.
pub struct ProfileService<D: DogRepository, E: MedicalEventRepository> {
    dogs: D,
    events: E,
}

impl<D: DogRepository, E: MedicalEventRepository> ProfileService<D, E> {
    pub fn new(dogs: D, events: E) -> Self {
        Self { dogs, events }
    }

    /// Builds the profile of one dog as of `as_of`.
    pub fn profile(&self, dog_id: DogId, as_of: NaiveDate) -> Result<DogProfile, ProfileServiceError> {
        let dog = self
            .dogs
            .get_dog(dog_id)?
            .ok_or(ProfileServiceError::DogNotFound(dog_id))?;
        self.compose(dog, as_of)
    }

    /// Builds profiles of all dogs, sorted by name.
    pub fn all_profiles(&self, as_of: NaiveDate) -> Result<Vec<DogProfile>, ProfileServiceError> {
        self.dogs
            .list_dogs()?
            .into_iter()
            .map(|dog| self.compose(dog, as_of))
            .collect()
    }

    fn compose(&self, dog: Dog, as_of: NaiveDate) -> Result<DogProfile, ProfileServiceError> {
        let events = self.events.list_events(&MedicalEventQuery::for_dog(dog.id))?;
        let profile = DogProfile {
            age: age(dog.birthday, as_of),
            board: StatusBoard::build(&events, as_of),
            dog,
        };
        if profile.vet_visit_cache_is_stale() {
            warn!(
                "event=last_vet_visit_stale module=service status=warn dog_id={}",
                profile.dog.id
            );
        }
        Ok(profile)
    }
}
