//! Dog profile use-case service.
//!
//! # Responsibility
//! - Provide add-profile, field-by-field edit, list and delete flows.
//!
//! # Invariants
//! - Profile edits never touch `last_vet_visit`; that cache belongs to the
//!   medical event service.
//! - Deleting a dog removes its events and documents (storage cascade).

use crate::model::dog::{Dog, DogId};
use crate::model::validation::ValidationError;
use crate::repo::dog_repo::DogRepository;
use crate::repo::error::RepoError;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for dog profile use-cases.
#[derive(Debug)]
pub enum DogServiceError {
    DogNotFound(DogId),
    Validation(ValidationError),
    Repo(RepoError),
    /// Write succeeded but read-back did not return the row.
    InconsistentState(&'static str),
}

impl Display for DogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DogNotFound(id) => write!(f, "dog not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent dog state: {details}"),
        }
    }
}

impl Error for DogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DogServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::DogNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Input of the add-profile flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub birthday: Option<NaiveDate>,
    pub weight: f64,
    pub photo: Option<Vec<u8>>,
}

/// Field-by-field profile edit. `None` leaves a field unchanged; the inner
/// `Option` clears optional fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub birthday: Option<Option<NaiveDate>>,
    pub weight: Option<f64>,
    pub photo: Option<Option<Vec<u8>>>,
}

impl ProfileUpdate {
    fn apply_to(self, dog: &mut Dog) {
        if let Some(name) = self.name {
            dog.name = name;
        }
        if let Some(birthday) = self.birthday {
            dog.birthday = birthday;
        }
        if let Some(weight) = self.weight {
            dog.weight = weight;
        }
        if let Some(photo) = self.photo {
            dog.photo = photo.filter(|bytes| !bytes.is_empty());
        }
    }
}

/// Dog profile service facade over a repository implementation.
pub struct DogService<R: DogRepository> {
    repo: R,
}

impl<R: DogRepository> DogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a profile and returns the stored record.
    pub fn create_dog(&self, new_dog: NewDog) -> Result<Dog, DogServiceError> {
        let mut dog = Dog::new(new_dog.name);
        dog.birthday = new_dog.birthday;
        dog.weight = new_dog.weight;
        dog.photo = new_dog.photo.filter(|bytes| !bytes.is_empty());

        let id = self.repo.create_dog(&dog)?;
        info!("event=dog_create module=service status=ok dog_id={id}");
        self.repo
            .get_dog(id)?
            .ok_or(DogServiceError::InconsistentState(
                "created dog not found in read-back",
            ))
    }

    /// Applies a profile edit and returns the stored record.
    pub fn update_profile(&self, id: DogId, update: ProfileUpdate) -> Result<Dog, DogServiceError> {
        let mut dog = self
            .repo
            .get_dog(id)?
            .ok_or(DogServiceError::DogNotFound(id))?;
        update.apply_to(&mut dog);
        self.repo.update_dog(&dog)?;

        self.repo
            .get_dog(id)?
            .ok_or(DogServiceError::InconsistentState(
                "updated dog not found in read-back",
            ))
    }

    pub fn get_dog(&self, id: DogId) -> Result<Option<Dog>, DogServiceError> {
        Ok(self.repo.get_dog(id)?)
    }

    /// Lists all profiles sorted by name.
    pub fn list_dogs(&self) -> Result<Vec<Dog>, DogServiceError> {
        Ok(self.repo.list_dogs()?)
    }

    /// Deletes a profile and everything it owns.
    pub fn delete_dog(&self, id: DogId) -> Result<(), DogServiceError> {
        self.repo.delete_dog(id)?;
        info!("event=dog_delete module=service status=ok dog_id={id}");
        Ok(())
    }
}
