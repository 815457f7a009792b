//! Document attachment use-case service.

use crate::model::document::{Document, DocumentId};
use crate::model::dog::DogId;
use crate::model::validation::ValidationError;
use crate::repo::document_repo::DocumentRepository;
use crate::repo::dog_repo::DogRepository;
use crate::repo::error::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for document use-cases.
#[derive(Debug)]
pub enum DocumentServiceError {
    DogNotFound(DogId),
    DocumentNotFound(DocumentId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for DocumentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DogNotFound(id) => write!(f, "dog not found: {id}"),
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DocumentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "dog", id } => Self::DogNotFound(id),
            RepoError::NotFound { id, .. } => Self::DocumentNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Document service over document and dog repositories.
pub struct DocumentService<R: DocumentRepository, D: DogRepository> {
    documents: R,
    dogs: D,
}

impl<R: DocumentRepository, D: DogRepository> DocumentService<R, D> {
    pub fn new(documents: R, dogs: D) -> Self {
        Self { documents, dogs }
    }

    /// Attaches a document reference to an existing dog.
    ///
    /// A blank title is stored as "Untitled".
    pub fn attach_document(
        &self,
        dog_id: DogId,
        title: &str,
        location_ref: impl Into<String>,
    ) -> Result<Document, DocumentServiceError> {
        if self.dogs.get_dog(dog_id)?.is_none() {
            return Err(DocumentServiceError::DogNotFound(dog_id));
        }

        let document = Document::new(dog_id, title, location_ref);
        document.validate().map_err(DocumentServiceError::Validation)?;
        self.documents.create_document(&document)?;
        info!(
            "event=document_attach module=service status=ok dog_id={dog_id} document_id={}",
            document.id
        );
        Ok(document)
    }

    pub fn list_documents(&self, dog_id: DogId) -> Result<Vec<Document>, DocumentServiceError> {
        Ok(self.documents.list_documents(dog_id)?)
    }

    pub fn delete_document(&self, id: DocumentId) -> Result<(), DocumentServiceError> {
        self.documents.delete_document(id)?;
        info!("event=document_delete module=service status=ok document_id={id}");
        Ok(())
    }
}
