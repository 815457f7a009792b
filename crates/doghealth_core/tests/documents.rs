use chrono::NaiveDate;
use doghealth_core::db::open_db_in_memory;
use doghealth_core::repo::document_repo::SqliteDocumentRepository;
use doghealth_core::repo::dog_repo::{DogRepository, SqliteDogRepository};
use doghealth_core::service::document_service::{DocumentService, DocumentServiceError};
use doghealth_core::{Dog, ValidationError};
use rusqlite::Connection;
use uuid::Uuid;

fn service(
    conn: &Connection,
) -> DocumentService<SqliteDocumentRepository<'_>, SqliteDogRepository<'_>> {
    DocumentService::new(
        SqliteDocumentRepository::try_new(conn).unwrap(),
        SqliteDogRepository::try_new(conn).unwrap(),
    )
}

fn seed_dog(conn: &Connection) -> Uuid {
    let mut dog = Dog::new("Layla");
    dog.birthday = NaiveDate::from_ymd_opt(2019, 4, 2);
    SqliteDogRepository::try_new(conn)
        .unwrap()
        .create_dog(&dog)
        .unwrap()
}

#[test]
fn attach_and_list_documents_sorted_by_title() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let dog = seed_dog(&conn);

    service
        .attach_document(dog, "Rabies certificate", "file:///records/rabies.pdf")
        .unwrap();
    service
        .attach_document(dog, "adoption papers", "https://example.org/adoption.pdf")
        .unwrap();
    let untitled = service
        .attach_document(dog, "   ", "file:///records/scan-0042.jpg")
        .unwrap();
    assert_eq!(untitled.title, "Untitled");

    let titles: Vec<String> = service
        .list_documents(dog)
        .unwrap()
        .into_iter()
        .map(|document| document.title)
        .collect();
    assert_eq!(titles, vec!["adoption papers", "Rabies certificate", "Untitled"]);
}

#[test]
fn blank_location_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let dog = seed_dog(&conn);

    assert!(matches!(
        service.attach_document(dog, "Scan", " "),
        Err(DocumentServiceError::Validation(ValidationError::BlankLocationRef))
    ));
    assert!(service.list_documents(dog).unwrap().is_empty());
}

#[test]
fn unknown_dog_and_document_are_reported() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        service.attach_document(missing, "Scan", "file:///scan.pdf"),
        Err(DocumentServiceError::DogNotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.delete_document(missing),
        Err(DocumentServiceError::DocumentNotFound(id)) if id == missing
    ));
}

#[test]
fn delete_removes_only_the_target_document() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let dog = seed_dog(&conn);
    let first = service
        .attach_document(dog, "First", "file:///first.pdf")
        .unwrap();
    let second = service
        .attach_document(dog, "Second", "file:///second.pdf")
        .unwrap();

    service.delete_document(first.id).unwrap();

    let remaining = service.list_documents(dog).unwrap();
    assert_eq!(remaining, vec![second]);
}
