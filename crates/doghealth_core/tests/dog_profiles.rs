use chrono::NaiveDate;
use doghealth_core::db::open_db_in_memory;
use doghealth_core::repo::document_repo::{DocumentRepository, SqliteDocumentRepository};
use doghealth_core::repo::dog_repo::{DogRepository, SqliteDogRepository};
use doghealth_core::repo::medical_event_repo::{
    MedicalEventQuery, MedicalEventRepository, SqliteMedicalEventRepository,
};
use doghealth_core::service::dog_service::{DogService, DogServiceError, NewDog, ProfileUpdate};
use doghealth_core::{Document, MedicalEvent, MedicalEventType, ValidationError};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn new_dog(name: &str) -> NewDog {
    NewDog {
        name: name.to_string(),
        ..NewDog::default()
    }
}

#[test]
fn create_and_read_back_profile() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());

    let created = service
        .create_dog(NewDog {
            name: "Layla".to_string(),
            birthday: Some(date(2019, 4, 2)),
            weight: 21.5,
            photo: Some(vec![0x89, 0x50, 0x4e, 0x47]),
        })
        .unwrap();

    let loaded = service.get_dog(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.birthday, Some(date(2019, 4, 2)));
    assert!(loaded.has_photo());
    assert_eq!(loaded.last_vet_visit, None);
}

#[test]
fn empty_photo_is_stored_as_absent() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());

    let created = service
        .create_dog(NewDog {
            photo: Some(Vec::new()),
            ..new_dog("Pixel")
        })
        .unwrap();
    assert_eq!(created.photo, None);
}

#[test]
fn negative_weight_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());

    let err = service
        .create_dog(NewDog {
            weight: -3.0,
            ..new_dog("Rex")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DogServiceError::Validation(ValidationError::InvalidWeight(_))
    ));
    assert!(service.list_dogs().unwrap().is_empty());
}

#[test]
fn update_profile_changes_only_requested_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());
    let created = service
        .create_dog(NewDog {
            birthday: Some(date(2020, 1, 1)),
            weight: 10.0,
            ..new_dog("Biscuit")
        })
        .unwrap();

    let updated = service
        .update_profile(
            created.id,
            ProfileUpdate {
                weight: Some(12.5),
                birthday: Some(None),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Biscuit");
    assert_eq!(updated.weight, 12.5);
    assert_eq!(updated.birthday, None);
}

#[test]
fn update_profile_preserves_cached_vet_visit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::try_new(&conn).unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());
    let created = service.create_dog(new_dog("Biscuit")).unwrap();
    repo.set_last_vet_visit(created.id, Some(date(2024, 6, 15)))
        .unwrap();

    let updated = service
        .update_profile(
            created.id,
            ProfileUpdate {
                name: Some("Sir Biscuit".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Sir Biscuit");
    assert_eq!(updated.last_vet_visit, Some(date(2024, 6, 15)));
}

#[test]
fn missing_dog_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    assert!(service.get_dog(missing).unwrap().is_none());
    assert!(matches!(
        service.update_profile(missing, ProfileUpdate::default()),
        Err(DogServiceError::DogNotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.delete_dog(missing),
        Err(DogServiceError::DogNotFound(id)) if id == missing
    ));
}

#[test]
fn list_dogs_is_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());
    for name in ["milo", "Layla", "Archie"] {
        service.create_dog(new_dog(name)).unwrap();
    }

    let names: Vec<String> = service
        .list_dogs()
        .unwrap()
        .into_iter()
        .map(|dog| dog.name)
        .collect();
    assert_eq!(names, vec!["Archie", "Layla", "milo"]);
}

#[test]
fn deleting_dog_cascades_to_events_and_documents() {
    let conn = open_db_in_memory().unwrap();
    let service = DogService::new(SqliteDogRepository::try_new(&conn).unwrap());
    let events = SqliteMedicalEventRepository::try_new(&conn).unwrap();
    let documents = SqliteDocumentRepository::try_new(&conn).unwrap();

    let dog = service.create_dog(new_dog("Layla")).unwrap();
    let keeper = service.create_dog(new_dog("Milo")).unwrap();
    events
        .create_event(&MedicalEvent::vaccine(dog.id, "Rabies", date(2024, 1, 1)))
        .unwrap();
    events
        .create_event(&MedicalEvent::new(
            keeper.id,
            MedicalEventType::VetVisit,
            date(2024, 1, 1),
        ))
        .unwrap();
    documents
        .create_document(&Document::new(dog.id, "Certificate", "file:///records/cert.pdf"))
        .unwrap();

    service.delete_dog(dog.id).unwrap();

    assert!(service.get_dog(dog.id).unwrap().is_none());
    assert!(events
        .list_events(&MedicalEventQuery::for_dog(dog.id))
        .unwrap()
        .is_empty());
    assert!(documents.list_documents(dog.id).unwrap().is_empty());
    assert_eq!(
        events
            .list_events(&MedicalEventQuery::for_dog(keeper.id))
            .unwrap()
            .len(),
        1
    );
}
