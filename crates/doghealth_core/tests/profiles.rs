use chrono::NaiveDate;
use doghealth_core::db::open_db_in_memory;
use doghealth_core::repo::dog_repo::{DogRepository, SqliteDogRepository};
use doghealth_core::repo::medical_event_repo::SqliteMedicalEventRepository;
use doghealth_core::service::medical_event_service::{MedicalEventService, NewMedicalEvent};
use doghealth_core::service::profile_service::{ProfileService, ProfileServiceError};
use doghealth_core::{AgeResult, Dog, DogId, MedicalEventType, ProtectionStatus};
use rusqlite::Connection;
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn profiles(
    conn: &Connection,
) -> ProfileService<SqliteDogRepository<'_>, SqliteMedicalEventRepository<'_>> {
    ProfileService::new(
        SqliteDogRepository::try_new(conn).unwrap(),
        SqliteMedicalEventRepository::try_new(conn).unwrap(),
    )
}

fn seed_dog(conn: &Connection, name: &str, birthday: Option<NaiveDate>) -> DogId {
    let mut dog = Dog::new(name);
    dog.birthday = birthday;
    SqliteDogRepository::try_new(conn)
        .unwrap()
        .create_dog(&dog)
        .unwrap()
}

fn shot(dog_id: DogId, sub_kind: &str, occurred: NaiveDate, expires: NaiveDate) -> NewMedicalEvent {
    NewMedicalEvent {
        sub_kind: Some(sub_kind.to_string()),
        expiration_date: Some(expires),
        ..NewMedicalEvent::new(dog_id, MedicalEventType::Vaccine, occurred)
    }
}

#[test]
fn layla_profile_shows_age_visit_and_worklist() {
    let conn = open_db_in_memory().unwrap();
    let layla = seed_dog(&conn, "Layla", Some(date(2019, 4, 2)));
    let events = MedicalEventService::new(
        SqliteMedicalEventRepository::try_new(&conn).unwrap(),
        SqliteDogRepository::try_new(&conn).unwrap(),
    );
    events
        .add_event(shot(layla, "Rabies", date(2024, 1, 1), date(2025, 1, 1)))
        .unwrap();
    let current_rabies = events
        .add_event(shot(layla, "Rabies", date(2024, 6, 1), date(2025, 6, 1)))
        .unwrap();
    let parvo = events
        .add_event(shot(layla, "Parvovirus", date(2024, 2, 1), date(2025, 2, 1)))
        .unwrap();
    events
        .add_event(NewMedicalEvent::new(
            layla,
            MedicalEventType::VetVisit,
            date(2024, 6, 1),
        ))
        .unwrap();

    let profile = profiles(&conn).profile(layla, date(2025, 1, 15)).unwrap();

    assert_eq!(profile.dog.name, "Layla");
    assert_eq!(profile.age, AgeResult::Known { years: 5, days: 288 });
    assert_eq!(profile.board.last_vet_visit, Some(date(2024, 6, 1)));
    assert!(!profile.vet_visit_cache_is_stale());

    let worklist: Vec<Uuid> = profile.board.vaccines.iter().map(|row| row.event.id).collect();
    assert_eq!(worklist, vec![parvo.id, current_rabies.id]);
    assert_eq!(profile.board.vaccines[0].status, ProtectionStatus::Active);
    assert!(profile.board.flea_preventative.is_none());
}

#[test]
fn profile_of_dog_without_records() {
    let conn = open_db_in_memory().unwrap();
    let dog = seed_dog(&conn, "Pixel", None);

    let profile = profiles(&conn).profile(dog, date(2024, 1, 1)).unwrap();

    assert_eq!(profile.age, AgeResult::Unknown);
    assert_eq!(profile.board.last_vet_visit, None);
    assert_eq!(profile.board.rows().count(), 0);
    assert!(profile.board.renewals_due().is_empty());
}

#[test]
fn stale_cache_is_detected_but_board_uses_events() {
    let conn = open_db_in_memory().unwrap();
    let dog = seed_dog(&conn, "Milo", None);
    SqliteDogRepository::try_new(&conn)
        .unwrap()
        .set_last_vet_visit(dog, Some(date(2020, 1, 1)))
        .unwrap();

    let profile = profiles(&conn).profile(dog, date(2024, 1, 1)).unwrap();

    assert_eq!(profile.dog.last_vet_visit, Some(date(2020, 1, 1)));
    assert_eq!(profile.board.last_vet_visit, None);
    assert!(profile.vet_visit_cache_is_stale());
}

#[test]
fn all_profiles_follow_name_order() {
    let conn = open_db_in_memory().unwrap();
    seed_dog(&conn, "Milo", None);
    seed_dog(&conn, "Archie", Some(date(2024, 2, 1)));

    let all = profiles(&conn).all_profiles(date(2024, 1, 1)).unwrap();

    let names: Vec<&str> = all.iter().map(|profile| profile.dog.name.as_str()).collect();
    assert_eq!(names, vec!["Archie", "Milo"]);
    assert_eq!(all[0].age, AgeResult::FutureBirthday);
}

#[test]
fn missing_dog_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let missing = Uuid::new_v4();

    assert!(matches!(
        profiles(&conn).profile(missing, date(2024, 1, 1)),
        Err(ProfileServiceError::DogNotFound(id)) if id == missing
    ));
}
