//! Dog repository contract and SQLite implementation.
//!
//! # Invariants
//! - `update_dog` writes profile fields only; `last_vet_visit` changes go
//!   through `set_last_vet_visit`, whose single caller is the medical event
//!   service.
//! - Listing is deterministic: `name ASC (case-insensitive), uuid ASC`.

use crate::model::dog::{Dog, DogId};
use crate::repo::columns::{
    date_to_db, ensure_changed, ensure_connection_ready, parse_optional_date, parse_uuid,
};
use crate::repo::error::RepoResult;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const DOG_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    birthday,
    weight,
    photo,
    last_vet_visit
FROM dogs";

/// Repository interface for dog profiles.
pub trait DogRepository {
    /// Inserts a new profile. The cached `last_vet_visit` starts empty.
    fn create_dog(&self, dog: &Dog) -> RepoResult<DogId>;
    /// Replaces name, birthday, weight and photo.
    fn update_dog(&self, dog: &Dog) -> RepoResult<()>;
    fn get_dog(&self, id: DogId) -> RepoResult<Option<Dog>>;
    /// Lists all profiles sorted by name.
    fn list_dogs(&self) -> RepoResult<Vec<Dog>>;
    /// Deletes a profile together with its events and documents.
    fn delete_dog(&self, id: DogId) -> RepoResult<()>;
    /// Overwrites the denormalized last vet visit cache.
    fn set_last_vet_visit(&self, id: DogId, date: Option<NaiveDate>) -> RepoResult<()>;
}

/// SQLite-backed dog repository.
pub struct SqliteDogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDogRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DogRepository for SqliteDogRepository<'_> {
    fn create_dog(&self, dog: &Dog) -> RepoResult<DogId> {
        dog.validate()?;

        self.conn.execute(
            "INSERT INTO dogs (
                uuid,
                name,
                birthday,
                weight,
                photo,
                last_vet_visit
            ) VALUES (?1, ?2, ?3, ?4, ?5, NULL);",
            params![
                dog.id.to_string(),
                dog.name.as_str(),
                dog.birthday.map(date_to_db),
                dog.weight,
                dog.photo.as_deref(),
            ],
        )?;

        Ok(dog.id)
    }

    fn update_dog(&self, dog: &Dog) -> RepoResult<()> {
        dog.validate()?;

        let changed = self.conn.execute(
            "UPDATE dogs
             SET
                name = ?1,
                birthday = ?2,
                weight = ?3,
                photo = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                dog.name.as_str(),
                dog.birthday.map(date_to_db),
                dog.weight,
                dog.photo.as_deref(),
                dog.id.to_string(),
            ],
        )?;

        ensure_changed(changed, "dog", dog.id)
    }

    fn get_dog(&self, id: DogId) -> RepoResult<Option<Dog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOG_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_dog_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_dogs(&self) -> RepoResult<Vec<Dog>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOG_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut dogs = Vec::new();
        while let Some(row) = rows.next()? {
            dogs.push(parse_dog_row(row)?);
        }
        Ok(dogs)
    }

    fn delete_dog(&self, id: DogId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM dogs WHERE uuid = ?1;", [id.to_string()])?;
        ensure_changed(changed, "dog", id)
    }

    fn set_last_vet_visit(&self, id: DogId, date: Option<NaiveDate>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE dogs
             SET
                last_vet_visit = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![date.map(date_to_db), id.to_string()],
        )?;
        ensure_changed(changed, "dog", id)
    }
}

fn parse_dog_row(row: &Row<'_>) -> RepoResult<Dog> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "dogs.uuid")?;

    Ok(Dog {
        id,
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        birthday: parse_optional_date(row.get("birthday")?, "dogs.birthday", id),
        weight: row.get("weight")?,
        photo: row.get("photo")?,
        last_vet_visit: parse_optional_date(row.get("last_vet_visit")?, "dogs.last_vet_visit", id),
    })
}
