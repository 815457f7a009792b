//! Medical event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist events with category and sub-kind in their structured encoding.
//! - Answer "events of dog D (optionally of category C) in date order".
//!
//! # Invariants
//! - Category filtering runs after tolerant decoding, so rows stored with
//!   legacy labels (e.g. "Flea Treatment") still match their category.
//! - Ordering ties on `occurrence_date` resolve by insertion order.

use crate::classify::{decode_category, deserialize_sub_kind, encode_category, serialize_sub_kind};
use crate::model::dog::DogId;
use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::{MedicalEvent, MedicalEventId};
use crate::repo::columns::{
    column_bytes, date_to_db, ensure_changed, ensure_connection_ready, parse_optional_date,
    parse_required_date, parse_uuid,
};
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    dog_uuid,
    type_data,
    sub_kind_data,
    description,
    occurrence_date,
    expiration_date,
    reminder_date
FROM medical_events";

/// Sort order for event listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventSort {
    /// Most recent first (medical history screen).
    #[default]
    OccurrenceDesc,
    OccurrenceAsc,
}

/// Query options for listing one dog's events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalEventQuery {
    pub dog_id: DogId,
    pub category: Option<MedicalEventType>,
    pub sort: EventSort,
}

impl MedicalEventQuery {
    /// All events of `dog_id`, most recent first.
    pub fn for_dog(dog_id: DogId) -> Self {
        Self {
            dog_id,
            category: None,
            sort: EventSort::default(),
        }
    }

    pub fn with_category(mut self, category: MedicalEventType) -> Self {
        self.category = Some(category);
        self
    }

    pub fn sorted(mut self, sort: EventSort) -> Self {
        self.sort = sort;
        self
    }
}

/// Repository interface for medical events.
pub trait MedicalEventRepository {
    fn create_event(&self, event: &MedicalEvent) -> RepoResult<MedicalEventId>;
    fn update_event(&self, event: &MedicalEvent) -> RepoResult<()>;
    fn get_event(&self, id: MedicalEventId) -> RepoResult<Option<MedicalEvent>>;
    fn list_events(&self, query: &MedicalEventQuery) -> RepoResult<Vec<MedicalEvent>>;
    fn delete_event(&self, id: MedicalEventId) -> RepoResult<()>;
    /// Runs `work` as one unit: every write it makes through repositories
    /// sharing this store commits together, or none does.
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}

/// SQLite-backed medical event repository.
pub struct SqliteMedicalEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedicalEventRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MedicalEventRepository for SqliteMedicalEventRepository<'_> {
    fn create_event(&self, event: &MedicalEvent) -> RepoResult<MedicalEventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO medical_events (
                uuid,
                dog_uuid,
                type_data,
                sub_kind_data,
                description,
                occurrence_date,
                expiration_date,
                reminder_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                event.id.to_string(),
                event.dog_id.to_string(),
                encode_category(event.category),
                serialize_sub_kind(event.sub_kind.as_deref()),
                event.description.as_deref(),
                date_to_db(event.occurrence_date),
                event.expiration_date.map(date_to_db),
                event.reminder_date.map(date_to_db),
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &MedicalEvent) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE medical_events
             SET
                type_data = ?1,
                sub_kind_data = ?2,
                description = ?3,
                occurrence_date = ?4,
                expiration_date = ?5,
                reminder_date = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                encode_category(event.category),
                serialize_sub_kind(event.sub_kind.as_deref()),
                event.description.as_deref(),
                date_to_db(event.occurrence_date),
                event.expiration_date.map(date_to_db),
                event.reminder_date.map(date_to_db),
                event.id.to_string(),
            ],
        )?;

        ensure_changed(changed, "medical event", event.id)
    }

    fn get_event(&self, id: MedicalEventId) -> RepoResult<Option<MedicalEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_event_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_events(&self, query: &MedicalEventQuery) -> RepoResult<Vec<MedicalEvent>> {
        let order = match query.sort {
            EventSort::OccurrenceDesc => "occurrence_date DESC, rowid ASC",
            EventSort::OccurrenceAsc => "occurrence_date ASC, rowid ASC",
        };
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} WHERE dog_uuid = ?1 ORDER BY {order};"
        ))?;
        let mut rows = stmt.query([query.dog_id.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            let event = parse_event_row(row)?;
            if query.category.map_or(true, |category| event.category == category) {
                events.push(event);
            }
        }
        Ok(events)
    }

    fn delete_event(&self, id: MedicalEventId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM medical_events WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        ensure_changed(changed, "medical event", id)
    }

    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        // Dropping `tx` without commit rolls back.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work()?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<MedicalEvent> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "medical_events.uuid")?;
    let dog_uuid_text: String = row.get("dog_uuid")?;
    let dog_id = parse_uuid(&dog_uuid_text, "medical_events.dog_uuid")?;
    let occurrence_text: String = row.get("occurrence_date")?;

    let mut event = MedicalEvent {
        id,
        dog_id,
        category: decode_category(column_bytes(row, "type_data")?),
        sub_kind: deserialize_sub_kind(column_bytes(row, "sub_kind_data")?),
        description: row.get("description")?,
        occurrence_date: parse_required_date(&occurrence_text, "medical_events.occurrence_date")?,
        expiration_date: parse_optional_date(
            row.get("expiration_date")?,
            "medical_events.expiration_date",
            id,
        ),
        reminder_date: parse_optional_date(
            row.get("reminder_date")?,
            "medical_events.reminder_date",
            id,
        ),
    };
    // Stored sub-kinds on non-vaccine rows are stale; drop them on read.
    let category = event.category;
    event.set_category(category);
    Ok(event)
}
