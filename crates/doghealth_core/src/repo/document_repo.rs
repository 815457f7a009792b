//! Document record repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is deterministic: `title ASC (case-insensitive), uuid ASC`.
//! - Blank stored titles read back as "Untitled".

use crate::model::document::{normalize_title, Document, DocumentId};
use crate::model::dog::DogId;
use crate::repo::columns::{ensure_changed, ensure_connection_ready, parse_uuid};
use crate::repo::error::RepoResult;
use rusqlite::{params, Connection, Row};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    uuid,
    dog_uuid,
    title,
    location_ref
FROM documents";

/// Repository interface for document records.
pub trait DocumentRepository {
    fn create_document(&self, document: &Document) -> RepoResult<DocumentId>;
    fn get_document(&self, id: DocumentId) -> RepoResult<Option<Document>>;
    /// Lists one dog's documents sorted by title.
    fn list_documents(&self, dog_id: DogId) -> RepoResult<Vec<Document>>;
    fn delete_document(&self, id: DocumentId) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn create_document(&self, document: &Document) -> RepoResult<DocumentId> {
        document.validate()?;

        self.conn.execute(
            "INSERT INTO documents (uuid, dog_uuid, title, location_ref)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                document.id.to_string(),
                document.dog_id.to_string(),
                normalize_title(&document.title),
                document.location_ref.as_str(),
            ],
        )?;

        Ok(document.id)
    }

    fn get_document(&self, id: DocumentId) -> RepoResult<Option<Document>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_document_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_documents(&self, dog_id: DogId) -> RepoResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_SELECT_SQL}
             WHERE dog_uuid = ?1
             ORDER BY title COLLATE NOCASE ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([dog_id.to_string()])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }
        Ok(documents)
    }

    fn delete_document(&self, id: DocumentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE uuid = ?1;", [id.to_string()])?;
        ensure_changed(changed, "document", id)
    }
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let uuid_text: String = row.get("uuid")?;
    let dog_uuid_text: String = row.get("dog_uuid")?;
    let title: Option<String> = row.get("title")?;

    Ok(Document {
        id: parse_uuid(&uuid_text, "documents.uuid")?,
        dog_id: parse_uuid(&dog_uuid_text, "documents.dog_uuid")?,
        title: normalize_title(title.as_deref().unwrap_or_default()),
        location_ref: row.get("location_ref")?,
    })
}
