use pdfpreview_domain::{DomainError, Fingerprint, SourceDocument, SourceId, StorageUri};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const FILE_COLUMNS: &str =
    "id, uri, filename, mime_type, description, modified, size, content_hash";

/// A `files` row before its uri and id have been validated.
#[derive(Debug, Clone)]
pub struct FileRow {
    id: i64,
    uri: String,
    filename: String,
    mime_type: String,
    description: Option<String>,
    modified: i64,
    size: i64,
    content_hash: Option<String>,
}

impl FileRow {
    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uri: row.get(1)?,
            filename: row.get(2)?,
            mime_type: row.get(3)?,
            description: row.get(4)?,
            modified: row.get(5)?,
            size: row.get(6)?,
            content_hash: row.get(7)?,
        })
    }

    pub fn into_document(self) -> std::result::Result<SourceDocument, DomainError> {
        Ok(SourceDocument {
            id: SourceId::new(self.id)?,
            uri: StorageUri::parse(&self.uri)?,
            filename: self.filename,
            mime_type: self.mime_type,
            description: self.description,
            fingerprint: Fingerprint {
                modified: self.modified,
                size: u64::try_from(self.size).unwrap_or_default(),
                content_hash: self.content_hash,
            },
        })
    }
}

pub fn insert_file_if_missing(
    conn: &Connection,
    uri: &str,
    filename: &str,
    mime_type: &str,
    description: Option<&str>,
    fingerprint: &Fingerprint,
) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO files
         (uri, filename, mime_type, description, modified, size, content_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            uri,
            filename,
            mime_type,
            description,
            fingerprint.modified,
            size_column(fingerprint.size),
            fingerprint.content_hash,
        ],
    )?;
    Ok(inserted == 1)
}

pub fn update_file(conn: &Connection, source: &SourceDocument) -> Result<usize> {
    conn.execute(
        "UPDATE files SET
            uri = ?2,
            filename = ?3,
            mime_type = ?4,
            description = ?5,
            modified = ?6,
            size = ?7,
            content_hash = ?8
         WHERE id = ?1",
        params![
            source.id.get(),
            source.uri.to_string(),
            source.filename,
            source.mime_type,
            source.description,
            source.fingerprint.modified,
            size_column(source.fingerprint.size),
            source.fingerprint.content_hash,
        ],
    )
}

pub fn find_file_by_id(conn: &Connection, id: i64) -> Result<Option<FileRow>> {
    conn.query_row(
        &format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?1"),
        params![id],
        FileRow::from_row,
    )
    .optional()
}

pub fn find_file_by_uri(conn: &Connection, uri: &str) -> Result<Option<FileRow>> {
    conn.query_row(
        &format!("SELECT {FILE_COLUMNS} FROM files WHERE uri = ?1"),
        params![uri],
        FileRow::from_row,
    )
    .optional()
}

pub fn list_files(conn: &Connection) -> Result<Vec<FileRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {FILE_COLUMNS} FROM files ORDER BY id ASC"))?;
    let rows = stmt.query_map([], FileRow::from_row)?;
    rows.collect()
}

pub fn delete_file(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM files WHERE id = ?1", params![id])?;
    Ok(deleted == 1)
}

fn size_column(size: u64) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}
