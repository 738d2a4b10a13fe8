mod queries;

use std::fs;
use std::path::PathBuf;

use pdfpreview_application::{ApplicationError, FileCatalog, NewSourceFile, UpsertSourceResult};
use pdfpreview_domain::{SourceDocument, SourceId};
use rusqlite::Connection;

use crate::migrations::MIGRATIONS;

/// File records plus the fingerprint last observed for each, so an update
/// can be compared against the stored "before" snapshot.
#[derive(Debug, Clone)]
pub struct SqliteFileCatalog {
    path: PathBuf,
}

impl SqliteFileCatalog {
    pub fn new(path: String) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn open_connection(&self) -> Result<Connection, ApplicationError> {
        Connection::open(&self.path)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}

fn persistence(error: rusqlite::Error) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}

impl FileCatalog for SqliteFileCatalog {
    fn initialize(&self) -> Result<(), ApplicationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "catalog path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let conn = self.open_connection()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(persistence)?;

        for migration in MIGRATIONS {
            conn.execute_batch(migration).map_err(persistence)?;
        }

        Ok(())
    }

    fn register(&self, file: &NewSourceFile) -> Result<UpsertSourceResult, ApplicationError> {
        let conn = self.open_connection()?;
        let uri = file.uri.to_string();
        let inserted = queries::insert_file_if_missing(
            &conn,
            &uri,
            &file.filename,
            &file.mime_type,
            file.description.as_deref(),
            &file.fingerprint,
        )
        .map_err(persistence)?;

        let row = queries::find_file_by_uri(&conn, &uri)
            .map_err(persistence)?
            .ok_or_else(|| ApplicationError::Persistence(format!("file vanished: {uri}")))?;
        Ok(UpsertSourceResult {
            source: row.into_document()?,
            inserted,
        })
    }

    fn save(&self, source: &SourceDocument) -> Result<(), ApplicationError> {
        let conn = self.open_connection()?;
        let updated = queries::update_file(&conn, source).map_err(persistence)?;
        if updated == 0 {
            return Err(ApplicationError::NotFound(format!(
                "file not found for id={}",
                source.id.get()
            )));
        }
        Ok(())
    }

    fn find(&self, id: SourceId) -> Result<Option<SourceDocument>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::find_file_by_id(&conn, id.get())
            .map_err(persistence)?
            .map(|row| row.into_document().map_err(ApplicationError::from))
            .transpose()
    }

    fn list(&self) -> Result<Vec<SourceDocument>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::list_files(&conn)
            .map_err(persistence)?
            .into_iter()
            .map(|row| row.into_document().map_err(ApplicationError::from))
            .collect()
    }

    fn remove(&self, id: SourceId) -> Result<bool, ApplicationError> {
        let conn = self.open_connection()?;
        queries::delete_file(&conn, id.get()).map_err(persistence)
    }
}
