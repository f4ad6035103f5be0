use crate::db;
use crate::model::{NewStudent, StudentRecord, Subject};
use crate::rules::derive_status;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("insert failed: {0}")]
    Insert(String),
    #[error("update failed: {0}")]
    Update(String),
    #[error("delete failed: {0}")]
    Delete(String),
    #[error("student not found: {0}")]
    NotFound(i64),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Open(_) => "db_open_failed",
            StoreError::Query(_) => "db_query_failed",
            StoreError::Insert(_) => "db_insert_failed",
            StoreError::Update(_) => "db_update_failed",
            StoreError::Delete(_) => "db_delete_failed",
            StoreError::NotFound(_) => "not_found",
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized subject in database: {0}")]
struct BadSubject(String);

const SELECT_COLUMNS: &str = "SELECT id, name, age, subject, marks FROM students";

/// Record store for one workspace. Holds only the database location: every call
/// opens its own connection, runs a single statement and lets the connection drop.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Prepares the workspace (directory and schema) and returns a store for it.
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        let conn = db::open_db(workspace)?;
        drop(conn);
        Ok(Store {
            db_path: db::db_path(workspace),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        db::connect(&self.db_path).map_err(|e| StoreError::Open(e.to_string()))
    }

    /// Inserts a validated student. Status is derived here from the marks;
    /// callers cannot supply one.
    pub fn create(&self, student: &NewStudent) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        let status = derive_status(student.marks);
        conn.execute(
            "INSERT INTO students(name, age, subject, marks, status) VALUES(?, ?, ?, ?, ?)",
            (
                &student.name,
                student.age,
                student.subject.as_str(),
                student.marks,
                status.as_str(),
            ),
        )
        .map_err(|e| StoreError::Insert(e.to_string()))?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, subject = %student.subject, %status, "student created");
        Ok(id)
    }

    pub fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let rows = stmt
            .query_map([], record_from_row)
            .and_then(|it| it.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(rows)
    }

    pub fn get(&self, id: i64) -> Result<Option<StudentRecord>, StoreError> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?"),
            [id],
            record_from_row,
        )
        .optional()
        .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// Rewrites marks and the derived status together so the persisted status never goes stale.
    pub fn update_marks(&self, id: i64, marks: f64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let status = derive_status(marks);
        let changed = conn
            .execute(
                "UPDATE students SET marks = ?, status = ? WHERE id = ?",
                (marks, status.as_str(), id),
            )
            .map_err(|e| StoreError::Update(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(id, marks, %status, "marks updated");
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn
            .execute("DELETE FROM students WHERE id = ?", [id])
            .map_err(|e| StoreError::Delete(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(id, "student deleted");
        Ok(())
    }
}

// The persisted status column is not read back: status always follows marks.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<StudentRecord> {
    let subject_raw: String = row.get(3)?;
    let subject = Subject::parse(&subject_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(BadSubject(subject_raw)))
    })?;
    let marks: f64 = row.get(4)?;
    Ok(StudentRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        subject,
        marks,
        status: derive_status(marks),
    })
}
