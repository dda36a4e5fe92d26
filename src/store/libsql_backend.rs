//! libSQL backend: async `LeadStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::model::{LeadStatus, SubmissionRecord};
use crate::store::traits::LeadStore;

/// libSQL lead store.
///
/// One shared connection serves every request.
pub struct LibSqlBackend {
    /// Never read; holding it keeps the database open for `conn`.
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open the lead database at `path`, creating it and its directory if needed.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("create {}: {e}", parent.display()))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("open {}: {e}", path.display())))?;

        let backend = Self::from_database(db)?;
        backend.init_schema().await?;
        info!(path = %path.display(), "Lead database opened");
        Ok(backend)
    }

    /// Throwaway in-memory store.
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("open in-memory database: {e}"))
            })?;

        let backend = Self::from_database(db)?;
        backend.init_schema().await?;
        Ok(backend)
    }

    fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("connect: {e}")))?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Row mapping ─────────────────────────────────────────────────────

const SUBMISSION_COLUMNS: &str = "id, first_name, last_name, email, phone, zip_code, \
     date_of_birth, annual_income, health_status, medications, dependents, desired_budget, \
     coverage_type, additional_info, referred_by, referral_name, status, source, agent_name, \
     created_at, updated_at";

/// Canonical write format. Fixed precision keeps text ordering chronological.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Stored timestamps are RFC 3339; rows edited by hand may use SQLite's `datetime()` form.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn row_to_submission(row: &libsql::Row) -> Result<SubmissionRecord, DatabaseError> {
    let text = |idx: i32| -> String { row.get::<String>(idx).unwrap_or_default() };

    let id_str: String = row
        .get(0)
        .map_err(|e| DatabaseError::Query(format!("submission id: {e}")))?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Query(format!("invalid submission id {id_str}: {e}")))?;

    // Unknown statuses from manual edits fall back to `new`.
    let status: LeadStatus = text(16).parse().unwrap_or_default();

    Ok(SubmissionRecord {
        id,
        first_name: text(1),
        last_name: text(2),
        email: text(3),
        phone: text(4),
        zip_code: text(5),
        date_of_birth: text(6),
        annual_income: text(7),
        health_status: text(8),
        medications: text(9),
        dependents: text(10),
        desired_budget: text(11),
        coverage_type: text(12),
        additional_info: text(13),
        referred_by: row.get::<i64>(14).unwrap_or(0) != 0,
        referral_name: text(15),
        status,
        source: text(17),
        agent_name: text(18),
        created_at: parse_datetime(&text(19)),
        updated_at: parse_datetime(&text(20)),
    })
}

#[async_trait]
impl LeadStore for LibSqlBackend {
    async fn init_schema(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn insert_submission(&self, record: &SubmissionRecord) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO submissions ({SUBMISSION_COLUMNS}) VALUES \
                     (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
                     ?17, ?18, ?19, ?20, ?21)"
                ),
                params![
                    record.id.to_string(),
                    record.first_name.clone(),
                    record.last_name.clone(),
                    record.email.clone(),
                    record.phone.clone(),
                    record.zip_code.clone(),
                    record.date_of_birth.clone(),
                    record.annual_income.clone(),
                    record.health_status.clone(),
                    record.medications.clone(),
                    record.dependents.clone(),
                    record.desired_budget.clone(),
                    record.coverage_type.clone(),
                    record.additional_info.clone(),
                    i64::from(record.referred_by),
                    record.referral_name.clone(),
                    record.status.as_str(),
                    record.source.clone(),
                    record.agent_name.clone(),
                    format_datetime(&record.created_at),
                    format_datetime(&record.updated_at),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("insert_submission: {e}")))?;

        debug!(submission_id = %record.id, "Submission inserted into DB");
        Ok(())
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SUBMISSION_COLUMNS} FROM submissions \
                     ORDER BY created_at DESC, rowid DESC"
                ),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_submissions: {e}")))?;

        let mut submissions = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("list_submissions: {e}")))?
        {
            submissions.push(row_to_submission(&row)?);
        }
        Ok(submissions)
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_submission: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_submission(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_submission: {e}"))),
        }
    }

    async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<(), DatabaseError> {
        let now = format_datetime(&Utc::now());
        let affected = self
            .conn()
            .execute(
                "UPDATE submissions SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), now, id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("update_status: {e}")))?;

        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "submission".into(),
                id: id.to_string(),
            });
        }

        debug!(submission_id = %id, status = %status, "Submission status updated in DB");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::intake::request::QuoteRequest;

    fn record(first: &str) -> SubmissionRecord {
        let request = QuoteRequest {
            first_name: first.into(),
            last_name: "Doe".into(),
            email: format!("{}@example.com", first.to_lowercase()),
            referred_by: true,
            referral_name: "Sam Smith".into(),
            ..Default::default()
        };
        SubmissionRecord::from_request(&request, "website_quote_form", "Licensed Agent")
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let store = LibSqlBackend::new_memory().await.unwrap();
        let rec = record("Jane");
        store.insert_submission(&rec).await.unwrap();

        let loaded = store.get_submission(rec.id).await.unwrap().unwrap();
        assert_eq!(loaded.first_name, "Jane");
        assert_eq!(loaded.email, "jane@example.com");
        assert!(loaded.referred_by);
        assert_eq!(loaded.referral_name, "Sam Smith");
        assert_eq!(loaded.status, LeadStatus::New);
        assert_eq!(loaded.agent_name, "Licensed Agent");
        assert_eq!(loaded.created_at, rec.created_at);
    }

    #[tokio::test]
    async fn get_unknown_returns_none() {
        let store = LibSqlBackend::new_memory().await.unwrap();
        assert!(store.get_submission(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = LibSqlBackend::new_memory().await.unwrap();

        let mut older = record("Older");
        older.created_at = Utc::now() - Duration::hours(2);
        let mut newest = record("Newest");
        newest.created_at = Utc::now();
        let mut middle = record("Middle");
        middle.created_at = Utc::now() - Duration::hours(1);

        store.insert_submission(&older).await.unwrap();
        store.insert_submission(&newest).await.unwrap();
        store.insert_submission(&middle).await.unwrap();

        let names: Vec<String> = store
            .list_submissions()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.first_name)
            .collect();
        assert_eq!(names, vec!["Newest", "Middle", "Older"]);
    }

    #[tokio::test]
    async fn update_status_bumps_updated_at() {
        let store = LibSqlBackend::new_memory().await.unwrap();
        let mut rec = record("Jane");
        rec.updated_at = Utc::now() - Duration::days(1);
        store.insert_submission(&rec).await.unwrap();

        store
            .update_status(rec.id, LeadStatus::Contacted)
            .await
            .unwrap();
        // Any status may follow any other.
        store.update_status(rec.id, LeadStatus::New).await.unwrap();
        store
            .update_status(rec.id, LeadStatus::Closed)
            .await
            .unwrap();

        let loaded = store.get_submission(rec.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, LeadStatus::Closed);
        assert!(loaded.updated_at > rec.updated_at);
        assert_eq!(loaded.created_at, rec.created_at);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let store = LibSqlBackend::new_memory().await.unwrap();
        let err = store
            .update_status(Uuid::new_v4(), LeadStatus::Quoted)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn local_file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("leads.db");

        let rec = record("Jane");
        {
            let store = LibSqlBackend::new_local(&path).await.unwrap();
            store.insert_submission(&rec).await.unwrap();
        }

        let reopened = LibSqlBackend::new_local(&path).await.unwrap();
        let all = reopened.list_submissions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, rec.id);
    }
}
