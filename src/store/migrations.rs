//! Numbered schema migrations for the lead database.
//!
//! Applied versions are recorded in `_migrations`. Each pending migration
//! runs in its own transaction together with its bookkeeping row.

use chrono::Utc;
use libsql::Connection;
use tracing::info;

use crate::error::DatabaseError;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// Append only. Versions must increase.
static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "submissions",
        sql: r#"
            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                zip_code TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                annual_income TEXT NOT NULL,
                health_status TEXT NOT NULL,
                medications TEXT NOT NULL DEFAULT '',
                dependents TEXT NOT NULL DEFAULT '',
                desired_budget TEXT NOT NULL,
                coverage_type TEXT NOT NULL,
                additional_info TEXT NOT NULL DEFAULT '',
                referred_by INTEGER NOT NULL DEFAULT 0,
                referral_name TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'new',
                source TEXT NOT NULL,
                agent_name TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_submissions_created_at ON submissions(created_at);
            CREATE INDEX IF NOT EXISTS idx_submissions_status ON submissions(status);
        "#,
    },
];

/// Latest version this build knows about.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Bring the schema up to [`latest_version`].
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        (),
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("create _migrations: {e}")))?;

    let applied = schema_version(conn).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > applied).collect();
    if pending.is_empty() {
        return Ok(());
    }

    for migration in pending {
        apply(conn, migration).await?;
    }
    info!(version = latest_version(), "Lead schema up to date");
    Ok(())
}

async fn apply(conn: &Connection, migration: &Migration) -> Result<(), DatabaseError> {
    let fail = |stage: &str, e: libsql::Error| {
        DatabaseError::Migration(format!(
            "V{} {} ({stage}): {e}",
            migration.version, migration.name
        ))
    };

    info!(version = migration.version, name = migration.name, "Applying migration");
    let tx = conn.transaction().await.map_err(|e| fail("begin", e))?;
    tx.execute_batch(migration.sql)
        .await
        .map_err(|e| fail("schema", e))?;
    tx.execute(
        "INSERT INTO _migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
        libsql::params![migration.version, migration.name, Utc::now().to_rfc3339()],
    )
    .await
    .map_err(|e| fail("record", e))?;
    tx.commit().await.map_err(|e| fail("commit", e))
}

/// Highest recorded version; 0 for a fresh database.
pub async fn schema_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("read schema version: {e}")))?;

    let Some(row) = rows
        .next()
        .await
        .map_err(|e| DatabaseError::Migration(format!("read schema version: {e}")))?
    else {
        return Ok(0);
    };
    row.get::<i64>(0)
        .map_err(|e| DatabaseError::Migration(format!("parse schema version: {e}")))
}
