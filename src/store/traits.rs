//! `LeadStore` trait: async interface over persisted quote requests.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{LeadStatus, SubmissionRecord};
use crate::error::DatabaseError;

/// Backend-agnostic lead persistence.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn init_schema(&self) -> Result<(), DatabaseError>;

    /// Insert a new submission.
    async fn insert_submission(&self, record: &SubmissionRecord) -> Result<(), DatabaseError>;

    /// All submissions, newest first by `created_at`.
    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, DatabaseError>;

    /// One submission by id.
    async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRecord>, DatabaseError>;

    /// Overwrite a submission's status and bump `updated_at`. Last writer wins.
    ///
    /// Returns `DatabaseError::NotFound` if no row has `id`.
    async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<(), DatabaseError>;
}
