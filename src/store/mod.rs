//! Persistence layer: libSQL-backed storage for quote submissions.

pub mod libsql_backend;
pub mod migrations;
pub mod model;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use model::{LeadStatus, StatusCounts, SubmissionRecord};
pub use traits::LeadStore;
