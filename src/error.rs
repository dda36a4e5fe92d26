//! Error types for Quote Desk.

use crate::form::steps::StepId;

/// Top-level error type for the service and wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Lead store errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Outbound email errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Send(String),
}

/// Request validation failures raised by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Client-side form state machine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Step {0} is incomplete")]
    StepIncomplete(StepId),

    #[error("Already on the last step")]
    AtLastStep,

    #[error("No step numbered {0}")]
    UnknownStep(usize),

    #[error("Submission is only possible from the last step")]
    NotOnLastStep,

    #[error("A submission is already in flight")]
    AlreadySubmitting,

    #[error("This quote request was already submitted")]
    AlreadySubmitted,

    #[error("No submission is in flight")]
    NotSubmitting,
}

/// Client-side transport failures while talking to the submission endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response from endpoint: {0}")]
    InvalidResponse(String),
}

/// Result type alias for Quote Desk.
pub type Result<T> = std::result::Result<T, Error>;
