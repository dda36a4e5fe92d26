//! Server-side quote intake: the wire contract, validation, email templates,
//! and the service that ties them to storage and mail.

pub mod request;
pub mod service;
pub mod templates;
pub mod validation;

pub use request::{DependentEntry, QuoteRequest, SUBMIT_QUOTE_PATH};
pub use service::{IntakeReceipt, IntakeService};
pub use validation::{REQUIRED_FIELDS, validate};
