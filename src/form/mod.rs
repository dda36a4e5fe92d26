//! Client-side quote form: steps, dependents, state machine, submission.

pub mod dependents;
pub mod machine;
pub mod model;
pub mod pipeline;
pub mod steps;

pub use machine::{QuoteForm, SubmitOutcome, SubmitStatus};
pub use model::{Dependent, DependentField, DependentId, DependentList, FormData, FormField};
pub use pipeline::{HttpQuoteEndpoint, QuoteEndpoint};
pub use steps::{StepId, is_step_valid};
