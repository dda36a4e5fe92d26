//! Quote form state machine: current step, field values, submission status.
//!
//! Step transitions are guarded here rather than left to the renderer:
//! `next()` refuses to leave an incomplete step and `begin_submission()`
//! refuses to start a second request while one is in flight.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::model::{DependentField, DependentId, FormData, FormField};
use super::steps::{self, StepDef};
use crate::config::FallbackContact;
use crate::error::FormError;
use crate::intake::request::QuoteRequest;

/// How long the success banner stays up before returning to the landing page.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Shown when the endpoint fails for a reason the user cannot fix.
pub const GENERIC_FAILURE: &str = "We're sorry, but there was an issue submitting your quote request. \
     Please try again or contact us directly for assistance.";

/// Submission sub-state.
///
/// `Idle → Submitting → Success | Failed`, and `Failed → Submitting` on retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success {
        message: String,
        redirect_after: Duration,
    },
    Failed {
        message: String,
        contact: FallbackContact,
    },
}

/// What the endpoint said about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx.
    Accepted { message: String },
    /// 400: the message is shown to the user verbatim.
    Rejected { message: String },
    /// Anything else, including transport failures.
    Failed { details: String },
}

/// One applicant's pass through the quote form.
#[derive(Debug, Clone)]
pub struct QuoteForm {
    step: usize,
    data: FormData,
    status: SubmitStatus,
    contact: FallbackContact,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self::new(FallbackContact::default())
    }
}

impl QuoteForm {
    pub fn new(contact: FallbackContact) -> Self {
        Self {
            step: 1,
            data: FormData::default(),
            status: SubmitStatus::Idle,
            contact,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> &'static StepDef {
        &steps::STEPS[self.step - 1]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == steps::step_count()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn contact(&self) -> &FallbackContact {
        &self.contact
    }

    // ── Field edits ─────────────────────────────────────────────────

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set_field(field, value);
    }

    pub fn set_referred_by(&mut self, referred: bool) {
        self.data.referred_by = referred;
    }

    pub fn add_dependent(&mut self) -> DependentId {
        self.data.dependents.add()
    }

    pub fn update_dependent(&mut self, id: DependentId, field: DependentField, value: &str) {
        self.data.dependents.update(id, field, value);
    }

    pub fn remove_dependent(&mut self, id: DependentId) {
        self.data.dependents.remove(id);
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Whether the "Next" control should be enabled.
    pub fn can_advance(&self) -> bool {
        !self.is_last_step() && steps::is_step_valid(self.step, &self.data)
    }

    /// Move forward one step. State is unchanged on error.
    pub fn next(&mut self) -> Result<usize, FormError> {
        if self.is_last_step() {
            return Err(FormError::AtLastStep);
        }
        if !steps::is_step_valid(self.step, &self.data) {
            return Err(FormError::StepIncomplete(self.current_step().id));
        }
        self.step += 1;
        debug!(step = self.step, "Advanced to next step");
        Ok(self.step)
    }

    /// Move back one step; stays put on the first step.
    pub fn previous(&mut self) -> usize {
        if self.step > 1 {
            self.step -= 1;
            debug!(step = self.step, "Returned to previous step");
        }
        self.step
    }

    /// Jump to `target`. Backward jumps always succeed; forward jumps need
    /// every step being skipped over to be valid.
    pub fn go_to(&mut self, target: usize) -> Result<usize, FormError> {
        if steps::step_at(target).is_none() {
            return Err(FormError::UnknownStep(target));
        }
        if target > self.step
            && let Some(blocking) = self.first_invalid_step(self.step..target)
        {
            return Err(FormError::StepIncomplete(blocking.id));
        }
        self.step = target;
        Ok(self.step)
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Whether the "Submit" control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.check_submittable().is_ok()
    }

    fn check_submittable(&self) -> Result<(), FormError> {
        match self.status {
            SubmitStatus::Submitting => return Err(FormError::AlreadySubmitting),
            SubmitStatus::Success { .. } => return Err(FormError::AlreadySubmitted),
            SubmitStatus::Idle | SubmitStatus::Failed { .. } => {}
        }
        if !self.is_last_step() {
            return Err(FormError::NotOnLastStep);
        }
        match self.first_invalid_step(1..steps::step_count() + 1) {
            Some(blocking) => Err(FormError::StepIncomplete(blocking.id)),
            None => Ok(()),
        }
    }

    fn first_invalid_step(&self, numbers: std::ops::Range<usize>) -> Option<&'static StepDef> {
        numbers
            .filter(|n| !steps::is_step_valid(*n, &self.data))
            .find_map(steps::step_at)
    }

    /// Enter `Submitting` and hand back the payload to send.
    pub fn begin_submission(&mut self) -> Result<QuoteRequest, FormError> {
        self.check_submittable()?;
        self.status = SubmitStatus::Submitting;
        info!(dependents = self.data.dependents.len(), "Submitting quote request");
        Ok(QuoteRequest::from(&self.data))
    }

    /// Leave `Submitting` with the endpoint's verdict.
    pub fn finish_submission(&mut self, outcome: SubmitOutcome) -> Result<&SubmitStatus, FormError> {
        if self.status != SubmitStatus::Submitting {
            return Err(FormError::NotSubmitting);
        }
        self.status = match outcome {
            SubmitOutcome::Accepted { message } => {
                info!("Quote request accepted");
                SubmitStatus::Success {
                    message,
                    redirect_after: REDIRECT_DELAY,
                }
            }
            SubmitOutcome::Rejected { message } => {
                info!(reason = %message, "Quote request rejected");
                SubmitStatus::Failed {
                    message,
                    contact: self.contact.clone(),
                }
            }
            SubmitOutcome::Failed { details } => {
                warn!(details = %details, "Quote request failed");
                SubmitStatus::Failed {
                    message: GENERIC_FAILURE.to_string(),
                    contact: self.contact.clone(),
                }
            }
        };
        Ok(&self.status)
    }

    /// Discard everything and start over on step 1.
    pub fn reset(&mut self) {
        self.step = 1;
        self.data = FormData::default();
        self.status = SubmitStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::steps::StepId;

    fn fill_all(form: &mut QuoteForm) {
        form.set_field(FormField::FirstName, "Jane");
        form.set_field(FormField::LastName, "Doe");
        form.set_field(FormField::Email, "jane@example.com");
        form.set_field(FormField::Phone, "555-1212");
        form.set_field(FormField::ZipCode, "12345");
        form.set_field(FormField::DateOfBirth, "1990-01-01");
        form.set_field(FormField::AnnualIncome, "$50,000 - $75,000");
        form.set_field(FormField::HealthStatus, "Good");
        form.set_field(FormField::DesiredBudget, "$100 - $200");
        form.set_field(FormField::CoverageType, "Health Insurance");
    }

    fn at_last_step() -> QuoteForm {
        let mut form = QuoteForm::default();
        fill_all(&mut form);
        while !form.is_last_step() {
            form.next().unwrap();
        }
        form
    }

    #[test]
    fn starts_idle_on_first_step() {
        let form = QuoteForm::default();
        assert_eq!(form.step(), 1);
        assert_eq!(form.current_step().id, StepId::PersonalInfo);
        assert_eq!(*form.status(), SubmitStatus::Idle);
        assert!(!form.can_advance());
    }

    #[test]
    fn next_refuses_incomplete_step() {
        let mut form = QuoteForm::default();
        form.set_field(FormField::FirstName, "Jane");

        let err = form.next().unwrap_err();
        assert_eq!(err, FormError::StepIncomplete(StepId::PersonalInfo));
        assert_eq!(form.step(), 1);
    }

    #[test]
    fn next_walks_to_last_step_then_stops() {
        let mut form = at_last_step();
        assert_eq!(form.step(), steps::step_count());
        assert!(!form.can_advance());
        assert_eq!(form.next().unwrap_err(), FormError::AtLastStep);
        assert_eq!(form.step(), steps::step_count());
    }

    #[test]
    fn previous_stops_at_first_step() {
        let mut form = QuoteForm::default();
        assert_eq!(form.previous(), 1);

        let mut form = at_last_step();
        assert_eq!(form.previous(), steps::step_count() - 1);
    }

    #[test]
    fn go_to_backward_always_allowed() {
        let mut form = at_last_step();
        form.set_field(FormField::FirstName, "");
        assert_eq!(form.go_to(1).unwrap(), 1);
    }

    #[test]
    fn go_to_forward_requires_skipped_steps() {
        let mut form = QuoteForm::default();
        fill_all(&mut form);
        form.set_field(FormField::HealthStatus, "");

        assert_eq!(
            form.go_to(5).unwrap_err(),
            FormError::StepIncomplete(StepId::HealthStatus)
        );
        assert_eq!(form.go_to(3).unwrap(), 3);
        assert_eq!(form.go_to(0).unwrap_err(), FormError::UnknownStep(0));
        assert_eq!(form.go_to(99).unwrap_err(), FormError::UnknownStep(99));
    }

    #[test]
    fn submit_only_from_last_step() {
        let mut form = QuoteForm::default();
        fill_all(&mut form);
        assert!(!form.can_submit());
        assert_eq!(form.begin_submission().unwrap_err(), FormError::NotOnLastStep);
        assert_eq!(*form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn submit_blocked_when_earlier_field_cleared() {
        let mut form = at_last_step();
        form.set_field(FormField::Email, " ");

        assert_eq!(
            form.begin_submission().unwrap_err(),
            FormError::StepIncomplete(StepId::PersonalInfo)
        );
    }

    #[test]
    fn submit_blocked_by_missing_referral_name() {
        let mut form = at_last_step();
        form.set_referred_by(true);
        assert!(!form.can_submit());

        form.set_field(FormField::ReferralName, "Pat Smith");
        assert!(form.can_submit());
    }

    #[test]
    fn duplicate_submission_is_refused() {
        let mut form = at_last_step();
        let request = form.begin_submission().unwrap();
        assert_eq!(request.first_name, "Jane");
        assert_eq!(*form.status(), SubmitStatus::Submitting);
        assert!(!form.can_submit());

        assert_eq!(form.begin_submission().unwrap_err(), FormError::AlreadySubmitting);
    }

    #[test]
    fn success_blocks_resubmission_until_reset() {
        let mut form = at_last_step();
        form.begin_submission().unwrap();
        form.finish_submission(SubmitOutcome::Accepted {
            message: "ok".into(),
        })
        .unwrap();

        assert!(!form.can_submit());
        assert_eq!(form.begin_submission().unwrap_err(), FormError::AlreadySubmitted);
        assert!(matches!(form.status(), SubmitStatus::Success { .. }));

        form.reset();
        assert_eq!(*form.status(), SubmitStatus::Idle);
        assert_eq!(form.step(), 1);
    }

    #[test]
    fn accepted_sets_success_with_redirect() {
        let mut form = at_last_step();
        form.begin_submission().unwrap();
        let status = form
            .finish_submission(SubmitOutcome::Accepted {
                message: "ok".into(),
            })
            .unwrap();

        assert_eq!(
            *status,
            SubmitStatus::Success {
                message: "ok".into(),
                redirect_after: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn rejection_is_shown_verbatim_with_contact() {
        let mut form = at_last_step();
        form.begin_submission().unwrap();
        form.finish_submission(SubmitOutcome::Rejected {
            message: "Invalid email address".into(),
        })
        .unwrap();

        match form.status() {
            SubmitStatus::Failed { message, contact } => {
                assert_eq!(message, "Invalid email address");
                assert_eq!(*contact, FallbackContact::default());
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn failure_uses_generic_message_and_allows_retry() {
        let mut form = at_last_step();
        form.begin_submission().unwrap();
        form.finish_submission(SubmitOutcome::Failed {
            details: "connection refused".into(),
        })
        .unwrap();

        match form.status() {
            SubmitStatus::Failed { message, .. } => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected status {other:?}"),
        }

        assert!(form.can_submit());
        form.begin_submission().unwrap();
        assert_eq!(*form.status(), SubmitStatus::Submitting);
    }

    #[test]
    fn finish_without_begin_is_an_error() {
        let mut form = at_last_step();
        let err = form
            .finish_submission(SubmitOutcome::Accepted {
                message: "ok".into(),
            })
            .unwrap_err();
        assert_eq!(err, FormError::NotSubmitting);
    }

    #[test]
    fn edits_allowed_while_submitting() {
        let mut form = at_last_step();
        form.begin_submission().unwrap();
        let id = form.add_dependent();
        form.update_dependent(id, DependentField::Name, "Ann");
        assert_eq!(form.data().dependents.len(), 1);
    }

    #[test]
    fn reset_discards_everything() {
        let mut form = at_last_step();
        form.add_dependent();
        form.begin_submission().unwrap();
        form.finish_submission(SubmitOutcome::Accepted {
            message: "ok".into(),
        })
        .unwrap();

        form.reset();
        assert_eq!(form.step(), 1);
        assert_eq!(*form.data(), FormData::default());
        assert_eq!(*form.status(), SubmitStatus::Idle);
    }
}
