//! Accept a quote request: validate, persist, notify.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::request::QuoteRequest;
use super::{templates, validation};
use crate::config::BusinessProfile;
use crate::error::IntakeError;
use crate::notify::{Mailer, OutgoingEmail};
use crate::store::{LeadStore, SubmissionRecord};

/// What happened to the side effects of an accepted request.
///
/// None of these affect the response; they exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeReceipt {
    /// Set when the lead was stored.
    pub submission_id: Option<Uuid>,
    pub owner_notified: bool,
    pub customer_notified: bool,
}

pub struct IntakeService {
    store: Option<Arc<dyn LeadStore>>,
    mailer: Arc<dyn Mailer>,
    business: BusinessProfile,
}

impl IntakeService {
    pub fn new(
        store: Option<Arc<dyn LeadStore>>,
        mailer: Arc<dyn Mailer>,
        business: BusinessProfile,
    ) -> Self {
        Self {
            store,
            mailer,
            business,
        }
    }

    pub fn business(&self) -> &BusinessProfile {
        &self.business
    }

    /// Validate the request, then run every side effect independently.
    ///
    /// Only validation can fail. Storage and email failures are logged.
    pub async fn process(&self, request: &QuoteRequest) -> Result<IntakeReceipt, IntakeError> {
        validation::validate(request)?;

        let submission_id = self.persist(request).await;

        let owner = templates::owner_notification(request, &self.business);
        let owner_notified = self.deliver("owner", &owner).await;

        let customer = templates::customer_confirmation(request, &self.business);
        let customer_notified = self.deliver("customer", &customer).await;

        info!(
            submission_id = ?submission_id,
            owner_notified,
            customer_notified,
            "Quote request accepted"
        );

        Ok(IntakeReceipt {
            submission_id,
            owner_notified,
            customer_notified,
        })
    }

    async fn persist(&self, request: &QuoteRequest) -> Option<Uuid> {
        let Some(store) = &self.store else {
            warn!("Lead store unavailable, submission not saved");
            return None;
        };

        let record = SubmissionRecord::from_request(
            request,
            &self.business.lead_source,
            &self.business.agent_name,
        );
        match store.insert_submission(&record).await {
            Ok(()) => Some(record.id),
            Err(e) => {
                warn!(error = %e, "Failed to save submission");
                None
            }
        }
    }

    async fn deliver(&self, kind: &str, email: &OutgoingEmail) -> bool {
        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    mailer = self.mailer.name(),
                    kind,
                    to = %email.to,
                    error = %e,
                    "Failed to send email"
                );
                false
            }
        }
    }
}
