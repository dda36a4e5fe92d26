//! End-to-end tests for the quote form against a live server.
//!
//! Each test spins up an Axum server on a random port, drives a `QuoteForm`
//! through the real `reqwest` pipeline, and checks the stored lead and the
//! emails that went out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use quote_desk::config::{BusinessProfile, FallbackContact};
use quote_desk::error::NotifyError;
use quote_desk::form::machine::GENERIC_FAILURE;
use quote_desk::form::{
    DependentField, FormField, HttpQuoteEndpoint, QuoteForm, SubmitStatus,
};
use quote_desk::intake::IntakeService;
use quote_desk::notify::{Mailer, OutgoingEmail};
use quote_desk::server::{AppState, router};
use quote_desk::store::{LeadStatus, LeadStore, LibSqlBackend};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

struct Server {
    base_url: String,
    store: Arc<LibSqlBackend>,
    mailer: Arc<RecordingMailer>,
}

/// Start an Axum server on a random port.
async fn start_server() -> Server {
    let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let mailer = Arc::new(RecordingMailer::default());
    let dyn_store: Arc<dyn LeadStore> = store.clone();
    let intake = IntakeService::new(
        Some(dyn_store.clone()),
        mailer.clone(),
        BusinessProfile::default(),
    );
    let app = router(AppState {
        intake: Arc::new(intake),
        store: Some(dyn_store),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        base_url: format!("http://127.0.0.1:{port}"),
        store,
        mailer,
    }
}

/// Walk every step with Jane Doe's answers, leaving the form on the last step.
fn fill_jane_doe(form: &mut QuoteForm) {
    form.set_field(FormField::FirstName, "Jane");
    form.set_field(FormField::LastName, "Doe");
    form.set_field(FormField::Email, "jane@example.com");
    form.set_field(FormField::Phone, "555-0100");
    form.next().unwrap();

    form.set_field(FormField::ZipCode, "90210");
    form.set_field(FormField::DateOfBirth, "1990-01-01");
    form.set_field(FormField::AnnualIncome, "$50,000 - $75,000");
    form.next().unwrap();

    form.set_field(FormField::HealthStatus, "Good");
    form.next().unwrap();

    let child = form.add_dependent();
    form.update_dependent(child, DependentField::Name, "Ben Doe");
    form.update_dependent(child, DependentField::Relationship, "Child");
    form.update_dependent(child, DependentField::DateOfBirth, "2015-06-01");
    form.next().unwrap();

    form.set_field(FormField::DesiredBudget, "$100 - $200/month");
    form.set_field(FormField::CoverageType, "Term Life");
    form.next().unwrap();

    form.set_referred_by(true);
    form.set_field(FormField::ReferralName, "Sam Smith");
}

#[tokio::test]
async fn jane_doe_end_to_end() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let endpoint = HttpQuoteEndpoint::new(&server.base_url);
        let mut form = QuoteForm::default();
        fill_jane_doe(&mut form);
        assert!(form.can_submit());

        let status = form.submit(&endpoint).await.unwrap().clone();
        match status {
            SubmitStatus::Success {
                message,
                redirect_after,
            } => {
                assert_eq!(message, "Quote request submitted successfully");
                assert_eq!(redirect_after, Duration::from_secs(5));
            }
            other => panic!("expected success, got {other:?}"),
        }

        let sent = server.mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "New Insurance Quote Request - Jane Doe");
        assert!(sent[0].text.contains("Ben Doe"));
        assert_eq!(sent[1].to, "jane@example.com");

        let leads = server.store.list_submissions().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].dependents, "Ben Doe (Child, 2015-06-01)");
        assert_eq!(leads[0].referral_name, "Sam Smith");
        assert_eq!(leads[0].status, LeadStatus::New);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn admin_can_move_a_lead_through_statuses() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let endpoint = HttpQuoteEndpoint::new(&server.base_url);
        let mut form = QuoteForm::default();
        fill_jane_doe(&mut form);
        form.submit(&endpoint).await.unwrap();

        let client = reqwest::Client::new();
        let list: Value = client
            .get(format!("{}/api/admin/submissions", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = list["data"][0]["id"].as_str().unwrap().to_string();

        for status in ["contacted", "quoted", "closed"] {
            let response = client
                .put(format!("{}/api/admin/submissions", server.base_url))
                .json(&serde_json::json!({ "id": id, "status": status }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 200);
        }

        let one: Value = client
            .get(format!("{}/api/admin/submissions/{id}", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(one["data"]["status"], "closed");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn server_rejection_is_shown_verbatim() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let endpoint = HttpQuoteEndpoint::new(&server.base_url);
        let mut form = QuoteForm::default();
        fill_jane_doe(&mut form);
        // Passes the client's non-blank check but not the server's email pattern.
        form.set_field(FormField::Email, "not-an-email");

        let status = form.submit(&endpoint).await.unwrap().clone();
        assert_eq!(
            status,
            SubmitStatus::Failed {
                message: "Invalid email address".into(),
                contact: FallbackContact::default(),
            }
        );
        assert!(server.mailer.sent.lock().unwrap().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_server_gives_generic_failure() {
    timeout(TEST_TIMEOUT, async {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let endpoint = HttpQuoteEndpoint::new(&format!("http://127.0.0.1:{port}"));
        let mut form = QuoteForm::default();
        fill_jane_doe(&mut form);

        let status = form.submit(&endpoint).await.unwrap().clone();
        match status {
            SubmitStatus::Failed { message, contact } => {
                assert_eq!(message, GENERIC_FAILURE);
                assert_eq!(contact, FallbackContact::default());
            }
            other => panic!("expected failure, got {other:?}"),
        }
        // A failed submission can be retried.
        assert!(form.can_submit());
    })
    .await
    .expect("test timed out");
}
