//! Client side of the submission pipeline: POST the form, interpret the reply.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::machine::{QuoteForm, SubmitOutcome, SubmitStatus};
use crate::error::{FormError, SubmitError};
use crate::intake::request::{QuoteRequest, SUBMIT_QUOTE_PATH};

/// Raw HTTP reply from the submission endpoint.
#[derive(Debug, Clone)]
pub struct EndpointReply {
    pub status: u16,
    pub body: Value,
}

/// Where quote requests are sent.
#[async_trait]
pub trait QuoteEndpoint: Send + Sync {
    /// Send one request. Transport failures are errors; any HTTP status is a reply.
    async fn post_quote(&self, request: &QuoteRequest) -> Result<EndpointReply, SubmitError>;
}

/// `reqwest`-backed endpoint at `<base_url>/api/submit-quote`.
#[derive(Debug, Clone)]
pub struct HttpQuoteEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoteEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{SUBMIT_QUOTE_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuoteEndpoint for HttpQuoteEndpoint {
    async fn post_quote(&self, request: &QuoteRequest) -> Result<EndpointReply, SubmitError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SubmitError::Http(e.to_string()))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| SubmitError::InvalidResponse(e.to_string()))?
        };

        debug!(status, url = %self.url, "Quote endpoint replied");
        Ok(EndpointReply { status, body })
    }
}

/// Map an endpoint reply onto what the user should see.
pub fn interpret(reply: &EndpointReply) -> SubmitOutcome {
    let text = |key: &str| reply.body.get(key).and_then(Value::as_str).map(str::to_string);

    match reply.status {
        200..=299 => SubmitOutcome::Accepted {
            message: text("message")
                .unwrap_or_else(|| "Quote request submitted successfully".to_string()),
        },
        400 => match text("error") {
            Some(message) => SubmitOutcome::Rejected { message },
            None => SubmitOutcome::Failed {
                details: "400 without an error message".to_string(),
            },
        },
        status => SubmitOutcome::Failed {
            details: match (text("error"), text("details")) {
                (Some(error), Some(details)) => format!("{status}: {error} ({details})"),
                (Some(error), None) => format!("{status}: {error}"),
                _ => format!("HTTP {status}"),
            },
        },
    }
}

impl QuoteForm {
    /// Run one submission round trip: lock, send, record the verdict.
    ///
    /// Returns the form's new status. Fails without touching the network if
    /// the form cannot be submitted.
    pub async fn submit(&mut self, endpoint: &dyn QuoteEndpoint) -> Result<&SubmitStatus, FormError> {
        let request = self.begin_submission()?;
        let outcome = match endpoint.post_quote(&request).await {
            Ok(reply) => interpret(&reply),
            Err(e) => SubmitOutcome::Failed {
                details: e.to_string(),
            },
        };
        self.finish_submission(outcome)
    }
}
