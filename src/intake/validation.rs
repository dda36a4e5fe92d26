//! Server-side checks on an incoming quote request.

use std::sync::LazyLock;

use regex::Regex;

use super::request::QuoteRequest;
use crate::error::IntakeError;
use crate::form::model::FormField;

/// Fields every request must carry, in reporting order.
pub const REQUIRED_FIELDS: [FormField; 10] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Phone,
    FormField::ZipCode,
    FormField::DateOfBirth,
    FormField::AnnualIncome,
    FormField::HealthStatus,
    FormField::DesiredBudget,
    FormField::CoverageType,
];

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Wire names of every blank required field, in checklist order.
pub fn missing_fields(request: &QuoteRequest) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .filter(|field| request.field(**field).trim().is_empty())
        .map(|field| field.wire_name())
        .collect();

    if request.referred_by && request.referral_name.trim().is_empty() {
        missing.push(FormField::ReferralName.wire_name());
    }
    missing
}

/// Fail fast on the first class of problem: missing fields, then email shape.
pub fn validate(request: &QuoteRequest) -> Result<(), IntakeError> {
    let missing = missing_fields(request);
    if !missing.is_empty() {
        return Err(IntakeError::MissingFields(missing));
    }
    if !is_valid_email(&request.email) {
        return Err(IntakeError::InvalidEmail);
    }
    Ok(())
}
