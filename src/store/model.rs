//! Lead records as persisted and shown to the admin.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intake::request::QuoteRequest;

/// Where a lead is in the sales process.
///
/// Any status may be set at any time; there is no enforced ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [Self::New, Self::Contacted, Self::Quoted, Self::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Quoted => "quoted",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    /// Exact, case-sensitive wire values only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "quoted" => Ok(Self::Quoted),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Unknown status: {s}")),
        }
    }
}

/// A stored quote request, flattened to strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    pub date_of_birth: String,
    pub annual_income: String,
    pub health_status: String,
    pub medications: String,
    /// One-line summary of the dependents; empty when none were listed.
    pub dependents: String,
    pub desired_budget: String,
    pub coverage_type: String,
    pub additional_info: String,
    pub referred_by: bool,
    pub referral_name: String,
    pub status: LeadStatus,
    pub source: String,
    pub agent_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// A fresh `new` lead built from a validated request.
    pub fn from_request(request: &QuoteRequest, source: &str, agent_name: &str) -> Self {
        // Stored timestamps carry microseconds.
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: Uuid::new_v4(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            zip_code: request.zip_code.trim().to_string(),
            date_of_birth: request.date_of_birth.trim().to_string(),
            annual_income: request.annual_income.clone(),
            health_status: request.health_status.clone(),
            medications: request.medications.clone(),
            dependents: request.dependents_summary(),
            desired_budget: request.desired_budget.clone(),
            coverage_type: request.coverage_type.clone(),
            additional_info: request.additional_info.clone(),
            referred_by: request.referred_by,
            referral_name: if request.referred_by {
                request.referral_name.trim().to_string()
            } else {
                String::new()
            },
            status: LeadStatus::New,
            source: source.to_string(),
            agent_name: agent_name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Lead totals per status, plus the overall total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub new: usize,
    pub contacted: usize,
    pub quoted: usize,
    pub closed: usize,
}

impl StatusCounts {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a SubmissionRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.all += 1;
            match record.status {
                LeadStatus::New => counts.new += 1,
                LeadStatus::Contacted => counts.contacted += 1,
                LeadStatus::Quoted => counts.quoted += 1,
                LeadStatus::Closed => counts.closed += 1,
            }
        }
        counts
    }
}
