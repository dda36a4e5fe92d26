//! Form data model: applicant fields, dependents, and field selectors.

use serde::{Deserialize, Serialize};

/// Answer choices offered by the categorical fields.
pub const ANNUAL_INCOME_OPTIONS: &[&str] = &[
    "Under $25,000",
    "$25,000 - $50,000",
    "$50,000 - $75,000",
    "$75,000 - $100,000",
    "$100,000 - $150,000",
    "Over $150,000",
];

pub const HEALTH_STATUS_OPTIONS: &[&str] = &["Excellent", "Good", "Fair", "Poor"];

pub const BUDGET_OPTIONS: &[&str] = &[
    "Under $100",
    "$100 - $200",
    "$200 - $300",
    "$300 - $500",
    "Over $500",
];

pub const COVERAGE_TYPE_OPTIONS: &[&str] = &[
    "Health Insurance",
    "Life Insurance",
    "Both Life & Health",
    "Other",
];

/// Everything the applicant has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    // Personal info
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    // Location & income
    pub zip_code: String,
    pub date_of_birth: String,
    pub annual_income: String,

    // Health
    pub health_status: String,
    pub medications: String,

    pub dependents: DependentList,

    // Budget & coverage
    pub desired_budget: String,
    pub coverage_type: String,
    pub additional_info: String,

    // Referral
    pub referred_by: bool,
    pub referral_name: String,
}

impl FormData {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::ZipCode => &self.zip_code,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::AnnualIncome => &self.annual_income,
            FormField::HealthStatus => &self.health_status,
            FormField::Medications => &self.medications,
            FormField::DesiredBudget => &self.desired_budget,
            FormField::CoverageType => &self.coverage_type,
            FormField::AdditionalInfo => &self.additional_info,
            FormField::ReferralName => &self.referral_name,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::ZipCode => &mut self.zip_code,
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::AnnualIncome => &mut self.annual_income,
            FormField::HealthStatus => &mut self.health_status,
            FormField::Medications => &mut self.medications,
            FormField::DesiredBudget => &mut self.desired_budget,
            FormField::CoverageType => &mut self.coverage_type,
            FormField::AdditionalInfo => &mut self.additional_info,
            FormField::ReferralName => &mut self.referral_name,
        };
        *slot = value.into();
    }

    /// True when the field holds something other than whitespace.
    pub fn is_filled(&self, field: FormField) -> bool {
        !self.field(field).trim().is_empty()
    }
}

/// Text fields of the applicant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    ZipCode,
    DateOfBirth,
    AnnualIncome,
    HealthStatus,
    Medications,
    DesiredBudget,
    CoverageType,
    AdditionalInfo,
    ReferralName,
}

impl FormField {
    /// The camelCase key used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ZipCode => "zipCode",
            Self::DateOfBirth => "dateOfBirth",
            Self::AnnualIncome => "annualIncome",
            Self::HealthStatus => "healthStatus",
            Self::Medications => "medications",
            Self::DesiredBudget => "desiredBudget",
            Self::CoverageType => "coverageType",
            Self::AdditionalInfo => "additionalInfo",
            Self::ReferralName => "referralName",
        }
    }

    /// Human label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::ZipCode => "ZIP Code",
            Self::DateOfBirth => "Date of Birth",
            Self::AnnualIncome => "Annual Household Income",
            Self::HealthStatus => "Overall Health Status",
            Self::Medications => "Current Medications",
            Self::DesiredBudget => "Desired Monthly Budget",
            Self::CoverageType => "Coverage Type",
            Self::AdditionalInfo => "Additional Information",
            Self::ReferralName => "Who referred you?",
        }
    }

    /// Fixed answer choices, if the field is categorical.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::AnnualIncome => Some(ANNUAL_INCOME_OPTIONS),
            Self::HealthStatus => Some(HEALTH_STATUS_OPTIONS),
            Self::DesiredBudget => Some(BUDGET_OPTIONS),
            Self::CoverageType => Some(COVERAGE_TYPE_OPTIONS),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ── Dependents ──────────────────────────────────────────────────────

/// Session-local dependent key. Allocated by [`DependentList::add`] and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependentId(pub u64);

impl std::fmt::Display for DependentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dep-{}", self.0)
    }
}

/// How a dependent is related to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    Spouse,
    Child,
    Other,
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spouse => write!(f, "Spouse"),
            Self::Child => write!(f, "Child"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Relationship {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spouse" => Ok(Self::Spouse),
            "child" => Ok(Self::Child),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown relationship: {s}")),
        }
    }
}

/// A family member listed for coverage alongside the applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    pub id: DependentId,
    pub name: String,
    pub relationship: Option<Relationship>,
    pub date_of_birth: String,
}

impl Dependent {
    pub fn new(id: DependentId) -> Self {
        Self {
            id,
            name: String::new(),
            relationship: None,
            date_of_birth: String::new(),
        }
    }
}

/// Editable fields of a [`Dependent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentField {
    Name,
    Relationship,
    DateOfBirth,
}

/// Ordered dependents plus the id counter that keys them.
#[derive(Debug, Clone, Default)]
pub struct DependentList {
    pub(crate) entries: Vec<Dependent>,
    pub(crate) next_id: u64,
}

impl PartialEq for DependentList {
    /// Lists compare by their entries; the id counter is bookkeeping.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for DependentList {}
