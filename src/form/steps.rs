//! Step definitions: an ordered table of screens and their validators.
//!
//! The state machine walks [`STEPS`] by position; renderers read titles and
//! field lists from it. Nothing outside this table knows how many steps exist.

use super::model::{FormData, FormField};

/// Stable identity of a form screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    PersonalInfo,
    LocationIncome,
    HealthStatus,
    Dependents,
    BudgetCoverage,
    Referral,
}

impl StepId {
    /// 1-based position of this step in [`STEPS`].
    pub fn number(&self) -> usize {
        match self {
            Self::PersonalInfo => 1,
            Self::LocationIncome => 2,
            Self::HealthStatus => 3,
            Self::Dependents => 4,
            Self::BudgetCoverage => 5,
            Self::Referral => 6,
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(step(*self).title)
    }
}

/// One screen of the quote form.
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    /// Text fields rendered on this screen, in display order.
    pub fields: &'static [FormField],
    pub validator: fn(&FormData) -> bool,
}

pub static STEPS: &[StepDef] = &[
    StepDef {
        id: StepId::PersonalInfo,
        title: "Personal Info",
        description: "Basic contact information",
        fields: &[
            FormField::FirstName,
            FormField::LastName,
            FormField::Email,
            FormField::Phone,
        ],
        validator: personal_info_valid,
    },
    StepDef {
        id: StepId::LocationIncome,
        title: "Location & Income",
        description: "Where you live and your income",
        fields: &[
            FormField::ZipCode,
            FormField::DateOfBirth,
            FormField::AnnualIncome,
        ],
        validator: location_income_valid,
    },
    StepDef {
        id: StepId::HealthStatus,
        title: "Health Status",
        description: "Your current health information",
        fields: &[FormField::HealthStatus, FormField::Medications],
        validator: health_status_valid,
    },
    StepDef {
        id: StepId::Dependents,
        title: "Dependents",
        description: "Family members to include",
        fields: &[],
        validator: always_valid,
    },
    StepDef {
        id: StepId::BudgetCoverage,
        title: "Budget & Coverage",
        description: "Your coverage budget",
        fields: &[
            FormField::DesiredBudget,
            FormField::CoverageType,
            FormField::AdditionalInfo,
        ],
        validator: budget_coverage_valid,
    },
    StepDef {
        id: StepId::Referral,
        title: "Referral",
        description: "Tell us who sent you our way",
        fields: &[FormField::ReferralName],
        validator: referral_valid,
    },
];

/// Number of screens in the form.
pub fn step_count() -> usize {
    STEPS.len()
}

/// Look up a step by id.
pub fn step(id: StepId) -> &'static StepDef {
    &STEPS[id.number() - 1]
}

/// Look up a step by its 1-based number.
pub fn step_at(number: usize) -> Option<&'static StepDef> {
    number.checked_sub(1).and_then(|i| STEPS.get(i))
}

/// Whether the user may leave step `number` going forward.
///
/// Out-of-range step numbers are never valid.
pub fn is_step_valid(number: usize, data: &FormData) -> bool {
    step_at(number).is_some_and(|s| (s.validator)(data))
}

fn all_filled(data: &FormData, fields: &[FormField]) -> bool {
    fields.iter().all(|f| data.is_filled(*f))
}

fn personal_info_valid(data: &FormData) -> bool {
    all_filled(
        data,
        &[
            FormField::FirstName,
            FormField::LastName,
            FormField::Email,
            FormField::Phone,
        ],
    )
}

fn location_income_valid(data: &FormData) -> bool {
    all_filled(
        data,
        &[
            FormField::ZipCode,
            FormField::DateOfBirth,
            FormField::AnnualIncome,
        ],
    )
}

fn health_status_valid(data: &FormData) -> bool {
    data.is_filled(FormField::HealthStatus)
}

fn always_valid(_: &FormData) -> bool {
    true
}

fn budget_coverage_valid(data: &FormData) -> bool {
    all_filled(data, &[FormField::DesiredBudget, FormField::CoverageType])
}

fn referral_valid(data: &FormData) -> bool {
    !data.referred_by || data.is_filled(FormField::ReferralName)
}
