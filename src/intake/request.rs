//! Wire contract for `POST /api/submit-quote`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::form::model::{FormData, FormField};

/// Path of the quote submission endpoint.
pub const SUBMIT_QUOTE_PATH: &str = "/api/submit-quote";

/// Flat camelCase quote payload. Absent and `null` fields decode as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "null_as_default")]
    pub annual_income: String,
    #[serde(deserialize_with = "null_as_default")]
    pub health_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub medications: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dependents: Vec<DependentEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub desired_budget: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coverage_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub referred_by: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub referral_name: String,
}

/// A dependent as sent over the wire: name, relationship, date of birth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependentEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relationship: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_birth: String,
}

/// `null` decodes like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl QuoteRequest {
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

    /// One-line summary of the dependents, e.g. `Ann Doe (Spouse, 1991-02-03); Ben Doe (Child, 2015-06-01)`.
    pub fn dependents_summary(&self) -> String {
        self.dependents
            .iter()
            .map(|d| {
                let relationship = if d.relationship.trim().is_empty() {
                    "Unspecified"
                } else {
                    d.relationship.trim()
                };
                let dob = if d.date_of_birth.trim().is_empty() {
                    "DOB unknown"
                } else {
                    d.date_of_birth.trim()
                };
                format!("{} ({relationship}, {dob})", d.name.trim())
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<&FormData> for QuoteRequest {
    fn from(data: &FormData) -> Self {
        Self {
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            zip_code: data.zip_code.clone(),
            date_of_birth: data.date_of_birth.clone(),
            annual_income: data.annual_income.clone(),
            health_status: data.health_status.clone(),
            medications: data.medications.clone(),
            dependents: data
                .dependents
                .iter()
                .map(|d| DependentEntry {
                    name: d.name.clone(),
                    relationship: d.relationship.map(|r| r.to_string()).unwrap_or_default(),
                    date_of_birth: d.date_of_birth.clone(),
                })
                .collect(),
            desired_budget: data.desired_budget.clone(),
            coverage_type: data.coverage_type.clone(),
            additional_info: data.additional_info.clone(),
            referred_by: data.referred_by,
            referral_name: data.referral_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::model::{DependentField, FormData};

    #[test]
    fn serializes_camel_case_keys() {
        let request = QuoteRequest {
            first_name: "Jane".into(),
            referred_by: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["referredBy"], true);
        assert!(json["dependents"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_keys_decode_as_blank() {
        let request: QuoteRequest = serde_json::from_str(r#"{"firstName":"Jane"}"#).unwrap();
        assert_eq!(request.first_name, "Jane");
        assert!(request.last_name.is_empty());
        assert!(!request.referred_by);
        assert!(request.dependents.is_empty());
    }

    #[test]
    fn null_values_decode_as_blank() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"firstName":null,"medications":null,"referredBy":null,
                "referralName":null,"dependents":[{"name":"Ann Doe","dateOfBirth":null}]}"#,
        )
        .unwrap();
        assert!(request.first_name.is_empty());
        assert!(request.medications.is_empty());
        assert!(!request.referred_by);
        assert!(request.referral_name.is_empty());
        assert_eq!(request.dependents.len(), 1);
        assert!(request.dependents[0].date_of_birth.is_empty());

        let request: QuoteRequest = serde_json::from_str(r#"{"dependents":null}"#).unwrap();
        assert!(request.dependents.is_empty());
    }

    #[test]
    fn wrong_types_still_fail() {
        assert!(serde_json::from_str::<QuoteRequest>(r#"{"firstName":42}"#).is_err());
    }

    #[test]
    fn from_form_drops_local_dependent_ids() {
        let mut data = FormData::default();
        let id = data.dependents.add();
        data.dependents.update(id, DependentField::Name, "Ann Doe");
        data.dependents.update(id, DependentField::Relationship, "spouse");

        let request = QuoteRequest::from(&data);
        let json = serde_json::to_value(&request).unwrap();
        let dep = &json["dependents"][0];
        assert_eq!(dep["name"], "Ann Doe");
        assert_eq!(dep["relationship"], "Spouse");
        assert_eq!(dep["dateOfBirth"], "");
        assert!(dep.get("id").is_none());
    }

    #[test]
    fn dependents_summary_fills_gaps() {
        let request = QuoteRequest {
            dependents: vec![
                DependentEntry {
                    name: "Ann Doe".into(),
                    relationship: "Spouse".into(),
                    date_of_birth: "1991-02-03".into(),
                },
                DependentEntry {
                    name: "Ben Doe".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            request.dependents_summary(),
            "Ann Doe (Spouse, 1991-02-03); Ben Doe (Unspecified, DOB unknown)"
        );
    }
}
