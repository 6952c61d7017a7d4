use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Applicant identity fields every posting collects, whatever the admin
/// configures. Their requirement level cannot be lowered.
pub const LOCKED_PROFILE_KEYS: [&str; 3] = ["fullName", "photo", "email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    Mandatory,
    Optional,
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileField {
    pub key: String,
    pub label: String,
    pub requirement: Requirement,
}

impl ProfileField {
    pub fn new(key: &str, label: &str, requirement: Requirement) -> Self {
        ProfileField {
            key: key.into(),
            label: label.into(),
            requirement,
        }
    }

    pub fn is_locked(&self) -> bool {
        LOCKED_PROFILE_KEYS.contains(&self.key.as_str())
    }

    pub fn set_requirement(&mut self, requirement: Requirement) {
        if self.is_locked() {
            return;
        }
        self.requirement = requirement;
    }
}

pub fn default_profile_fields() -> Vec<ProfileField> {
    vec![
        ProfileField::new("fullName", "Full name", Requirement::Mandatory),
        ProfileField::new("photo", "Photo profile", Requirement::Mandatory),
        ProfileField::new("email", "Email", Requirement::Mandatory),
        ProfileField::new("phone", "Phone number", Requirement::Optional),
        ProfileField::new("dateOfBirth", "Date of birth", Requirement::Optional),
        ProfileField::new("domicile", "Domicile", Requirement::Optional),
        ProfileField::new("linkedin", "LinkedIn URL", Requirement::Off),
    ]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFormValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_needed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<String>,
}

impl JobFormValues {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled job")
    }

    fn salary_range(&self) -> Option<String> {
        let min = self.min_salary.as_deref().filter(|s| !s.trim().is_empty());
        let max = self.max_salary.as_deref().filter(|s| !s.trim().is_empty());
        match (min, max) {
            (Some(min), Some(max)) => Some(format!("Rp{} - Rp{}", min, max)),
            (Some(min), None) => Some(format!("Starting Rp{}", min)),
            (None, Some(max)) => Some(format!("Up to Rp{}", max)),
            (None, None) => None,
        }
    }

    /// Admin list leaves the salary cell empty when no bound is set.
    pub fn salary_summary(&self) -> String {
        self.salary_range().unwrap_or_default()
    }

    /// The detail view spells the absence out instead.
    pub fn salary_detail(&self) -> String {
        self.salary_range()
            .unwrap_or_else(|| "Not specified".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub saved_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub form_values: JobFormValues,
    #[serde(default = "default_profile_fields")]
    pub profile_fields: Vec<ProfileField>,
}

impl StoredJob {
    pub fn saved_timestamp(&self) -> DateTime<Utc> {
        self.saved_at.parse().unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Active jobs show their publish date, drafts whatever was saved last.
    pub fn display_date(&self) -> &str {
        self.published_at.as_deref().unwrap_or(&self.saved_at)
    }
}

/// Ids follow the `job_<YYYYMMDD>_<sequence>` convention, sequence scoped
/// to the day. Not enforced on read.
pub fn next_job_id(existing: &[StoredJob], now: DateTime<Utc>) -> String {
    let prefix = format!("job_{}_", now.format("%Y%m%d"));
    let seq = existing
        .iter()
        .filter(|job| job.id.starts_with(&prefix))
        .count()
        + 1;
    format!("{}{}", prefix, seq)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn values(min: Option<&str>, max: Option<&str>) -> JobFormValues {
        JobFormValues {
            min_salary: min.map(String::from),
            max_salary: max.map(String::from),
            ..JobFormValues::default()
        }
    }

    #[test]
    #[traced_test]
    fn test_salary_label_composition() {
        assert_eq!(
            values(Some("8000000"), Some("12000000")).salary_summary(),
            "Rp8000000 - Rp12000000"
        );
        assert_eq!(values(Some("8000000"), None).salary_summary(), "Starting Rp8000000");
        assert_eq!(values(None, Some("12000000")).salary_summary(), "Up to Rp12000000");
        assert_eq!(values(None, None).salary_summary(), "");
        assert_eq!(values(None, None).salary_detail(), "Not specified");
        assert_eq!(values(Some(" "), None).salary_summary(), "");
    }

    #[test]
    #[traced_test]
    fn test_locked_profile_fields_stay_mandatory() {
        let mut fields = default_profile_fields();
        for field in &mut fields {
            field.set_requirement(Requirement::Off);
        }
        for field in &fields {
            if field.is_locked() {
                assert_eq!(field.requirement, Requirement::Mandatory);
            } else {
                assert_eq!(field.requirement, Requirement::Off);
            }
        }
    }

    #[test]
    #[traced_test]
    fn test_display_date_falls_back_to_saved_at() {
        let mut job = StoredJob {
            id: "job_20250101_1".into(),
            status: JobStatus::Draft,
            saved_at: "2025-01-01T10:00:00+00:00".into(),
            published_at: None,
            form_values: JobFormValues::default(),
            profile_fields: default_profile_fields(),
        };
        assert_eq!(job.display_date(), "2025-01-01T10:00:00+00:00");
        job.published_at = Some("2025-01-02T09:00:00+00:00".into());
        assert_eq!(job.display_date(), "2025-01-02T09:00:00+00:00");
    }

    #[test]
    #[traced_test]
    fn test_job_ids_sequence_per_day() {
        let now = "2025-01-05T08:00:00+00:00".parse().unwrap();
        let mut existing = Vec::new();
        let first = next_job_id(&existing, now);
        assert_eq!(first, "job_20250105_1");
        existing.push(StoredJob {
            id: first,
            status: JobStatus::Draft,
            saved_at: String::new(),
            published_at: None,
            form_values: JobFormValues::default(),
            profile_fields: Vec::new(),
        });
        assert_eq!(next_job_id(&existing, now), "job_20250105_2");
    }
}
