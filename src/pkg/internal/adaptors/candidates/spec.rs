use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttribute {
    pub key: String,
    pub label: String,
    pub value: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCandidate {
    pub id: String,
    pub job_id: String,
    pub submitted_at: String,
    pub attributes: Vec<CandidateAttribute>,
}

impl StoredCandidate {
    pub fn submitted_timestamp(&self) -> DateTime<Utc> {
        self.submitted_at.parse().unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// `cand_<YYYYMMDD>_<4-digit-random>`. Collisions are tolerated the same
/// way the id convention itself is: nothing enforces them on read.
pub fn new_candidate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    format!("cand_{}_{:04}", now.format("%Y%m%d"), rng.random_range(0..10_000))
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_candidate_id_shape() {
        let now = "2025-01-05T08:00:00+00:00".parse().unwrap();
        let id = new_candidate_id(now);
        assert!(id.starts_with("cand_20250105_"));
        assert_eq!(id.len(), "cand_20250105_0000".len());
    }

    #[test]
    #[traced_test]
    fn test_attribute_lookup() {
        let candidate = StoredCandidate {
            id: "cand_20250105_0001".into(),
            job_id: "job_20250101_1".into(),
            submitted_at: "2025-01-05T08:00:00+00:00".into(),
            attributes: vec![CandidateAttribute {
                key: "email".into(),
                label: "Email".into(),
                value: "a@a.com".into(),
                order: 0,
            }],
        };
        assert_eq!(candidate.attribute("email"), Some("a@a.com"));
        assert_eq!(candidate.attribute("phone"), None);
    }
}
