use serde::{Deserialize, Serialize};

/// A requester's structured search criteria.
///
/// All fields are opaque free text compared semantically by the relevance
/// scorer. Only `position`, `experience` and `skills` are required; serde
/// rejects a body that omits any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub position: String,
    pub experience: String,
    #[serde(default)]
    pub salary: Option<String>,
    /// remote / onsite / hybrid, or anything else the requester typed.
    #[serde(rename = "jobNature", default)]
    pub job_nature: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub skills: String,
}

/// A normalized job posting produced by a source adapter.
///
/// Adapters must never emit a record with an empty title, company or link.
/// Records from different sources are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(rename = "jobNature", default)]
    pub job_nature: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    pub apply_link: String,
    /// Display name of the adapter that produced this record.
    pub source: String,
}

impl JobRecord {
    /// Returns true when the record carries every required field.
    pub fn is_complete(&self) -> bool {
        !self.job_title.trim().is_empty()
            && !self.company.trim().is_empty()
            && (self.apply_link.starts_with("http://") || self.apply_link.starts_with("https://"))
            && !self.source.trim().is_empty()
    }
}

/// Body of a successful `POST /api/jobs/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResponse {
    pub relevant_jobs: Vec<JobRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, company: &str, link: &str) -> JobRecord {
        JobRecord {
            job_title: title.to_string(),
            company: company.to_string(),
            experience: None,
            job_nature: None,
            location: None,
            salary: None,
            apply_link: link.to_string(),
            source: "LinkedIn".to_string(),
        }
    }

    #[test]
    fn test_criteria_deserializes_with_only_required_fields() {
        let json = r#"{"position": "Backend Engineer", "experience": "3 years", "skills": "Go, SQL"}"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.position, "Backend Engineer");
        assert!(criteria.salary.is_none());
        assert!(criteria.job_nature.is_none());
        assert!(criteria.location.is_none());
    }

    #[test]
    fn test_criteria_uses_camel_case_job_nature() {
        let json = r#"{
            "position": "SRE",
            "experience": "5 years",
            "jobNature": "remote",
            "skills": "Kubernetes"
        }"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.job_nature.as_deref(), Some("remote"));
    }

    #[test]
    fn test_criteria_missing_skills_is_rejected() {
        let json = r#"{"position": "SRE", "experience": "5 years"}"#;
        assert!(serde_json::from_str::<SearchCriteria>(json).is_err());
    }

    #[test]
    fn test_job_record_serializes_job_nature_in_camel_case() {
        let mut job = record("Engineer", "Acme", "https://example.com/1");
        job.job_nature = Some("hybrid".to_string());
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["jobNature"], "hybrid");
        assert!(value.get("job_nature").is_none());
    }

    #[test]
    fn test_is_complete_requires_title_company_and_absolute_link() {
        assert!(record("Engineer", "Acme", "https://example.com/1").is_complete());
        assert!(!record("  ", "Acme", "https://example.com/1").is_complete());
        assert!(!record("Engineer", "", "https://example.com/1").is_complete());
        assert!(!record("Engineer", "Acme", "/jobs/1").is_complete());
    }
}
