use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured contrast of two or more profiles, keyed by resume id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub resume_summaries: Vec<ResumeSummaryEntry>,
    pub comparison: Comparison,
    pub final_verdict: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComparisonReport {
    pub fn is_empty(&self) -> bool {
        self.resume_summaries.is_empty()
            && self.comparison.common_skills.is_empty()
            && self.comparison.unique_skills_by_resume.is_empty()
            && self.comparison.role_suitability.is_empty()
            && self.final_verdict.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummaryEntry {
    pub resume_id: Option<String>,
    pub key_strengths: Vec<String>,
    pub key_weaknesses: Vec<String>,
    pub unique_skills: Vec<String>,
    pub notable_experiences: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub common_skills: Vec<String>,
    pub unique_skills_by_resume: BTreeMap<String, Vec<String>>,
    pub experience_comparison: ExperienceComparison,
    pub education_comparison: EducationComparison,
    pub role_suitability: Vec<RoleSuitability>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceComparison {
    pub stronger_experience_resume_id: Option<String>,
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationComparison {
    pub stronger_education_resume_id: Option<String>,
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSuitability {
    pub role: Option<String>,
    pub best_resume_id: Option<String>,
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
