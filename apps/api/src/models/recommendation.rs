use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    Course,
    Certification,
    Training,
    Opportunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// Duration buckets a client can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationBucket {
    /// Under 4 weeks.
    Short,
    /// 1 to 3 months.
    Medium,
    /// More than 3 months.
    Long,
}

impl DurationBucket {
    pub fn describe(self) -> &'static str {
        match self {
            DurationBucket::Short => "short (under 4 weeks)",
            DurationBucket::Medium => "medium (1 to 3 months)",
            DurationBucket::Long => "long (more than 3 months)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Client-side constraints on recommendations. Empty lists mean "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationFilters {
    pub types: Vec<RecommendationType>,
    pub levels: Vec<Level>,
    pub price_range: Option<PriceRange>,
    pub free_only: bool,
    pub durations: Vec<DurationBucket>,
    pub providers: Vec<String>,
    pub search_query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub resume_ids: Vec<Uuid>,
    #[serde(default)]
    pub filters: RecommendationFilters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    #[serde(rename = "type")]
    pub kind: Option<RecommendationType>,
    pub title: Option<String>,
    pub provider: Option<String>,
    pub description: Option<String>,
    pub match_score: Option<f64>,
    pub level: Option<Level>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub url: Option<String>,
    pub skills: Vec<String>,
    pub why_recommended: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
