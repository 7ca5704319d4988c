use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Quality review of a single profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub weaknesses: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_sections: Vec<String>,
    pub mistakes: Vec<String>,
    /// 0–100 once validated; `None` when the model did not score.
    pub score: Option<u8>,
    pub overall_feedback: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
