use serde::{Deserialize, Serialize};

use crate::data_models::ScoreResult;

#[derive(Debug, Deserialize, Default)]
pub struct SearchRequest {
    pub q: Option<String>,
    pub lang: Option<String>,
    pub country: Option<String>,
    pub cr: Option<String>,
    /// Signed so out-of-range values get clamped instead of rejected.
    pub num: Option<i64>,
    pub start: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct KnowledgeRequest {
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub lang: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub language: &'static str,
    pub wateriness: ScoreResult,
    pub uniqueness: ScoreResult,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}
