use serde::{Deserialize, Serialize};
use crate::models::domain::{CompatibilityScore, DirectionalScore, RankedCandidate};

/// Response for the rank command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(rename = "viewerId")]
    pub viewer_id: String,
    pub matches: Vec<RankedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "skippedIncomplete")]
    pub skipped_incomplete: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the score command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "profileA")]
    pub profile_a: String,
    #[serde(rename = "profileB")]
    pub profile_b: String,
    /// `None` when either profile is missing a section
    #[serde(rename = "compatibilityScore")]
    pub score: Option<CompatibilityScore>,
    #[serde(rename = "aToB", skip_serializing_if = "Option::is_none")]
    pub a_to_b: Option<DirectionalScore>,
    #[serde(rename = "bToA", skip_serializing_if = "Option::is_none")]
    pub b_to_a: Option<DirectionalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
