use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank candidates for one viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    #[serde(alias = "exclude_ids", rename = "excludeIds")]
    pub exclude_ids: Vec<String>,
    /// Keep unscorable candidates at the bottom instead of dropping them
    #[serde(default = "default_include_incomplete")]
    #[serde(alias = "include_incomplete", rename = "includeIncomplete")]
    pub include_incomplete: bool,
}

fn default_limit() -> u16 {
    20
}

fn default_include_incomplete() -> bool {
    true
}

/// Request to score a single pair of profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePairRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "profileA")]
    pub profile_a: String,
    #[validate(length(min = 1))]
    #[serde(rename = "profileB")]
    pub profile_b: String,
    #[serde(default)]
    pub explain: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_defaults() {
        let req: RankRequest = serde_json::from_str(r#"{ "viewerId": "me" }"#).unwrap();
        assert_eq!(req.limit, 20);
        assert!(req.include_incomplete);
        assert!(req.exclude_ids.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rank_request_rejects_empty_viewer() {
        let req = RankRequest {
            viewer_id: String::new(),
            limit: 20,
            exclude_ids: vec![],
            include_incomplete: true,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rank_request_rejects_out_of_range_limit() {
        let req = RankRequest {
            viewer_id: "me".to_string(),
            limit: 0,
            exclude_ids: vec![],
            include_incomplete: true,
        };
        assert!(req.validate().is_err());

        let req = RankRequest { limit: 101, ..req };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_score_pair_request_requires_both_ids() {
        let req = ScorePairRequest {
            profile_a: "a".to_string(),
            profile_b: String::new(),
            explain: false,
        };
        assert!(req.validate().is_err());
    }
}
