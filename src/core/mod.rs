// Core algorithm exports
pub mod matcher;
pub mod rules;
pub mod scoring;

pub use matcher::{Matcher, RankOptions, RankingResult};
pub use rules::{DimensionRule, Scale, Sentinel, FRIENDLINESS_SOURCE, RULES};
pub use scoring::{compute_mutual_compatibility, mutual_score, CompatibilityScorer, MutualBreakdown, ScoreError};
