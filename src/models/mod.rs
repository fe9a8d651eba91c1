// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Characteristics, CompatibilityScore, Dimension, DimensionContribution, DirectionalScore,
    Preferences, Profile, ProfileSection, RankedCandidate, ScoringWeights,
};
pub use requests::{RankRequest, ScorePairRequest};
pub use responses::{ErrorResponse, RankingResponse, ScoreResponse};
