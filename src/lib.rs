//! Roommate Match - compatibility scoring for the Off Campus rental app
//!
//! This library scores how well two roommate seekers fit each other across
//! eight weighted lifestyle dimensions and ranks candidates for a viewer by
//! the resulting mutual percentage.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_mutual_compatibility, mutual_score, CompatibilityScorer, Matcher, RankOptions, ScoreError};
pub use crate::models::{Characteristics, CompatibilityScore, Dimension, Preferences, Profile, ScoringWeights};
