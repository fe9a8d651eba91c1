use thiserror::Error;
use crate::models::{
    Characteristics, CompatibilityScore, Dimension, DimensionContribution, DirectionalScore,
    Preferences, Profile, ProfileSection, ScoringWeights,
};
use crate::core::rules::{field_source, rule, score_budget};

/// Errors raised while scoring a pair of profiles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("profile {profile_id} has no {section}")]
    IncompleteProfile {
        profile_id: String,
        section: ProfileSection,
    },
}

/// Both directions of a mutual score, kept for explanations
#[derive(Debug, Clone, PartialEq)]
pub struct MutualBreakdown {
    pub a_to_b: DirectionalScore,
    pub b_to_a: DirectionalScore,
    pub score: CompatibilityScore,
}

/// Roommate compatibility scorer
///
/// Scores one profile's preferences against another's characteristics
/// across eight weighted dimensions, and averages both directions into a
/// symmetric 0-100 mutual score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
}

impl CompatibilityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self::default()
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted score of `preferences` against one candidate's traits
    ///
    /// Missing values only forfeit the affected dimension.
    pub fn evaluate(
        &self,
        preferences: &Preferences,
        characteristics: &Characteristics,
        their_gender: Option<&str>,
        their_max_budget: Option<f64>,
    ) -> DirectionalScore {
        let contributions: Vec<DimensionContribution> = Dimension::ALL
            .iter()
            .map(|&dimension| {
                let raw = raw_score(
                    dimension,
                    preferences,
                    characteristics,
                    their_gender,
                    their_max_budget,
                );
                let weight = self.weights.for_dimension(dimension);
                DimensionContribution {
                    dimension,
                    raw,
                    weight,
                    weighted: raw * weight as f64,
                }
            })
            .collect();

        let total = contributions.iter().map(|c| c.weighted).sum();

        DirectionalScore { total, contributions }
    }

    /// Score `viewer`'s preferences against `candidate`
    pub fn score_direction(
        &self,
        viewer: &Profile,
        candidate: &Profile,
    ) -> Result<DirectionalScore, ScoreError> {
        let preferences = viewer
            .preferences
            .as_ref()
            .ok_or_else(|| incomplete(viewer, ProfileSection::Preferences))?;
        let characteristics = candidate
            .characteristics
            .as_ref()
            .ok_or_else(|| incomplete(candidate, ProfileSection::Characteristics))?;

        Ok(self.evaluate(
            preferences,
            characteristics,
            candidate.gender.as_deref(),
            candidate.max_budget,
        ))
    }

    /// Both directional scores plus their rounded average
    pub fn explain(&self, a: &Profile, b: &Profile) -> Result<MutualBreakdown, ScoreError> {
        let a_to_b = self.score_direction(a, b)?;
        let b_to_a = self.score_direction(b, a)?;
        let score = CompatibilityScore::from_average((a_to_b.total + b_to_a.total) / 2.0);

        Ok(MutualBreakdown { a_to_b, b_to_a, score })
    }

    /// Symmetric mutual compatibility of two profiles
    pub fn mutual_score(&self, a: &Profile, b: &Profile) -> Result<CompatibilityScore, ScoreError> {
        self.explain(a, b).map(|breakdown| breakdown.score)
    }
}

/// Mutual score with default weights
pub fn mutual_score(a: &Profile, b: &Profile) -> Result<CompatibilityScore, ScoreError> {
    CompatibilityScorer::default().mutual_score(a, b)
}

/// Mutual score as a plain percentage
///
/// Incomplete profiles score `0`, which callers cannot tell apart from a
/// genuinely poor match. Prefer [`mutual_score`] when that matters.
pub fn compute_mutual_compatibility(a: &Profile, b: &Profile) -> u8 {
    match mutual_score(a, b) {
        Ok(score) => score.value(),
        Err(e) => {
            tracing::warn!("Compatibility check failed, missing profile data: {}", e);
            0
        }
    }
}

fn incomplete(profile: &Profile, section: ProfileSection) -> ScoreError {
    ScoreError::IncompleteProfile {
        profile_id: profile.label().to_string(),
        section,
    }
}

fn raw_score(
    dimension: Dimension,
    preferences: &Preferences,
    characteristics: &Characteristics,
    their_gender: Option<&str>,
    their_max_budget: Option<f64>,
) -> f64 {
    if dimension == Dimension::Budget {
        return score_budget(preferences.preferred_min_budget, their_max_budget);
    }

    let Some(dimension_rule) = rule(dimension) else {
        return 0.0;
    };

    let source = field_source(dimension);
    let candidate_value = match source {
        Dimension::Gender => their_gender,
        _ => characteristic_value(characteristics, source),
    };

    dimension_rule.score(preference_value(preferences, source), candidate_value)
}

fn preference_value(preferences: &Preferences, dimension: Dimension) -> Option<&str> {
    match dimension {
        Dimension::Gender => preferences.preferred_gender.as_deref(),
        Dimension::Respect => preferences.preferred_respect.as_deref(),
        Dimension::Cleanliness => preferences.preferred_cleanliness.as_deref(),
        Dimension::SleepSchedule => preferences.preferred_sleep_schedule.as_deref(),
        Dimension::SocialLifestyle => preferences.preferred_social_lifestyle.as_deref(),
        Dimension::NoisePreference => preferences.preferred_noise_level.as_deref(),
        Dimension::Friendliness | Dimension::Budget => None,
    }
}

fn characteristic_value(characteristics: &Characteristics, dimension: Dimension) -> Option<&str> {
    match dimension {
        Dimension::Respect => characteristics.respect.as_deref(),
        Dimension::Cleanliness => characteristics.cleanliness.as_deref(),
        Dimension::SleepSchedule => characteristics.sleep_schedule.as_deref(),
        Dimension::SocialLifestyle => characteristics.social_lifestyle.as_deref(),
        Dimension::NoisePreference => characteristics.noise_preference.as_deref(),
        Dimension::Gender | Dimension::Friendliness | Dimension::Budget => None,
    }
}
