use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Roommate seeker profile as stored by the content backend
///
/// Every field is optional: profiles are filled in gradually through the
/// onboarding forms, and scoring tolerates whatever is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "clerkId", alias = "id", default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(rename = "fullName", default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(rename = "maxBudget", default, deserialize_with = "lenient_amount")]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl Profile {
    /// Identifier used in logs, falling back to the display name
    pub fn label(&self) -> &str {
        if !self.id.is_empty() {
            return &self.id;
        }
        self.full_name.as_deref().unwrap_or("<anonymous>")
    }
}

/// How the subject actually lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    #[serde(rename = "sleepSchedule", default, deserialize_with = "lenient_text")]
    pub sleep_schedule: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cleanliness: Option<String>,
    #[serde(rename = "socialLifestyle", default, deserialize_with = "lenient_text")]
    pub social_lifestyle: Option<String>,
    #[serde(rename = "noisePreference", default, deserialize_with = "lenient_text")]
    pub noise_preference: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub respect: Option<String>,
}

/// What the subject wants in a roommate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "preferredGender", default, deserialize_with = "lenient_text")]
    pub preferred_gender: Option<String>,
    #[serde(rename = "preferredSleepSchedule", default, deserialize_with = "lenient_text")]
    pub preferred_sleep_schedule: Option<String>,
    #[serde(rename = "preferredCleanliness", default, deserialize_with = "lenient_text")]
    pub preferred_cleanliness: Option<String>,
    #[serde(rename = "preferredSocialLifestyle", default, deserialize_with = "lenient_text")]
    pub preferred_social_lifestyle: Option<String>,
    #[serde(rename = "preferredNoiseLevel", default, deserialize_with = "lenient_text")]
    pub preferred_noise_level: Option<String>,
    #[serde(rename = "preferredRespect", default, deserialize_with = "lenient_text")]
    pub preferred_respect: Option<String>,
    #[serde(rename = "preferredMinBudget", default, deserialize_with = "lenient_amount")]
    pub preferred_min_budget: Option<f64>,
}

/// Accept ids as strings or numbers; `null` and anything else leave the id empty
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Keep text values as-is; numbers, booleans and objects are "not set"
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Accept budgets as JSON numbers or numeric strings; anything else is "not set"
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// One axis of comparison between two roommates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Gender,
    Respect,
    Cleanliness,
    SleepSchedule,
    SocialLifestyle,
    NoisePreference,
    Friendliness,
    Budget,
}

impl Dimension {
    /// All dimensions in scoring order
    pub const ALL: [Dimension; 8] = [
        Dimension::Gender,
        Dimension::Respect,
        Dimension::Cleanliness,
        Dimension::SleepSchedule,
        Dimension::SocialLifestyle,
        Dimension::NoisePreference,
        Dimension::Friendliness,
        Dimension::Budget,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Gender => "gender",
            Dimension::Respect => "respect",
            Dimension::Cleanliness => "cleanliness",
            Dimension::SleepSchedule => "sleep_schedule",
            Dimension::SocialLifestyle => "social_lifestyle",
            Dimension::NoisePreference => "noise_preference",
            Dimension::Friendliness => "friendliness",
            Dimension::Budget => "budget",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer weight applied to each dimension's raw score
///
/// The defaults sum to 50, so a perfect directional score (every raw
/// score at 2.0) is exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub gender: u32,
    pub respect: u32,
    pub cleanliness: u32,
    pub sleep_schedule: u32,
    pub social_lifestyle: u32,
    pub noise_preference: u32,
    pub friendliness: u32,
    pub budget: u32,
}

impl ScoringWeights {
    pub fn for_dimension(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Gender => self.gender,
            Dimension::Respect => self.respect,
            Dimension::Cleanliness => self.cleanliness,
            Dimension::SleepSchedule => self.sleep_schedule,
            Dimension::SocialLifestyle => self.social_lifestyle,
            Dimension::NoisePreference => self.noise_preference,
            Dimension::Friendliness => self.friendliness,
            Dimension::Budget => self.budget,
        }
    }

    /// Sum of all weights, widened so oversized weights cannot wrap
    pub fn total(&self) -> u64 {
        Dimension::ALL
            .iter()
            .map(|d| u64::from(self.for_dimension(*d)))
            .sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gender: 11,
            respect: 10,
            cleanliness: 8,
            sleep_schedule: 5,
            social_lifestyle: 4,
            noise_preference: 5,
            friendliness: 4,
            budget: 3,
        }
    }
}

/// Which half of a profile a score needed but did not find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    Preferences,
    Characteristics,
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSection::Preferences => f.write_str("preferences"),
            ProfileSection::Characteristics => f.write_str("characteristics"),
        }
    }
}

/// Weighted contribution of a single dimension to a directional score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionContribution {
    pub dimension: Dimension,
    pub raw: f64,
    pub weight: u32,
    pub weighted: f64,
}

/// One profile's preferences evaluated against another's characteristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalScore {
    pub total: f64,
    pub contributions: Vec<DimensionContribution>,
}

impl DirectionalScore {
    pub fn contribution(&self, dimension: Dimension) -> Option<&DimensionContribution> {
        self.contributions.iter().find(|c| c.dimension == dimension)
    }
}

/// Rounded mutual compatibility percentage, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityScore(u8);

impl CompatibilityScore {
    pub const MAX: u8 = 100;

    /// Round an averaged score to the nearest integer percentage
    ///
    /// Only the average is rounded; directional totals are not rounded first,
    /// so a pair can land one point below scores from the legacy mobile client.
    pub fn from_average(average: f64) -> Self {
        if !average.is_finite() {
            return Self(0);
        }
        // Half rounds up; inputs are never negative
        let rounded = (average + 0.5).floor().clamp(0.0, Self::MAX as f64);
        Self(rounded as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Candidate entry in a ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    /// `None` when either side lacked the data to score
    #[serde(rename = "compatibilityScore")]
    pub score: Option<CompatibilityScore>,
}
