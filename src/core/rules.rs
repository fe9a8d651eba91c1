//! Per-dimension scoring rules
//!
//! Seven dimensions compare two enumerated strings and are described by the
//! declarative [`RULES`] table; a single ordinal-distance function serves all
//! of them. Budget compares two amounts and uses [`BUDGET_BANDS`] instead.

use crate::models::Dimension;

/// Preference value meaning "any roommate is fine"
pub const NO_PREFERENCE: &str = "no_preference";

/// Characteristic value meaning "I adapt to whoever I live with"
pub const FLEXIBLE: &str = "flexible";

/// Fields read by the friendliness rule.
///
/// Profiles have no friendliness fields of their own, so friendliness reuses
/// the social lifestyle pair and that trait effectively weighs 4 + 4. Point
/// this at a dedicated dimension once profiles collect one.
pub const FRIENDLINESS_SOURCE: Dimension = Dimension::SocialLifestyle;

/// Budget gap bands: `(max gap inclusive, raw points)`, checked in order
pub const BUDGET_BANDS: [(f64, f64); 3] = [(20_000.0, 1.5), (50_000.0, 1.0), (100_000.0, 0.5)];

pub const EXACT_MATCH: f64 = 2.0;
pub const ADJACENT: f64 = 1.5;
pub const TWO_STEPS: f64 = 1.0;
pub const OPPOSITE: f64 = 0.5;
pub const NO_CREDIT: f64 = 0.0;

/// Shape of a dimension's value set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Unordered: only an exact match earns credit
    Categorical,
    /// Ordered from one extreme to the other
    Ordinal(&'static [&'static str]),
}

/// A value that matches any counterpart for a fixed number of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    pub value: &'static str,
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRule {
    pub dimension: Dimension,
    pub scale: Scale,
    /// `(input spelling, canonical value)` pairs applied to both sides
    pub aliases: &'static [(&'static str, &'static str)],
    pub preference_sentinel: Option<Sentinel>,
    pub candidate_wildcard: Option<Sentinel>,
}

const RESPECT_SCALE: &[&str] = &["very_respectful", "respectful_easygoing", "chill"];
const CLEANLINESS_SCALE: &[&str] = &["very_neat", "moderate", "irregular", "easygoing"];
const SLEEP_SCALE: &[&str] = &["early_riser", "balanced", "night_owl"];
const SOCIAL_SCALE: &[&str] = &["social", "moderate", "reserved"];
const NOISE_SCALE: &[&str] = &["quiet", "moderate", "lively"];

/// Rule table for every dimension except budget
pub static RULES: [DimensionRule; 7] = [
    DimensionRule {
        dimension: Dimension::Gender,
        scale: Scale::Categorical,
        aliases: &[],
        preference_sentinel: Some(Sentinel { value: NO_PREFERENCE, points: EXACT_MATCH }),
        candidate_wildcard: None,
    },
    DimensionRule {
        dimension: Dimension::Respect,
        scale: Scale::Ordinal(RESPECT_SCALE),
        aliases: &[],
        preference_sentinel: None,
        candidate_wildcard: None,
    },
    DimensionRule {
        dimension: Dimension::Cleanliness,
        scale: Scale::Ordinal(CLEANLINESS_SCALE),
        aliases: &[("laidback", "easygoing")],
        preference_sentinel: None,
        candidate_wildcard: None,
    },
    DimensionRule {
        dimension: Dimension::SleepSchedule,
        scale: Scale::Ordinal(SLEEP_SCALE),
        aliases: &[],
        preference_sentinel: Some(Sentinel { value: NO_PREFERENCE, points: ADJACENT }),
        candidate_wildcard: Some(Sentinel { value: FLEXIBLE, points: ADJACENT }),
    },
    DimensionRule {
        dimension: Dimension::SocialLifestyle,
        scale: Scale::Ordinal(SOCIAL_SCALE),
        aliases: &[],
        preference_sentinel: None,
        candidate_wildcard: Some(Sentinel { value: FLEXIBLE, points: ADJACENT }),
    },
    DimensionRule {
        dimension: Dimension::NoisePreference,
        scale: Scale::Ordinal(NOISE_SCALE),
        aliases: &[],
        preference_sentinel: Some(Sentinel { value: NO_PREFERENCE, points: TWO_STEPS }),
        candidate_wildcard: None,
    },
    DimensionRule {
        dimension: Dimension::Friendliness,
        scale: Scale::Ordinal(SOCIAL_SCALE),
        aliases: &[],
        preference_sentinel: None,
        candidate_wildcard: None,
    },
];

/// Look up the rule for a categorical dimension (`None` for budget)
pub fn rule(dimension: Dimension) -> Option<&'static DimensionRule> {
    RULES.iter().find(|r| r.dimension == dimension)
}

/// Dimension whose profile fields feed the given dimension's rule
pub fn field_source(dimension: Dimension) -> Dimension {
    match dimension {
        Dimension::Friendliness => FRIENDLINESS_SOURCE,
        other => other,
    }
}

impl DimensionRule {
    /// Raw points (0.0..=2.0) for a preference/characteristic pair
    pub fn score(&self, preference: Option<&str>, candidate: Option<&str>) -> f64 {
        let (Some(preference), Some(candidate)) = (present(preference), present(candidate)) else {
            return NO_CREDIT;
        };

        let preference = self.canonical(preference);
        let candidate = self.canonical(candidate);

        if let Some(sentinel) = self.preference_sentinel {
            if preference == sentinel.value {
                return sentinel.points;
            }
        }
        if let Some(wildcard) = self.candidate_wildcard {
            if candidate == wildcard.value {
                return wildcard.points;
            }
        }

        if preference == candidate {
            return EXACT_MATCH;
        }

        match self.scale {
            Scale::Categorical => NO_CREDIT,
            Scale::Ordinal(values) => ordinal_points(values, preference, candidate),
        }
    }

    fn canonical<'a>(&self, value: &'a str) -> &'a str {
        match self.aliases.iter().find(|(alias, _)| *alias == value) {
            Some(&(_, canonical)) => canonical,
            None => value,
        }
    }
}

/// Score two values by their distance on an ordered scale
///
/// Off-scale values earn nothing.
pub fn ordinal_points(scale: &[&str], a: &str, b: &str) -> f64 {
    let (Some(i), Some(j)) = (
        scale.iter().position(|v| *v == a),
        scale.iter().position(|v| *v == b),
    ) else {
        return NO_CREDIT;
    };

    let distance = i.abs_diff(j);
    let last = scale.len().saturating_sub(1);

    if distance == 0 {
        EXACT_MATCH
    } else if distance == last {
        OPPOSITE
    } else if distance == 1 {
        ADJACENT
    } else if distance == 2 {
        TWO_STEPS
    } else {
        NO_CREDIT
    }
}

/// Raw budget points: can the candidate afford at least the viewer's floor?
///
/// Non-positive or non-finite amounts count as "not set".
pub fn score_budget(my_min: Option<f64>, their_max: Option<f64>) -> f64 {
    let (Some(my_min), Some(their_max)) = (amount(my_min), amount(their_max)) else {
        return NO_CREDIT;
    };

    if their_max >= my_min {
        return EXACT_MATCH;
    }

    let gap = my_min - their_max;
    BUDGET_BANDS
        .iter()
        .find(|(max_gap, _)| gap <= *max_gap)
        .map(|(_, points)| *points)
        .unwrap_or(NO_CREDIT)
}

#[inline]
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[inline]
fn amount(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(dimension: Dimension, preference: &str, candidate: &str) -> f64 {
        rule(dimension)
            .unwrap()
            .score(Some(preference), Some(candidate))
    }

    #[test]
    fn test_every_categorical_dimension_has_a_rule() {
        for dimension in Dimension::ALL {
            assert_eq!(rule(dimension).is_some(), dimension != Dimension::Budget);
        }
    }

    #[test]
    fn test_missing_values_score_zero() {
        for r in RULES.iter() {
            assert_eq!(r.score(None, Some("moderate")), 0.0);
            assert_eq!(r.score(Some("moderate"), None), 0.0);
            assert_eq!(r.score(Some(""), Some("moderate")), 0.0);
            assert_eq!(r.score(Some(NO_PREFERENCE), Some("")), 0.0);
        }
    }

    #[test]
    fn test_gender_is_binary() {
        assert_eq!(score(Dimension::Gender, "female", "female"), 2.0);
        assert_eq!(score(Dimension::Gender, "no_preference", "male"), 2.0);
        assert_eq!(score(Dimension::Gender, "female", "male"), 0.0);
        assert_eq!(score(Dimension::Gender, "male", "no_preference"), 0.0);
    }

    #[test]
    fn test_respect_scale() {
        assert_eq!(score(Dimension::Respect, "very_respectful", "very_respectful"), 2.0);
        assert_eq!(score(Dimension::Respect, "very_respectful", "respectful_easygoing"), 1.5);
        assert_eq!(score(Dimension::Respect, "chill", "respectful_easygoing"), 1.5);
        assert_eq!(score(Dimension::Respect, "chill", "very_respectful"), 0.5);
        assert_eq!(score(Dimension::Respect, "no_preference", "chill"), 0.0);
    }

    #[test]
    fn test_cleanliness_table() {
        let d = Dimension::Cleanliness;
        assert_eq!(score(d, "very_neat", "very_neat"), 2.0);
        assert_eq!(score(d, "very_neat", "moderate"), 1.5);
        assert_eq!(score(d, "moderate", "irregular"), 1.5);
        assert_eq!(score(d, "irregular", "laidback"), 1.5);
        assert_eq!(score(d, "very_neat", "irregular"), 1.0);
        assert_eq!(score(d, "laidback", "moderate"), 1.0);
        assert_eq!(score(d, "very_neat", "laidback"), 0.5);
        assert_eq!(score(d, "easygoing", "very_neat"), 0.5);
    }

    #[test]
    fn test_cleanliness_alias_matches_canonical_spelling() {
        assert_eq!(score(Dimension::Cleanliness, "laidback", "easygoing"), 2.0);
        assert_eq!(score(Dimension::Cleanliness, "laidback", "laidback"), 2.0);
    }

    #[test]
    fn test_sleep_schedule_sentinels() {
        let d = Dimension::SleepSchedule;
        assert_eq!(score(d, "no_preference", "night_owl"), 1.5);
        assert_eq!(score(d, "early_riser", "flexible"), 1.5);
        assert_eq!(score(d, "no_preference", "flexible"), 1.5);
        assert_eq!(score(d, "early_riser", "early_riser"), 2.0);
        assert_eq!(score(d, "balanced", "night_owl"), 1.5);
        assert_eq!(score(d, "night_owl", "early_riser"), 0.5);
    }

    #[test]
    fn test_social_lifestyle_flexible_candidate() {
        let d = Dimension::SocialLifestyle;
        assert_eq!(score(d, "reserved", "flexible"), 1.5);
        assert_eq!(score(d, "social", "social"), 2.0);
        assert_eq!(score(d, "moderate", "reserved"), 1.5);
        assert_eq!(score(d, "social", "reserved"), 0.5);
        // Preference side has no sentinel here
        assert_eq!(score(d, "no_preference", "social"), 0.0);
    }

    #[test]
    fn test_noise_no_preference_is_flat() {
        let d = Dimension::NoisePreference;
        assert_eq!(score(d, "no_preference", "quiet"), 1.0);
        assert_eq!(score(d, "no_preference", "lively"), 1.0);
        assert_eq!(score(d, "quiet", "quiet"), 2.0);
        assert_eq!(score(d, "moderate", "lively"), 1.5);
        assert_eq!(score(d, "lively", "quiet"), 0.5);
    }

    #[test]
    fn test_friendliness_has_no_wildcard() {
        let d = Dimension::Friendliness;
        assert_eq!(score(d, "social", "flexible"), 0.0);
        assert_eq!(score(d, "flexible", "flexible"), 2.0);
        assert_eq!(score(d, "moderate", "social"), 1.5);
        assert_eq!(score(d, "reserved", "social"), 0.5);
    }

    #[test]
    fn test_friendliness_reads_social_lifestyle_fields() {
        assert_eq!(field_source(Dimension::Friendliness), Dimension::SocialLifestyle);
        assert_eq!(field_source(Dimension::Respect), Dimension::Respect);
    }

    #[test]
    fn test_unrecognized_values_score_zero() {
        assert_eq!(score(Dimension::Respect, "very_respectful", "rude"), 0.0);
        assert_eq!(score(Dimension::NoisePreference, "silent", "quiet"), 0.0);
    }

    #[test]
    fn test_ordinal_points_on_four_value_scale() {
        let scale = ["a", "b", "c", "d"];
        assert_eq!(ordinal_points(&scale, "a", "a"), 2.0);
        assert_eq!(ordinal_points(&scale, "a", "b"), 1.5);
        assert_eq!(ordinal_points(&scale, "a", "c"), 1.0);
        assert_eq!(ordinal_points(&scale, "d", "a"), 0.5);
        assert_eq!(ordinal_points(&scale, "a", "z"), 0.0);
    }

    #[test]
    fn test_budget_bands() {
        let min = Some(100_000.0);
        assert_eq!(score_budget(min, Some(100_000.0)), 2.0);
        assert_eq!(score_budget(min, Some(150_000.0)), 2.0);
        assert_eq!(score_budget(min, Some(80_001.0)), 1.5);
        assert_eq!(score_budget(min, Some(80_000.0)), 1.5);
        assert_eq!(score_budget(min, Some(79_999.0)), 1.0);
        assert_eq!(score_budget(min, Some(50_001.0)), 1.0);
        assert_eq!(score_budget(min, Some(50_000.0)), 1.0);
        assert_eq!(score_budget(min, Some(49_999.0)), 0.5);
        assert_eq!(score_budget(Some(200_000.0), Some(100_000.0)), 0.5);
        assert_eq!(score_budget(Some(200_000.0), Some(99_999.0)), 0.0);
    }

    #[test]
    fn test_budget_not_set() {
        let min = Some(100_000.0);
        assert_eq!(score_budget(min, Some(0.0)), 0.0);
        assert_eq!(score_budget(min, Some(-5_000.0)), 0.0);
        assert_eq!(score_budget(min, None), 0.0);
        assert_eq!(score_budget(None, Some(100_000.0)), 0.0);
        assert_eq!(score_budget(Some(0.0), Some(100_000.0)), 0.0);
        assert_eq!(score_budget(min, Some(f64::NAN)), 0.0);
    }
}
