use std::sync::Arc;
use crate::models::{CompatibilityScore, Profile, RankRequest, RankedCandidate, ScoringWeights};
use crate::core::scoring::{CompatibilityScorer, ScoreError};
use crate::services::ScoreCache;

/// Options controlling a ranking pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    pub limit: usize,
    pub exclude_ids: Vec<String>,
    /// Keep unscorable candidates at the bottom instead of dropping them
    pub include_incomplete: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            exclude_ids: Vec::new(),
            include_incomplete: true,
        }
    }
}

impl From<&RankRequest> for RankOptions {
    fn from(req: &RankRequest) -> Self {
        Self {
            limit: req.limit as usize,
            exclude_ids: req.exclude_ids.clone(),
            include_incomplete: req.include_incomplete,
        }
    }
}

/// Result of a ranking pass
#[derive(Debug)]
pub struct RankingResult {
    pub matches: Vec<RankedCandidate>,
    pub total_candidates: usize,
    pub skipped_incomplete: usize,
}

/// Ranks roommate candidates for a viewer by mutual compatibility
///
/// # Pipeline Stages
/// 1. Drop the viewer's own profile and explicitly excluded ids
/// 2. Mutual scoring (memoized when a cache is attached)
/// 3. Sort descending, unscorable candidates last or dropped
/// 4. Truncate to the limit
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    scorer: CompatibilityScorer,
    cache: Option<Arc<ScoreCache>>,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scorer: CompatibilityScorer::new(weights),
            cache: None,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::default()
    }

    /// Memoize pair scores in `cache`
    pub fn with_cache(mut self, cache: Arc<ScoreCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Mutual score for one pair, going through the cache when attached
    pub fn score_pair(&self, a: &Profile, b: &Profile) -> Result<CompatibilityScore, ScoreError> {
        match &self.cache {
            Some(cache) => cache.get_or_compute(&a.id, &b.id, self.scorer.weights(), || {
                self.scorer.mutual_score(a, b)
            }),
            None => self.scorer.mutual_score(a, b),
        }
    }

    /// Rank `candidates` for `viewer`, best match first
    ///
    /// Ties keep their input order.
    pub fn rank(
        &self,
        viewer: &Profile,
        candidates: &[Profile],
        options: &RankOptions,
    ) -> RankingResult {
        let total_candidates = candidates.len();

        if viewer.preferences.is_none() || viewer.characteristics.is_none() {
            tracing::warn!(
                "Viewer {} has an incomplete profile, no candidate can be scored",
                viewer.label()
            );
        }

        let mut scored = Vec::new();
        let mut incomplete = Vec::new();
        let mut skipped_incomplete = 0;

        for candidate in candidates
            .iter()
            .filter(|candidate| !is_same_profile(viewer, candidate))
            .filter(|candidate| !options.exclude_ids.contains(&candidate.id))
        {
            match self.score_pair(viewer, candidate) {
                Ok(score) => scored.push(ranked(candidate, Some(score))),
                Err(e) => {
                    tracing::debug!("Skipping score for {}: {}", candidate.label(), e);
                    if options.include_incomplete {
                        incomplete.push(ranked(candidate, None));
                    } else {
                        skipped_incomplete += 1;
                    }
                }
            }
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.extend(incomplete);
        scored.truncate(options.limit);

        tracing::debug!(
            "Ranked {} of {} candidates for {} ({} incomplete skipped)",
            scored.len(),
            total_candidates,
            viewer.label(),
            skipped_incomplete
        );

        RankingResult {
            matches: scored,
            total_candidates,
            skipped_incomplete,
        }
    }
}

#[inline]
fn is_same_profile(viewer: &Profile, candidate: &Profile) -> bool {
    !viewer.id.is_empty() && viewer.id == candidate.id
}

fn ranked(candidate: &Profile, score: Option<CompatibilityScore>) -> RankedCandidate {
    RankedCandidate {
        profile_id: candidate.id.clone(),
        full_name: candidate.full_name.clone(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Characteristics, Preferences};

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn create_candidate(id: &str, respect: &str, cleanliness: &str) -> Profile {
        Profile {
            id: id.to_string(),
            full_name: Some(format!("User {}", id)),
            gender: s("female"),
            max_budget: Some(80_000.0),
            characteristics: Some(Characteristics {
                sleep_schedule: s("balanced"),
                cleanliness: s(cleanliness),
                social_lifestyle: s("moderate"),
                noise_preference: s("quiet"),
                respect: s(respect),
            }),
            preferences: Some(Preferences {
                preferred_gender: s("no_preference"),
                preferred_sleep_schedule: s("balanced"),
                preferred_cleanliness: s("very_neat"),
                preferred_social_lifestyle: s("moderate"),
                preferred_noise_level: s("quiet"),
                preferred_respect: s("very_respectful"),
                preferred_min_budget: Some(60_000.0),
            }),
        }
    }

    fn create_viewer() -> Profile {
        create_candidate("viewer", "very_respectful", "very_neat")
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("1", "chill", "laidback"),
            create_candidate("2", "very_respectful", "very_neat"),
            create_candidate("3", "respectful_easygoing", "moderate"),
        ];

        let result = matcher.rank(&create_viewer(), &candidates, &RankOptions::default());

        let ids: Vec<&str> = result.matches.iter().map(|m| m.profile_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(result.matches[0].score.unwrap().value(), 100);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_rank_excludes_viewer_and_excluded_ids() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_viewer(),
            create_candidate("1", "chill", "moderate"),
            create_candidate("2", "chill", "moderate"),
        ];
        let options = RankOptions {
            exclude_ids: vec!["2".to_string()],
            ..RankOptions::default()
        };

        let result = matcher.rank(&create_viewer(), &candidates, &options);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].profile_id, "1");
    }

    #[test]
    fn test_rank_incomplete_sink_or_skip() {
        let matcher = Matcher::with_default_weights();
        let mut incomplete = create_candidate("incomplete", "chill", "moderate");
        incomplete.characteristics = None;
        let candidates = vec![incomplete, create_candidate("1", "chill", "laidback")];

        let kept = matcher.rank(&create_viewer(), &candidates, &RankOptions::default());
        assert_eq!(kept.matches.len(), 2);
        assert_eq!(kept.matches[0].profile_id, "1");
        assert_eq!(kept.matches[1].score, None);
        assert_eq!(kept.skipped_incomplete, 0);

        let options = RankOptions {
            include_incomplete: false,
            ..RankOptions::default()
        };
        let dropped = matcher.rank(&create_viewer(), &candidates, &options);
        assert_eq!(dropped.matches.len(), 1);
        assert_eq!(dropped.skipped_incomplete, 1);
    }

    #[test]
    fn test_incomplete_viewer_scores_nobody() {
        let matcher = Matcher::with_default_weights();
        let mut viewer = create_viewer();
        viewer.preferences = None;
        let candidates = vec![create_candidate("1", "chill", "moderate")];

        let result = matcher.rank(&viewer, &candidates, &RankOptions::default());

        assert!(result.matches.iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let candidates: Vec<Profile> = (0..20)
            .map(|i| create_candidate(&i.to_string(), "chill", "moderate"))
            .collect();
        let options = RankOptions {
            limit: 5,
            ..RankOptions::default()
        };

        let result = matcher.rank(&create_viewer(), &candidates, &options);

        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.total_candidates, 20);
        // Equal scores keep input order
        assert_eq!(result.matches[0].profile_id, "0");
    }

    #[test]
    fn test_cached_matcher_reuses_scores() {
        let cache = Arc::new(ScoreCache::new(16).unwrap());
        let matcher = Matcher::with_default_weights().with_cache(Arc::clone(&cache));
        let candidates = vec![create_candidate("1", "chill", "moderate")];

        matcher.rank(&create_viewer(), &candidates, &RankOptions::default());
        matcher.rank(&create_viewer(), &candidates, &RankOptions::default());

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_shared_cache_keeps_weights_apart() {
        let cache = Arc::new(ScoreCache::new(16).unwrap());
        let reweighted = ScoringWeights {
            gender: 0,
            budget: 14,
            ..ScoringWeights::default()
        };
        let default_matcher = Matcher::with_default_weights().with_cache(Arc::clone(&cache));
        let custom_matcher = Matcher::new(reweighted).with_cache(Arc::clone(&cache));
        let uncached = Matcher::new(reweighted);

        let viewer = create_viewer();
        let mut candidate = create_candidate("1", "very_respectful", "very_neat");
        candidate.max_budget = Some(10_000.0);

        let default_score = default_matcher.score_pair(&viewer, &candidate).unwrap();
        let custom_score = custom_matcher.score_pair(&viewer, &candidate).unwrap();

        assert_eq!(custom_score, uncached.score_pair(&viewer, &candidate).unwrap());
        assert_ne!(default_score, custom_score);
        assert_eq!(cache.stats().len, 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_matcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }

    #[test]
    fn test_options_from_request() {
        let req = RankRequest {
            viewer_id: "viewer".to_string(),
            limit: 7,
            exclude_ids: vec!["x".to_string()],
            include_incomplete: false,
        };
        let options = RankOptions::from(&req);
        assert_eq!(options.limit, 7);
        assert_eq!(options.exclude_ids, vec!["x".to_string()]);
        assert!(!options.include_incomplete);
    }
}
