use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use crate::models::ScoringWeights;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scoring weights must total 50 so scores stay within 0-100, got {total}")]
    InvalidWeights { total: u64 },
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_gender_weight")]
    pub gender: u32,
    #[serde(default = "default_respect_weight")]
    pub respect: u32,
    #[serde(default = "default_cleanliness_weight")]
    pub cleanliness: u32,
    #[serde(default = "default_sleep_schedule_weight")]
    pub sleep_schedule: u32,
    #[serde(default = "default_social_lifestyle_weight")]
    pub social_lifestyle: u32,
    #[serde(default = "default_noise_preference_weight")]
    pub noise_preference: u32,
    #[serde(default = "default_friendliness_weight")]
    pub friendliness: u32,
    #[serde(default = "default_budget_weight")]
    pub budget: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            gender: default_gender_weight(),
            respect: default_respect_weight(),
            cleanliness: default_cleanliness_weight(),
            sleep_schedule: default_sleep_schedule_weight(),
            social_lifestyle: default_social_lifestyle_weight(),
            noise_preference: default_noise_preference_weight(),
            friendliness: default_friendliness_weight(),
            budget: default_budget_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(w: WeightsConfig) -> Self {
        Self {
            gender: w.gender,
            respect: w.respect,
            cleanliness: w.cleanliness,
            sleep_schedule: w.sleep_schedule,
            social_lifestyle: w.social_lifestyle,
            noise_preference: w.noise_preference,
            friendliness: w.friendliness,
            budget: w.budget,
        }
    }
}

fn default_gender_weight() -> u32 { 11 }
fn default_respect_weight() -> u32 { 10 }
fn default_cleanliness_weight() -> u32 { 8 }
fn default_sleep_schedule_weight() -> u32 { 5 }
fn default_social_lifestyle_weight() -> u32 { 4 }
fn default_noise_preference_weight() -> u32 { 5 }
fn default_friendliness_weight() -> u32 { 4 }
fn default_budget_weight() -> u32 { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_include_incomplete")]
    pub include_incomplete: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            include_incomplete: default_include_incomplete(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_include_incomplete() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Number of memoized pairs; 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { capacity: default_cache_capacity() }
    }
}

fn default_cache_capacity() -> usize { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROOMMATE__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROOMMATE__SCORING__WEIGHTS__GENDER -> scoring.weights.gender
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Scoring weights as used by the scorer
    pub fn weights(&self) -> ScoringWeights {
        self.scoring.weights.into()
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject weights that would let scores leave the 0-100 range
    pub fn validate(&self) -> Result<(), SettingsError> {
        let total = self.weights().total();
        if total != ScoringWeights::default().total() {
            return Err(SettingsError::InvalidWeights { total });
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ROOMMATE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights: ScoringWeights = WeightsConfig::default().into();
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let mut settings = Settings::default();
        settings.scoring.weights.budget = 10;

        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidWeights { total: 57 })
        ));
    }

    #[test]
    fn test_oversized_weights_do_not_wrap() {
        let mut settings = Settings::default();
        // u32::MAX + 51 would wrap to exactly 50 in u32 arithmetic
        settings.scoring.weights = WeightsConfig {
            gender: u32::MAX,
            respect: 51,
            cleanliness: 0,
            sleep_schedule: 0,
            social_lifestyle: 0,
            noise_preference: 0,
            friendliness: 0,
            budget: 0,
        };

        let expected = u64::from(u32::MAX) + 51;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidWeights { total }) if total == expected
        ));
    }

    #[test]
    fn test_load_from_file_rebalances_weights() {
        let path = std::env::temp_dir().join(format!("roommate-match-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[scoring.weights]\ngender = 5\nbudget = 9\n\n[cache]\ncapacity = 0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.scoring.weights.gender, 5);
        assert_eq!(settings.scoring.weights.budget, 9);
        assert_eq!(settings.scoring.weights.respect, 10);
        assert_eq!(settings.cache.capacity, 0);
        assert_eq!(settings.matching.default_limit, 20);
    }
}
