use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::Profile;

/// Errors that can occur while loading profiles
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Failed to read profiles from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profiles: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected a JSON array of profiles or an object with a \"profiles\" array")]
    InvalidDocument,

    #[error("Profile not found: {0}")]
    NotFound(String),
}

/// Read-only set of profiles exported from the content backend
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    index: HashMap<String, usize>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        let mut index = HashMap::with_capacity(profiles.len());
        for (position, profile) in profiles.iter().enumerate() {
            if profile.id.is_empty() {
                continue;
            }
            if index.insert(profile.id.clone(), position).is_some() {
                tracing::warn!("Duplicate profile id {}, keeping the last one", profile.id);
            }
        }

        Self { profiles, index }
    }

    /// Load profiles from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileStoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json(&raw)?;
        tracing::info!("Loaded {} profiles from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse a profile export, either a bare array or `{ "profiles": [...] }`
    ///
    /// Records that cannot be read as a profile are skipped with a warning.
    pub fn from_json(raw: &str) -> Result<Self, ProfileStoreError> {
        let records = match serde_json::from_str::<Value>(raw)? {
            Value::Array(records) => records,
            Value::Object(mut document) => match document.remove("profiles") {
                Some(Value::Array(records)) => records,
                _ => return Err(ProfileStoreError::InvalidDocument),
            },
            _ => return Err(ProfileStoreError::InvalidDocument),
        };

        let total = records.len();
        let profiles: Vec<Profile> = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| match serde_json::from_value(record) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping profile record {}: {}", position, e);
                    None
                }
            })
            .collect();

        if profiles.len() < total {
            tracing::warn!("Skipped {} of {} profile records", total - profiles.len(), total);
        }

        Ok(Self::new(profiles))
    }

    pub fn get(&self, id: &str) -> Result<&Profile, ProfileStoreError> {
        self.index
            .get(id)
            .and_then(|&position| self.profiles.get(position))
            .ok_or_else(|| ProfileStoreError::NotFound(id.to_string()))
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
