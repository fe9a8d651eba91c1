// Service exports
pub mod cache;
pub mod profile_store;

pub use cache::{CacheError, CacheKey, CacheStats, ScoreCache};
pub use profile_store::{ProfileStore, ProfileStoreError};
