//! Tunable limits and thresholds for the recommendation engine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Engine settings. Every field has a default, so a partial JSON file is
/// valid and an empty object (`{}`) yields [`RecommenderConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Recommendations per strategy
    pub limit: usize,
    /// Length of the cold-start list for users without history
    pub cold_start_limit: usize,
    /// Similar users whose histories feed the collaborative strategy
    pub similar_user_count: usize,
    /// Inclusive cutoff for "recent" releases
    pub recent_release_year: u16,
    /// Top genres considered by the recency strategy
    pub recency_genre_count: usize,
    /// Top genres compared by the watch-history simulation
    pub simulation_genre_count: usize,
    /// Viewed titles needed before a browsing session counts as interest
    pub browsing_interest_threshold: usize,
    /// Length of the "top N rated" listing
    pub top_movies_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            limit: 3,
            cold_start_limit: 5,
            similar_user_count: 2,
            recent_release_year: 2015,
            recency_genre_count: 2,
            simulation_genre_count: 2,
            browsing_interest_threshold: 3,
            top_movies_limit: 5,
        }
    }
}

impl RecommenderConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid recommender configuration")
    }

    /// Load settings from a JSON file, filling missing fields with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
