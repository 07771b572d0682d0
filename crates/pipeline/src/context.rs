//! Per-user context built once per request.
//!
//! Strategies and filters read the watched set and genre tally from here
//! instead of recomputing them against the catalog.

use crate::query::{self, GenrePreference};
use data_loader::{Catalog, User, UserId};
use std::collections::HashSet;

/// Everything the strategies need to know about one user.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    pub name: String,
    /// Watch history as recorded, duplicates and unknown titles included
    pub watch_history: Vec<String>,
    /// Distinct watched titles for O(1) membership checks
    pub watched_movies: HashSet<String>,
    /// Genre tally, highest count first
    pub genre_preferences: Vec<GenrePreference>,
}

impl UserContext {
    /// Empty context for a user with no history
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// The `n` most-watched genres
    pub fn top_genres(&self, n: usize) -> Vec<&str> {
        self.genre_preferences
            .iter()
            .take(n)
            .map(|p| p.genre.as_str())
            .collect()
    }

    pub fn has_watched(&self, title: &str) -> bool {
        self.watched_movies.contains(title)
    }

    /// No watch history at all
    pub fn is_cold_start(&self) -> bool {
        self.watch_history.is_empty()
    }
}

/// Build a UserContext for `user` against the catalog.
///
/// Never fails: titles missing from the catalog stay in the history but
/// contribute nothing to the genre tally.
pub fn build_user_context(catalog: &Catalog, user: &User) -> UserContext {
    UserContext {
        user_id: user.id,
        name: user.name.clone(),
        watch_history: user.watched_movies.clone(),
        watched_movies: user.watched_movies.iter().cloned().collect(),
        genre_preferences: query::genre_preferences(catalog, &user.watched_movies),
    }
}
