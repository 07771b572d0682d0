//! Filter to keep only movies matching user's preferred genres.
//!
//! This filter helps ensure recommended movies align with the user's
//! demonstrated genre preferences.

use crate::context::UserContext;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps only candidates that share a genre with the user's top N genres.
///
/// ## Algorithm
/// 1. Get user's top N genres from UserContext
/// 2. For each candidate, check if movie has at least one matching genre
/// 3. Keep movies with genre overlap
///
/// A user without a genre tally matches nothing.
pub struct GenrePreferenceFilter {
    top_n_genres: usize,
}

impl GenrePreferenceFilter {
    /// Create a new GenrePreferenceFilter.
    ///
    /// # Arguments
    /// * `top_n_genres` - How many top genres to consider (1 for the favorite genre)
    pub fn new(top_n_genres: usize) -> Self {
        Self { top_n_genres }
    }
}

impl Filter for GenrePreferenceFilter {
    fn name(&self) -> &str {
        "GenrePreferenceFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, context: &UserContext) -> Vec<&'a Movie> {
        let top_genres = context.top_genres(self.top_n_genres);

        movies
            .into_iter()
            .filter(|movie| movie.genres.iter().any(|g| top_genres.contains(&g.as_str())))
            .collect()
    }
}
