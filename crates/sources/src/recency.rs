//! Recency Source - recent releases in the user's top genres
//!
//! ## Algorithm
//! 1. Take the user's top 2 genres
//! 2. Keep unwatched movies released in 2015 or later that share at least
//!    one of those genres
//! 3. Sort by release year, newest first (stable)
//! 4. Return the top 3

use crate::traits::RecommendationSource;
use crate::types::{Reason, Recommendation, StrategyKind, matching_genres};
use data_loader::Catalog;
use pipeline::filters::{AlreadyWatchedFilter, GenrePreferenceFilter, MinimumYearFilter};
use pipeline::{FilterPipeline, SortDirection, SortKey, UserContext, query};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct RecencySource {
    catalog: Arc<Catalog>,

    /// Inclusive release-year cutoff
    min_year: u16,

    /// How many top genres a movie may match
    genre_count: usize,

    limit: usize,
}

impl RecencySource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            min_year: 2015,
            genre_count: 2,
            limit: 3,
        }
    }

    /// Configure the release-year cutoff (default: 2015)
    pub fn with_min_year(mut self, year: u16) -> Self {
        self.min_year = year;
        self
    }

    /// Configure how many top genres count as preferred (default: 2)
    pub fn with_genre_count(mut self, count: usize) -> Self {
        self.genre_count = count;
        self
    }

    /// Configure the number of recommendations (default: 3)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl RecommendationSource for RecencySource {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Recency
    }

    #[instrument(skip(self, context), fields(user_id = context.user_id))]
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation> {
        let top_genres = context.top_genres(self.genre_count);
        if top_genres.is_empty() {
            debug!("No genre preferences, skipping recent releases");
            return Vec::new();
        }

        let candidates = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(MinimumYearFilter::new(self.min_year))
            .add_filter(GenrePreferenceFilter::new(self.genre_count))
            .apply(self.catalog.iter().collect(), context);

        let mut ranked =
            query::sort_movies(candidates, SortKey::ReleaseYear, SortDirection::Descending);
        ranked.truncate(self.limit);

        debug!("Generated {} recent-release recommendations", ranked.len());
        ranked
            .into_iter()
            .map(|movie| {
                Recommendation::new(
                    movie,
                    StrategyKind::Recency,
                    Reason::RecentRelease {
                        year: movie.release_year,
                        matching_genres: matching_genres(movie, &top_genres),
                    },
                )
            })
            .collect()
    }
}
