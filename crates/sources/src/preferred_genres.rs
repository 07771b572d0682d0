//! Preferred-Genres Source
//!
//! Highest-rated unwatched movies sharing any of the user's top genres. The
//! watch-history simulation compares this list before and after new titles
//! are added.

use crate::traits::RecommendationSource;
use crate::types::{Reason, Recommendation, StrategyKind, matching_genres};
use data_loader::Catalog;
use pipeline::filters::{AlreadyWatchedFilter, GenrePreferenceFilter};
use pipeline::{FilterPipeline, UserContext, query};
use std::sync::Arc;
use tracing::instrument;

pub struct PreferredGenresSource {
    catalog: Arc<Catalog>,
    genre_count: usize,
    limit: usize,
}

impl PreferredGenresSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            genre_count: 2,
            limit: 3,
        }
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

    pub fn genre_count(&self) -> usize {
        self.genre_count
    }
}

impl RecommendationSource for PreferredGenresSource {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PreferredGenres
    }

    #[instrument(skip(self, context), fields(user_id = context.user_id))]
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation> {
        let top_genres = context.top_genres(self.genre_count);

        let candidates = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(GenrePreferenceFilter::new(self.genre_count))
            .apply(self.catalog.iter().collect(), context);

        query::top_rated(candidates, self.limit)
            .into_iter()
            .map(|movie| {
                Recommendation::new(
                    movie,
                    StrategyKind::PreferredGenres,
                    Reason::PreferredGenres {
                        matching_genres: matching_genres(movie, &top_genres),
                    },
                )
            })
            .collect()
    }
}
