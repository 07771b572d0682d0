//! Genre-Based Source
//!
//! "More of what you already watch": the highest-rated unwatched movies in
//! the user's single favorite genre.
//!
//! ## Algorithm
//! 1. Take the first entry of the user's genre tally
//! 2. Keep unwatched movies carrying that genre
//! 3. Sort by rating, highest first (stable)
//! 4. Return the top 3

use crate::traits::RecommendationSource;
use crate::types::{Reason, Recommendation, StrategyKind};
use data_loader::Catalog;
use pipeline::filters::{AlreadyWatchedFilter, GenrePreferenceFilter};
use pipeline::{FilterPipeline, SortDirection, SortKey, UserContext, query};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recommends top-rated movies from the user's favorite genre
pub struct GenreBasedSource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Maximum number of recommendations
    limit: usize,
}

impl GenreBasedSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, limit: 3 }
    }

    /// Configure the number of recommendations (default: 3)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl RecommendationSource for GenreBasedSource {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GenreBased
    }

    #[instrument(skip(self, context), fields(user_id = context.user_id))]
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation> {
        let Some(favorite) = context.top_genres(1).first().map(|g| g.to_string()) else {
            debug!("No genre preferences, skipping genre-based recommendations");
            return Vec::new();
        };

        let candidates = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(GenrePreferenceFilter::new(1))
            .apply(self.catalog.iter().collect(), context);

        let mut ranked = query::sort_movies(candidates, SortKey::Rating, SortDirection::Descending);
        ranked.truncate(self.limit);

        debug!(
            "Generated {} genre-based recommendations for favorite genre {}",
            ranked.len(),
            favorite
        );
        ranked
            .into_iter()
            .map(|movie| {
                Recommendation::new(
                    movie,
                    StrategyKind::GenreBased,
                    Reason::FavoriteGenre {
                        genre: favorite.clone(),
                    },
                )
            })
            .collect()
    }
}
