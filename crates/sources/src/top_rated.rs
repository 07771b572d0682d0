//! Top-Rated Source - popularity fallback
//!
//! No genre or user-specific logic: the highest-rated movies the user has
//! not watched. A user with no history at all gets the top of the full
//! catalog with a longer list (the cold-start case).

use crate::traits::RecommendationSource;
use crate::types::{Reason, Recommendation, StrategyKind};
use data_loader::Catalog;
use pipeline::filters::AlreadyWatchedFilter;
use pipeline::{FilterPipeline, UserContext, query};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct TopRatedSource {
    catalog: Arc<Catalog>,

    /// Maximum number of recommendations for users with a history
    limit: usize,

    /// Maximum number of recommendations for users without one
    cold_start_limit: usize,
}

impl TopRatedSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            limit: 3,
            cold_start_limit: 5,
        }
    }

    /// Configure the number of recommendations (default: 3)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Configure the cold-start list length (default: 5)
    pub fn with_cold_start_limit(mut self, limit: usize) -> Self {
        self.cold_start_limit = limit;
        self
    }

    /// Highest-rated movies of the whole catalog, for users we know nothing about
    pub fn cold_start(&self) -> Vec<Recommendation> {
        query::top_rated(self.catalog.iter(), self.cold_start_limit)
            .into_iter()
            .map(|movie| Recommendation::new(movie, StrategyKind::TopRated, Reason::ColdStart))
            .collect()
    }
}

impl RecommendationSource for TopRatedSource {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TopRated
    }

    #[instrument(skip(self, context), fields(user_id = context.user_id))]
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation> {
        if context.is_cold_start() {
            debug!("Empty watch history, falling back to cold-start list");
            return self.cold_start();
        }

        let candidates = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .apply(self.catalog.iter().collect(), context);

        query::top_rated(candidates, self.limit)
            .into_iter()
            .map(|movie| {
                Recommendation::new(
                    movie,
                    StrategyKind::TopRated,
                    Reason::HighlyRated {
                        rating: movie.rating,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, User};
    use pipeline::build_user_context;

    fn create_test_catalog() -> Arc<Catalog> {
        let ratings = [("A", 6.0), ("B", 9.0), ("C", 7.5), ("D", 9.0), ("E", 3.0), ("F", 8.0)];
        Arc::new(Catalog::new(
            ratings
                .iter()
                .map(|(title, rating)| Movie {
                    title: title.to_string(),
                    genres: vec!["Drama".to_string()],
                    rating: *rating,
                    release_year: 2000,
                })
                .collect(),
        ))
    }

    fn context(catalog: &Catalog, watched: &[&str]) -> UserContext {
        let user = User {
            id: 1,
            name: "Ava".to_string(),
            watched_movies: watched.iter().map(|t| t.to_string()).collect(),
        };
        build_user_context(catalog, &user)
    }

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title()).collect()
    }

    #[test]
    fn test_top_rated_unwatched() {
        let catalog = create_test_catalog();
        let recs = TopRatedSource::new(Arc::clone(&catalog)).recommend(&context(&catalog, &["B"]));

        assert_eq!(titles(&recs), vec!["D", "F", "C"]);
        assert_eq!(recs[0].reason, Reason::HighlyRated { rating: 9.0 });
    }

    #[test]
    fn test_cold_start_uses_full_catalog_top_five() {
        let catalog = create_test_catalog();
        let recs = TopRatedSource::new(Arc::clone(&catalog)).recommend(&context(&catalog, &[]));

        assert_eq!(titles(&recs), vec!["B", "D", "F", "C", "A"]);
        assert!(recs.iter().all(|r| r.reason == Reason::ColdStart));
    }

    #[test]
    fn test_everything_watched_yields_nothing() {
        let catalog = create_test_catalog();
        let all = ["A", "B", "C", "D", "E", "F"];
        let recs = TopRatedSource::new(Arc::clone(&catalog)).recommend(&context(&catalog, &all));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_configured_limits() {
        let catalog = create_test_catalog();
        let source = TopRatedSource::new(Arc::clone(&catalog))
            .with_limit(1)
            .with_cold_start_limit(2);

        assert_eq!(source.recommend(&context(&catalog, &["A"])).len(), 1);
        assert_eq!(source.cold_start().len(), 2);
    }
}
