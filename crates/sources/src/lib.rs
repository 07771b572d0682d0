//! # Sources Crate
//!
//! Recommendation strategies. Each one reads a shared, immutable catalog
//! (and, for the collaborative strategy, the user directory) and turns a
//! [`pipeline::UserContext`] into a short ranked list of explained
//! [`Recommendation`]s.
//!
//! ## Strategies
//!
//! - [`GenreBasedSource`]: top-rated unwatched movies in the favorite genre
//! - [`CollaborativeSource`]: movies watched by the most similar users
//! - [`TopRatedSource`]: top-rated unwatched movies, or the cold-start list
//! - [`RecencySource`]: releases from 2015 on in the top two genres
//! - [`PreferredGenresSource`]: top-rated unwatched movies in the top two genres
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use pipeline::build_user_context;
//! use sources::{GenreBasedSource, RecommendationSource};
//! use std::sync::Arc;
//!
//! let index = DataIndex::load_from_files("data")?;
//! let catalog = Arc::new(index.catalog);
//! let user = index.users.get_user(1).unwrap();
//!
//! let context = build_user_context(&catalog, user);
//! let recs = GenreBasedSource::new(catalog.clone()).recommend(&context);
//! ```

pub mod collaborative;
pub mod genre_based;
pub mod preferred_genres;
pub mod recency;
pub mod top_rated;
pub mod traits;
pub mod types;

pub use collaborative::{CollaborativeSource, SimilarUser};
pub use genre_based::GenreBasedSource;
pub use preferred_genres::PreferredGenresSource;
pub use recency::RecencySource;
pub use top_rated::TopRatedSource;
pub use traits::RecommendationSource;
pub use types::{Reason, Recommendation, StrategyKind, matching_genres};

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, Movie, User, UserDirectory};
    use pipeline::build_user_context;
    use std::sync::Arc;

    fn create_test_data() -> (Arc<Catalog>, Arc<UserDirectory>) {
        let catalog = Catalog::new(vec![
            Movie {
                title: "Nova".to_string(),
                genres: vec!["Sci-Fi".to_string()],
                rating: 9.0,
                release_year: 2020,
            },
            Movie {
                title: "Orbit".to_string(),
                genres: vec!["Sci-Fi".to_string()],
                rating: 8.0,
                release_year: 2018,
            },
        ]);
        let users = UserDirectory::new(vec![
            User {
                id: 1,
                name: "Ava".to_string(),
                watched_movies: vec!["Nova".to_string()],
            },
            User {
                id: 2,
                name: "Ben".to_string(),
                watched_movies: vec!["Nova".to_string(), "Orbit".to_string()],
            },
        ]);
        (Arc::new(catalog), Arc::new(users))
    }

    #[test]
    fn test_sources_behind_trait_objects() {
        let (catalog, users) = create_test_data();
        let sources: Vec<Box<dyn RecommendationSource>> = vec![
            Box::new(GenreBasedSource::new(catalog.clone())),
            Box::new(CollaborativeSource::new(catalog.clone(), users.clone())),
            Box::new(TopRatedSource::new(catalog.clone())),
            Box::new(RecencySource::new(catalog.clone())),
            Box::new(PreferredGenresSource::new(catalog.clone())),
        ];

        let context = build_user_context(&catalog, users.get_user(1).unwrap());
        for source in &sources {
            let recs = source.recommend(&context);
            assert_eq!(recs.len(), 1, "{}", source.kind());
            assert_eq!(recs[0].title(), "Orbit");
            assert_eq!(recs[0].source, source.kind());
        }
    }
}
