//! # Recommendation Orchestrator
//!
//! Coordinates everything a single user interaction needs:
//! 1. Resolve the user (by id, or by name as a display label)
//! 2. Build the user context (watched set + genre tally)
//! 3. Run every strategy against the shared catalog
//! 4. Return the per-strategy lists together with the context they used
//!
//! Nothing is cached between calls. The catalog and user directory are
//! loaded once, wrapped in `Arc`, and never mutated; simulations work on
//! their own copies.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, instrument, warn};

use data_loader::{Catalog, DataIndex, Movie, User, UserDirectory, UserId};
use pipeline::query::{self, GenreFilter, SortOption};
use pipeline::filters::{AlreadyWatchedFilter, MinimumYearFilter, SelectedGenreFilter};
use pipeline::{FilterPipeline, GenrePreference, UserContext, build_user_context};
use sources::{
    CollaborativeSource, GenreBasedSource, PreferredGenresSource, RecencySource, Recommendation,
    RecommendationSource, SimilarUser, StrategyKind, TopRatedSource,
};

use crate::config::RecommenderConfig;
use crate::insights::{BrowsingAnalysis, BrowsingSession, RatingFeedback, TimeScenario};
use crate::simulation::{SimulationOutcome, begin_simulation, diff_recommendations};

/// How a caller picks a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelector {
    Id(UserId),
    /// First user with this name; names are not unique
    Name(String),
}

/// One strategy's output
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub kind: StrategyKind,
    pub recommendations: Vec<Recommendation>,
}

/// Everything computed for one user in one request
#[derive(Debug, Clone)]
pub struct UserRecommendations {
    pub context: UserContext,
    pub similar_users: Vec<SimilarUser>,
    /// Genre-based, collaborative, top-rated and recency, in that order
    pub strategies: Vec<StrategyResult>,
}

impl UserRecommendations {
    pub fn for_strategy(&self, kind: StrategyKind) -> &[Recommendation] {
        self.strategies
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.recommendations.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.iter().all(|s| s.recommendations.is_empty())
    }
}

/// Main orchestrator over a loaded catalog and user directory
pub struct RecommendationOrchestrator {
    catalog: Arc<Catalog>,
    users: Arc<UserDirectory>,
    config: RecommenderConfig,
    genre_based: GenreBasedSource,
    collaborative: CollaborativeSource,
    top_rated: TopRatedSource,
    recency: RecencySource,
    preferred_genres: PreferredGenresSource,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with every strategy configured from `config`
    pub fn new(index: DataIndex, config: RecommenderConfig) -> Self {
        let catalog = Arc::new(index.catalog);
        let users = Arc::new(index.users);

        let genre_based = GenreBasedSource::new(catalog.clone()).with_limit(config.limit);
        let collaborative = CollaborativeSource::new(catalog.clone(), users.clone())
            .with_similar_user_count(config.similar_user_count)
            .with_limit(config.limit);
        let top_rated = TopRatedSource::new(catalog.clone())
            .with_limit(config.limit)
            .with_cold_start_limit(config.cold_start_limit);
        let recency = RecencySource::new(catalog.clone())
            .with_min_year(config.recent_release_year)
            .with_genre_count(config.recency_genre_count)
            .with_limit(config.limit);
        let preferred_genres = PreferredGenresSource::new(catalog.clone())
            .with_genre_count(config.simulation_genre_count)
            .with_limit(config.limit);

        Self {
            catalog,
            users,
            config,
            genre_based,
            collaborative,
            top_rated,
            recency,
            preferred_genres,
        }
    }

    /// Load `movies.json` and `users.json` from `data_dir` and build the orchestrator
    pub fn from_data_dir(data_dir: &Path, config: RecommenderConfig) -> Result<Self> {
        let start = Instant::now();
        let index = DataIndex::load_from_files(data_dir)
            .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;
        let (users, movies) = index.counts();
        info!(
            "Loaded {} movies and {} users in {:.2?}",
            movies,
            users,
            start.elapsed()
        );
        Ok(Self::new(index, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Resolve a user; an unknown id or name is an error
    pub fn find_user(&self, selector: &UserSelector) -> Result<&User> {
        match selector {
            UserSelector::Id(id) => self
                .users
                .get_user(*id)
                .ok_or_else(|| anyhow!("User {} not found", id)),
            UserSelector::Name(name) => self
                .users
                .find_by_name(name)
                .ok_or_else(|| anyhow!("No user named '{}'", name)),
        }
    }

    pub fn build_context(&self, user: &User) -> UserContext {
        build_user_context(&self.catalog, user)
    }

    /// Run the genre-based, collaborative, top-rated and recency strategies
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub fn recommend(&self, user: &User) -> UserRecommendations {
        let start = Instant::now();
        let context = self.build_context(user);
        debug!(
            "Built user context: {} watched titles, {} genres",
            context.watched_movies.len(),
            context.genre_preferences.len()
        );

        let similar_users = self.collaborative.find_similar_users(&context);

        let strategies: [&dyn RecommendationSource; 4] = [
            &self.genre_based,
            &self.collaborative,
            &self.top_rated,
            &self.recency,
        ];
        let strategies: Vec<StrategyResult> = strategies
            .iter()
            .map(|source| StrategyResult {
                kind: source.kind(),
                recommendations: source.recommend(&context),
            })
            .collect();

        let total: usize = strategies.iter().map(|s| s.recommendations.len()).sum();
        info!(
            "Generated {} recommendations for user {} in {:.2?}",
            total,
            user.id,
            start.elapsed()
        );

        UserRecommendations {
            context,
            similar_users,
            strategies,
        }
    }

    pub fn recommend_for(&self, selector: &UserSelector) -> Result<UserRecommendations> {
        let user = self.find_user(selector)?;
        Ok(self.recommend(user))
    }

    /// Highest-rated movies overall, for a user with no history
    pub fn cold_start(&self) -> Vec<Recommendation> {
        self.top_rated.cold_start()
    }

    /// The "top N rated" listing
    pub fn top_movies(&self, limit: Option<usize>) -> Vec<&Movie> {
        query::top_rated(self.catalog.iter(), limit.unwrap_or(self.config.top_movies_limit))
    }

    /// Browse the catalog: genre filter, optional release-year floor, then sort
    pub fn browse(
        &self,
        genre: &GenreFilter,
        sort: SortOption,
        min_year: Option<u16>,
    ) -> Vec<&Movie> {
        let mut pipeline = FilterPipeline::new().add_filter(SelectedGenreFilter::new(genre.clone()));
        if let Some(year) = min_year {
            pipeline = pipeline.add_filter(MinimumYearFilter::new(year));
        }

        // Browsing is the same for every user
        let movies = pipeline.apply(self.catalog.iter().collect(), &UserContext::default());
        query::sort_movies(movies, sort.key(), sort.direction())
    }

    /// Unwatched movies the user could add to a simulated history
    pub fn addable_movies(&self, user: &User, genre: &GenreFilter) -> Vec<&Movie> {
        FilterPipeline::new()
            .add_filter(SelectedGenreFilter::new(genre.clone()))
            .add_filter(AlreadyWatchedFilter)
            .apply(self.catalog.iter().collect(), &self.build_context(user))
    }

    /// Other users sharing watched titles with `user`, most similar first
    pub fn similar_users(&self, user: &User) -> Vec<SimilarUser> {
        self.collaborative.find_similar_users(&self.build_context(user))
    }

    /// Preferred-genre recommendations, the list the simulation compares
    pub fn preferred_genre_recommendations(&self, user: &User) -> Vec<Recommendation> {
        self.preferred_genres.recommend(&self.build_context(user))
    }

    /// Simulate `user` watching `additions` without touching the loaded directory
    #[instrument(skip(self, user, additions), fields(user_id = user.id))]
    pub fn simulate(&self, user: &User, additions: &[String]) -> SimulationOutcome {
        for title in additions {
            if !self.catalog.contains(title) {
                warn!("Simulated title '{}' is not in the catalog", title);
            }
        }

        let genre_count = self.preferred_genres.genre_count();
        let before_context = self.build_context(user);
        let before = self.preferred_genres.recommend(&before_context);

        let simulated_user = begin_simulation(user)
            .apply_additions(additions.iter().cloned())
            .into_user();
        let after_context = self.build_context(&simulated_user);
        let after: Vec<Recommendation> = self
            .preferred_genres
            .recommend(&after_context)
            .into_iter()
            .map(|mut rec| {
                rec.reason = rec.reason.into_updated();
                rec
            })
            .collect();

        let new_titles = diff_recommendations(&before, &after);
        debug!("Simulation surfaced {} new titles", new_titles.len());

        SimulationOutcome {
            genres_before: top_preferences(&before_context, genre_count),
            genres_after: top_preferences(&after_context, genre_count),
            simulated_user,
            before,
            after,
            new_titles,
        }
    }

    /// Explicit rating of a title from the user's watch history
    pub fn rate(&self, user: &User, title: &str, rating: u8) -> Result<RatingFeedback> {
        if !(1..=10).contains(&rating) {
            bail!("Rating must be between 1 and 10, got {}", rating);
        }
        if !user.watched_movies.iter().any(|t| t == title) {
            bail!("{} has not watched '{}'", user.name, title);
        }
        Ok(RatingFeedback::new(title, rating, self.catalog.get_movie(title)))
    }

    pub fn analyze_browsing(&self, session: &BrowsingSession) -> BrowsingAnalysis {
        session.analyze(
            &self.catalog,
            self.config.browsing_interest_threshold,
            self.config.limit,
        )
    }

    pub fn scenario(&self, scenario: TimeScenario) -> Vec<Recommendation> {
        scenario.recommend(&self.catalog, self.config.limit)
    }
}

fn top_preferences(context: &UserContext, n: usize) -> Vec<GenrePreference> {
    context.genre_preferences.iter().take(n).cloned().collect()
}
