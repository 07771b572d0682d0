//! Recommendation output types shared by every strategy.

use data_loader::{Genre, Movie};
use std::fmt;

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    GenreBased,
    Collaborative,
    TopRated,
    Recency,
    PreferredGenres,
    Browsing,
    Seasonal,
}

impl StrategyKind {
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::GenreBased => "Genre-Based",
            StrategyKind::Collaborative => "Similar Users",
            StrategyKind::TopRated => "Top-Rated",
            StrategyKind::Recency => "Recent Releases",
            StrategyKind::PreferredGenres => "Preferred Genres",
            StrategyKind::Browsing => "Browsing Interest",
            StrategyKind::Seasonal => "Time of Viewing",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a movie was recommended
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    FavoriteGenre {
        genre: Genre,
    },
    SimilarUser {
        recommender: String,
        common_count: usize,
    },
    HighlyRated {
        rating: f32,
    },
    ColdStart,
    RecentRelease {
        year: u16,
        matching_genres: Vec<Genre>,
    },
    PreferredGenres {
        matching_genres: Vec<Genre>,
    },
    /// Preferred genres recomputed after a simulated watch-history update
    UpdatedPreferences {
        matching_genres: Vec<Genre>,
    },
    BrowsingInterest {
        genre: Genre,
    },
    Seasonal {
        scenario: String,
        matching_genres: Vec<Genre>,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::FavoriteGenre { genre } => {
                write!(f, "Contains your favorite genre ({})", genre)
            }
            Reason::SimilarUser {
                recommender,
                common_count,
            } => write!(
                f,
                "Watched by {}, who shares {} movies with you",
                recommender, common_count
            ),
            Reason::HighlyRated { rating } => write!(
                f,
                "Among the highest-rated movies you haven't seen (Rating: {})",
                rating
            ),
            Reason::ColdStart => write!(f, "One of our highest-rated movies"),
            Reason::RecentRelease {
                year,
                matching_genres,
            } => write!(
                f,
                "Recent release ({}) in your preferred genres ({})",
                year,
                matching_genres.join(", ")
            ),
            Reason::PreferredGenres { matching_genres } => write!(
                f,
                "Matches your preferred genres ({})",
                matching_genres.join(", ")
            ),
            Reason::UpdatedPreferences { matching_genres } => write!(
                f,
                "Matches your updated preferences ({})",
                matching_genres.join(", ")
            ),
            Reason::BrowsingInterest { genre } => {
                write!(f, "You showed interest in {} movies", genre)
            }
            Reason::Seasonal {
                scenario,
                matching_genres,
            } => write!(
                f,
                "{} movies are popular during {}",
                matching_genres.join(", "),
                scenario.to_lowercase()
            ),
        }
    }
}

impl Reason {
    /// Relabel a preferred-genres reason as coming from updated preferences.
    /// Other reasons are returned unchanged.
    pub fn into_updated(self) -> Self {
        match self {
            Reason::PreferredGenres { matching_genres } => {
                Reason::UpdatedPreferences { matching_genres }
            }
            other => other,
        }
    }
}

/// A recommended movie with its justification.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub source: StrategyKind,
    pub reason: Reason,
}

impl Recommendation {
    pub fn new(movie: &Movie, source: StrategyKind, reason: Reason) -> Self {
        Self {
            movie: movie.clone(),
            source,
            reason,
        }
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }
}

/// Genres of `movie` that appear in `genres`, in the movie's own order.
pub fn matching_genres(movie: &Movie, genres: &[&str]) -> Vec<Genre> {
    movie
        .genres
        .iter()
        .filter(|g| genres.contains(&g.as_str()))
        .cloned()
        .collect()
}
