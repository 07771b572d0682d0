//! Filter to remove movies the user has already watched.
//!
//! This is typically the first filter in the pipeline, as there's no
//! point in recommending movies the user has already seen.

use crate::context::UserContext;
use crate::query;
use crate::traits::Filter;
use data_loader::Movie;

/// Removes candidates whose title is in the user's watch history.
///
/// Uses the HashSet in UserContext.watched_movies for O(1) lookups.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, context: &UserContext) -> Vec<&'a Movie> {
        query::unwatched(movies, &context.watched_movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            rating: 7.0,
            release_year: 2001,
        }
    }

    #[test]
    fn test_already_watched_filter() {
        let mut context = UserContext::new(1, "Ava");
        context.watched_movies.insert("A".to_string());
        context.watched_movies.insert("C".to_string());

        let movies = vec![movie("A"), movie("B"), movie("C"), movie("D")];
        let filtered = AlreadyWatchedFilter.apply(movies.iter().collect(), &context);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "B");
        assert_eq!(filtered[1].title, "D");
    }
}
