//! Filter to a single browse genre, independent of the user.

use crate::context::UserContext;
use crate::query::{self, GenreFilter};
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps candidates matching a fixed `GenreFilter`; `All` keeps everything.
pub struct SelectedGenreFilter {
    genre: GenreFilter,
}

impl SelectedGenreFilter {
    pub fn new(genre: GenreFilter) -> Self {
        Self { genre }
    }
}

impl Filter for SelectedGenreFilter {
    fn name(&self) -> &str {
        "SelectedGenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, _context: &UserContext) -> Vec<&'a Movie> {
        query::filter_by_genre(movies, &self.genre)
    }
}
