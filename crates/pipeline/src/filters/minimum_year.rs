//! Filter for recent releases.
//!
//! Drops movies released before a cutoff year.

use crate::context::UserContext;
use crate::query;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps candidates released in `min_year` or later.
pub struct MinimumYearFilter {
    min_year: u16,
}

impl MinimumYearFilter {
    /// Create a new MinimumYearFilter.
    ///
    /// # Arguments
    /// * `min_year` - Inclusive lower bound on release year (typically 2015)
    pub fn new(min_year: u16) -> Self {
        Self { min_year }
    }
}

impl Filter for MinimumYearFilter {
    fn name(&self) -> &str {
        "MinimumYearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>, _context: &UserContext) -> Vec<&'a Movie> {
        query::filter_by_min_year(movies, self.min_year)
    }
}
