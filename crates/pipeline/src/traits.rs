//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to movie candidate lists.

use crate::context::UserContext;
use data_loader::Movie;

/// Core trait for filtering movies.
///
/// Filters borrow candidates from the catalog and return the subset they
/// keep, preserving input order. They never fail: a filter with nothing to
/// match against returns an empty list.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `movies` - The candidates to filter (takes ownership of the list)
    /// * `context` - User context containing history and genre tally
    fn apply<'a>(&self, movies: Vec<&'a Movie>, context: &UserContext) -> Vec<&'a Movie>;
}
