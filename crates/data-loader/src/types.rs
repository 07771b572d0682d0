//! Core domain types for the movie catalog and user directory.
//!
//! Both collections are built once at load time and never mutated in place.
//! Lookups are tolerant: a title or id that does not resolve yields `None`
//! or an empty slice, never an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// A genre label such as `"Sci-Fi"` or `"Drama"`
pub type Genre = String;

// =============================================================================
// Records
// =============================================================================

/// A movie in the catalog.
///
/// The title is the catalog key: watch histories and recommendations refer
/// to movies by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// Genre labels in the order they appear in the source record
    #[serde(rename = "genre")]
    pub genres: Vec<Genre>,
    /// Score in [0, 10]
    pub rating: f32,
    pub release_year: u16,
}

impl Movie {
    /// True when this movie carries the given genre label
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// A user with an ordered watch history.
///
/// `watched_movies` may contain duplicates and titles that are not in the
/// catalog; both are tolerated by every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: UserId,
    /// Display label, not guaranteed unique
    pub name: String,
    pub watched_movies: Vec<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The full set of known movies, in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    /// Title -> position of its first occurrence in `movies`
    title_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(position);
        }
        Self {
            movies,
            title_index,
        }
    }

    /// All movies in load order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Resolve a title to its movie. Unknown titles yield `None`.
    pub fn get_movie(&self, title: &str) -> Option<&Movie> {
        self.title_index.get(title).map(|&position| &self.movies[position])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.title_index.contains_key(title)
    }

    /// Distinct genre labels in first-seen order
    pub fn genres(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for genre in self.movies.iter().flat_map(|m| m.genres.iter()) {
            if !seen.contains(&genre.as_str()) {
                seen.push(genre);
            }
        }
        seen
    }

    /// Movies carrying `genre`, in load order
    pub fn get_movies_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.movies.iter().filter(|m| m.has_genre(genre)).collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

// =============================================================================
// UserDirectory
// =============================================================================

/// All known users, in load order.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    /// User id -> position in `users`
    id_index: HashMap<UserId, usize>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        let mut id_index = HashMap::with_capacity(users.len());
        for (position, user) in users.iter().enumerate() {
            id_index.entry(user.id).or_insert(position);
        }
        Self { users, id_index }
    }

    /// All users in load order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    /// Get a user by id
    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.id_index.get(&id).map(|&position| &self.users[position])
    }

    /// Find a user by display name.
    ///
    /// Names are not unique; the first user in load order wins and a
    /// warning is logged when the name is ambiguous.
    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        let mut matches = self.users.iter().filter(|u| u.name == name);
        let first = matches.next()?;
        let others = matches.count();
        if others > 0 {
            warn!(
                "User name '{}' matches {} users, selecting user {}",
                name,
                others + 1,
                first.id
            );
        }
        Some(first)
    }

    /// Watch history of a user, empty for unknown ids
    pub fn watched_movies(&self, id: UserId) -> &[String] {
        self.get_user(id)
            .map(|u| u.watched_movies.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<'a> IntoIterator for &'a UserDirectory {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

// =============================================================================
// DataIndex - both collections as loaded
// =============================================================================

/// The loaded dataset: one catalog and one user directory.
#[derive(Debug, Clone, Default)]
pub struct DataIndex {
    pub catalog: Catalog,
    pub users: UserDirectory,
}

impl DataIndex {
    pub fn new(catalog: Catalog, users: UserDirectory) -> Self {
        Self { catalog, users }
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.users.len(), self.catalog.len())
    }
}
