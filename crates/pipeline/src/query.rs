//! Pure query functions over the catalog.
//!
//! Every function here borrows its input and returns references into it, so
//! the catalog is never copied or mutated. All sorts are stable: movies with
//! equal keys keep their input order in both directions.

use data_loader::{Catalog, Genre, Movie};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Genre selection for browsing; `All` keeps the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    Only(Genre),
}

impl GenreFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => movie.has_genre(genre),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = Infallible;

    /// `"All"` (any case) is the sentinel, anything else is a genre label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(GenreFilter::All)
        } else {
            Ok(GenreFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => write!(f, "All"),
            GenreFilter::Only(genre) => write!(f, "{}", genre),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rating,
    ReleaseYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The four browse orderings offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    RatingHighToLow,
    RatingLowToHigh,
    YearNewestFirst,
    YearOldestFirst,
}

impl SortOption {
    pub fn key(self) -> SortKey {
        match self {
            SortOption::RatingHighToLow | SortOption::RatingLowToHigh => SortKey::Rating,
            SortOption::YearNewestFirst | SortOption::YearOldestFirst => SortKey::ReleaseYear,
        }
    }

    pub fn direction(self) -> SortDirection {
        match self {
            SortOption::RatingHighToLow | SortOption::YearNewestFirst => SortDirection::Descending,
            SortOption::RatingLowToHigh | SortOption::YearOldestFirst => SortDirection::Ascending,
        }
    }
}

/// One entry of a user's genre tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenrePreference {
    pub genre: Genre,
    pub count: u32,
}

/// Movies whose genres contain the selected genre.
pub fn filter_by_genre<'a, I>(movies: I, filter: &GenreFilter) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies.into_iter().filter(|m| filter.matches(m)).collect()
}

/// Stable sort by rating or release year.
pub fn sort_movies<'a>(
    mut movies: Vec<&'a Movie>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a Movie> {
    let compare = |a: &Movie, b: &Movie| -> Ordering {
        match key {
            SortKey::Rating => a.rating.total_cmp(&b.rating),
            SortKey::ReleaseYear => a.release_year.cmp(&b.release_year),
        }
    };
    match direction {
        SortDirection::Ascending => movies.sort_by(|a, b| compare(a, b)),
        SortDirection::Descending => movies.sort_by(|a, b| compare(b, a)),
    }
    movies
}

/// Movies released in `year` or later.
pub fn filter_by_min_year<'a, I>(movies: I, year: u16) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .filter(|m| m.release_year >= year)
        .collect()
}

/// Movies whose title is not in the watched set.
pub fn unwatched<'a, I>(movies: I, watched: &HashSet<String>) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .filter(|m| !watched.contains(&m.title))
        .collect()
}

/// The `n` highest-rated movies, ties in input order.
pub fn top_rated<'a, I>(movies: I, n: usize) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut sorted = sort_movies(
        movies.into_iter().collect(),
        SortKey::Rating,
        SortDirection::Descending,
    );
    sorted.truncate(n);
    sorted
}

/// Genre filter followed by one of the browse orderings.
pub fn filter_and_sort<'a>(
    catalog: &'a Catalog,
    genre: &GenreFilter,
    sort: SortOption,
) -> Vec<&'a Movie> {
    sort_movies(filter_by_genre(catalog, genre), sort.key(), sort.direction())
}

/// Tally genres across the distinct watched titles that resolve to a movie.
///
/// Each title counts once no matter how often it appears in the history.
/// The result is sorted by count descending; equal counts keep the order in
/// which the genres were first tallied.
pub fn genre_preferences<S: AsRef<str>>(catalog: &Catalog, watched: &[S]) -> Vec<GenrePreference> {
    let mut seen_titles: HashSet<&str> = HashSet::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<GenrePreference> = Vec::new();

    for title in watched.iter().map(AsRef::as_ref) {
        if !seen_titles.insert(title) {
            continue;
        }
        let Some(movie) = catalog.get_movie(title) else {
            continue;
        };
        for genre in &movie.genres {
            let position = *positions.entry(genre.as_str()).or_insert_with(|| {
                tally.push(GenrePreference {
                    genre: genre.clone(),
                    count: 0,
                });
                tally.len() - 1
            });
            tally[position].count += 1;
        }
    }

    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}
