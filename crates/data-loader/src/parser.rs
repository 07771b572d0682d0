//! Parser for the JSON data files.
//!
//! - movies.json: `[{"title", "genre": [..], "rating", "release_year"}, ..]`
//! - users.json: `[{"user_id", "name", "watched_movies": [..]}, ..]`
//!
//! Records are deserialized straight into `Movie` and `User`, so a record
//! missing a field fails here with a `ParseError` instead of surfacing later
//! as a bad lookup.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const MOVIES_FILE: &str = "movies.json";
pub const USERS_FILE: &str = "users.json";

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    parse_movies_str(&content, &file_label(path))
}

/// Parse the users file
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    let content = read_file(path)?;
    parse_users_str(&content, &file_label(path))
}

/// Parse a JSON array of movie records.
///
/// `file` only labels error messages.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let movies: Vec<Movie> =
        serde_json::from_str(content).map_err(|e| DataLoadError::from_json(file, e))?;

    for movie in &movies {
        if movie.genres.is_empty() {
            return Err(DataLoadError::InvalidValue {
                field: "genre".to_string(),
                value: format!("empty genre list for '{}'", movie.title),
            });
        }
        if !(0.0..=10.0).contains(&movie.rating) {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: movie.rating.to_string(),
            });
        }
    }
    Ok(movies)
}

/// Parse a JSON array of user records.
pub fn parse_users_str(content: &str, file: &str) -> Result<Vec<User>> {
    serde_json::from_str(content).map_err(|e| DataLoadError::from_json(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movies() {
        let json = r#"[
            {"title": "Nova", "genre": ["Sci-Fi"], "rating": 9, "release_year": 2020},
            {"title": "OldTown", "genre": ["Drama", "Crime"], "rating": 6.5, "release_year": 1998}
        ]"#;
        let movies = parse_movies_str(json, MOVIES_FILE).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Nova");
        assert_eq!(movies[0].rating, 9.0);
        assert_eq!(movies[1].genres, vec!["Drama", "Crime"]);
        assert_eq!(movies[1].release_year, 1998);
    }

    #[test]
    fn test_parse_users() {
        let json = r#"[
            {"user_id": 101, "name": "Ava", "watched_movies": ["Nova", "Nova", "Missing"]}
        ]"#;
        let users = parse_users_str(json, USERS_FILE).unwrap();

        assert_eq!(users[0].id, 101);
        assert_eq!(users[0].watched_movies.len(), 3);
    }

    #[test]
    fn test_missing_field_fails_fast() {
        let json = r#"[{"title": "Nova", "genre": ["Sci-Fi"], "rating": 9}]"#;
        let err = parse_movies_str(json, MOVIES_FILE).unwrap_err();

        match err {
            DataLoadError::ParseError { file, reason, .. } => {
                assert_eq!(file, MOVIES_FILE);
                assert!(reason.contains("release_year"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_an_array_fails_fast() {
        let err = parse_users_str(r#"{"user_id": 1}"#, USERS_FILE).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
    }

    #[test]
    fn test_rating_out_of_range() {
        let json = r#"[{"title": "X", "genre": ["Drama"], "rating": 11, "release_year": 2000}]"#;
        let err = parse_movies_str(json, MOVIES_FILE).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "rating"));
    }

    #[test]
    fn test_empty_genres_rejected() {
        let json = r#"[{"title": "X", "genre": [], "rating": 5, "release_year": 2000}]"#;
        let err = parse_movies_str(json, MOVIES_FILE).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "genre"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("/definitely/not/here/movies.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
