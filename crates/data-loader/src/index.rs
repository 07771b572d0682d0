//! DataIndex building and validation.
//!
//! Loads both collections, wraps them in `Catalog` / `UserDirectory` and
//! checks the keys that must be unique.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

impl DataIndex {
    /// Load `movies.json` and `users.json` from a directory.
    ///
    /// Both files are parsed in parallel, then validated.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let movies_path = data_dir.join(parser::MOVIES_FILE);
        let users_path = data_dir.join(parser::USERS_FILE);

        let (movies, users) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_users(&users_path),
        );
        let movies = movies?;
        let users = users?;

        info!("Loaded {} movies, {} users", movies.len(), users.len());

        let index = DataIndex::new(Catalog::new(movies), UserDirectory::new(users));
        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// - Movie titles are unique
    /// - User ids are unique
    ///
    /// Duplicate user names and watched titles missing from the catalog are
    /// tolerated and only logged.
    pub fn validate(&self) -> Result<()> {
        let mut titles = HashSet::new();
        for movie in self.catalog.iter() {
            if !titles.insert(movie.title.as_str()) {
                return Err(DataLoadError::DuplicateKey {
                    entity: "movie title".to_string(),
                    key: movie.title.clone(),
                });
            }
        }

        let mut ids = HashSet::new();
        let mut names: HashMap<&str, usize> = HashMap::new();
        for user in self.users.iter() {
            if !ids.insert(user.id) {
                return Err(DataLoadError::DuplicateKey {
                    entity: "user id".to_string(),
                    key: user.id.to_string(),
                });
            }
            *names.entry(user.name.as_str()).or_insert(0) += 1;

            let unknown = user
                .watched_movies
                .iter()
                .filter(|title| !self.catalog.contains(title))
                .count();
            if unknown > 0 {
                warn!(
                    "User {} has {} watched titles not in the catalog",
                    user.id, unknown
                );
            }
        }

        for (name, count) in names {
            if count > 1 {
                warn!("User name '{}' is shared by {} users", name, count);
            }
        }
        Ok(())
    }
}
