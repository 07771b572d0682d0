//! Watch-history simulation.
//!
//! A [`SimulationCopy`] owns a deep copy of a user taken when the simulation
//! begins. Additions only ever touch that copy, so the loaded directory (and
//! any other session's copy) stays unchanged.

use data_loader::User;
use pipeline::GenrePreference;
use sources::Recommendation;
use std::collections::BTreeSet;

/// A private, mutable copy of one user's record
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationCopy {
    user: User,
}

/// Start a simulation from `user`. The watch history is cloned, never shared.
pub fn begin_simulation(user: &User) -> SimulationCopy {
    SimulationCopy { user: user.clone() }
}

impl SimulationCopy {
    /// Append `titles` to the copied watch history.
    ///
    /// No deduplication: a title already in the history is appended again.
    pub fn apply_additions<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user
            .watched_movies
            .extend(titles.into_iter().map(Into::into));
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

/// Titles present in `after` but not in `before`
pub fn diff_recommendations(before: &[Recommendation], after: &[Recommendation]) -> BTreeSet<String> {
    let previous: BTreeSet<&str> = before.iter().map(|r| r.title()).collect();
    after
        .iter()
        .map(|r| r.title())
        .filter(|title| !previous.contains(title))
        .map(str::to_string)
        .collect()
}

/// Result of simulating extra watched titles for one user
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// The simulated user after the additions
    pub simulated_user: User,
    /// Top genres before the additions
    pub genres_before: Vec<GenrePreference>,
    /// Top genres after the additions
    pub genres_after: Vec<GenrePreference>,
    pub before: Vec<Recommendation>,
    pub after: Vec<Recommendation>,
    /// Titles that appear only in `after`
    pub new_titles: BTreeSet<String>,
}
