//! Collaborative Source - Similar Users
//!
//! Generates recommendations from users who watched the same movies:
//! "People who watched what you watched also watched these movies"
//!
//! ## Algorithm
//! 1. For every other user, similarity = size of the intersection of the two
//!    watch histories (as sets)
//! 2. Keep users with similarity > 0, most similar first (ties keep
//!    directory order)
//! 3. Walk the watch histories of the top 2 similar users, collecting titles
//!    the target has not watched and that resolve in the catalog
//! 4. Deduplicate by title (first occurrence wins) and cap at 3
//! 5. Rank the kept movies by catalog rating, highest first

use crate::traits::RecommendationSource;
use crate::types::{Reason, Recommendation, StrategyKind};
use data_loader::{Catalog, UserDirectory, UserId};
use pipeline::UserContext;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Another user who shares at least one watched title with the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarUser {
    pub user_id: UserId,
    pub name: String,
    /// Titles both users watched, in the target's history order
    pub common_movies: Vec<String>,
    /// `common_movies.len()`
    pub similarity: usize,
}

/// Collaborative source built on watch-history overlap
pub struct CollaborativeSource {
    catalog: Arc<Catalog>,
    users: Arc<UserDirectory>,

    /// How many of the most similar users contribute candidates
    similar_user_count: usize,

    /// Maximum number of recommendations
    limit: usize,
}

impl CollaborativeSource {
    /// Create a new collaborative source
    pub fn new(catalog: Arc<Catalog>, users: Arc<UserDirectory>) -> Self {
        Self {
            catalog,
            users,
            similar_user_count: 2,
            limit: 3,
        }
    }

    /// Configure how many similar users contribute candidates (default: 2)
    pub fn with_similar_user_count(mut self, count: usize) -> Self {
        self.similar_user_count = count;
        self
    }

    /// Configure the number of recommendations (default: 3)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Find every other user sharing at least one watched title, most
    /// similar first.
    ///
    /// "Other" is decided by user id, so a user sharing the target's name is
    /// still a candidate.
    pub fn find_similar_users(&self, context: &UserContext) -> Vec<SimilarUser> {
        let mut target_titles: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for title in &context.watch_history {
            if seen.insert(title.as_str()) {
                target_titles.push(title);
            }
        }

        let mut similar: Vec<SimilarUser> = self
            .users
            .iter()
            .filter(|user| user.id != context.user_id)
            .filter_map(|user| {
                let theirs: HashSet<&str> = user.watched_movies.iter().map(String::as_str).collect();
                let common_movies: Vec<String> = target_titles
                    .iter()
                    .filter(|title| theirs.contains(*title))
                    .map(|title| title.to_string())
                    .collect();
                if common_movies.is_empty() {
                    return None;
                }
                Some(SimilarUser {
                    user_id: user.id,
                    name: user.name.clone(),
                    similarity: common_movies.len(),
                    common_movies,
                })
            })
            .collect();

        // Stable: equal similarity keeps directory order
        similar.sort_by(|a, b| b.similarity.cmp(&a.similarity));
        similar
    }
}

impl RecommendationSource for CollaborativeSource {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Collaborative
    }

    #[instrument(skip(self, context), fields(user_id = context.user_id))]
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation> {
        let similar_users = self.find_similar_users(context);
        debug!("Found {} similar users", similar_users.len());

        let mut collected: HashSet<&str> = HashSet::new();
        let mut recommendations: Vec<Recommendation> = Vec::new();

        for similar in similar_users.iter().take(self.similar_user_count) {
            for title in self.users.watched_movies(similar.user_id) {
                if context.has_watched(title) {
                    continue;
                }
                let Some(movie) = self.catalog.get_movie(title) else {
                    continue;
                };
                if !collected.insert(movie.title.as_str()) {
                    continue;
                }
                recommendations.push(Recommendation::new(
                    movie,
                    StrategyKind::Collaborative,
                    Reason::SimilarUser {
                        recommender: similar.name.clone(),
                        common_count: similar.similarity,
                    },
                ));
            }
        }

        recommendations.truncate(self.limit);
        recommendations.sort_by(|a, b| b.movie.rating.total_cmp(&a.movie.rating));

        debug!("Generated {} collaborative recommendations", recommendations.len());
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, User};
    use pipeline::build_user_context;

    fn movie(title: &str, rating: f32) -> Movie {
        Movie {
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            rating,
            release_year: 2005,
        }
    }

    fn user(id: UserId, name: &str, watched: &[&str]) -> User {
        User {
            id,
            name: name.to_string(),
            watched_movies: watched.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn create_test_data() -> (Arc<Catalog>, Arc<UserDirectory>) {
        let catalog = Catalog::new(
            ["A", "B", "C", "D", "E", "F", "G"]
                .iter()
                .enumerate()
                .map(|(i, t)| movie(t, 5.0 + i as f32 * 0.5))
                .collect(),
        );
        let users = UserDirectory::new(vec![
            // Target user
            user(1, "Ava", &["A", "B", "C"]),
            // Shares A, B, C
            user(2, "Ben", &["A", "B", "C", "D", "E"]),
            // Shares A only
            user(3, "Cy", &["A", "F", "Retired"]),
            // Shares nothing
            user(4, "Dee", &["G"]),
            // Also shares A only; later in directory than Cy
            user(5, "Eli", &["G", "A"]),
        ]);
        (Arc::new(catalog), Arc::new(users))
    }

    fn context_for(catalog: &Catalog, users: &UserDirectory, id: UserId) -> UserContext {
        build_user_context(catalog, users.get_user(id).unwrap())
    }

    #[test]
    fn test_find_similar_users() {
        let (catalog, users) = create_test_data();
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));
        let context = context_for(&catalog, &users, 1);

        let similar = source.find_similar_users(&context);
        let ids: Vec<UserId> = similar.iter().map(|s| s.user_id).collect();

        // Ben (3) first, then Cy and Eli tied at 1 in directory order; Dee excluded
        assert_eq!(ids, vec![2, 3, 5]);
        assert_eq!(similar[0].similarity, 3);
        assert_eq!(similar[0].common_movies, vec!["A", "B", "C"]);
        assert_eq!(similar[1].similarity, 1);
    }

    #[test]
    fn test_similarity_is_set_intersection() {
        let catalog = Arc::new(Catalog::new(vec![movie("A", 5.0), movie("B", 6.0)]));
        let users = Arc::new(UserDirectory::new(vec![
            user(1, "Ava", &["A", "A", "B"]),
            user(2, "Ben", &["A", "A", "A"]),
        ]));
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let similar = source.find_similar_users(&context_for(&catalog, &users, 1));
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].similarity, 1);
    }

    #[test]
    fn test_identical_history_is_most_similar() {
        let (catalog, _) = create_test_data();
        let users = Arc::new(UserDirectory::new(vec![
            user(1, "Ava", &["A", "B", "C"]),
            user(2, "Partial", &["A", "B"]),
            user(3, "Twin", &["A", "B", "C"]),
        ]));
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let similar = source.find_similar_users(&context_for(&catalog, &users, 1));
        assert_eq!(similar[0].name, "Twin");
        assert_eq!(similar[0].similarity, 3);
    }

    #[test]
    fn test_recommend_from_top_two_users() {
        let (catalog, users) = create_test_data();
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));
        let context = context_for(&catalog, &users, 1);

        let recs = source.recommend(&context);
        let titles: Vec<&str> = recs.iter().map(|r| r.title()).collect();

        // Ben contributes D, E; Cy contributes F ("Retired" is unknown).
        // Eli is third and does not contribute G. Ranked by rating.
        assert_eq!(titles, vec!["F", "E", "D"]);
        assert_eq!(
            recs[2].reason,
            Reason::SimilarUser {
                recommender: "Ben".to_string(),
                common_count: 3
            }
        );
        assert_eq!(
            recs[0].reason,
            Reason::SimilarUser {
                recommender: "Cy".to_string(),
                common_count: 1
            }
        );
    }

    #[test]
    fn test_cap_applies_before_rating_order() {
        let (catalog, _) = create_test_data();
        let users = Arc::new(UserDirectory::new(vec![
            user(1, "Ava", &["A"]),
            // Four candidates in history order: B, C, D, G
            user(2, "Ben", &["A", "B", "C", "D", "G"]),
        ]));
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let recs = source.recommend(&context_for(&catalog, &users, 1));
        let titles: Vec<&str> = recs.iter().map(|r| r.title()).collect();

        // G is the highest rated but comes fourth, so it is cut before ranking
        assert_eq!(titles, vec!["D", "C", "B"]);
    }

    #[test]
    fn test_duplicates_across_users_keep_first_occurrence() {
        let catalog = Arc::new(Catalog::new(vec![
            movie("A", 5.0),
            movie("B", 6.0),
            movie("C", 7.0),
        ]));
        let users = Arc::new(UserDirectory::new(vec![
            user(1, "Ava", &["A"]),
            user(2, "Ben", &["A", "B"]),
            user(3, "Cy", &["A", "B", "C"]),
        ]));
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let recs = source.recommend(&context_for(&catalog, &users, 1));
        assert_eq!(recs.len(), 2);
        let b = recs.iter().find(|r| r.title() == "B").unwrap();
        assert!(matches!(&b.reason, Reason::SimilarUser { recommender, .. } if recommender == "Ben"));
    }

    #[test]
    fn test_same_name_other_user_is_considered() {
        let catalog = Arc::new(Catalog::new(vec![movie("A", 5.0), movie("B", 6.0)]));
        let users = Arc::new(UserDirectory::new(vec![
            user(1, "Sam", &["A"]),
            user(2, "Sam", &["A", "B"]),
        ]));
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let recs = source.recommend(&context_for(&catalog, &users, 1));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title(), "B");
    }

    #[test]
    fn test_no_history_or_no_overlap_yields_nothing() {
        let (catalog, users) = create_test_data();
        let source = CollaborativeSource::new(Arc::clone(&catalog), Arc::clone(&users));

        let empty = UserContext::new(99, "New");
        assert!(source.find_similar_users(&empty).is_empty());
        assert!(source.recommend(&empty).is_empty());

        let loner = build_user_context(&catalog, &user(98, "Loner", &["Unseen"]));
        assert!(source.recommend(&loner).is_empty());
    }
}
