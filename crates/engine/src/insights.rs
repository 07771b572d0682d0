//! Activity insights: how explicit ratings, browsing sessions and the time
//! of viewing would steer recommendations.

use data_loader::{Catalog, Genre, Movie};
use pipeline::query::{self, GenreFilter};
use sources::{Reason, Recommendation, StrategyKind, matching_genres};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Effect of an explicit 1..=10 rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingImpact {
    /// 8 or above: more movies like this one
    Positive,
    /// 4 or below: fewer movies like this one
    Negative,
    Neutral,
}

impl RatingImpact {
    pub fn classify(rating: u8) -> Self {
        match rating {
            8.. => RatingImpact::Positive,
            ..=4 => RatingImpact::Negative,
            _ => RatingImpact::Neutral,
        }
    }
}

/// Feedback for one rated, previously watched title
#[derive(Debug, Clone, PartialEq)]
pub struct RatingFeedback {
    pub title: String,
    pub rating: u8,
    pub impact: RatingImpact,
    /// Catalog record, if the title still resolves
    pub movie: Option<Movie>,
}

impl RatingFeedback {
    pub fn new(title: &str, rating: u8, movie: Option<&Movie>) -> Self {
        Self {
            title: title.to_string(),
            rating,
            impact: RatingImpact::classify(rating),
            movie: movie.cloned(),
        }
    }
}

/// Titles viewed while browsing a single genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsingSession {
    pub genre: Genre,
    pub viewed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowsingAnalysis {
    pub genre: Genre,
    /// Distinct titles viewed
    pub viewed_count: usize,
    pub strong_interest: bool,
    /// Empty unless `strong_interest`
    pub recommendations: Vec<Recommendation>,
}

impl BrowsingSession {
    pub fn new(genre: impl Into<Genre>, viewed: Vec<String>) -> Self {
        Self {
            genre: genre.into(),
            viewed,
        }
    }

    /// At `threshold` distinct viewed movies of the session's genre the
    /// session shows strong interest, and the best-rated unviewed movies of
    /// the genre are suggested. Titles outside the genre or missing from the
    /// catalog do not count.
    pub fn analyze(&self, catalog: &Catalog, threshold: usize, limit: usize) -> BrowsingAnalysis {
        let viewed: HashSet<String> = self
            .viewed
            .iter()
            .filter(|title| {
                catalog
                    .get_movie(title)
                    .is_some_and(|movie| movie.has_genre(&self.genre))
            })
            .cloned()
            .collect();
        let strong_interest = viewed.len() >= threshold;

        let recommendations = if strong_interest {
            let in_genre = query::filter_by_genre(catalog, &GenreFilter::Only(self.genre.clone()));
            query::top_rated(query::unwatched(in_genre, &viewed), limit)
                .into_iter()
                .map(|movie| {
                    Recommendation::new(
                        movie,
                        StrategyKind::Browsing,
                        Reason::BrowsingInterest {
                            genre: self.genre.clone(),
                        },
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        BrowsingAnalysis {
            genre: self.genre.clone(),
            viewed_count: viewed.len(),
            strong_interest,
            recommendations,
        }
    }
}

/// When the user is watching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScenario {
    WeekendEvening,
    WeekdayMorning,
    HolidaySeason,
    SummerVacation,
}

impl TimeScenario {
    pub const ALL: [TimeScenario; 4] = [
        TimeScenario::WeekendEvening,
        TimeScenario::WeekdayMorning,
        TimeScenario::HolidaySeason,
        TimeScenario::SummerVacation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeScenario::WeekendEvening => "Weekend evening",
            TimeScenario::WeekdayMorning => "Weekday morning",
            TimeScenario::HolidaySeason => "Holiday season",
            TimeScenario::SummerVacation => "Summer vacation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TimeScenario::WeekendEvening => {
                "Weekend evenings often favor relaxing, entertaining content"
            }
            TimeScenario::WeekdayMorning => {
                "Weekday mornings might favor shorter, lighter content"
            }
            TimeScenario::HolidaySeason => {
                "Holiday seasons often see increased interest in family and festive content"
            }
            TimeScenario::SummerVacation => {
                "Summer vacation periods might favor adventurous, blockbuster content"
            }
        }
    }

    pub fn genres(self) -> &'static [&'static str] {
        match self {
            TimeScenario::WeekendEvening => &["Action", "Comedy", "Sci-Fi"],
            TimeScenario::WeekdayMorning => &["Drama", "Documentary"],
            TimeScenario::HolidaySeason => &["Drama", "Romance"],
            TimeScenario::SummerVacation => &["Action", "Sci-Fi", "Adventure"],
        }
    }

    /// Best-rated movies of the whole catalog in this scenario's genres.
    /// Watch history plays no part.
    pub fn recommend(self, catalog: &Catalog, limit: usize) -> Vec<Recommendation> {
        let genres = self.genres();
        let candidates = catalog
            .iter()
            .filter(|movie| genres.iter().any(|g| movie.has_genre(g)));

        query::top_rated(candidates, limit)
            .into_iter()
            .map(|movie| {
                Recommendation::new(
                    movie,
                    StrategyKind::Seasonal,
                    Reason::Seasonal {
                        scenario: self.label().to_string(),
                        matching_genres: matching_genres(movie, genres),
                    },
                )
            })
            .collect()
    }
}

impl fmt::Display for TimeScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeScenario {
    type Err = String;

    /// Accepts kebab-case names (`weekend-evening`) or the display labels,
    /// in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "weekend-evening" => Ok(TimeScenario::WeekendEvening),
            "weekday-morning" => Ok(TimeScenario::WeekdayMorning),
            "holiday-season" => Ok(TimeScenario::HolidaySeason),
            "summer-vacation" => Ok(TimeScenario::SummerVacation),
            _ => Err(format!(
                "unknown time scenario '{}' (expected weekend-evening, weekday-morning, holiday-season or summer-vacation)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genres: &[&str], rating: f32) -> Movie {
        Movie {
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            release_year: 2011,
        }
    }

    fn create_test_catalog() -> Catalog {
        Catalog::new(vec![
            movie("Blast", &["Action"], 7.0),
            movie("Giggles", &["Comedy"], 8.5),
            movie("Nova", &["Sci-Fi", "Adventure"], 9.0),
            movie("Tears", &["Drama"], 9.5),
            movie("Facts", &["Documentary"], 6.0),
            movie("Vows", &["Romance", "Drama"], 7.5),
            movie("Chase", &["Action", "Thriller"], 8.0),
            movie("Smash", &["Action"], 6.5),
            movie("Brawl", &["Action"], 5.5),
            movie("Punch", &["Action", "Comedy"], 5.0),
        ])
    }

    #[test]
    fn test_rating_impact_thresholds() {
        assert_eq!(RatingImpact::classify(10), RatingImpact::Positive);
        assert_eq!(RatingImpact::classify(8), RatingImpact::Positive);
        assert_eq!(RatingImpact::classify(7), RatingImpact::Neutral);
        assert_eq!(RatingImpact::classify(5), RatingImpact::Neutral);
        assert_eq!(RatingImpact::classify(4), RatingImpact::Negative);
        assert_eq!(RatingImpact::classify(1), RatingImpact::Negative);
    }

    #[test]
    fn test_rating_feedback_keeps_movie() {
        let catalog = create_test_catalog();
        let feedback = RatingFeedback::new("Tears", 9, catalog.get_movie("Tears"));
        assert_eq!(feedback.impact, RatingImpact::Positive);
        assert_eq!(feedback.movie.unwrap().release_year, 2011);

        let retired = RatingFeedback::new("Retired", 2, None);
        assert_eq!(retired.impact, RatingImpact::Negative);
        assert!(retired.movie.is_none());
    }

    #[test]
    fn test_browsing_strong_interest() {
        let catalog = create_test_catalog();
        let session = BrowsingSession::new(
            "Action",
            vec!["Blast".to_string(), "Smash".to_string(), "Brawl".to_string()],
        );

        let analysis = session.analyze(&catalog, 3, 3);
        assert!(analysis.strong_interest);
        assert_eq!(analysis.viewed_count, 3);
        let titles: Vec<&str> = analysis.recommendations.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Chase", "Punch"]);
        assert_eq!(
            analysis.recommendations[0].reason.to_string(),
            "You showed interest in Action movies"
        );
    }

    #[test]
    fn test_browsing_ignores_other_genres_and_unknown_titles() {
        let catalog = create_test_catalog();
        let session = BrowsingSession::new(
            "Action",
            vec![
                "Blast".to_string(),
                "Giggles".to_string(),
                "Nonexistent".to_string(),
            ],
        );

        let analysis = session.analyze(&catalog, 3, 3);
        assert_eq!(analysis.viewed_count, 1);
        assert!(!analysis.strong_interest);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_browsing_below_threshold() {
        let catalog = create_test_catalog();
        let session = BrowsingSession::new(
            "Action",
            vec!["Blast".to_string(), "Blast".to_string(), "Smash".to_string()],
        );

        let analysis = session.analyze(&catalog, 3, 3);
        assert_eq!(analysis.viewed_count, 2);
        assert!(!analysis.strong_interest);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_time_scenario_recommendations() {
        let catalog = create_test_catalog();

        let weekend = TimeScenario::WeekendEvening.recommend(&catalog, 3);
        let titles: Vec<&str> = weekend.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Nova", "Giggles", "Chase"]);
        assert_eq!(
            weekend[0].reason.to_string(),
            "Sci-Fi movies are popular during weekend evening"
        );

        let holiday = TimeScenario::HolidaySeason.recommend(&catalog, 3);
        let titles: Vec<&str> = holiday.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Tears", "Vows"]);
        assert_eq!(
            holiday[1].reason,
            Reason::Seasonal {
                scenario: "Holiday season".to_string(),
                matching_genres: vec!["Romance".to_string(), "Drama".to_string()],
            }
        );
    }

    #[test]
    fn test_time_scenario_from_str() {
        assert_eq!("weekend-evening".parse::<TimeScenario>(), Ok(TimeScenario::WeekendEvening));
        assert_eq!("Summer vacation".parse::<TimeScenario>(), Ok(TimeScenario::SummerVacation));
        assert_eq!("HOLIDAY_SEASON".parse::<TimeScenario>(), Ok(TimeScenario::HolidaySeason));
        assert!("midnight".parse::<TimeScenario>().is_err());

        for scenario in TimeScenario::ALL {
            assert_eq!(scenario.label().parse::<TimeScenario>(), Ok(scenario));
        }
    }
}
