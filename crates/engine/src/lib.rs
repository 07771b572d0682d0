//! Engine crate for the ReelRecs recommendation browser.
//!
//! This crate contains the orchestrator that runs every recommendation
//! strategy for a user, the watch-history simulation, the activity insights
//! and the engine configuration.

pub mod config;
pub mod insights;
pub mod orchestrator;
pub mod simulation;

pub use config::RecommenderConfig;
pub use insights::{
    BrowsingAnalysis, BrowsingSession, RatingFeedback, RatingImpact, TimeScenario,
};
pub use orchestrator::{
    RecommendationOrchestrator, StrategyResult, UserRecommendations, UserSelector,
};
pub use simulation::{SimulationCopy, SimulationOutcome, begin_simulation, diff_recommendations};
