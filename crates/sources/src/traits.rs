//! The seam every recommendation strategy plugs into.

use crate::types::{Recommendation, StrategyKind};
use pipeline::UserContext;

/// A deterministic recommendation strategy.
///
/// Implementations hold shared, read-only collections and keep no state
/// between calls. An empty history, an empty genre tally or an empty
/// candidate set all produce an empty list.
pub trait RecommendationSource: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Ranked, capped recommendations for the user described by `context`
    fn recommend(&self, context: &UserContext) -> Vec<Recommendation>;
}
