//! Query engine for the movie catalog.
//!
//! This crate provides:
//! - Pure query functions: genre filter, stable sort, year threshold,
//!   unwatched set, genre-preference tally
//! - UserContext, the per-user view strategies work from
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_user_context, FilterPipeline};
//! use pipeline::filters::*;
//!
//! let context = build_user_context(&catalog, &user);
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyWatchedFilter)
//!     .add_filter(MinimumYearFilter::new(2015))
//!     .add_filter(GenrePreferenceFilter::new(2));
//!
//! let candidates = pipeline.apply(catalog.iter().collect(), &context);
//! ```

pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod traits;

// Re-export main types
pub use context::{build_user_context, UserContext};
pub use filter_pipeline::FilterPipeline;
pub use query::{GenreFilter, GenrePreference, SortDirection, SortKey, SortOption};
pub use traits::Filter;
