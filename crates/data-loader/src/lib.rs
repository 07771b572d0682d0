//! # Data Loader Crate
//!
//! Loads the movie catalog and the user directory from JSON.
//!
//! ## Main Components
//!
//! - **types**: Movie, User, Catalog, UserDirectory, DataIndex
//! - **parser**: Parse the JSON files into Rust structs
//! - **index**: Load both files and validate unique keys
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//!
//! let movie = index.catalog.get_movie("Nova").unwrap();
//! let user = index.users.get_user(101).unwrap();
//! println!("{} watched {} movies", user.name, user.watched_movies.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{Catalog, DataIndex, Genre, Movie, User, UserDirectory, UserId};
