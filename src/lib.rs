//! episcope - filter, search and relate podcast episodes
//!
//! The query core (`search`, `related`) is a set of pure functions over an
//! immutable slice of [`model::Record`]s. Everything else in the crate loads
//! data, reads configuration, or presents results.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod facets;
pub mod highlight;
pub mod model;
pub mod ranking;
pub mod related;
pub mod search;
pub mod test_utils;

pub use error::{EpiError, Result};
