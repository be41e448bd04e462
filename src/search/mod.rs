//! Query engine: parse, match, filter, sort
//!
//! Every function here is pure. Nothing is cached between calls; the parsed
//! query and the searchable text are rebuilt on each pass over the records.

pub mod collate;
pub mod pipeline;
pub mod predicate;
pub mod query;

pub use pipeline::query;
pub use predicate::{Predicate, build_predicate, record_text};
pub use query::{ParsedQuery, parse};
