//! Property tests for the query engine.

mod query_properties;
mod related_properties;
