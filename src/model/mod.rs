//! Records and filter state

pub mod filter;
pub mod record;

pub use filter::{ActiveFilter, FilterField, FilterState, SortKey};
pub use record::{Record, parse_timestamp};
