//! Output formatters shared by commands

pub mod episodes;
