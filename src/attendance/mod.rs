//! Attendance operations: submission, statistics and lookups.

pub mod query;
mod statistics;
mod writer;

pub use writer::submit;
