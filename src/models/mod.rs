//! Data models for the attendance backend.
//!
//! Field names match the JSON contract used by the attendance frontend.

mod attendance;
mod class;
mod statistics;
mod student;

pub use attendance::*;
pub use class::*;
pub use statistics::*;
pub use student::*;
