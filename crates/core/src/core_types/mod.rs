//! Core types and utilities

pub mod parameters;
pub mod units;

pub use parameters::*;
pub use units::*;
