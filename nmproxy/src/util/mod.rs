//! Helpers for presenting property values.

pub mod utils;
