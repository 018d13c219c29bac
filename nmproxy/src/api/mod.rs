//! Public API module.
//!
//! This module contains the high-level user-facing API for the `nmproxy` crate.

pub mod models;
pub mod session;
