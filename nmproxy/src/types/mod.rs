//! Type definitions and constants.
//!
//! This module contains NetworkManager constants and type definitions.

pub mod constants;
