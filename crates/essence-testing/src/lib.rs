//! Test utilities for Life Economy services.
//!
//! Import from `[dev-dependencies]` only; never in production code.

pub mod auth;
