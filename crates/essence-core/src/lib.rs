//! Service plumbing shared by every Life Economy service.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
