//! Domain types shared across all Life Economy services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod capability;
pub mod dashboard;
pub mod id;
pub mod user;
