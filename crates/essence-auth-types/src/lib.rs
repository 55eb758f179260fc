//! Caller identity shared across Life Economy services.
//!
//! Sessions are owned by the gateway; services only read the identity it injects.

pub mod identity;
