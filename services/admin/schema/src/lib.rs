//! sea-orm entities owned by the admin service.

pub mod admin_actions;
pub mod groups;
pub mod profiles;
