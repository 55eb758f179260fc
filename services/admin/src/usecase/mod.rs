pub mod audit;
pub mod dashboard;
pub mod directory;
pub mod group;
pub mod password;
pub mod profile;
pub mod provision;
pub mod reconcile;
