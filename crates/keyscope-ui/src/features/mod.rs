//! Feature slices: models and controllers per screen family.
pub mod auth;
pub mod dashboard;
pub mod keywords;
pub mod upload;
