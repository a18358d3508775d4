//! Sign-up, sign-in, activation and logout.
//!
//! # Design
//! - `model` talks to the user endpoints and keeps the session in step.
//! - `controller` owns the three auth forms and the resend/logout actions.

pub mod controller;
pub mod model;
