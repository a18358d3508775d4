//! Keyword results feature.
//!
//! # Design
//! - `logic` holds pure formatting/filtering/validation so it is testable natively.
//! - `model` owns the HTTP calls for the keyword resource.
//! - `controller` renders lists and the detail screen through the view port.

pub mod controller;
pub mod logic;
pub mod model;
