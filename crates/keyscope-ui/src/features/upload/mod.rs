//! CSV upload screen.
pub mod controller;
