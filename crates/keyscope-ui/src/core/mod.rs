//! Core, DOM-free primitives and ports for the dashboard.
pub mod config;
pub mod fragments;
pub mod navigation;
pub mod session;
pub mod timer;
pub mod view;
