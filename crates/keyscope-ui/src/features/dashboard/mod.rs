//! Dashboard overview: status counters and the most recent keywords.
pub mod controller;
