//! API endpoint handlers.

pub mod ai;
pub mod algorithms;
pub mod artifacts;
pub mod backends;
pub mod circuits;
pub mod education;
pub mod health;
pub mod visualize;
