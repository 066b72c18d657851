//! Headless wall-walking simulation
//!
//! Drives a [`wallwalker_character::WallWalkCharacter`] through scripted
//! input axes in a floor-and-wall arena and reports every transition.

pub mod config;
pub mod scenario;

pub use config::SimConfig;
pub use scenario::{run, SimReport, Transition};
