//! Wall-walking for player characters
//!
//! A character facing a nearby surface can attach to it, treat it as the
//! ground and walk across walls and ceilings, then drop back to normal
//! gravity-driven movement.
//!
//! # Modules
//!
//! - [`controller`]: the wall-walk state machine
//! - [`surface`]: surface classification and surface-aligned frames
//! - [`config`]: probe distances and thresholds
//! - [`character`]: a ready-made character for the rapier-backed world

pub mod character;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod state;
pub mod surface;

pub use character::WallWalkCharacter;
pub use config::WallWalkConfig;
pub use controller::WallWalkController;
pub use error::{ConfigError, Result};
pub use input::{
    AxisInput, ControlRotation, BOUND_AXES, JUMP_ACTION, MOVE_FORWARD_AXIS, MOVE_RIGHT_AXIS,
    WALL_WALK_AXIS,
};
pub use state::{ExitReason, WallWalkEvent, WallWalkState};
pub use surface::{SurfaceBasis, SurfaceDirection};
