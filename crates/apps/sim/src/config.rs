//! Simulation configuration
//!
//! Loaded from a TOML file with three tables:
//! - `[wall_walk]` controller tuning
//! - `[movement]` movement tuning
//! - `[scenario]` arena layout, with `[scenario.axes]` scripting each bound
//!   input axis by name

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use wallwalker_character::{AxisInput, WallWalkConfig, BOUND_AXES, WALL_WALK_AXIS};
use wallwalker_physics::MovementConfig;

/// Combined simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub wall_walk: WallWalkConfig,
    pub movement: MovementSettings,
    pub scenario: ScenarioConfig,
}

/// Movement tunables exposed to the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub max_walk_speed: f32,
    pub gravity: f32,
    pub ground_check_distance: f32,
    pub jump_z_velocity: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        let defaults = MovementConfig::default();
        Self {
            max_walk_speed: defaults.max_walk_speed,
            gravity: defaults.gravity,
            ground_check_distance: defaults.ground_check_distance,
            jump_z_velocity: defaults.jump_z_velocity,
        }
    }
}

impl MovementSettings {
    /// Movement config for a capsule of the given half height
    pub fn to_movement_config(self, capsule_half_height: f32) -> MovementConfig {
        MovementConfig {
            max_walk_speed: self.max_walk_speed,
            gravity: self.gravity,
            capsule_half_height,
            ground_check_distance: self.ground_check_distance,
            jump_z_velocity: self.jump_z_velocity,
        }
    }
}

/// One stretch of constant axis value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSegment {
    pub frames: u32,
    pub value: f32,
}

/// Arena layout and input script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Total frames to simulate
    pub frames: u32,
    /// Seconds per frame
    pub dt: f32,
    /// Distance from the spawn point to the wall face along +X
    pub wall_distance: f32,
    /// Wall height above the floor
    pub wall_height: f32,
    /// Initial heading in degrees around world up; 0 faces the wall
    pub start_yaw_degrees: f32,
    /// View yaw of the controlling input source in degrees
    pub view_yaw_degrees: f32,
    /// Script per bound axis name; frames past a script's end read 0
    pub axes: BTreeMap<String, Vec<AxisSegment>>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            dt: 1.0 / 60.0,
            wall_distance: 100.0,
            wall_height: 1000.0,
            start_yaw_degrees: 0.0,
            view_yaw_degrees: 0.0,
            axes: BTreeMap::from([(
                WALL_WALK_AXIS.to_string(),
                vec![
                    AxisSegment {
                        frames: 60,
                        value: 1.0,
                    },
                    AxisSegment {
                        frames: 30,
                        value: 0.0,
                    },
                    AxisSegment {
                        frames: 150,
                        value: 1.0,
                    },
                ],
            )]),
        }
    }
}

impl ScenarioConfig {
    /// Value of one scripted axis at a frame index
    pub fn axis_at(&self, name: &str, frame: u32) -> f32 {
        let Some(script) = self.axes.get(name) else {
            return 0.0;
        };
        let mut remaining = frame;
        for segment in script {
            if remaining < segment.frames {
                return segment.value;
            }
            remaining -= segment.frames;
        }
        0.0
    }

    /// All scripted axes at a frame index
    pub fn input_at(&self, frame: u32) -> AxisInput {
        self.axes.keys().fold(AxisInput::new(), |input, name| {
            let value = self.axis_at(name, frame);
            input.with(name, value)
        })
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.wall_walk.validate()?;
        anyhow::ensure!(self.scenario.dt > 0.0, "scenario dt must be positive");
        anyhow::ensure!(
            self.scenario.wall_distance > 0.0,
            "scenario wall_distance must be positive"
        );
        anyhow::ensure!(
            self.scenario.wall_height > 0.0,
            "scenario wall_height must be positive"
        );
        anyhow::ensure!(
            self.movement.max_walk_speed > 0.0,
            "movement max_walk_speed must be positive"
        );
        for name in self.scenario.axes.keys() {
            anyhow::ensure!(
                BOUND_AXES.contains(&name.as_str()),
                "scenario axis '{name}' is not bound, expected one of {BOUND_AXES:?}"
            );
        }
        Ok(())
    }
}
