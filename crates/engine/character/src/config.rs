//! Wall-walk tuning
//!
//! Distances are in world units (the defaults assume centimetres and a
//! 192-unit tall capsule). Every field has a default so partial TOML tables
//! are accepted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Wall-walk controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallWalkConfig {
    /// Length of the forward surface probe and of the backing probe
    pub probe_distance: f32,
    /// Entry aborts when the backing probe hits closer than this
    pub cramped_distance: f32,
    /// Length of the per-frame support probe along -up
    pub support_distance: f32,
    /// Length of the world-down probe used to land on a ledge
    pub ledge_probe_distance: f32,
    /// Approach angles below this (degrees) count as run-up surfaces
    pub floor_angle_threshold: f32,
    /// Half of the total capsule height
    pub capsule_half_height: f32,
    /// Capsule radius
    pub capsule_radius: f32,
    /// Gap kept between the capsule and a surface when snapping onto it
    pub surface_clearance: f32,
}

impl Default for WallWalkConfig {
    fn default() -> Self {
        Self {
            probe_distance: 300.0,
            cramped_distance: 50.0,
            support_distance: 200.0,
            ledge_probe_distance: 50.0,
            floor_angle_threshold: 30.0,
            capsule_half_height: 96.0,
            capsule_radius: 42.0,
            surface_clearance: 1.0,
        }
    }
}

impl WallWalkConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that every distance is positive and the angle is usable
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("probe_distance", self.probe_distance),
            ("cramped_distance", self.cramped_distance),
            ("support_distance", self.support_distance),
            ("ledge_probe_distance", self.ledge_probe_distance),
            ("capsule_half_height", self.capsule_half_height),
            ("capsule_radius", self.capsule_radius),
        ];
        for (field, value) in distances {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive distance, got {value}"),
                });
            }
        }

        if !(self.surface_clearance.is_finite() && self.surface_clearance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "surface_clearance",
                reason: format!("must be non-negative, got {}", self.surface_clearance),
            });
        }

        if !(self.floor_angle_threshold > 0.0 && self.floor_angle_threshold < 90.0) {
            return Err(ConfigError::Invalid {
                field: "floor_angle_threshold",
                reason: format!(
                    "must be between 0 and 90 degrees, got {}",
                    self.floor_angle_threshold
                ),
            });
        }

        if self.capsule_radius > self.capsule_half_height {
            return Err(ConfigError::Invalid {
                field: "capsule_radius",
                reason: "must not exceed capsule_half_height".into(),
            });
        }

        Ok(())
    }

    /// Distance from the capsule centre to a surface it rests on
    pub fn standing_offset(&self) -> f32 {
        self.capsule_half_height + self.surface_clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WallWalkConfig::default();
        assert_eq!(config.probe_distance, 300.0);
        assert_eq!(config.cramped_distance, 50.0);
        assert_eq!(config.support_distance, 200.0);
        assert_eq!(config.ledge_probe_distance, 50.0);
        assert_eq!(config.floor_angle_threshold, 30.0);
        assert_eq!(config.standing_offset(), 97.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WallWalkConfig::from_toml_str("probe_distance = 450.0\n").unwrap();
        assert_eq!(config.probe_distance, 450.0);
        assert_eq!(config.support_distance, 200.0);
    }

    #[test]
    fn test_rejects_negative_distance() {
        let err = WallWalkConfig::from_toml_str("support_distance = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "support_distance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_angle() {
        let config = WallWalkConfig {
            floor_angle_threshold: 90.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = WallWalkConfig::from_toml_str("probe_distance = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cramped_distance = 25.0").unwrap();
        let config = WallWalkConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cramped_distance, 25.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WallWalkConfig::from_file("/nonexistent/wallwalk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
