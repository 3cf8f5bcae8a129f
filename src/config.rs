//! TOML-based movement tuning
//!
//! A tuning file lists only the fields it overrides; everything else keeps
//! its default:
//! ```toml
//! max_speed = 12.0
//! jump_power = 25.0
//! max_fall_speed = 20.0
//! wall_check_size = [0.2, 1.2]
//! ```

use std::path::Path;

use thiserror::Error;

use crate::player::PlayerConfig;

/// Errors loading a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl PlayerConfig {
    /// Parses and validates a tuning string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against the range it is meaningful in
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("vertical_dead_zone", self.vertical_dead_zone, 0.01, 0.99),
            ("horizontal_dead_zone", self.horizontal_dead_zone, 0.01, 0.99),
            ("grounding_force", self.grounding_force, -10.0, 0.0),
            ("grounder_distance", self.grounder_distance, 0.0, 0.25),
            ("max_speed", self.max_speed, f32::EPSILON, f32::MAX),
            ("acceleration", self.acceleration, f32::EPSILON, f32::MAX),
            ("ground_deceleration", self.ground_deceleration, f32::EPSILON, f32::MAX),
            ("air_deceleration", self.air_deceleration, f32::EPSILON, f32::MAX),
            ("jump_power", self.jump_power, f32::EPSILON, f32::MAX),
            ("max_fall_speed", self.max_fall_speed, f32::EPSILON, f32::MAX),
            ("fall_acceleration", self.fall_acceleration, f32::EPSILON, f32::MAX),
            (
                "jump_end_early_gravity_modifier",
                self.jump_end_early_gravity_modifier,
                f32::EPSILON,
                f32::MAX,
            ),
            ("coyote_time", self.coyote_time, 0.0, f32::MAX),
            ("jump_buffer", self.jump_buffer, 0.0, f32::MAX),
            ("climb_speed", self.climb_speed, 0.0, f32::MAX),
            ("dash_time", self.dash_time, f32::EPSILON, f32::MAX),
            ("dash_velocity", self.dash_velocity, f32::EPSILON, f32::MAX),
            ("radius", self.radius, f32::EPSILON, f32::MAX),
            ("capsule_length", self.capsule_length, 0.0, f32::MAX),
        ];

        for (field, value, min, max) in checks {
            // NaN fails both comparisons, so test for containment
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Loads a tuning file from disk
pub fn load_player_config(path: &Path) -> Result<PlayerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    PlayerConfig::from_toml_str(&content)
}
