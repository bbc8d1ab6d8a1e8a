//! Game tuning and hit calibration
//!
//! Loaded from JSON; any field left out falls back to its default.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Hitboxes;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for [`Settings`]
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid { field, value } => write!(f, "invalid value for {field}: {value}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Field width in pixels
    pub field_width: f32,
    /// Field height in pixels
    pub field_height: f32,

    // === Movement (pixels per frame) ===
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,

    // === Spawning ===
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Minimum distance between a fresh enemy and the player
    pub min_spawn_distance: f32,

    // === Hit calibration ===
    /// Player sprite render scale
    pub player_scale: f32,
    /// Enemy sprite render scale
    pub enemy_scale: f32,
    /// Unscaled player hit size
    pub player_hit_size: f32,
    /// Unscaled enemy size used against the player
    pub enemy_body_size: f32,
    /// Unscaled enemy size used against bullets
    pub enemy_hurt_size: f32,
    /// Bullet radius (not scaled)
    pub bullet_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: SCREEN_WIDTH,
            field_height: SCREEN_HEIGHT,

            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            enemy_speed: ENEMY_SPEED,

            spawn_interval: ENEMY_SPAWN_INTERVAL,
            min_spawn_distance: MIN_SPAWN_DISTANCE,

            player_scale: PLAYER_SCALE,
            enemy_scale: ENEMY_SCALE,
            player_hit_size: PLAYER_HIT_SIZE,
            enemy_body_size: ENEMY_BODY_SIZE,
            enemy_hurt_size: ENEMY_HURT_SIZE,
            bullet_radius: BULLET_RADIUS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // Plain struct of floats, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("spawn_interval", self.spawn_interval),
            ("player_scale", self.player_scale),
            ("enemy_scale", self.enemy_scale),
            ("player_hit_size", self.player_hit_size),
            ("enemy_body_size", self.enemy_body_size),
            ("enemy_hurt_size", self.enemy_hurt_size),
            ("bullet_radius", self.bullet_radius),
        ];
        for (field, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(SettingsError::Invalid { field, value });
            }
        }

        if !(self.min_spawn_distance >= 0.0) || !self.min_spawn_distance.is_finite() {
            return Err(SettingsError::Invalid {
                field: "min_spawn_distance",
                value: self.min_spawn_distance,
            });
        }

        Ok(())
    }

    /// Clamp the spawn exclusion radius to half the field diagonal.
    ///
    /// Any point's farthest field corner is at least that far away, so the
    /// spawner's fallback position always honors the exclusion radius.
    pub fn sanitized(mut self) -> Self {
        let limit = self.max_spawn_distance();
        if self.min_spawn_distance > limit {
            log::warn!(
                "min_spawn_distance {} exceeds field half-diagonal {}, clamping",
                self.min_spawn_distance,
                limit
            );
            self.min_spawn_distance = limit;
        }
        self
    }

    /// Largest exclusion radius the spawner can always satisfy
    pub fn max_spawn_distance(&self) -> f32 {
        self.field().length() * 0.5
    }

    /// Field extent as a vector
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Collision radii derived from nominal sizes and render scales
    pub fn hitboxes(&self) -> Hitboxes {
        Hitboxes {
            player: self.player_hit_size * self.player_scale,
            enemy_body: self.enemy_body_size * self.enemy_scale,
            enemy_hurt: self.enemy_hurt_size * self.enemy_scale,
            bullet: self.bullet_radius,
        }
    }
}
