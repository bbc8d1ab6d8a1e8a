//! Ghost Shooter - A top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input mapping, pools, spawning, collisions)
//! - `settings`: Data-driven tuning (speeds, scales, hit sizes)

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window title shown by the presentation layer
    pub const WINDOW_TITLE: &str = "GHOST SHOOTER";
    /// Play field dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Frame pacing target
    pub const TARGET_FPS: u32 = 60;
    /// Elapsed time of one frame at the target rate
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Pool capacities
    pub const MAX_BULLETS: usize = 50;
    pub const MAX_ENEMIES: usize = 50;

    /// Movement speeds (pixels per frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 1.5;

    /// Seconds between enemy spawn attempts
    pub const ENEMY_SPAWN_INTERVAL: f32 = 1.0;
    /// Enemies never appear closer than this to the player
    pub const MIN_SPAWN_DISTANCE: f32 = 150.0;
    /// Rejection sampling cap before falling back to the farthest corner
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Sprite render scales
    pub const PLAYER_SCALE: f32 = 0.15;
    pub const ENEMY_SCALE: f32 = 0.06;

    /// Nominal (unscaled) hit sizes, calibrated against the sprites
    pub const PLAYER_HIT_SIZE: f32 = 25.0;
    pub const ENEMY_BODY_SIZE: f32 = 20.0; // vs player
    pub const ENEMY_HURT_SIZE: f32 = 40.0; // vs bullets
    pub const BULLET_RADIUS: f32 = 10.0;
}

/// Center of a field with the given extent
#[inline]
pub fn field_center(field: Vec2) -> Vec2 {
    field * 0.5
}

/// Unit vector pointing from `from` toward `to` (zero if they coincide)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
