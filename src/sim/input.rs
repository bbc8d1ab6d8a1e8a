//! Per-frame input and its mapping onto player movement
//!
//! The backend samples keys and pointer once per frame and fills a
//! [`FrameInput`]. Confirm and fire are edge-triggered: `true` only on the
//! frame the button went down.

use glam::Vec2;

use super::state::{GameState, Screen};

/// Fire cadence of the autopilot (frames between shots)
pub const AUTOPILOT_FIRE_FRAMES: u64 = 10;
/// Enemies closer than this make the autopilot back away
pub const AUTOPILOT_DANGER_RADIUS: f32 = 90.0;

/// Input sampled for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Movement keys currently held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Confirm pressed this frame (menu / game over)
    pub confirm: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Pointer position in field coordinates
    pub pointer: Vec2,
    /// Seconds since the previous frame
    pub dt: f32,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

/// Movement for this frame: each held direction adds `speed` on its axis.
///
/// Opposite keys cancel out; diagonals are not normalized.
pub fn movement_delta(input: &FrameInput, speed: f32) -> Vec2 {
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= speed;
    }
    if input.down {
        delta.y += speed;
    }
    if input.left {
        delta.x -= speed;
    }
    if input.right {
        delta.x += speed;
    }
    delta
}

/// Turns a held button into a press event
///
/// For backends that only expose key-down state.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    /// Feed the current held state; true only on the not-pressed -> pressed frame
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Replace `input` with what the autopilot would press this frame
pub fn autopilot(state: &GameState, input: &FrameInput) -> FrameInput {
    let mut out = FrameInput {
        dt: input.dt,
        pointer: input.pointer,
        autopilot: true,
        ..Default::default()
    };

    match state.screen {
        Screen::Menu | Screen::GameOver => {
            out.confirm = true;
        }
        Screen::Gameplay => {
            let player = state.player.pos;
            let nearest = state
                .enemies
                .iter_active()
                .map(|(_, e)| e.pos)
                .min_by(|a, b| {
                    a.distance_squared(player)
                        .partial_cmp(&b.distance_squared(player))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(target) = nearest {
                out.pointer = target;
                out.fire = state.frame % AUTOPILOT_FIRE_FRAMES == 0;

                // Step directly away on each axis from a close enemy
                if target.distance(player) < AUTOPILOT_DANGER_RADIUS {
                    let away = player - target;
                    out.up = away.y < 0.0;
                    out.down = away.y > 0.0;
                    out.left = away.x < 0.0;
                    out.right = away.x > 0.0;
                }
            }

            // Drift back toward the middle so spawns have room
            let center = crate::field_center(state.field());
            if !(out.up || out.down || out.left || out.right) {
                let home = center - player;
                let slack = state.player.speed;
                out.up = home.y < -slack;
                out.down = home.y > slack;
                out.left = home.x < -slack;
                out.right = home.x > slack;
            }
        }
    }

    out
}
