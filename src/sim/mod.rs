//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Hitboxes, circles_overlap, outside_field};
pub use input::{EdgeTrigger, FrameInput, autopilot, movement_delta};
pub use pool::{Pool, PoolSizeError, Slot};
pub use spawner::{sample_spawn_position, update_spawner};
pub use state::{Bullet, Enemy, GameEvent, GameState, Player, Screen, Snapshot};
pub use tick::{
    advance_bullets, advance_enemies, fire_bullet, resolve_bullet_hits, resolve_player_hits, tick,
};
