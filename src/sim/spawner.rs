//! Timed enemy spawning
//!
//! Spawn attempts happen at a fixed cadence whether or not a slot is free.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};
use crate::consts::MAX_SPAWN_ATTEMPTS;

/// Pick a uniformly random point in `0..field` at least `min_distance` from `player`.
///
/// Gives up after [`MAX_SPAWN_ATTEMPTS`] rejections and returns the field
/// corner farthest from the player, which is never closer than half the field
/// diagonal.
pub fn sample_spawn_position<R: Rng>(
    rng: &mut R,
    field: Vec2,
    player: Vec2,
    min_distance: f32,
) -> Vec2 {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0.0..field.x),
            rng.random_range(0.0..field.y),
        );
        if candidate.distance(player) >= min_distance {
            return candidate;
        }
    }

    farthest_corner(field, player)
}

/// Corner of `0..field` farthest from `point`
pub fn farthest_corner(field: Vec2, point: Vec2) -> Vec2 {
    let center = crate::field_center(field);
    Vec2::new(
        if point.x < center.x { field.x } else { 0.0 },
        if point.y < center.y { field.y } else { 0.0 },
    )
}

/// Advance the spawn timer and make an attempt when it is due.
///
/// Returns the slot of the spawned enemy, if any.
pub fn update_spawner(state: &mut GameState, dt: f32) -> Option<usize> {
    state.spawn_timer += dt;
    if state.spawn_timer < state.settings.spawn_interval {
        return None;
    }
    state.spawn_timer = 0.0;

    if state.enemies.is_full() {
        log::trace!("Enemy pool full, spawn skipped");
        return None;
    }

    let field = state.settings.field();
    let player = state.player.pos;
    let pos = sample_spawn_position(
        &mut state.rng,
        field,
        player,
        state.settings.min_spawn_distance,
    );
    let slot = state.enemies.allocate(Enemy::at(pos))?;
    log::debug!("Enemy spawned in slot {} at ({:.1}, {:.1})", slot, pos.x, pos.y);
    state.events.push(GameEvent::EnemySpawned { slot, pos });
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(5);
        let dt = 0.25;
        assert_eq!(update_spawner(&mut state, dt), None);
        assert_eq!(update_spawner(&mut state, dt), None);
        assert_eq!(update_spawner(&mut state, dt), None);
        assert_eq!(update_spawner(&mut state, dt), Some(0));
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.enemies.active_count(), 1);
    }

    #[test]
    fn test_full_pool_still_resets_timer() {
        let mut state = GameState::new(5);
        for i in 0..MAX_ENEMIES {
            state.enemies.allocate(Enemy::at(Vec2::new(i as f32, 1.0)));
        }
        state.spawn_timer = 0.9;
        assert_eq!(update_spawner(&mut state, 0.2), None);
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.enemies.active_count(), MAX_ENEMIES);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_spawn_respects_distance() {
        let mut state = GameState::new(11);
        let player = state.player.pos;
        for _ in 0..MAX_ENEMIES {
            update_spawner(&mut state, ENEMY_SPAWN_INTERVAL);
        }
        assert_eq!(state.enemies.active_count(), MAX_ENEMIES);
        for (_, enemy) in state.enemies.iter_active() {
            assert!(enemy.pos.distance(player) >= MIN_SPAWN_DISTANCE);
        }
    }

    #[test]
    fn test_fallback_to_farthest_corner() {
        let mut rng = Pcg32::seed_from_u64(0);
        let field = Vec2::new(100.0, 100.0);
        // Nothing in the field is this far away
        let pos = sample_spawn_position(&mut rng, field, Vec2::new(10.0, 20.0), 10_000.0);
        assert_eq!(pos, Vec2::new(100.0, 100.0));

        assert_eq!(farthest_corner(field, Vec2::new(90.0, 5.0)), Vec2::new(0.0, 100.0));
    }

    proptest! {
        #[test]
        fn prop_spawn_at_least_min_distance(
            seed in any::<u64>(),
            px in -200.0f32..1280.0,
            py in -200.0f32..920.0,
            min_distance in 0.0f32..600.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
            let player = Vec2::new(px, py);
            let pos = sample_spawn_position(&mut rng, field, player, min_distance);

            prop_assert!(pos.distance(player) >= min_distance);
            prop_assert!(pos.x >= 0.0 && pos.x <= field.x);
            prop_assert!(pos.y >= 0.0 && pos.y <= field.y);
        }
    }
}
