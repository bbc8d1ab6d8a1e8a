//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one frame.

use glam::Vec2;

use super::collision::{circles_overlap, outside_field};
use super::input::{FrameInput, autopilot, movement_delta};
use super::spawner::update_spawner;
use super::state::{Bullet, GameEvent, GameState, Screen};
use crate::direction_to;

/// Advance the game state by one frame
///
/// Events left over from the previous frame are discarded first.
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.events.clear();

    let piloted;
    let input = if input.autopilot {
        piloted = autopilot(state, input);
        &piloted
    } else {
        input
    };

    match state.screen {
        Screen::Menu => {
            if input.confirm {
                state.reset_session();
                state.set_screen(Screen::Gameplay);
            }
        }
        Screen::Gameplay => tick_gameplay(state, input),
        Screen::GameOver => {
            if input.confirm {
                state.set_screen(Screen::Menu);
            }
        }
    }
}

fn tick_gameplay(state: &mut GameState, input: &FrameInput) {
    state.frame += 1;

    // Player movement
    state.player.pos += movement_delta(input, state.player.speed);

    if input.fire {
        fire_bullet(state, input.pointer);
    }

    update_spawner(state, input.dt);

    advance_bullets(state);
    advance_enemies(state);

    let caught = resolve_player_hits(state).is_some();

    // Kills on the losing frame still count toward the final score
    resolve_bullet_hits(state);

    if caught {
        state.best_score = state.best_score.max(state.score);
        state.set_screen(Screen::GameOver);
    }
}

/// Fire a bullet from the player toward `target`.
///
/// Returns the slot used, or `None` if the pool is full or `target` is the
/// player's own position.
pub fn fire_bullet(state: &mut GameState, target: Vec2) -> Option<usize> {
    let bullet = Bullet::aimed(state.player.pos, target)?;
    let Some(slot) = state.bullets.allocate(bullet) else {
        log::trace!("Bullet pool full, shot dropped");
        return None;
    };
    state.events.push(GameEvent::BulletFired { slot });
    Some(slot)
}

/// Move every active bullet along its direction, retiring those that leave the field
pub fn advance_bullets(state: &mut GameState) {
    let speed = state.settings.bullet_speed;
    let field = state.field();
    for (_, bullet) in state.bullets.iter_active_mut() {
        bullet.pos += bullet.dir * speed;
        if outside_field(bullet.pos, field) {
            bullet.active = false;
        }
    }
}

/// Move every active enemy straight toward the player's current position
pub fn advance_enemies(state: &mut GameState) {
    let speed = state.settings.enemy_speed;
    let target = state.player.pos;
    for (_, enemy) in state.enemies.iter_active_mut() {
        enemy.pos += direction_to(enemy.pos, target) * speed;
    }
}

/// Find the first active enemy touching the player.
///
/// Returns its slot; the caller ends the session.
pub fn resolve_player_hits(state: &mut GameState) -> Option<usize> {
    let hit = state.hitboxes();
    let player = state.player.pos;
    let slot = state
        .enemies
        .iter_active()
        .find(|(_, e)| circles_overlap(e.pos, hit.enemy_body, player, hit.player))
        .map(|(slot, _)| slot)?;

    log::debug!("Player caught by enemy in slot {}", slot);
    state.events.push(GameEvent::PlayerCaught { slot });
    Some(slot)
}

/// Match bullets against enemies in slot order.
///
/// Each bullet destroys at most the first enemy it overlaps; both are
/// retired and the score goes up by one. Returns the number of kills.
pub fn resolve_bullet_hits(state: &mut GameState) -> u32 {
    let hit = state.hitboxes();
    let mut kills = 0;

    for (_, bullet) in state.bullets.iter_active_mut() {
        let Some((slot, enemy)) = state
            .enemies
            .iter_active_mut()
            .find(|(_, e)| circles_overlap(bullet.pos, hit.bullet, e.pos, hit.enemy_hurt))
        else {
            continue;
        };

        bullet.active = false;
        enemy.active = false;
        kills += 1;
        log::debug!("Enemy in slot {} destroyed", slot);
        state.events.push(GameEvent::EnemyKilled {
            slot,
            pos: enemy.pos,
        });
    }

    state.score += kills;
    kills
}
