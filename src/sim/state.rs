//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`GameState`], so the
//! simulation runs without a window or renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hitboxes;
use super::pool::{Pool, Slot};
use crate::consts::*;
use crate::field_center;
use crate::settings::Settings;

/// Which screen is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active play
    Gameplay,
    /// Run ended, showing the final score
    GameOver,
}

/// The player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Pixels per frame along each pressed axis
    pub speed: f32,
}

/// A projectile slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub active: bool,
}

impl Bullet {
    /// Bullet at `origin` flying toward `target`.
    ///
    /// Returns `None` when the two points coincide, since there is no
    /// direction to fly in.
    pub fn aimed(origin: Vec2, target: Vec2) -> Option<Self> {
        let dir = (target - origin).try_normalize()?;
        Some(Self {
            pos: origin,
            dir,
            active: true,
        })
    }
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A homing enemy slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub active: bool,
}

impl Enemy {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, active: true }
    }
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

pub type BulletPool = Pool<Bullet, MAX_BULLETS>;
pub type EnemyPool = Pool<Enemy, MAX_ENEMIES>;

/// Something that happened during a frame, for audio/effects to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScreenChanged { from: Screen, to: Screen },
    BulletFired { slot: usize },
    EnemySpawned { slot: usize, pos: Vec2 },
    EnemyKilled { slot: usize, pos: Vec2 },
    PlayerCaught { slot: usize },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tuning in effect for this run
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn position generator
    pub rng: Pcg32,
    /// Current screen
    pub screen: Screen,
    pub player: Player,
    pub bullets: BulletPool,
    pub enemies: EnemyPool,
    /// Kills this session
    pub score: u32,
    /// Best score since the process started
    pub best_score: u32,
    /// Seconds accumulated toward the next spawn attempt
    pub spawn_timer: f32,
    /// Gameplay frames this session
    pub frame: u64,
    /// Events from the latest frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the menu with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    /// Create a new game state on the menu
    ///
    /// Settings that fail validation are replaced by the defaults.
    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings.sanitized(),
            Err(err) => {
                log::warn!("{err}; using default settings");
                Settings::default()
            }
        };
        let player = Player {
            pos: field_center(settings.field()),
            speed: settings.player_speed,
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Menu,
            player,
            bullets: BulletPool::new(),
            enemies: EnemyPool::new(),
            score: 0,
            best_score: 0,
            spawn_timer: 0.0,
            frame: 0,
            events: Vec::new(),
            settings,
        }
    }

    /// Start a fresh session: score zero, player centered, pools emptied
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.player.pos = field_center(self.settings.field());
        self.player.speed = self.settings.player_speed;
        self.bullets.clear();
        self.enemies.clear();
        self.spawn_timer = 0.0;
        self.frame = 0;
    }

    /// Switch screens, recording the transition
    pub fn set_screen(&mut self, to: Screen) {
        let from = self.screen;
        if from == to {
            return;
        }
        log::info!("Screen {:?} -> {:?} (score {})", from, to, self.score);
        self.screen = to;
        self.events.push(GameEvent::ScreenChanged { from, to });
    }

    #[inline]
    pub fn field(&self) -> Vec2 {
        self.settings.field()
    }

    #[inline]
    pub fn hitboxes(&self) -> Hitboxes {
        self.settings.hitboxes()
    }

    /// Take the events recorded during the latest frame
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything the presentation layer needs to draw this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen,
            player: self.player.pos,
            bullets: self.bullets.iter().map(|b| (b.pos, b.active)).collect(),
            enemies: self.enemies.iter().map(|e| (e.pos, e.active)).collect(),
            score: self.score,
            best_score: self.best_score,
        }
    }
}

/// Read-only view of one frame for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub player: Vec2,
    /// `(position, active)` per bullet slot
    pub bullets: Vec<(Vec2, bool)>,
    /// `(position, active)` per enemy slot
    pub enemies: Vec<(Vec2, bool)>,
    pub score: u32,
    pub best_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(7);
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.player.pos, Vec2::new(540.0, 360.0));
        assert_eq!(state.player.speed, PLAYER_SPEED);
        assert_eq!(state.bullets.capacity(), MAX_BULLETS);
        assert_eq!(state.enemies.capacity(), MAX_ENEMIES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let settings = Settings {
            field_width: 0.0,
            ..Default::default()
        };
        let state = GameState::with_settings(settings, 7);
        assert_eq!(state.settings, Settings::default());
        assert_eq!(state.player.pos, Vec2::new(540.0, 360.0));

        let settings = Settings {
            player_speed: 8.0,
            ..Default::default()
        };
        assert_eq!(GameState::with_settings(settings, 7).player.speed, 8.0);
    }

    #[test]
    fn test_reset_session() {
        let mut state = GameState::new(7);
        state.score = 12;
        state.player.pos = Vec2::new(3.0, 4.0);
        state.spawn_timer = 0.7;
        state.bullets.allocate(Bullet::aimed(Vec2::ZERO, Vec2::X).unwrap());
        state.enemies.allocate(Enemy::at(Vec2::new(10.0, 10.0)));

        state.reset_session();

        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(540.0, 360.0));
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.bullets.active_count(), 0);
        assert_eq!(state.enemies.active_count(), 0);
    }

    #[test]
    fn test_bullet_aimed() {
        let b = Bullet::aimed(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0)).unwrap();
        assert!((b.dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert!(b.active);
        assert!(Bullet::aimed(Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn test_set_screen_records_event() {
        let mut state = GameState::new(1);
        state.set_screen(Screen::Gameplay);
        state.set_screen(Screen::Gameplay);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScreenChanged {
                from: Screen::Menu,
                to: Screen::Gameplay
            }]
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_snapshot_lists_every_slot() {
        let mut state = GameState::new(1);
        state.enemies.allocate(Enemy::at(Vec2::new(5.0, 6.0)));
        let snap = state.snapshot();
        assert_eq!(snap.bullets.len(), MAX_BULLETS);
        assert_eq!(snap.enemies.len(), MAX_ENEMIES);
        assert_eq!(snap.enemies[0], (Vec2::new(5.0, 6.0), true));
        assert!(!snap.enemies[1].1);
    }

    #[test]
    fn test_state_serde_roundtrip_keeps_rng() {
        use rand::Rng;

        let mut state = GameState::new(99);
        let _: u32 = state.rng.random();
        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();

        let a: u32 = state.rng.random();
        let b: u32 = restored.rng.random();
        assert_eq!(a, b);
        assert_eq!(restored.screen, state.screen);
    }
}
