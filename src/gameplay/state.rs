//! Gameplay state
//!
//! `GameplayState` owns everything that exists while a level is being
//! played: the player, every projectile list, the enemies or the boss,
//! collectibles, particles and the camera. The same type runs both the
//! scrolling level and the boss arena; `GameMode` picks which.
//!
//! # Play phases
//!
//! ```text
//! Playing --touch ship--> Loading --dwell elapsed--> (switch to boss arena)
//!    |
//!    +--hit points 0 / pit fall--> GameOver --R--> Playing (reset)
//!    |
//!    +--boss health 0--> Victory --Return after fade--> (back to menu)
//! ```

use crate::audio::SoundCue;
use crate::boss::Boss;
use crate::camera::Camera;
use crate::collectible::Collectible;
use crate::collision::Rect;
use crate::combat::Projectile;
use crate::config::GameConfig;
use crate::enemy::EnemyArena;
use crate::input::Key;
use crate::map::{BOSS_ARENA, MapManager, Platform, SCROLLING_LEVEL};
use crate::particles::ParticleSystem;
use crate::player::Player;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use super::level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Trenches, scrolling camera, limited ammo
    Scrolling,
    /// Single screen, fixed camera, unlimited ammo
    BossFight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPhase {
    Playing,
    /// Ship reached; waiting out the loading screen
    Loading { since: u64 },
    GameOver,
    /// Boss defeated; the overlay fades in from `since`
    Victory { since: u64 },
}

/// What the gameplay state asks the screen manager to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayOutcome {
    Continue,
    EnterBossFight,
    ReturnToMenu,
}

pub struct GameplayState {
    pub(crate) mode: GameMode,
    pub(crate) config: GameConfig,
    pub(crate) rng: StdRng,
    pub(crate) map: MapManager,
    pub(crate) player: Player,
    pub(crate) platforms: Vec<Platform>,
    pub(crate) bullets: Vec<Projectile>,
    pub(crate) hostile_bullets: Vec<Projectile>,
    pub(crate) enemies: EnemyArena,
    pub(crate) boss: Option<Boss>,
    pub(crate) collectibles: Vec<Collectible>,
    pub(crate) particles: ParticleSystem,
    pub(crate) camera: Camera,
    pub(crate) trench_positions: Vec<f32>,
    pub(crate) ship: Option<Rect>,
    pub(crate) phase: PlayPhase,
    pub(crate) level_cleared: bool,
    pub(crate) sound_cues: Vec<SoundCue>,
}

impl GameplayState {
    pub fn new(mode: GameMode, config: GameConfig) -> Self {
        Self::with_rng(mode, config, StdRng::from_entropy())
    }

    /// Creates a state with a caller-supplied RNG (seeded in tests)
    pub fn with_rng(mode: GameMode, config: GameConfig, rng: StdRng) -> Self {
        let ground_y = config.level.ground_y();
        let map = MapManager::new(config.level.screen_width, ground_y);
        let player = Player::new(map.get_spawn_point(), &config.player);

        let mut state = GameplayState {
            mode,
            config,
            rng,
            map,
            player,
            platforms: Vec::new(),
            bullets: Vec::new(),
            hostile_bullets: Vec::new(),
            enemies: EnemyArena::new(),
            boss: None,
            collectibles: Vec::new(),
            particles: ParticleSystem::new(),
            camera: Camera::new(),
            trench_positions: Vec::new(),
            ship: None,
            phase: PlayPhase::Playing,
            level_cleared: false,
            sound_cues: Vec::new(),
        };
        state.reset(0);
        state
    }

    /// Rebuilds the level from scratch and puts the player back at the start
    pub fn reset(&mut self, now: u64) {
        self.bullets.clear();
        self.hostile_bullets.clear();
        self.enemies.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.trench_positions.clear();
        self.boss = None;
        self.ship = None;
        self.camera = Camera::new();
        self.phase = PlayPhase::Playing;
        self.level_cleared = false;

        match self.mode {
            GameMode::Scrolling => {
                self.map.load(SCROLLING_LEVEL);
                self.platforms = self.map.platforms().to_vec();

                let layout = level::generate_trenches(&mut self.rng, &self.config, &mut self.enemies);
                self.platforms.extend(layout.barricades);
                self.trench_positions = layout.positions;
                self.ship = Some(level::ship_trigger(&self.config));
            }
            GameMode::BossFight => {
                self.map.load(BOSS_ARENA);
                self.platforms = self.map.platforms().to_vec();
                self.boss = Some(Boss::new(
                    level::boss_spawn(&self.config),
                    level::arena_bounds(&self.config),
                    &self.config.boss,
                    &self.config.combat,
                    now,
                ));
            }
        }

        self.player.reset(self.map.get_spawn_point());
        self.player.ammo.set_unlimited(self.mode == GameMode::BossFight);
    }

    /// Handles a key press. Jumping happens here, not in `update`.
    pub fn handle_key(&mut self, key: Key, now: u64) -> GameplayOutcome {
        match (key, self.phase) {
            (Key::Escape, _) => {
                self.reset(now);
                GameplayOutcome::ReturnToMenu
            }
            (Key::Restart, PlayPhase::GameOver) => {
                self.reset(now);
                GameplayOutcome::Continue
            }
            (Key::Confirm, PlayPhase::Victory { .. }) if self.victory_progress(now) >= 1.0 => {
                self.reset(now);
                GameplayOutcome::ReturnToMenu
            }
            (key, PlayPhase::Playing) if key.is_jump() => {
                self.player.jump();
                GameplayOutcome::Continue
            }
            _ => GameplayOutcome::Continue,
        }
    }

    pub(crate) fn trigger_game_over(&mut self) {
        if self.phase == PlayPhase::Playing {
            info!(mode = ?self.mode, "game over");
            self.phase = PlayPhase::GameOver;
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[cfg(test)]
    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[cfg(test)]
    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    #[cfg(test)]
    pub fn is_level_cleared(&self) -> bool {
        self.level_cleared
    }

    /// Victory overlay opacity in `[0, 1]`; zero outside the victory phase
    pub fn victory_progress(&self, now: u64) -> f32 {
        match self.phase {
            PlayPhase::Victory { since } => {
                let fade = self.config.level.victory_fade_ms.max(1) as f32;
                (now.saturating_sub(since) as f32 / fade).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Removes and returns the sounds requested since the last call
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::collision::Collidable;

    pub(crate) fn scrolling_state() -> GameplayState {
        GameplayState::with_rng(GameMode::Scrolling, GameConfig::default(), StdRng::seed_from_u64(5))
    }

    pub(crate) fn boss_state() -> GameplayState {
        GameplayState::with_rng(GameMode::BossFight, GameConfig::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_scrolling_level_setup() {
        let state = scrolling_state();

        assert_eq!(state.trench_positions, vec![1000.0, 4000.0]);
        assert!(!state.enemies.is_empty());
        assert!(state.boss.is_none());
        assert!(state.ship.is_some());
        assert!(!state.player.ammo.is_unlimited());
        assert_eq!(state.player.body.x, 200.0);
        assert_eq!(state.player.body.bottom(), 660.0);
    }

    #[test]
    fn test_boss_arena_setup() {
        let state = boss_state();

        assert!(state.enemies.is_empty());
        assert!(state.ship.is_none());
        assert!(state.player.ammo.is_unlimited());
        let boss = state.boss().unwrap();
        assert_eq!(boss.health(), 5000);
        assert_eq!(boss.get_bounds().bottom(), 660.0);
    }

    #[test]
    fn test_escape_resets_and_returns_to_menu() {
        let mut state = scrolling_state();
        state.player.body.x = 3000.0;
        state.player.hit_points.take_damage(30);

        assert_eq!(state.handle_key(Key::Escape, 100), GameplayOutcome::ReturnToMenu);
        assert_eq!(state.player.body.x, 200.0);
        assert_eq!(state.player.hit_points.current(), 75);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = scrolling_state();
        state.player.body.x = 900.0;

        state.handle_key(Key::Restart, 0);
        assert_eq!(state.player.body.x, 900.0);

        state.trigger_game_over();
        assert_eq!(state.phase(), PlayPhase::GameOver);
        state.handle_key(Key::Restart, 0);
        assert_eq!(state.phase(), PlayPhase::Playing);
        assert_eq!(state.player.body.x, 200.0);
    }

    #[test]
    fn test_jump_key_ignored_when_game_over() {
        let mut state = scrolling_state();
        state.trigger_game_over();
        state.handle_key(Key::Jump, 0);
        assert_eq!(state.player.velocity.y, 0.0);

        let mut state = scrolling_state();
        state.handle_key(Key::Up, 0);
        assert_eq!(state.player.velocity.y, -18.0);
    }

    #[test]
    fn test_victory_confirm_waits_for_fade() {
        let mut state = boss_state();
        state.phase = PlayPhase::Victory { since: 1000 };

        assert_eq!(state.handle_key(Key::Confirm, 2000), GameplayOutcome::Continue);
        assert!((state.victory_progress(2000) - 0.5).abs() < 1e-6);

        assert_eq!(state.handle_key(Key::Confirm, 3000), GameplayOutcome::ReturnToMenu);
        assert_eq!(state.phase(), PlayPhase::Playing);
    }
}
