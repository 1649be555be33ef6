//! Gameplay tuning configuration
//!
//! Every constant the simulation uses lives here so balance changes don't
//! touch code. The defaults are the shipped tuning; a JSON file can override
//! any subset of them:
//!
//! ```json
//! { "player": { "jump_force": -20.0 }, "boss": { "max_health": 3000 } }
//! ```
//!
//! Speeds are in pixels per frame and times in milliseconds. The game loop is
//! capped at 90 FPS and the simulation is frame-locked, so per-frame values
//! are what the player feels.

use crate::error::ConfigError;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Root configuration object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub level: LevelConfig,
    pub collectible: CollectibleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    /// Sprite size; larger than the hitbox so collisions feel forgiving
    pub visual_width: f32,
    pub visual_height: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    /// Horizontal velocity multiplier applied on frames without movement input
    pub friction: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Fall speed cap while sliding down a wall
    pub wall_slide_speed: f32,
    /// Fraction of `max_speed` pushed away from the wall on a wall jump
    pub wall_jump_factor: f32,
    /// World x the player cannot walk back past in the scrolling level
    pub level_left_limit: f32,
    /// Gun tip relative to the hitbox top-left, facing right
    pub gun_barrel_offset_right: Vec2,
    /// Gun tip relative to the hitbox top-left, facing left
    pub gun_barrel_offset_left: Vec2,
    pub max_hearts: u32,
    pub hits_per_heart: u32,
    pub max_ammo: u32,
    pub damage_flash_ms: u64,
    /// Game over once the player's top is below `screen_height * pit_depth_factor`
    pub pit_depth_factor: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            hitbox_width: 120.0,
            hitbox_height: 220.0,
            visual_width: 225.0,
            visual_height: 240.0,
            acceleration: 0.8,
            max_speed: 12.0,
            friction: 0.85,
            gravity: 0.6,
            jump_force: -18.0,
            wall_slide_speed: 2.0,
            wall_jump_factor: 0.8,
            level_left_limit: 200.0,
            gun_barrel_offset_right: Vec2::new(150.0, 128.0),
            gun_barrel_offset_left: Vec2::new(-10.0, 128.0),
            max_hearts: 5,
            hits_per_heart: 15,
            max_ammo: 60,
            damage_flash_ms: 500,
            pit_depth_factor: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub shot_cooldown_ms: u64,
    pub player_bullet_speed: f32,
    pub player_bullet_half_size: f32,
    pub player_damage_vs_enemy: u32,
    pub player_damage_vs_boss: u32,
    /// Distance outside the camera view at which player bullets are dropped
    pub player_bullet_margin: f32,
    pub enemy_bullet_speed: f32,
    pub boss_bullet_speed: f32,
    pub hostile_bullet_half_size: f32,
    pub hostile_bullet_margin: f32,
    pub enemy_bullet_damage: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        CombatConfig {
            shot_cooldown_ms: 80,
            player_bullet_speed: 20.0,
            player_bullet_half_size: 4.0,
            player_damage_vs_enemy: 1,
            player_damage_vs_boss: 10,
            player_bullet_margin: 200.0,
            enemy_bullet_speed: 15.0,
            boss_bullet_speed: 18.0,
            hostile_bullet_half_size: 5.0,
            hostile_bullet_margin: 100.0,
            enemy_bullet_damage: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub hit_points: u32,
    /// Shots available before the weapon overheats
    pub shot_budget: u32,
    /// Shots available after cooling down from an overheat
    pub refill_budget: u32,
    pub overheat_cooldown_ms: u64,
    pub shot_cooldown_ms: u64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            size: 100.0,
            hit_points: 5,
            shot_budget: 5,
            refill_budget: 2,
            overheat_cooldown_ms: 3000,
            shot_cooldown_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub size: f32,
    pub max_health: i32,
    /// Health fractions at which phases 2 and 3 begin, descending
    pub phase_thresholds: [f32; 2],
    pub speed: f32,
    /// Applied to `speed` on every phase transition
    pub speed_multiplier: f32,
    /// Applied to attack cooldown on every phase transition
    pub cooldown_multiplier: f32,
    pub attack_cooldown_ms: u64,
    pub flash_ms: u64,
    pub preferred_min_distance: f32,
    pub preferred_max_distance: f32,
    pub strafe_speed: f32,
    pub strafe_interval_ms: u64,
    /// Fraction of the vertical gap to the player closed per frame
    pub vertical_tracking: f32,
    pub dash_speed: f32,
    pub dash_duration_ms: u64,
    /// Dash is preferred when the player is closer than this
    pub dash_range: f32,
    /// Cross beam is preferred when the player is closer than this (and not in dash range)
    pub cross_beam_range: f32,
    pub spray_duration_ms: u64,
    pub spray_interval_ms: u64,
    pub radial_duration_ms: u64,
    pub radial_interval_ms: u64,
    pub radial_rays: u32,
    pub cross_beam_duration_ms: u64,
    pub cross_beam_interval_ms: u64,
    /// Damping on the predicted lead so spray shots are not perfect
    pub lead_damping: f32,
    pub bullet_damage: u32,
}

impl Default for BossConfig {
    fn default() -> Self {
        BossConfig {
            size: 200.0,
            max_health: 5000,
            phase_thresholds: [0.6, 0.3],
            speed: 5.0,
            speed_multiplier: 1.2,
            cooldown_multiplier: 0.8,
            attack_cooldown_ms: 2000,
            flash_ms: 200,
            preferred_min_distance: 250.0,
            preferred_max_distance: 450.0,
            strafe_speed: 3.0,
            strafe_interval_ms: 1500,
            vertical_tracking: 0.02,
            dash_speed: 20.0,
            dash_duration_ms: 500,
            dash_range: 300.0,
            cross_beam_range: 600.0,
            spray_duration_ms: 3000,
            spray_interval_ms: 200,
            radial_duration_ms: 2500,
            radial_interval_ms: 500,
            radial_rays: 8,
            cross_beam_duration_ms: 2000,
            cross_beam_interval_ms: 500,
            lead_damping: 0.6,
            bullet_damage: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ground surface is `screen_height - ground_offset`
    pub ground_offset: f32,
    pub trench_count: u32,
    pub first_trench_x: f32,
    pub trench_spacing: f32,
    pub trench_width: f32,
    pub min_enemies_per_trench: u32,
    pub max_enemies_per_trench: u32,
    pub barricade_width: f32,
    /// Barricade height as a fraction of the player's hitbox height
    pub barricade_height_ratio: f32,
    /// Ground enemies stand this far above the ground surface
    pub ground_enemy_offset: f32,
    pub flying_min_y: f32,
    /// Flying enemies spawn no lower than this fraction of the screen height
    pub flying_max_ratio: f32,
    pub ship_width: f32,
    pub loading_duration_ms: u64,
    pub victory_fade_ms: u64,
    pub camera_smoothing: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            screen_width: 1280.0,
            screen_height: 720.0,
            ground_offset: 60.0,
            trench_count: 2,
            first_trench_x: 1000.0,
            trench_spacing: 3000.0,
            trench_width: 400.0,
            min_enemies_per_trench: 3,
            max_enemies_per_trench: 6,
            barricade_width: 20.0,
            barricade_height_ratio: 0.7,
            ground_enemy_offset: 140.0,
            flying_min_y: 100.0,
            flying_max_ratio: 0.6,
            ship_width: 600.0,
            loading_duration_ms: 3000,
            victory_fade_ms: 2000,
            camera_smoothing: 0.1,
        }
    }
}

impl LevelConfig {
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    pub size: f32,
    /// Initial upward velocity when dropped
    pub pop_velocity: f32,
    pub gravity: f32,
    pub ammo_bundle: u32,
    /// Probability that a drop is a heart rather than ammo
    pub heart_chance: f64,
    /// Dropped items below `screen_height * despawn_depth_factor` are removed
    pub despawn_depth_factor: f32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        CollectibleConfig {
            size: 30.0,
            pop_velocity: -8.0,
            gravity: 0.5,
            ammo_bundle: 20,
            heart_chance: 0.5,
            despawn_depth_factor: 2.0,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Loads the config file, falling back to the built-in tuning on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(config) => {
                info!(path = %path.as_ref().display(), "loaded gameplay config");
                config
            }
            Err(e) => {
                warn!("{e}; using default gameplay config");
                GameConfig::default()
            }
        }
    }
}
