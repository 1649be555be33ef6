//! Projectiles
//!
//! Every bullet in the game, friendly or hostile, is a `Projectile`. They are
//! stored in flat `Vec`s owned by the gameplay state and removed with
//! `retain` once they hit something or leave the area around the camera.
//!
//! # Rust Learning Notes
//!
//! - **Enums for Type Safety**: `ProjectileKind` decides who a bullet can hurt
//!   and how it is drawn, so a player shot can never be tested against the player
//! - **Copy types**: projectiles are small plain values, cheap to move around

use crate::collision::{Collidable, Rect};
use crate::math::Vec2;

/// Who fired a projectile and how it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Fired by the player, hurts enemies and the boss
    PlayerShot,
    /// Fired by a trench enemy
    EnemyLaser,
    /// Fired by the boss; drawn larger and leaves a particle trail
    BossLaser,
}

impl ProjectileKind {
    pub fn is_hostile(self) -> bool {
        !matches!(self, ProjectileKind::PlayerShot)
    }
}

/// A single bullet in flight
///
/// `dir` is always a unit vector; `speed` is in pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub damage: u32,
    /// Half the side of the square hitbox centred on `pos`
    pub half_size: f32,
    pub kind: ProjectileKind,
}

impl Projectile {
    /// Creates a projectile travelling along `dir`.
    ///
    /// A zero `dir` falls back to pointing right, so a projectile never
    /// stands still.
    pub fn new(
        pos: Vec2,
        dir: Vec2,
        speed: f32,
        damage: u32,
        half_size: f32,
        kind: ProjectileKind,
    ) -> Self {
        Projectile {
            pos,
            dir: dir.normalize_or(Vec2::new(1.0, 0.0)),
            speed,
            damage,
            half_size,
            kind,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Moves the projectile one frame along its direction
    pub fn advance(&mut self) {
        self.pos += self.velocity();
    }

    /// True when the projectile is further than `margin` outside the view.
    ///
    /// The view spans `[camera_x, camera_x + view_width]` horizontally and
    /// `[0, view_height]` vertically; the camera never scrolls vertically.
    pub fn is_outside_view(
        &self,
        camera_x: f32,
        view_width: f32,
        view_height: f32,
        margin: f32,
    ) -> bool {
        self.pos.x < camera_x - margin
            || self.pos.x > camera_x + view_width + margin
            || self.pos.y < -margin
            || self.pos.y > view_height + margin
    }
}

impl Collidable for Projectile {
    fn get_bounds(&self) -> Rect {
        Rect::centered(self.pos, self.half_size)
    }
}
