//! Items dropped by destroyed enemies
//!
//! A collectible pops up when it spawns, falls under gravity and comes to
//! rest on the ground or on the first platform it lands on from above. It
//! never drifts horizontally.

use crate::collision::{Collidable, Rect, aabb_intersect};
use crate::config::CollectibleConfig;
use crate::map::Platform;
use crate::math::Vec2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Restores one heart's worth of hit points
    Heart,
    /// Grants a fixed bundle of ammunition
    Ammo,
}

impl CollectibleKind {
    /// Picks a drop type, a heart with probability `heart_chance`
    pub fn random(rng: &mut impl Rng, heart_chance: f64) -> Self {
        if rng.gen_bool(heart_chance.clamp(0.0, 1.0)) {
            CollectibleKind::Heart
        } else {
            CollectibleKind::Ammo
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub size: f32,
    pub velocity_y: f32,
    gravity: f32,
    /// Set once it lands; a zero velocity at the top of the pop is not a landing
    grounded: bool,
}

impl Collectible {
    pub fn new(pos: Vec2, kind: CollectibleKind, config: &CollectibleConfig) -> Self {
        Collectible {
            pos,
            kind,
            size: config.size,
            velocity_y: config.pop_velocity,
            gravity: config.gravity,
            grounded: false,
        }
    }

    /// Applies gravity and lands on the ground or a platform top.
    ///
    /// Platforms only catch the item while it is falling and its bottom is
    /// still above the platform's bottom, so an item rising through a
    /// platform passes it.
    pub fn update(&mut self, platforms: &[Platform], ground_y: f32) {
        if self.grounded {
            return;
        }

        self.velocity_y += self.gravity;
        self.pos.y += self.velocity_y;

        if self.get_bounds().bottom() >= ground_y {
            self.pos.y = ground_y - self.size;
            self.velocity_y = 0.0;
            self.grounded = true;
        }

        for platform in platforms {
            let bounds = self.get_bounds();
            if self.velocity_y > 0.0
                && aabb_intersect(&bounds, &platform.rect)
                && bounds.bottom() < platform.rect.bottom()
            {
                self.pos.y = platform.rect.top() - self.size;
                self.velocity_y = 0.0;
                self.grounded = true;
            }
        }
    }

    #[cfg(test)]
    pub fn is_resting(&self) -> bool {
        self.grounded
    }
}

impl Collidable for Collectible {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}
