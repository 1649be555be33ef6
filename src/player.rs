//! The player character
//!
//! Movement is plain Euler integration in pixels per frame:
//! - horizontal: acceleration while a direction is held, capped at
//!   `max_speed`, friction when nothing is held
//! - vertical: gravity, then collision against platforms and the ground
//!
//! Touching a platform's side while falling enters a wall slide that caps
//! the fall speed. Jumping out of a wall slide kicks the player away from
//! the wall.

use crate::collision::{Collidable, ContactSide, Rect, resolve_platform_collision};
use crate::combat::{Projectile, ProjectileKind};
use crate::config::{CombatConfig, PlayerConfig};
use crate::input::InputSnapshot;
use crate::map::Platform;
use crate::math::Vec2;
use crate::stats::{Ammo, DamageResult, HitPoints};

#[derive(Debug, Clone)]
pub struct Player {
    /// Hitbox in world space; its top-left is the player's position
    pub body: Rect,
    pub velocity: Vec2,
    pub facing_right: bool,
    pub is_jumping: bool,
    pub is_wall_sliding: bool,
    pub hit_points: HitPoints,
    pub ammo: Ammo,
    last_shot: Option<u64>,
    damage_flash_until: u64,
    config: PlayerConfig,
}

impl Player {
    /// Creates a player standing with its feet at `spawn`
    pub fn new(spawn: Vec2, config: &PlayerConfig) -> Self {
        let mut player = Player {
            body: Rect::new(0.0, 0.0, config.hitbox_width, config.hitbox_height),
            velocity: Vec2::ZERO,
            facing_right: true,
            is_jumping: false,
            is_wall_sliding: false,
            hit_points: HitPoints::new(config.max_hearts, config.hits_per_heart),
            ammo: Ammo::new(config.max_ammo),
            last_shot: None,
            damage_flash_until: 0,
            config: config.clone(),
        };
        player.reset(spawn);
        player
    }

    /// Puts the player back at `spawn` with full health and ammo
    pub fn reset(&mut self, spawn: Vec2) {
        self.body.x = spawn.x;
        self.body.set_bottom(spawn.y);
        self.velocity = Vec2::ZERO;
        self.facing_right = true;
        self.is_jumping = false;
        self.is_wall_sliding = false;
        self.hit_points.reset();
        self.ammo.reset();
        self.last_shot = None;
        self.damage_flash_until = 0;
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Where the sprite is drawn: wider and taller than the hitbox,
    /// centred horizontally and bottom-aligned with it
    pub fn visual_rect(&self) -> Rect {
        let offset_x = (self.config.visual_width - self.body.w) / 2.0;
        let offset_y = self.config.visual_height - self.body.h;
        Rect::new(
            self.body.x - offset_x,
            self.body.y - offset_y,
            self.config.visual_width,
            self.config.visual_height,
        )
    }

    /// Accelerates from held keys, applies friction and moves horizontally
    pub fn apply_horizontal_input(&mut self, input: &InputSnapshot) {
        if input.left {
            self.velocity.x -= self.config.acceleration;
            self.facing_right = false;
        }
        if input.right {
            self.velocity.x += self.config.acceleration;
            self.facing_right = true;
        }

        let max = self.config.max_speed;
        self.velocity.x = self.velocity.x.clamp(-max, max);

        if !input.left && !input.right {
            self.velocity.x *= self.config.friction;
        }

        self.body.x += self.velocity.x;
    }

    /// Aim from the held direction keys, or straight ahead when none are held
    pub fn aim_direction(&self, input: &InputSnapshot) -> Vec2 {
        let aim = Vec2::new(input.horizontal(), input.vertical());
        aim.normalize_or(self.facing())
    }

    pub fn facing(&self) -> Vec2 {
        Vec2::new(if self.facing_right { 1.0 } else { -1.0 }, 0.0)
    }

    /// Gun tip in world space
    pub fn barrel_position(&self) -> Vec2 {
        let offset = if self.facing_right {
            self.config.gun_barrel_offset_right
        } else {
            self.config.gun_barrel_offset_left
        };
        self.body.position() + offset
    }

    /// Fires one shot if the fire key is held, the cooldown has passed and
    /// there is ammo left. Consumes one round unless ammo is unlimited.
    pub fn try_fire(&mut self, input: &InputSnapshot, now: u64, combat: &CombatConfig) -> Option<Projectile> {
        if !input.fire || !self.ammo.can_fire() {
            return None;
        }
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) <= combat.shot_cooldown_ms {
                return None;
            }
        }
        if !self.ammo.try_consume() {
            return None;
        }
        self.last_shot = Some(now);

        Some(Projectile::new(
            self.barrel_position(),
            self.aim_direction(input),
            combat.player_bullet_speed,
            combat.player_damage_vs_enemy,
            combat.player_bullet_half_size,
            ProjectileKind::PlayerShot,
        ))
    }

    /// Starts a jump when grounded or wall sliding. Returns whether it jumped.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping && !self.is_wall_sliding {
            return false;
        }

        self.velocity.y = self.config.jump_force;
        self.is_jumping = true;
        if self.is_wall_sliding {
            let kick = self.config.max_speed * self.config.wall_jump_factor;
            self.velocity.x = if self.facing_right { -kick } else { kick };
            self.is_wall_sliding = false;
        }
        true
    }

    /// Applies gravity, moves vertically and resolves platforms then the ground
    pub fn apply_gravity_and_collide(&mut self, platforms: &[Platform], ground_y: f32) {
        self.velocity.y += self.config.gravity;
        self.body.y += self.velocity.y;

        self.is_wall_sliding = false;
        for platform in platforms {
            match resolve_platform_collision(&mut self.body, &mut self.velocity, &platform.rect) {
                Some(ContactSide::Top) => self.is_jumping = false,
                Some(side) if side.is_side() && self.velocity.y > 0.0 => {
                    self.is_wall_sliding = true;
                    self.velocity.y = self.velocity.y.min(self.config.wall_slide_speed);
                }
                _ => {}
            }
        }

        if self.body.bottom() >= ground_y && self.velocity.y >= 0.0 {
            self.body.set_bottom(ground_y);
            self.velocity.y = 0.0;
            self.is_jumping = false;
        }
    }

    /// Keeps the hitbox within `[min_x, max_x]`, stopping movement into the edge
    pub fn keep_in_bounds(&mut self, min_x: f32, max_x: f32) {
        if self.body.left() < min_x {
            self.body.x = min_x;
            self.velocity.x = self.velocity.x.max(0.0);
        }
        if self.body.right() > max_x {
            self.body.set_right(max_x);
            self.velocity.x = self.velocity.x.min(0.0);
        }
    }

    pub fn take_hit(&mut self, damage: u32, now: u64) -> DamageResult {
        self.damage_flash_until = now + self.config.damage_flash_ms;
        self.hit_points.take_damage(damage)
    }

    pub fn is_flashing(&self, now: u64) -> bool {
        now < self.damage_flash_until
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points.is_depleted()
    }
}

impl Collidable for Player {
    fn get_bounds(&self) -> Rect {
        self.body
    }
}
