//! Per-frame simulation step
//!
//! `GameplayState::update` runs the whole frame in a fixed order:
//!
//! 1. horizontal movement and aiming from held keys
//! 2. rate-limited firing
//! 3. gravity and platform/ground collision
//! 4. player projectiles vs enemies and the boss
//! 5. enemy and boss AI, then hostile projectiles vs platforms and the player
//! 6. collectible physics and pickup
//! 7. ship trigger, camera and world limits
//! 8. win/lose checks
//!
//! Removals are mark-and-compact: hits are recorded while scanning and the
//! collections are filtered with `retain` afterwards.

use crate::audio::SoundCue;
use crate::collectible::{Collectible, CollectibleKind};
use crate::collision::{Collidable, aabb_intersect};
use crate::combat::{Projectile, ProjectileKind};
use crate::input::InputSnapshot;
use crate::math::Vec2;
use crate::particles::ParticleKind;
use tracing::{debug, info};

use super::state::{GameMode, GameplayOutcome, GameplayState, PlayPhase};

const SPARK_COLOR: (u8, u8, u8) = (255, 200, 80);
const BLOOD_COLOR: (u8, u8, u8) = (220, 30, 30);
const FIRE_COLOR: (u8, u8, u8) = (255, 120, 0);
const FLASH_COLOR: (u8, u8, u8) = (255, 255, 255);

impl GameplayState {
    /// Advances the simulation one frame. `now` is the host clock in milliseconds.
    pub fn update(&mut self, input: &InputSnapshot, now: u64) -> GameplayOutcome {
        match self.phase {
            PlayPhase::Loading { since } => {
                if now.saturating_sub(since) > self.config.level.loading_duration_ms {
                    info!("loading finished, entering boss arena");
                    return GameplayOutcome::EnterBossFight;
                }
                return GameplayOutcome::Continue;
            }
            PlayPhase::GameOver | PlayPhase::Victory { .. } => {
                self.particles.update();
                return GameplayOutcome::Continue;
            }
            PlayPhase::Playing => {}
        }

        self.player.apply_horizontal_input(input);
        if self.mode == GameMode::BossFight {
            self.player.keep_in_bounds(0.0, self.config.level.screen_width);
        }

        if let Some(shot) = self.player.try_fire(input, now, &self.config.combat) {
            self.bullets.push(shot);
            self.sound_cues.push(SoundCue::PlayerShot);
        }

        let ground_y = self.config.level.ground_y();
        self.player.apply_gravity_and_collide(&self.platforms, ground_y);

        self.update_player_bullets(now);
        self.update_enemies(now);
        self.update_boss(now);
        self.update_hostile_bullets(now);
        self.update_collectibles();

        // A lethal hit this frame already ended the run
        if self.phase != PlayPhase::Playing {
            self.particles.update();
            return GameplayOutcome::Continue;
        }

        if let Some(ship) = self.ship {
            if self.player.collides_with(&ship) {
                info!("player reached the ship");
                self.phase = PlayPhase::Loading { since: now };
            }
        }

        self.update_camera();

        let pit_depth = self.config.level.screen_height * self.config.player.pit_depth_factor;
        if self.player.body.y > pit_depth {
            self.trigger_game_over();
        }

        self.particles.update();
        GameplayOutcome::Continue
    }

    fn update_player_bullets(&mut self, now: u64) {
        let combat = &self.config.combat;
        let mut spent = vec![false; self.bullets.len()];

        for (i, bullet) in self.bullets.iter_mut().enumerate() {
            bullet.advance();
            let bounds = bullet.get_bounds();

            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|enemy| aabb_intersect(&enemy.get_bounds(), &bounds))
            {
                spent[i] = true;
                enemy.take_hit(combat.player_damage_vs_enemy);
                self.particles
                    .emit(&mut self.rng, ParticleKind::Impact, bullet.pos, -bullet.dir, 8, SPARK_COLOR);
                continue;
            }

            if let Some(boss) = self.boss.as_mut().filter(|boss| !boss.is_defeated()) {
                if aabb_intersect(&boss.get_bounds(), &bounds) {
                    spent[i] = true;
                    let hit = boss.take_damage(combat.player_damage_vs_boss, now);
                    self.particles
                        .emit(&mut self.rng, ParticleKind::Impact, bullet.pos, -bullet.dir, 5, SPARK_COLOR);
                    if hit.phase_change.is_some() {
                        self.particles
                            .emit(&mut self.rng, ParticleKind::Explosion, boss.center(), Vec2::ZERO, 40, FLASH_COLOR);
                    }
                    if hit.defeated {
                        info!("boss defeated");
                        self.particles
                            .emit(&mut self.rng, ParticleKind::Explosion, boss.center(), Vec2::ZERO, 80, FIRE_COLOR);
                        self.phase = PlayPhase::Victory { since: now };
                        self.sound_cues.push(SoundCue::StopMusic { fade_ms: 1000 });
                    }
                    continue;
                }
            }

            if bullet.is_outside_view(
                self.camera.x,
                self.config.level.screen_width,
                self.config.level.screen_height,
                combat.player_bullet_margin,
            ) {
                spent[i] = true;
            }
        }

        let mut spent = spent.into_iter();
        self.bullets.retain(|_| !spent.next().unwrap_or(false));

        for enemy in self.enemies.remove_dead() {
            debug!(id = ?enemy.id(), "enemy destroyed");
            self.particles
                .emit(&mut self.rng, ParticleKind::Explosion, enemy.center(), Vec2::ZERO, 20, FIRE_COLOR);
            let kind = CollectibleKind::random(&mut self.rng, self.config.collectible.heart_chance);
            self.collectibles
                .push(Collectible::new(enemy.pos, kind, &self.config.collectible));
        }
    }

    fn update_enemies(&mut self, now: u64) {
        if self.enemies.is_empty() {
            return;
        }
        let target = self.player.center();
        for enemy in self.enemies.iter_mut() {
            enemy.update(target);
            if let Some(shot) = enemy.shoot(target, now, &self.config.combat) {
                self.hostile_bullets.push(shot);
            }
        }
    }

    fn update_boss(&mut self, now: u64) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let shots = boss.update(self.player.center(), self.player.velocity.x, now, &mut self.rng);
        self.hostile_bullets.extend(shots);
    }

    fn update_hostile_bullets(&mut self, now: u64) {
        let combat = &self.config.combat;
        let mut hits = Vec::new();

        self.hostile_bullets.retain_mut(|bullet| {
            bullet.advance();
            let bounds = bullet.get_bounds();

            if self.platforms.iter().any(|p| aabb_intersect(&p.rect, &bounds)) {
                return false;
            }
            if bullet.is_outside_view(
                self.camera.x,
                self.config.level.screen_width,
                self.config.level.screen_height,
                combat.hostile_bullet_margin,
            ) {
                return false;
            }
            if aabb_intersect(&bounds, &self.player.body) {
                hits.push(*bullet);
                return false;
            }
            true
        });

        for bullet in self.hostile_bullets.iter().filter(|b| b.kind == ProjectileKind::BossLaser) {
            self.particles
                .emit(&mut self.rng, ParticleKind::Trail, bullet.pos, bullet.dir, 2, FIRE_COLOR);
        }

        for hit in hits {
            self.hit_player(&hit, now);
        }
    }

    fn hit_player(&mut self, bullet: &Projectile, now: u64) {
        let result = self.player.take_hit(bullet.damage, now);
        debug!(
            damage = result.damage_dealt,
            remaining = self.player.hit_points.current(),
            "player hit"
        );
        self.particles
            .emit(&mut self.rng, ParticleKind::Impact, bullet.pos, bullet.dir, 10, BLOOD_COLOR);
        if result.is_fatal || self.player.is_dead() {
            self.trigger_game_over();
        }
    }

    fn update_collectibles(&mut self) {
        let ground_y = self.config.level.ground_y();
        let despawn_y = self.config.level.screen_height * self.config.collectible.despawn_depth_factor;
        let ammo_bundle = self.config.collectible.ammo_bundle;
        let player = &mut self.player;
        let platforms = &self.platforms;

        self.collectibles.retain_mut(|item| {
            item.update(platforms, ground_y);

            if item.collides_with(&*player) {
                let picked_up = match item.kind {
                    // A heart is left on the ground when health is already full
                    CollectibleKind::Heart if !player.hit_points.is_full() => {
                        let per_heart = player.hit_points.per_heart();
                        player.hit_points.heal(per_heart);
                        true
                    }
                    CollectibleKind::Heart => false,
                    CollectibleKind::Ammo => {
                        player.ammo.refill(ammo_bundle);
                        true
                    }
                };
                if picked_up {
                    debug!(kind = ?item.kind, "collectible picked up");
                    return false;
                }
            }

            item.pos.y <= despawn_y
        });
    }

    fn update_camera(&mut self) {
        match self.mode {
            GameMode::Scrolling => {
                let level = &self.config.level;
                self.camera
                    .follow(self.player.center().x, level.screen_width, level.camera_smoothing);
                self.player
                    .keep_in_bounds(self.config.player.level_left_limit, f32::INFINITY);

                if let Some(&last) = self.trench_positions.last() {
                    self.level_cleared = self.level_cleared || self.camera.x > last;
                }
            }
            GameMode::BossFight => self.camera.fix(),
        }
    }
}
