//! Boss AI
//!
//! The boss is a three-phase state machine:
//!
//! ```text
//!          cooldown elapsed            pattern duration elapsed
//!   Idle ---------------------> Attacking ----------------------> Idle
//!     |                                                            ^
//!     | Dash chosen                  dash duration elapsed         |
//!     +-------------------> Dashing -------------------------------+
//! ```
//!
//! While idle the boss keeps a preferred distance band from the player,
//! strafes perpendicular to the line between them (flipping direction on a
//! timer) and drifts toward the player's height.
//!
//! Phases only ever go up. Each threshold crossing happens exactly once and
//! permanently speeds the boss up and shortens its attack cooldown.
//!
//! # Firing cadence
//!
//! Patterns fire one volley when they start and then one volley per elapsed
//! `interval`, using an accumulator that carries the remainder between
//! frames. A long frame fires every volley it covered; a short frame never
//! fires twice for the same interval.

use crate::collision::{Collidable, Rect};
use crate::combat::{Projectile, ProjectileKind};
use crate::config::{BossConfig, CombatConfig};
use crate::math::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use std::f32::consts::TAU;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Idle,
    Attacking,
    Dashing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    /// Single predictive shot at each interval
    Spray,
    /// Ring of equally spaced shots at each interval
    RadialBurst,
    /// Four cardinal shots at each interval
    CrossBeam,
    /// High-speed lunge toward the player
    Dash,
}

impl AttackPattern {
    /// Attack pool for a phase
    pub fn pool(phase: u8) -> &'static [AttackPattern] {
        use AttackPattern::*;
        match phase {
            1 => &[Spray, RadialBurst],
            2 => &[Spray, CrossBeam, Dash],
            _ => &[RadialBurst, CrossBeam, Dash, Spray],
        }
    }
}

/// A phase increase caused by damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: u8,
    pub to: u8,
}

/// Result of hitting the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BossHit {
    pub phase_change: Option<PhaseChange>,
    /// True only on the hit that brought health to zero
    pub defeated: bool,
}

#[derive(Debug, Clone)]
struct ActivePattern {
    pattern: AttackPattern,
    started: u64,
    duration: u64,
    interval: u64,
    accumulator: u64,
    last_tick: u64,
    volleys: u32,
}

#[derive(Debug, Clone)]
pub struct Boss {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    health: i32,
    max_health: i32,
    phase: u8,
    state: BossState,
    active: Option<ActivePattern>,
    last_attack: u64,
    attack_cooldown: f32,
    speed: f32,
    strafe_dir: f32,
    last_strafe_flip: u64,
    dash_started: u64,
    flash_until: u64,
    /// Area the boss is kept inside
    bounds: Rect,
    config: BossConfig,
    bullet_speed: f32,
    bullet_half_size: f32,
}

impl Boss {
    /// Creates a boss at `pos`. Its first attack waits a full cooldown after `now`.
    pub fn new(pos: Vec2, bounds: Rect, config: &BossConfig, combat: &CombatConfig, now: u64) -> Self {
        let mut boss = Boss {
            pos,
            velocity: Vec2::ZERO,
            size: config.size,
            health: config.max_health,
            max_health: config.max_health.max(1),
            phase: 1,
            state: BossState::Idle,
            active: None,
            last_attack: now,
            attack_cooldown: config.attack_cooldown_ms as f32,
            speed: config.speed,
            strafe_dir: 1.0,
            last_strafe_flip: now,
            dash_started: 0,
            flash_until: 0,
            bounds,
            config: config.clone(),
            bullet_speed: combat.boss_bullet_speed,
            bullet_half_size: combat.hostile_bullet_half_size,
        };
        boss.clamp_to_bounds();
        boss
    }

    #[cfg(test)]
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    #[cfg(test)]
    pub fn state(&self) -> BossState {
        self.state
    }

    #[cfg(test)]
    pub fn current_pattern(&self) -> Option<AttackPattern> {
        match self.state {
            BossState::Dashing => Some(AttackPattern::Dash),
            _ => self.active.as_ref().map(|a| a.pattern),
        }
    }

    #[cfg(test)]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[cfg(test)]
    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn is_flashing(&self, now: u64) -> bool {
        now < self.flash_until
    }

    pub fn center(&self) -> Vec2 {
        self.get_bounds().center()
    }

    /// Applies damage and advances the phase for every threshold crossed
    pub fn take_damage(&mut self, amount: u32, now: u64) -> BossHit {
        if self.is_defeated() {
            return BossHit::default();
        }

        self.health -= amount as i32;
        let from = self.phase;
        let fraction = self.health as f32 / self.max_health as f32;

        for (i, threshold) in self.config.phase_thresholds.iter().enumerate() {
            let phase = i as u8 + 2;
            if fraction <= *threshold && self.phase < phase {
                self.phase = phase;
                self.speed *= self.config.speed_multiplier;
                self.attack_cooldown *= self.config.cooldown_multiplier;
                self.flash_until = now + self.config.flash_ms;
                info!(phase, health = self.health, "boss entered new phase");
            }
        }

        BossHit {
            phase_change: (self.phase != from).then_some(PhaseChange { from, to: self.phase }),
            defeated: self.is_defeated(),
        }
    }

    /// Advances the boss one frame.
    ///
    /// `target` is the player's centre and `target_vx` their horizontal
    /// velocity, used to lead spray shots. Returns the projectiles fired
    /// this frame.
    pub fn update(
        &mut self,
        target: Vec2,
        target_vx: f32,
        now: u64,
        rng: &mut impl Rng,
    ) -> Vec<Projectile> {
        let mut bullets = Vec::new();
        if self.is_defeated() {
            self.velocity = Vec2::ZERO;
            return bullets;
        }

        match self.state {
            BossState::Idle => {
                self.update_movement(target, now);
                if now.saturating_sub(self.last_attack) as f32 > self.attack_cooldown {
                    self.start_attack(target, target_vx, now, rng, &mut bullets);
                }
            }
            BossState::Attacking => {
                self.velocity = self.velocity * 0.9;
                self.update_attack(target, target_vx, now, &mut bullets);
            }
            BossState::Dashing => {
                if now.saturating_sub(self.dash_started) > self.config.dash_duration_ms {
                    self.velocity = Vec2::ZERO;
                    self.finish_attack(now);
                }
            }
        }

        self.pos += self.velocity;
        self.clamp_to_bounds();
        bullets
    }

    /// Picks the next attack: dash up close, cross beam at medium range,
    /// otherwise anything from the phase's pool.
    pub fn choose_pattern(&self, distance: f32, rng: &mut impl Rng) -> AttackPattern {
        let pool = AttackPattern::pool(self.phase);

        if distance < self.config.dash_range && pool.contains(&AttackPattern::Dash) {
            AttackPattern::Dash
        } else if distance < self.config.cross_beam_range
            && distance >= self.config.dash_range
            && pool.contains(&AttackPattern::CrossBeam)
        {
            AttackPattern::CrossBeam
        } else {
            pool.choose(rng).copied().unwrap_or(AttackPattern::Spray)
        }
    }

    fn update_movement(&mut self, target: Vec2, now: u64) {
        if now.saturating_sub(self.last_strafe_flip) >= self.config.strafe_interval_ms {
            self.strafe_dir = -self.strafe_dir;
            self.last_strafe_flip = now;
        }

        let center = self.center();
        let to_target = target - center;
        let distance = to_target.length();
        let Some(dir) = to_target.try_normalize() else {
            self.velocity = Vec2::ZERO;
            return;
        };

        let keep_distance = if distance > self.config.preferred_max_distance {
            dir * self.speed
        } else if distance < self.config.preferred_min_distance {
            -dir * self.speed
        } else {
            Vec2::ZERO
        };
        let strafe = Vec2::new(-dir.y, dir.x) * (self.strafe_dir * self.config.strafe_speed);
        let track = Vec2::new(0.0, (target.y - center.y) * self.config.vertical_tracking);

        self.velocity = keep_distance + strafe + track;
    }

    fn start_attack(
        &mut self,
        target: Vec2,
        target_vx: f32,
        now: u64,
        rng: &mut impl Rng,
        bullets: &mut Vec<Projectile>,
    ) {
        let distance = self.center().distance(target);
        let pattern = self.choose_pattern(distance, rng);

        if pattern == AttackPattern::Dash {
            let dir = (target - self.center()).normalize_or(Vec2::new(-1.0, 0.0));
            self.velocity = dir * self.config.dash_speed;
            self.dash_started = now;
            self.state = BossState::Dashing;
            return;
        }

        let (duration, interval) = match pattern {
            AttackPattern::Spray => (self.config.spray_duration_ms, self.config.spray_interval_ms),
            AttackPattern::RadialBurst => (self.config.radial_duration_ms, self.config.radial_interval_ms),
            _ => (self.config.cross_beam_duration_ms, self.config.cross_beam_interval_ms),
        };
        let mut active = ActivePattern {
            pattern,
            started: now,
            duration,
            interval: interval.max(1),
            accumulator: 0,
            last_tick: now,
            volleys: 0,
        };
        self.fire_volley(&mut active, target, target_vx, bullets);
        self.active = Some(active);
        self.state = BossState::Attacking;
    }

    fn update_attack(&mut self, target: Vec2, target_vx: f32, now: u64, bullets: &mut Vec<Projectile>) {
        let Some(mut active) = self.active.take() else {
            self.finish_attack(now);
            return;
        };

        if now.saturating_sub(active.started) > active.duration {
            self.finish_attack(now);
            return;
        }

        active.accumulator += now.saturating_sub(active.last_tick);
        active.last_tick = now;
        while active.accumulator >= active.interval {
            active.accumulator -= active.interval;
            self.fire_volley(&mut active, target, target_vx, bullets);
        }

        self.active = Some(active);
    }

    fn finish_attack(&mut self, now: u64) {
        self.active = None;
        self.state = BossState::Idle;
        self.last_attack = now;
    }

    fn fire_volley(
        &self,
        active: &mut ActivePattern,
        target: Vec2,
        target_vx: f32,
        bullets: &mut Vec<Projectile>,
    ) {
        let origin = self.center();
        match active.pattern {
            AttackPattern::Spray => {
                let travel_time = origin.distance(target) / self.bullet_speed;
                let lead = Vec2::new(target_vx * travel_time * self.config.lead_damping, 0.0);
                if let Some(dir) = (target + lead - origin).try_normalize() {
                    bullets.push(self.bullet(origin, dir));
                }
            }
            AttackPattern::RadialBurst => {
                let rays = self.config.radial_rays.max(1);
                let step = TAU / rays as f32;
                // Alternate volleys are rotated half a step to cover the gaps
                let offset = if active.volleys % 2 == 1 { step / 2.0 } else { 0.0 };
                for i in 0..rays {
                    let dir = Vec2::from_angle(offset + step * i as f32);
                    bullets.push(self.bullet(origin, dir));
                }
            }
            AttackPattern::CrossBeam => {
                for dir in [
                    Vec2::new(1.0, 0.0),
                    Vec2::new(-1.0, 0.0),
                    Vec2::new(0.0, 1.0),
                    Vec2::new(0.0, -1.0),
                ] {
                    bullets.push(self.bullet(origin, dir));
                }
            }
            AttackPattern::Dash => {}
        }
        active.volleys += 1;
    }

    fn bullet(&self, origin: Vec2, dir: Vec2) -> Projectile {
        Projectile::new(
            origin,
            dir,
            self.bullet_speed,
            self.config.bullet_damage,
            self.bullet_half_size,
            ProjectileKind::BossLaser,
        )
    }

    fn clamp_to_bounds(&mut self) {
        let max_x = (self.bounds.right() - self.size).max(self.bounds.left());
        let max_y = (self.bounds.bottom() - self.size).max(self.bounds.top());
        self.pos.x = self.pos.x.clamp(self.bounds.left(), max_x);
        self.pos.y = self.pos.y.clamp(self.bounds.top(), max_y);
    }
}

impl Collidable for Boss {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn arena() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 660.0)
    }

    fn boss_at(pos: Vec2) -> Boss {
        Boss::new(pos, arena(), &BossConfig::default(), &CombatConfig::default(), 0)
    }

    #[test]
    fn test_phase_transitions_once_per_threshold() {
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        assert_eq!(boss.phase(), 1);

        let hit = boss.take_damage(2100, 1000);
        assert_eq!(boss.health(), 2900);
        assert_eq!(hit.phase_change, Some(PhaseChange { from: 1, to: 2 }));
        assert_eq!(boss.phase(), 2);

        let hit = boss.take_damage(10, 1100);
        assert_eq!(hit.phase_change, None);

        let hit = boss.take_damage(1490, 1200);
        assert_eq!(boss.health(), 1400);
        assert_eq!(hit.phase_change, Some(PhaseChange { from: 2, to: 3 }));

        let hit = boss.take_damage(100, 1300);
        assert_eq!(hit.phase_change, None);
        assert_eq!(boss.phase(), 3);
    }

    #[test]
    fn test_phase_scaling_applies_per_transition() {
        let config = BossConfig::default();
        let mut boss = boss_at(Vec2::new(540.0, 200.0));

        boss.take_damage(2100, 0);
        assert!((boss.speed() - config.speed * 1.2).abs() < 1e-4);
        assert!((boss.attack_cooldown() - 1600.0).abs() < 1e-3);

        boss.take_damage(1500, 0);
        assert!((boss.speed() - config.speed * 1.44).abs() < 1e-4);
        assert!((boss.attack_cooldown() - 1280.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_huge_hit_crosses_both_thresholds() {
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        let hit = boss.take_damage(4000, 0);

        assert_eq!(hit.phase_change, Some(PhaseChange { from: 1, to: 3 }));
        assert!((boss.attack_cooldown() - 1280.0).abs() < 1e-3);
    }

    #[test]
    fn test_flash_after_phase_change() {
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        assert!(!boss.is_flashing(0));

        boss.take_damage(2100, 5000);
        assert!(boss.is_flashing(5100));
        assert!(!boss.is_flashing(5200));
    }

    #[test]
    fn test_defeat_reported_once() {
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        boss.take_damage(4990, 0);

        let hit = boss.take_damage(10, 0);
        assert!(hit.defeated);
        assert!(boss.is_defeated());

        let hit = boss.take_damage(10, 0);
        assert!(!hit.defeated);
    }

    #[test]
    fn test_choose_pattern_by_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        boss.take_damage(2100, 0);

        assert_eq!(boss.choose_pattern(100.0, &mut rng), AttackPattern::Dash);
        assert_eq!(boss.choose_pattern(450.0, &mut rng), AttackPattern::CrossBeam);
        for _ in 0..20 {
            let pattern = boss.choose_pattern(900.0, &mut rng);
            assert!(AttackPattern::pool(2).contains(&pattern));
        }
    }

    #[test]
    fn test_phase_one_never_dashes() {
        let mut rng = StdRng::seed_from_u64(3);
        let boss = boss_at(Vec2::new(540.0, 200.0));

        for _ in 0..20 {
            let pattern = boss.choose_pattern(50.0, &mut rng);
            assert!(AttackPattern::pool(1).contains(&pattern));
        }
    }

    #[test]
    fn test_waits_for_cooldown_before_first_attack() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        let target = Vec2::new(100.0, 600.0);

        assert!(boss.update(target, 0.0, 1000, &mut rng).is_empty());
        assert_eq!(boss.state(), BossState::Idle);

        boss.update(target, 0.0, 2001, &mut rng);
        assert_ne!(boss.state(), BossState::Idle);
    }

    #[test]
    fn test_cadence_fires_once_per_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        // Far away so phase 1 picks from [Spray, RadialBurst]
        let mut boss = boss_at(Vec2::new(1000.0, 100.0));
        let target = Vec2::new(60.0, 600.0);

        let opening = boss.update(target, 0.0, 2001, &mut rng);
        assert_eq!(boss.state(), BossState::Attacking);
        let per_volley = opening.len();
        assert!(per_volley > 0);

        let interval = match boss.current_pattern() {
            Some(AttackPattern::Spray) => 200,
            _ => 500,
        };

        // Uneven frames covering exactly two intervals
        let mut fired = 0;
        let mut now = 2001;
        for step in [7, 11, interval - 18, 13, interval - 13] {
            now += step;
            fired += boss.update(target, 0.0, now, &mut rng).len();
        }
        assert_eq!(fired, per_volley * 2);
    }

    #[test]
    fn test_cross_beam_fires_cardinals() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        boss.take_damage(2100, 0);
        let target = boss.center() + Vec2::new(450.0, 0.0);

        let bullets = boss.update(target, 0.0, 1700, &mut rng);

        assert_eq!(boss.current_pattern(), Some(AttackPattern::CrossBeam));
        assert_eq!(bullets.len(), 4);
        assert!(bullets.iter().all(|b| b.kind == ProjectileKind::BossLaser));
        assert!(bullets.iter().all(|b| b.damage == 15));
    }

    #[test]
    fn test_dash_returns_to_idle() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut boss = boss_at(Vec2::new(540.0, 200.0));
        boss.take_damage(2100, 0);
        let target = boss.center() + Vec2::new(-200.0, 0.0);

        boss.update(target, 0.0, 1700, &mut rng);
        assert_eq!(boss.state(), BossState::Dashing);
        assert!(boss.velocity.x < 0.0);

        boss.update(target, 0.0, 2201, &mut rng);
        assert_eq!(boss.state(), BossState::Idle);
    }

    #[test]
    fn test_spray_leads_moving_target() {
        let boss = boss_at(Vec2::new(900.0, 100.0));
        // Below and to the left of the centre (1000, 200), so a horizontal
        // lead changes the shot angle
        let target = Vec2::new(100.0, 600.0);
        let mut active = ActivePattern {
            pattern: AttackPattern::Spray,
            started: 0,
            duration: 3000,
            interval: 200,
            accumulator: 0,
            last_tick: 0,
            volleys: 0,
        };

        let mut still = Vec::new();
        boss.fire_volley(&mut active, target, 0.0, &mut still);
        let mut moving = Vec::new();
        boss.fire_volley(&mut active, target, 10.0, &mut moving);

        assert_eq!(still.len(), 1);
        assert_eq!(moving.len(), 1);
        // Target running right: the lead swings the shot to the right
        assert!(moving[0].dir.x > still[0].dir.x);
        assert!(moving[0].dir.y < still[0].dir.y);

        // The lead is damped: it falls short of the full predicted position
        let origin = boss.center();
        let travel_time = origin.distance(target) / CombatConfig::default().boss_bullet_speed;
        let full_lead = (target + Vec2::new(10.0 * travel_time, 0.0) - origin).normalize_or(Vec2::ZERO);
        assert!(moving[0].dir.x < full_lead.x);

        let damping = BossConfig::default().lead_damping;
        let damped = (target + Vec2::new(10.0 * travel_time * damping, 0.0) - origin).normalize_or(Vec2::ZERO);
        assert!((moving[0].dir - damped).length() < 1e-5);
    }

    #[test]
    fn test_stays_inside_arena() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut boss = boss_at(Vec2::new(5000.0, -300.0));
        assert_eq!(boss.pos, Vec2::new(1080.0, 0.0));

        for frame in 0..500u64 {
            boss.update(Vec2::new(0.0, 600.0), 0.0, frame * 11, &mut rng);
            let bounds = boss.get_bounds();
            assert!(bounds.left() >= 0.0 && bounds.right() <= 1280.0);
            assert!(bounds.top() >= 0.0 && bounds.bottom() <= 660.0);
        }
    }
}
