//! Trench enemies
//!
//! Enemies are stationary turrets: they turn to face the player and fire
//! straight at them, limited by a heat-managed weapon.
//!
//! # Heat model
//!
//! ```text
//! Ready --shoot--> Ready (shots_remaining - 1, wait shot_cooldown)
//!   |
//!   +-- shots_remaining hits 0 --> Overheated
//!                                     |
//!          overheat_cooldown elapsed  v
//!                               Ready (refill_budget shots)
//! ```
//!
//! Enemies live in an `EnemyArena` keyed by a stable `EnemyId`. Hit points
//! are a field on the enemy itself; dead enemies are compacted out with
//! `retain` after all hits for the frame are applied.

use crate::collision::{Collidable, Rect};
use crate::combat::{Projectile, ProjectileKind};
use crate::config::{CombatConfig, EnemyConfig};
use crate::math::Vec2;

/// Stable handle to an enemy inside an `EnemyArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Ground,
    Flying,
}

/// Weapon that overheats after a fixed number of shots
#[derive(Debug, Clone, PartialEq)]
pub struct HeatWeapon {
    shots_remaining: u32,
    overheated_at: Option<u64>,
    last_shot: Option<u64>,
    overheat_cooldown_ms: u64,
    shot_cooldown_ms: u64,
    refill_budget: u32,
}

impl HeatWeapon {
    pub fn new(config: &EnemyConfig) -> Self {
        HeatWeapon {
            shots_remaining: config.shot_budget,
            overheated_at: None,
            last_shot: None,
            overheat_cooldown_ms: config.overheat_cooldown_ms,
            shot_cooldown_ms: config.shot_cooldown_ms,
            refill_budget: config.refill_budget,
        }
    }

    #[cfg(test)]
    pub fn shots_remaining(&self) -> u32 {
        self.shots_remaining
    }

    #[cfg(test)]
    pub fn is_overheated(&self) -> bool {
        self.overheated_at.is_some()
    }

    /// Checks whether a shot is allowed at `now`.
    ///
    /// When an overheat has cooled down this refills the weapon to the
    /// reduced budget and allows the shot straight away, without waiting for
    /// the per-shot cooldown.
    pub fn can_fire(&mut self, now: u64) -> bool {
        if let Some(since) = self.overheated_at {
            if now.saturating_sub(since) >= self.overheat_cooldown_ms {
                self.overheated_at = None;
                self.shots_remaining = self.refill_budget;
                return true;
            }
            return false;
        }

        match self.last_shot {
            Some(last) => now.saturating_sub(last) >= self.shot_cooldown_ms,
            None => true,
        }
    }

    /// Records a shot fired at `now`, overheating when the budget runs out
    fn record_shot(&mut self, now: u64) {
        self.last_shot = Some(now);
        self.shots_remaining = self.shots_remaining.saturating_sub(1);
        if self.shots_remaining == 0 {
            self.overheated_at = Some(now);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: f32,
    pub kind: EnemyKind,
    pub hit_points: u32,
    pub facing_right: bool,
    pub weapon: HeatWeapon,
}

impl Enemy {
    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn center(&self) -> Vec2 {
        self.get_bounds().center()
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points == 0
    }

    /// Turns to face the target. Enemies never move.
    pub fn update(&mut self, target: Vec2) {
        self.facing_right = target.x > self.center().x;
    }

    /// Fires at `target` if the weapon allows it.
    ///
    /// The shot starts at the enemy's centre and travels straight at the
    /// target's current position. A target exactly on the centre yields no
    /// shot and leaves the weapon untouched.
    pub fn shoot(&mut self, target: Vec2, now: u64, combat: &CombatConfig) -> Option<Projectile> {
        if !self.weapon.can_fire(now) {
            return None;
        }

        let origin = self.center();
        let dir = (target - origin).try_normalize()?;
        self.weapon.record_shot(now);

        Some(Projectile::new(
            origin,
            dir,
            combat.enemy_bullet_speed,
            combat.enemy_bullet_damage,
            combat.hostile_bullet_half_size,
            ProjectileKind::EnemyLaser,
        ))
    }

    /// Removes hit points. Returns true when this hit killed the enemy.
    pub fn take_hit(&mut self, damage: u32) -> bool {
        let was_alive = !self.is_dead();
        self.hit_points = self.hit_points.saturating_sub(damage);
        was_alive && self.is_dead()
    }
}

impl Collidable for Enemy {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Owning collection of enemies with stable ids
#[derive(Debug, Clone, Default)]
pub struct EnemyArena {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, pos: Vec2, kind: EnemyKind, config: &EnemyConfig) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy {
            id,
            pos,
            size: config.size,
            kind,
            hit_points: config.hit_points,
            facing_right: false,
            weapon: HeatWeapon::new(config),
        });
        id
    }

    #[cfg(test)]
    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Removes every dead enemy and returns them
    pub fn remove_dead(&mut self) -> Vec<Enemy> {
        let mut dead = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                dead.push(enemy.clone());
                false
            } else {
                true
            }
        });
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with_one() -> (EnemyArena, EnemyId) {
        let mut arena = EnemyArena::new();
        let id = arena.spawn(Vec2::new(1000.0, 500.0), EnemyKind::Ground, &EnemyConfig::default());
        (arena, id)
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut arena = EnemyArena::new();
        let config = EnemyConfig::default();
        let a = arena.spawn(Vec2::ZERO, EnemyKind::Ground, &config);
        let b = arena.spawn(Vec2::ZERO, EnemyKind::Flying, &config);

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).map(|e| e.kind), Some(EnemyKind::Flying));
    }

    #[test]
    fn test_faces_target() {
        let (mut arena, id) = arena_with_one();
        let enemy = arena.get_mut(id).unwrap();

        enemy.update(Vec2::new(2000.0, 0.0));
        assert!(enemy.facing_right);
        enemy.update(Vec2::new(0.0, 0.0));
        assert!(!enemy.facing_right);
    }

    #[test]
    fn test_shot_aims_at_target_from_center() {
        let (mut arena, id) = arena_with_one();
        let combat = CombatConfig::default();
        let enemy = arena.get_mut(id).unwrap();

        let shot = enemy.shoot(Vec2::new(0.0, 550.0), 0, &combat).unwrap();

        assert_eq!(shot.pos, Vec2::new(1050.0, 550.0));
        assert_eq!(shot.dir, Vec2::new(-1.0, 0.0));
        assert_eq!(shot.kind, ProjectileKind::EnemyLaser);
        assert_eq!(shot.speed, combat.enemy_bullet_speed);
    }

    #[test]
    fn test_zero_distance_does_not_fire() {
        let (mut arena, id) = arena_with_one();
        let enemy = arena.get_mut(id).unwrap();

        assert!(enemy.shoot(Vec2::new(1050.0, 550.0), 0, &CombatConfig::default()).is_none());
        assert_eq!(enemy.weapon.shots_remaining(), 5);
    }

    #[test]
    fn test_shot_cooldown() {
        let (mut arena, id) = arena_with_one();
        let combat = CombatConfig::default();
        let enemy = arena.get_mut(id).unwrap();
        let target = Vec2::new(0.0, 0.0);

        assert!(enemy.shoot(target, 10_000, &combat).is_some());
        assert!(enemy.shoot(target, 11_999, &combat).is_none());
        assert!(enemy.shoot(target, 12_000, &combat).is_some());
    }

    #[test]
    fn test_overheat_then_refill_to_reduced_budget() {
        let (mut arena, id) = arena_with_one();
        let combat = CombatConfig::default();
        let enemy = arena.get_mut(id).unwrap();
        let target = Vec2::new(0.0, 0.0);

        let mut now = 0;
        for _ in 0..5 {
            assert!(enemy.shoot(target, now, &combat).is_some());
            now += 2000;
        }
        assert!(enemy.weapon.is_overheated());
        assert_eq!(enemy.weapon.shots_remaining(), 0);

        // Overheated at t = 8000; nothing until 11000 even though the shot cooldown passed
        assert!(enemy.shoot(target, 10_999, &combat).is_none());
        assert!(enemy.shoot(target, 11_000, &combat).is_some());
        assert_eq!(enemy.weapon.shots_remaining(), 1);
        assert!(!enemy.weapon.is_overheated());

        assert!(enemy.shoot(target, 13_000, &combat).is_some());
        assert!(enemy.weapon.is_overheated());
    }

    #[test]
    fn test_five_hits_kill() {
        let (mut arena, id) = arena_with_one();

        for _ in 0..4 {
            assert!(!arena.get_mut(id).unwrap().take_hit(1));
        }
        assert!(arena.remove_dead().is_empty());

        assert!(arena.get_mut(id).unwrap().take_hit(1));
        let dead = arena.remove_dead();

        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].id(), id);
        assert!(arena.get(id).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_ids_stay_valid_after_removal() {
        let mut arena = EnemyArena::new();
        let config = EnemyConfig::default();
        let first = arena.spawn(Vec2::ZERO, EnemyKind::Ground, &config);
        let second = arena.spawn(Vec2::new(500.0, 0.0), EnemyKind::Ground, &config);

        arena.get_mut(first).unwrap().take_hit(5);
        arena.remove_dead();

        assert_eq!(arena.get(second).map(|e| e.pos.x), Some(500.0));
    }
}
