//! Fire-and-forget particle effects
//!
//! Particles are purely visual: nothing in the simulation ever reads them.
//! Lifetimes are counted in frames, and every particle shrinks and fades
//! linearly as its lifetime runs out.
//!
//! # Example
//!
//! ```rust
//! let mut particles = ParticleSystem::new();
//! particles.emit(&mut rng, ParticleKind::Explosion, origin, Vec2::ZERO, 20, (255, 120, 0));
//! particles.update();
//! ```

use crate::math::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_4, TAU};

/// Downward acceleration for particles with gravity, in px/frame²
const PARTICLE_GRAVITY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Omnidirectional burst
    Explosion,
    /// Slow puff drifting opposite to the given direction
    Trail,
    /// Cone of sparks around the given direction, pulled down by gravity
    Impact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub color: (u8, u8, u8),
    life: u32,
    initial_life: u32,
    initial_size: f32,
    gravity: bool,
}

impl Particle {
    /// Remaining life as a fraction of the initial life
    pub fn fade_ratio(&self) -> f32 {
        if self.initial_life == 0 {
            0.0
        } else {
            self.life as f32 / self.initial_life as f32
        }
    }

    /// Current radius
    pub fn size(&self) -> f32 {
        self.initial_size * self.fade_ratio()
    }

    /// Current opacity, 0-255
    pub fn alpha(&self) -> u8 {
        (255.0 * self.fade_ratio()).round() as u8
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    fn update(&mut self) {
        self.pos += self.velocity;
        self.life = self.life.saturating_sub(1);
        if self.gravity {
            self.velocity.y += PARTICLE_GRAVITY;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `count` particles of `kind` at `origin`.
    ///
    /// `direction` is ignored by explosions. A zero direction for a trail or
    /// impact falls back to pointing right.
    pub fn emit(
        &mut self,
        rng: &mut impl Rng,
        kind: ParticleKind,
        origin: Vec2,
        direction: Vec2,
        count: usize,
        color: (u8, u8, u8),
    ) {
        let dir = direction.normalize_or(Vec2::new(1.0, 0.0));
        self.particles.reserve(count);

        for _ in 0..count {
            let particle = match kind {
                ParticleKind::Explosion => {
                    let angle = rng.gen_range(0.0..TAU);
                    let speed = rng.gen_range(2.0..5.0);
                    Particle {
                        pos: origin,
                        velocity: Vec2::from_angle(angle) * speed,
                        color,
                        life: rng.gen_range(20..=40),
                        initial_life: 0,
                        initial_size: rng.gen_range(2.0..4.0),
                        gravity: false,
                    }
                }
                ParticleKind::Trail => {
                    let offset = Vec2::new(rng.gen_range(-5.0..=5.0), rng.gen_range(-5.0..=5.0));
                    let velocity = Vec2::new(
                        -dir.x * rng.gen_range(1.0..3.0),
                        -dir.y * rng.gen_range(1.0..3.0),
                    );
                    Particle {
                        pos: origin + offset,
                        velocity,
                        color,
                        life: rng.gen_range(10..=20),
                        initial_life: 0,
                        initial_size: rng.gen_range(2.0..4.0),
                        gravity: false,
                    }
                }
                ParticleKind::Impact => {
                    let angle = dir.angle() + rng.gen_range(-FRAC_PI_4..=FRAC_PI_4);
                    let speed = rng.gen_range(3.0..7.0);
                    Particle {
                        pos: origin,
                        velocity: Vec2::from_angle(angle) * speed,
                        color,
                        life: rng.gen_range(15..=30),
                        initial_life: 0,
                        initial_size: rng.gen_range(2.0..5.0),
                        gravity: true,
                    }
                }
            };
            self.particles.push(Particle {
                initial_life: particle.life,
                ..particle
            });
        }
    }

    /// Advances every particle one frame and drops the expired ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WHITE: (u8, u8, u8) = (255, 255, 255);

    #[test]
    fn test_emit_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, ParticleKind::Explosion, Vec2::ZERO, Vec2::ZERO, 20, WHITE);
        assert_eq!(system.len(), 20);
    }

    #[test]
    fn test_all_particles_expire() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, ParticleKind::Explosion, Vec2::ZERO, Vec2::ZERO, 10, WHITE);
        system.emit(&mut rng, ParticleKind::Impact, Vec2::ZERO, Vec2::new(1.0, 0.0), 10, WHITE);

        for _ in 0..40 {
            system.update();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_fades_and_shrinks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, ParticleKind::Explosion, Vec2::ZERO, Vec2::ZERO, 1, WHITE);

        let before = system.iter().next().map(|p| (p.size(), p.alpha())).unwrap();
        system.update();
        let after = system.iter().next().map(|p| (p.size(), p.alpha())).unwrap();

        assert_eq!(before.1, 255);
        assert!(after.0 < before.0);
        assert!(after.1 < before.1);
    }

    #[test]
    fn test_trail_moves_against_direction() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, ParticleKind::Trail, Vec2::ZERO, Vec2::new(1.0, 0.0), 10, WHITE);

        assert!(system.iter().all(|p| p.velocity.x < 0.0));
        assert!(system.iter().all(|p| p.pos.length() <= 5.0 * 2f32.sqrt() + 1e-4));
    }

    #[test]
    fn test_impact_stays_in_cone() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, ParticleKind::Impact, Vec2::ZERO, Vec2::new(0.0, -1.0), 30, WHITE);

        // 45 degrees either side of straight up
        assert!(system.iter().all(|p| p.velocity.y < 0.0));
        assert!(system.iter().all(|p| p.velocity.x.abs() <= -p.velocity.y + 1e-4));
    }
}
