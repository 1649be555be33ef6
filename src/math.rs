//! Small 2D vector type used by the simulation.
//!
//! The simulation works in world pixels with `f32` precision. SDL2's `Rect`
//! is integer-based, so the simulation keeps its own types and only converts
//! to SDL2 rectangles at draw time.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D vector (position, velocity or direction).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Unit vector pointing at `angle` radians (0 = right, y grows downward).
    pub fn from_angle(angle: f32) -> Self {
        Vec2::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Returns the unit vector, or `None` for a zero-length vector.
    pub fn try_normalize(self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }

    /// Returns the unit vector, or `fallback` for a zero-length vector.
    pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
        self.try_normalize().unwrap_or(fallback)
    }

    /// Angle of this vector in radians.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}
