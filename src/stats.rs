//! Player health and ammunition
//!
//! Health is tracked in discrete hit points rather than whole hearts so that
//! a hit smaller than a heart shows up as a partially lost heart. The HUD
//! converts hit points back to hearts with a ceiling division.
//!
//! # Design Philosophy
//!
//! Both types keep their counters private and only expose operations that
//! preserve their bounds:
//! - `HitPoints` is always in `[0, max]`
//! - `Ammo` never goes negative and never exceeds its capacity

/// Outcome of applying damage to `HitPoints`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// Hit points actually removed
    pub damage_dealt: u32,
    /// True when this hit brought hit points to zero
    pub is_fatal: bool,
}

/// The player's health pool, measured in hit points
///
/// # Example
///
/// ```rust
/// let mut hp = HitPoints::new(5, 15);
/// hp.take_damage(15);
/// assert_eq!(hp.current(), 60);
/// assert_eq!(hp.hearts(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitPoints {
    current: u32,
    max: u32,
    per_heart: u32,
}

impl HitPoints {
    /// Creates a full health pool of `hearts` hearts worth `per_heart` hit points each
    pub fn new(hearts: u32, per_heart: u32) -> Self {
        let per_heart = per_heart.max(1);
        let max = hearts * per_heart;
        HitPoints {
            current: max,
            max,
            per_heart,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    #[cfg(test)]
    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Hearts shown on the HUD: `ceil(current / per_heart)`
    pub fn hearts(&self) -> u32 {
        self.current.div_ceil(self.per_heart)
    }

    pub fn max_hearts(&self) -> u32 {
        self.max / self.per_heart
    }

    pub fn per_heart(&self) -> u32 {
        self.per_heart
    }

    /// Removes hit points, saturating at zero
    pub fn take_damage(&mut self, amount: u32) -> DamageResult {
        let old = self.current;
        self.current = self.current.saturating_sub(amount);

        DamageResult {
            damage_dealt: old - self.current,
            is_fatal: old > 0 && self.current == 0,
        }
    }

    /// Restores hit points, capped at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let old = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - old
    }

    /// Refills to max
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

/// Ammunition counter
///
/// In unlimited mode (the boss arena) firing never consumes rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ammo {
    count: u32,
    capacity: u32,
    unlimited: bool,
}

impl Ammo {
    /// Creates a full magazine
    pub fn new(capacity: u32) -> Self {
        Ammo {
            count: capacity,
            capacity,
            unlimited: false,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    #[cfg(test)]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_unlimited(&self) -> bool {
        self.unlimited
    }

    pub fn set_unlimited(&mut self, unlimited: bool) {
        self.unlimited = unlimited;
    }

    pub fn can_fire(&self) -> bool {
        self.unlimited || self.count > 0
    }

    /// Consumes one round. Returns false (and changes nothing) when empty.
    pub fn try_consume(&mut self) -> bool {
        if self.unlimited {
            return true;
        }
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    /// Adds rounds up to capacity. Returns the amount actually added.
    pub fn refill(&mut self, amount: u32) -> u32 {
        let old = self.count;
        self.count = self.count.saturating_add(amount).min(self.capacity);
        self.count - old
    }

    pub fn reset(&mut self) {
        self.count = self.capacity;
    }

    #[cfg(test)]
    pub fn set_count(&mut self, count: u32) {
        self.count = count.min(self.capacity);
    }
}
