//! Static level layouts
//!
//! `MapManager` is a registry of hand-made layouts keyed by level id. Loading
//! a layout replaces the current platforms and spawn points; nothing changes
//! afterwards until the next load.
//!
//! Layouts are expressed relative to the ground surface. The ground itself is
//! not a platform: the gameplay state resolves it separately, since it spans
//! the whole world.
//!
//! | Id | Layout |
//! |----|--------|
//! | 1  | Three ledges near the start of the scrolling level |
//! | 2  | Five-step staircase |
//! | 3  | Boss arena: one ledge on each side |

use crate::collision::Rect;
use crate::math::Vec2;
use tracing::warn;

/// Brown used for ledges
pub const LEDGE_COLOR: (u8, u8, u8) = (100, 70, 40);

/// Grey used for trench barricades
pub const BARRICADE_COLOR: (u8, u8, u8) = (100, 100, 100);

/// Level id of the scrolling level
pub const SCROLLING_LEVEL: u32 = 1;

/// Level id of the boss arena
pub const BOSS_ARENA: u32 = 3;

/// A solid axis-aligned rectangle the player stands on or bumps into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub color: (u8, u8, u8),
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Platform {
            rect,
            color: LEDGE_COLOR,
        }
    }

    pub fn with_color(rect: Rect, color: (u8, u8, u8)) -> Self {
        Platform { rect, color }
    }
}

#[derive(Debug, Clone)]
pub struct MapManager {
    screen_width: f32,
    ground_y: f32,
    platforms: Vec<Platform>,
    /// Player foot positions
    spawn_points: Vec<Vec2>,
}

impl MapManager {
    pub fn new(screen_width: f32, ground_y: f32) -> Self {
        MapManager {
            screen_width,
            ground_y,
            platforms: Vec::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Replaces the current layout with layout `level_id`.
    ///
    /// An unknown id leaves the map empty.
    pub fn load(&mut self, level_id: u32) {
        self.platforms.clear();
        self.spawn_points.clear();
        let g = self.ground_y;

        match level_id {
            1 => {
                self.add_platform(300.0, g - 240.0, 200.0, 20.0);
                self.add_platform(600.0, g - 320.0, 200.0, 20.0);
                self.add_platform(100.0, g - 400.0, 200.0, 20.0);
                self.spawn_points.push(Vec2::new(200.0, g));
            }
            2 => {
                for i in 0..5 {
                    let step = i as f32;
                    self.add_platform(100.0 + step * 200.0, g - 240.0 - step * 80.0, 150.0, 20.0);
                }
                self.spawn_points.push(Vec2::new(100.0, g));
            }
            3 => {
                self.add_platform(80.0, g - 260.0, 260.0, 20.0);
                self.add_platform(self.screen_width - 340.0, g - 260.0, 260.0, 20.0);
                self.spawn_points.push(Vec2::new(100.0, g));
            }
            _ => warn!(level_id, "unknown map id, loading an empty layout"),
        }
    }

    pub fn add_platform(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.platforms.push(Platform::new(Rect::new(x, y, w, h)));
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// First registered spawn point, or the left edge of the ground
    pub fn get_spawn_point(&self) -> Vec2 {
        self.spawn_points
            .first()
            .copied()
            .unwrap_or(Vec2::new(100.0, self.ground_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> MapManager {
        MapManager::new(1280.0, 660.0)
    }

    #[test]
    fn test_level_one_layout() {
        let mut map = manager();
        map.load(1);

        assert_eq!(map.platforms().len(), 3);
        assert_eq!(map.platforms()[0].rect, Rect::new(300.0, 420.0, 200.0, 20.0));
        assert!(map.platforms().iter().all(|p| p.color == LEDGE_COLOR));
        assert_eq!(map.get_spawn_point(), Vec2::new(200.0, 660.0));
    }

    #[test]
    fn test_staircase_rises() {
        let mut map = manager();
        map.load(2);

        let tops: Vec<f32> = map.platforms().iter().map(|p| p.rect.top()).collect();
        assert_eq!(tops.len(), 5);
        assert!(tops.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_arena_is_symmetric() {
        let mut map = manager();
        map.load(BOSS_ARENA);

        let [left, right] = map.platforms() else {
            panic!("expected two ledges");
        };
        assert_eq!(left.rect.left(), 1280.0 - right.rect.right());
    }

    #[test]
    fn test_load_replaces_layout() {
        let mut map = manager();
        map.load(2);
        map.load(1);
        assert_eq!(map.platforms().len(), 3);
    }

    #[test]
    fn test_unknown_id_is_empty_with_default_spawn() {
        let mut map = manager();
        map.load(1);
        map.load(99);

        assert!(map.platforms().is_empty());
        assert_eq!(map.get_spawn_point(), Vec2::new(100.0, 660.0));
    }

    #[test]
    fn test_ledges_clear_a_standing_player() {
        // A 220 px tall player on the ground must be able to walk under every ledge
        for id in [1, 2, 3] {
            let mut map = manager();
            map.load(id);
            assert!(map.platforms().iter().all(|p| p.rect.bottom() <= 660.0 - 220.0));
        }
    }
}
