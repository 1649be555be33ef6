//! Level construction
//!
//! The scrolling level is a run of trenches: each one is a barricade plus a
//! random group of flying and ground enemies behind it. After the last
//! trench sits the ship, whose hitbox is the trigger into the boss arena.

use crate::collision::Rect;
use crate::config::GameConfig;
use crate::enemy::{EnemyArena, EnemyKind};
use crate::map::{BARRICADE_COLOR, Platform};
use crate::math::Vec2;
use rand::Rng;
use tracing::info;

/// Barricades and trench x positions produced by `generate_trenches`
#[derive(Debug, Clone, Default)]
pub struct TrenchLayout {
    pub barricades: Vec<Platform>,
    pub positions: Vec<f32>,
}

/// Spawns every trench's enemies into `enemies` and returns the barricades
pub fn generate_trenches(rng: &mut impl Rng, config: &GameConfig, enemies: &mut EnemyArena) -> TrenchLayout {
    let level = &config.level;
    let ground_y = level.ground_y();
    let barricade_height = config.player.hitbox_height * level.barricade_height_ratio;
    let mut layout = TrenchLayout::default();

    for i in 0..level.trench_count {
        let trench_x = level.first_trench_x + i as f32 * level.trench_spacing;
        layout.positions.push(trench_x);
        layout.barricades.push(Platform::with_color(
            Rect::new(trench_x, ground_y - barricade_height, level.barricade_width, barricade_height),
            BARRICADE_COLOR,
        ));

        let min_enemies = level.min_enemies_per_trench.min(level.max_enemies_per_trench);
        let count = rng.gen_range(min_enemies..=level.max_enemies_per_trench);
        for _ in 0..count {
            let kind = if rng.gen_bool(0.5) {
                EnemyKind::Flying
            } else {
                EnemyKind::Ground
            };
            let y = match kind {
                EnemyKind::Flying => {
                    let max_y = (level.screen_height * level.flying_max_ratio).max(level.flying_min_y);
                    rng.gen_range(level.flying_min_y..=max_y)
                }
                EnemyKind::Ground => ground_y - level.ground_enemy_offset,
            };
            let max_offset = (level.trench_width - config.enemy.size).max(level.barricade_width);
            let x = trench_x + rng.gen_range(level.barricade_width..=max_offset);
            enemies.spawn(Vec2::new(x, y), kind, &config.enemy);
        }
    }

    info!(
        trenches = layout.positions.len(),
        enemies = enemies.len(),
        "generated scrolling level"
    );
    layout
}

/// World x where the boss area (and the ship) begins
pub fn boss_area_start(config: &GameConfig) -> f32 {
    let level = &config.level;
    level.first_trench_x + level.trench_count as f32 * level.trench_spacing
}

/// The ship standing on the ground at the start of the boss area
pub fn ship_trigger(config: &GameConfig) -> Rect {
    let ground_y = config.level.ground_y();
    Rect::new(boss_area_start(config), 0.0, config.level.ship_width, ground_y)
}

/// Boss start position: centred horizontally, standing on the ground
pub fn boss_spawn(config: &GameConfig) -> Vec2 {
    Vec2::new(
        config.level.screen_width / 2.0 - config.boss.size / 2.0,
        config.level.ground_y() - config.boss.size,
    )
}

/// Area the boss may move in: the screen above the ground
pub fn arena_bounds(config: &GameConfig) -> Rect {
    Rect::new(0.0, 0.0, config.level.screen_width, config.level.ground_y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collidable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_trench_positions_and_barricades() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut enemies = EnemyArena::new();

        let layout = generate_trenches(&mut rng, &config, &mut enemies);

        assert_eq!(layout.positions, vec![1000.0, 4000.0]);
        assert_eq!(layout.barricades.len(), 2);
        let barricade = layout.barricades[0];
        assert_eq!(barricade.rect.w, 20.0);
        assert!((barricade.rect.h - 154.0).abs() < 1e-3);
        assert_eq!(barricade.rect.bottom(), 660.0);
        assert_eq!(barricade.color, BARRICADE_COLOR);
    }

    #[test]
    fn test_enemy_counts_and_placement() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut enemies = EnemyArena::new();
            generate_trenches(&mut rng, &config, &mut enemies);

            assert!((6..=12).contains(&enemies.len()));
            for enemy in enemies.iter() {
                let in_first = (1020.0..=1300.0).contains(&enemy.pos.x);
                let in_second = (4020.0..=4300.0).contains(&enemy.pos.x);
                assert!(in_first || in_second, "enemy at {}", enemy.pos.x);
                match enemy.kind {
                    EnemyKind::Ground => assert_eq!(enemy.pos.y, 520.0),
                    EnemyKind::Flying => assert!((100.0..=432.0).contains(&enemy.pos.y)),
                }
                // Nobody spawns inside the barricade
                assert!(enemy.get_bounds().left() >= 1020.0);
            }
        }
    }

    #[test]
    fn test_ship_and_boss_positions() {
        let config = GameConfig::default();
        assert_eq!(boss_area_start(&config), 7000.0);
        assert_eq!(ship_trigger(&config), Rect::new(7000.0, 0.0, 600.0, 660.0));
        assert_eq!(boss_spawn(&config), Vec2::new(540.0, 460.0));
    }
}
