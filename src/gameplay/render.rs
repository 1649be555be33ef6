//! Drawing the gameplay screen
//!
//! Back to front: background, ground, ship, platforms, collectibles,
//! enemies, lasers, player shots, player, boss, particles, HUD, then the
//! phase overlay (game over, loading or victory). World objects are shifted
//! by the camera; the HUD and overlays are in screen space.

use crate::assets::Assets;
use crate::collectible::CollectibleKind;
use crate::collision::{Collidable, Rect};
use crate::combat::{Projectile, ProjectileKind};
use crate::enemy::EnemyKind;
use crate::i18n::{self, Language, TextKey};
use crate::math::Vec2;
use crate::render::{
    dim, draw_texture_or_fill, draw_thick_line, fill_overlay, fill_rect, fill_rect_alpha, to_color,
};
use crate::text::{CHAR_HEIGHT, draw_centered_text, draw_simple_text};
use crate::ui::{HealthBar, HealthBarStyle};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::state::{GameMode, GameplayState, PlayPhase};

const SKY_COLOR: Color = Color::RGB(135, 206, 235);
const ARENA_COLOR: Color = Color::RGB(20, 0, 30);
const GROUND_COLOR: Color = Color::RGB(139, 69, 19);
const SHIP_COLOR: Color = Color::RGB(90, 90, 110);
const PLAYER_COLOR: Color = Color::RGB(255, 0, 0);
const BOSS_COLOR: Color = Color::RGB(255, 0, 0);
const VICTORY_COLOR: Color = Color::RGB(255, 215, 0);
const WHITE: Color = Color::RGB(255, 255, 255);

const HEART_SIZE: f32 = 30.0;
const HEART_SPACING: f32 = 35.0;
const HUD_MARGIN: f32 = 10.0;
const BACKGROUND_PARALLAX: f32 = 0.5;
const BOSS_BAR_WIDTH: u32 = 640;

/// Boss bar fill colour for a phase: green, orange, red
pub fn phase_color(phase: u8) -> Color {
    match phase {
        0 | 1 => Color::RGB(0, 255, 0),
        2 => Color::RGB(255, 165, 0),
        _ => Color::RGB(255, 0, 0),
    }
}

impl GameplayState {
    fn screen_size(&self) -> (f32, f32) {
        (self.config.level.screen_width, self.config.level.screen_height)
    }

    fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translate(Vec2::new(-self.camera.x, -self.camera.y))
    }

    pub fn draw(
        &self,
        canvas: &mut Canvas<Window>,
        assets: &Assets,
        language: Language,
        now: u64,
    ) -> Result<(), String> {
        if let PlayPhase::Loading { .. } = self.phase {
            return self.draw_loading(canvas, assets, language);
        }

        self.draw_background(canvas, assets)?;
        self.draw_world(canvas, assets, now)?;
        self.draw_hud(canvas, assets, language)?;

        match self.phase {
            PlayPhase::GameOver => self.draw_game_over(canvas, language),
            PlayPhase::Victory { .. } => self.draw_victory(canvas, language, now),
            _ => Ok(()),
        }
    }

    fn draw_background(&self, canvas: &mut Canvas<Window>, assets: &Assets) -> Result<(), String> {
        let (width, height) = self.screen_size();

        match self.mode {
            GameMode::BossFight => {
                let screen = Rect::new(0.0, 0.0, width, height);
                draw_texture_or_fill(canvas, assets.arena_background.as_ref(), &screen, false, ARENA_COLOR)?;
            }
            GameMode::Scrolling => match &assets.level_background {
                Some(background) => {
                    // Tile the image at half the camera speed
                    let query = background.query();
                    let tile_width = height * query.width as f32 / query.height.max(1) as f32;
                    let offset = (self.camera.x * BACKGROUND_PARALLAX).rem_euclid(tile_width);
                    let mut x = -offset;
                    while x < width {
                        let tile = Rect::new(x, 0.0, tile_width, height);
                        draw_texture_or_fill(canvas, Some(background), &tile, false, SKY_COLOR)?;
                        x += tile_width;
                    }
                }
                None => {
                    canvas.set_draw_color(SKY_COLOR);
                    canvas.clear();
                }
            },
        }

        let ground_y = self.config.level.ground_y();
        fill_rect(canvas, &Rect::new(0.0, ground_y, width, height - ground_y), GROUND_COLOR)
    }

    fn draw_world(&self, canvas: &mut Canvas<Window>, assets: &Assets, now: u64) -> Result<(), String> {
        let (width, height) = self.screen_size();
        let view = Rect::new(0.0, 0.0, width, height);

        if let Some(ship) = &self.ship {
            let on_screen = self.to_screen(ship);
            draw_texture_or_fill(canvas, assets.ship.as_ref(), &on_screen, false, SHIP_COLOR)?;
        }

        for platform in &self.platforms {
            let on_screen = self.to_screen(&platform.rect);
            if on_screen.collides_with(&view) {
                fill_rect(canvas, &on_screen, to_color(platform.color))?;
            }
        }

        for item in &self.collectibles {
            let (texture, fallback) = match item.kind {
                CollectibleKind::Heart => (assets.heart_drop.as_ref(), Color::RGB(255, 0, 0)),
                CollectibleKind::Ammo => (assets.ammo_box.as_ref(), Color::RGB(255, 255, 0)),
            };
            draw_texture_or_fill(canvas, texture, &self.to_screen(&item.get_bounds()), false, fallback)?;
        }

        for enemy in self.enemies.iter() {
            let fallback = match enemy.kind {
                EnemyKind::Flying => Color::RGB(150, 0, 150),
                EnemyKind::Ground => Color::RGB(120, 120, 0),
            };
            let on_screen = self.to_screen(&enemy.get_bounds());
            draw_texture_or_fill(canvas, assets.enemy.as_ref(), &on_screen, !enemy.facing_right, fallback)?;
        }

        for projectile in self.hostile_bullets.iter().chain(&self.bullets) {
            if projectile.kind.is_hostile() {
                self.draw_laser(canvas, projectile)?;
            } else {
                self.draw_player_shot(canvas, projectile)?;
            }
        }

        self.draw_player(canvas, assets, now)?;

        if let Some(boss) = &self.boss {
            let on_screen = self.to_screen(&boss.get_bounds());
            let color = if boss.is_defeated() { dim(BOSS_COLOR, 0.4) } else { BOSS_COLOR };
            fill_rect(canvas, &on_screen, color)?;
            if boss.is_flashing(now) {
                fill_rect_alpha(canvas, &on_screen, WHITE, 128)?;
            }
        }

        for particle in self.particles.iter() {
            let size = particle.size() * 2.0;
            let rect = Rect::centered(particle.pos, size / 2.0);
            fill_rect_alpha(canvas, &self.to_screen(&rect), to_color(particle.color), particle.alpha())?;
        }

        Ok(())
    }

    fn draw_laser(&self, canvas: &mut Canvas<Window>, laser: &Projectile) -> Result<(), String> {
        let (glow, core, glow_width, core_width) = match laser.kind {
            ProjectileKind::BossLaser => (Color::RGB(255, 0, 255), Color::RGB(255, 200, 255), 6, 3),
            _ => (Color::RGB(255, 100, 100), WHITE, 4, 2),
        };
        let head = self.camera.to_screen(laser.pos);
        let tail = head - laser.dir * 20.0;
        draw_thick_line(canvas, head, tail, glow_width, glow)?;
        draw_thick_line(canvas, head, tail, core_width, core)
    }

    fn draw_player_shot(&self, canvas: &mut Canvas<Window>, shot: &Projectile) -> Result<(), String> {
        let head = self.camera.to_screen(shot.pos);

        // Fading trail behind the shot
        for i in 1..3u8 {
            let size = shot.half_size - i as f32 * 2.0;
            if size <= 0.0 {
                break;
            }
            let center = head - shot.dir * (i as f32 * 4.0);
            fill_rect(canvas, &Rect::centered(center, size), Color::RGB(255, 255 - i * 60, 0))?;
        }

        fill_rect(canvas, &Rect::centered(head, shot.half_size + 2.0), Color::RGB(255, 255, 200))?;
        fill_rect(canvas, &Rect::centered(head, shot.half_size), Color::RGB(255, 255, 0))
    }

    fn draw_player(&self, canvas: &mut Canvas<Window>, assets: &Assets, now: u64) -> Result<(), String> {
        let flip = !self.player.facing_right;
        match &assets.player {
            Some(texture) => {
                let visual = self.to_screen(&self.player.visual_rect());
                draw_texture_or_fill(canvas, Some(texture), &visual, flip, PLAYER_COLOR)?;
                if self.player.is_flashing(now) {
                    fill_rect_alpha(canvas, &visual, Color::RGB(255, 0, 0), 100)?;
                }
            }
            None => {
                let body = self.to_screen(&self.player.body);
                let color = if self.player.is_flashing(now) { WHITE } else { PLAYER_COLOR };
                fill_rect(canvas, &body, color)?;
            }
        }
        Ok(())
    }

    fn draw_hud(&self, canvas: &mut Canvas<Window>, assets: &Assets, language: Language) -> Result<(), String> {
        let (width, _) = self.screen_size();
        let hit_points = &self.player.hit_points;

        for i in 0..hit_points.max_hearts() {
            let slot = Rect::new(HUD_MARGIN + i as f32 * HEART_SPACING, HUD_MARGIN, HEART_SIZE, HEART_SIZE);
            if i < hit_points.hearts() {
                draw_texture_or_fill(canvas, assets.full_heart.as_ref(), &slot, false, Color::RGB(220, 0, 0))?;
            } else {
                draw_texture_or_fill(canvas, assets.empty_heart.as_ref(), &slot, false, Color::RGB(70, 70, 70))?;
            }
        }

        let symbol = Rect::new(width - 120.0, HUD_MARGIN, 40.0, 40.0);
        draw_texture_or_fill(canvas, assets.ammo_symbol.as_ref(), &symbol, false, Color::RGB(255, 200, 0))?;
        let ammo = if self.player.ammo.is_unlimited() {
            "∞".to_string()
        } else {
            self.player.ammo.count().to_string()
        };
        draw_simple_text(canvas, &ammo, (symbol.right() + 10.0) as i32, (symbol.y + 6.0) as i32, WHITE, 4)?;

        if let Some(boss) = &self.boss {
            let bar = HealthBar::with_style(HealthBarStyle {
                width: BOSS_BAR_WIDTH,
                ..Default::default()
            });
            let x = (width as i32 - bar.style().width as i32) / 2;
            bar.render(canvas, x, 20, boss.health_fraction(), phase_color(boss.phase()))?;
        }

        if self.level_cleared && self.phase == PlayPhase::Playing {
            draw_centered_text(
                canvas,
                i18n::text(language, TextKey::ProceedToShip),
                (width / 2.0) as i32,
                100,
                VICTORY_COLOR,
                3,
            )?;
        }

        Ok(())
    }

    fn draw_game_over(&self, canvas: &mut Canvas<Window>, language: Language) -> Result<(), String> {
        let (width, height) = self.screen_size();
        let center_x = (width / 2.0) as i32;
        let center_y = (height / 2.0) as i32;

        fill_overlay(canvas, Color::RGB(0, 0, 0), 150)?;
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::GameOver),
            center_x,
            center_y - 40 - (CHAR_HEIGHT * 8) as i32 / 2,
            Color::RGB(255, 0, 0),
            8,
        )?;
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::RestartHint),
            center_x,
            center_y + 20,
            WHITE,
            3,
        )
    }

    fn draw_victory(&self, canvas: &mut Canvas<Window>, language: Language, now: u64) -> Result<(), String> {
        let progress = self.victory_progress(now);
        fill_overlay(canvas, Color::RGB(0, 0, 0), (255.0 * progress) as u8)?;
        if progress < 1.0 {
            return Ok(());
        }

        let (width, height) = self.screen_size();
        let center_x = (width / 2.0) as i32;
        let center_y = (height / 2.0) as i32;

        // Gentle pulse on the title
        let pulse = ((now as f32 / 300.0).sin() + 1.0) / 2.0;
        let title_color = dim(VICTORY_COLOR, 0.8 + 0.2 * pulse);

        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::Victory),
            center_x,
            center_y - 50 - (CHAR_HEIGHT * 10) as i32 / 2,
            title_color,
            10,
        )?;
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::VictorySubtitle),
            center_x,
            center_y + 30,
            VICTORY_COLOR,
            3,
        )?;
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::ContinueHint),
            center_x,
            center_y + 100,
            WHITE,
            3,
        )
    }

    fn draw_loading(&self, canvas: &mut Canvas<Window>, assets: &Assets, language: Language) -> Result<(), String> {
        let (width, height) = self.screen_size();
        match &assets.ship {
            Some(ship) => canvas.copy(ship, None, None)?,
            None => {
                canvas.set_draw_color(Color::RGB(0, 0, 0));
                canvas.clear();
            }
        }
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::Loading),
            (width / 2.0) as i32,
            (height - 100.0) as i32,
            WHITE,
            5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_colors() {
        assert_eq!(phase_color(1), Color::RGB(0, 255, 0));
        assert_eq!(phase_color(2), Color::RGB(255, 165, 0));
        assert_eq!(phase_color(3), Color::RGB(255, 0, 0));
    }
}
