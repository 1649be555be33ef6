//! Screen-space health bar
//!
//! Used for the boss bar along the top of the arena. The bar is stateless:
//! the caller passes the fill fraction and colour every frame, so one bar can
//! change colour with the boss phase.
//!
//! # Example
//!
//! ```rust
//! use crate::ui::{HealthBar, HealthBarStyle};
//!
//! let boss_bar = HealthBar::with_style(HealthBarStyle {
//!     width: 600,
//!     height: 24,
//!     ..Default::default()
//! });
//!
//! boss_bar.render(&mut canvas, 340, 20, boss.health_fraction(), Color::RGB(200, 0, 0))?;
//! ```

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Visual style of a health bar
#[derive(Debug, Clone)]
pub struct HealthBarStyle {
    /// Bar width in pixels
    pub width: u32,

    /// Bar height in pixels
    pub height: u32,

    /// Colour of the depleted part
    pub background_color: Color,

    pub border_color: Color,

    /// Border thickness in pixels (0 = no border)
    pub border_thickness: u32,
}

impl Default for HealthBarStyle {
    fn default() -> Self {
        HealthBarStyle {
            width: 600,
            height: 24,
            background_color: Color::RGB(50, 50, 50),
            border_color: Color::RGB(255, 255, 255),
            border_thickness: 2,
        }
    }
}

pub struct HealthBar {
    style: HealthBarStyle,
}

impl HealthBar {
    pub fn new() -> Self {
        HealthBar {
            style: HealthBarStyle::default(),
        }
    }

    pub fn with_style(style: HealthBarStyle) -> Self {
        HealthBar { style }
    }

    pub fn style(&self) -> &HealthBarStyle {
        &self.style
    }

    /// Pixel width of the filled part for a fraction (clamped to `[0, 1]`)
    pub fn filled_width(&self, fraction: f32) -> u32 {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        (self.style.width as f32 * fraction).round() as u32
    }

    /// Draws the bar with its top-left corner at (`x`, `y`)
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(String)` if SDL2 rendering fails
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        x: i32,
        y: i32,
        fraction: f32,
        fill_color: Color,
    ) -> Result<(), String> {
        let outline = Rect::new(x, y, self.style.width, self.style.height);
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(outline)?;

        let filled = self.filled_width(fraction);
        if filled > 0 {
            canvas.set_draw_color(fill_color);
            canvas.fill_rect(Rect::new(x, y, filled, self.style.height))?;
        }

        // Border drawn last so it sits on top of the fill
        canvas.set_draw_color(self.style.border_color);
        for i in 0..self.style.border_thickness {
            let inset = i as i32;
            let shrink = 2 * i;
            if shrink >= self.style.width || shrink >= self.style.height {
                break;
            }
            canvas.draw_rect(Rect::new(
                x + inset,
                y + inset,
                self.style.width - shrink,
                self.style.height - shrink,
            ))?;
        }

        Ok(())
    }
}

impl Default for HealthBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let bar = HealthBar::default();
        assert_eq!(bar.style().width, 600);
        assert_eq!(bar.style().height, 24);
        assert_eq!(bar.style().border_thickness, 2);
    }

    #[test]
    fn test_filled_width_is_clamped() {
        let bar = HealthBar::with_style(HealthBarStyle {
            width: 200,
            ..Default::default()
        });
        assert_eq!(bar.filled_width(1.0), 200);
        assert_eq!(bar.filled_width(0.58), 116);
        assert_eq!(bar.filled_width(0.0), 0);
        assert_eq!(bar.filled_width(-0.5), 0);
        assert_eq!(bar.filled_width(1.5), 200);
        assert_eq!(bar.filled_width(f32::NAN), 0);
    }
}
