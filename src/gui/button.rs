//! Clickable text button
//!
//! Buttons keep their own hover state from mouse motion. Their label is either
//! a localised `TextKey`, resolved at draw time so a language switch shows up
//! immediately, or a fixed string such as a language's native name.

use crate::collision::Rect;
use crate::i18n::{self, Language, TextKey};
use crate::math::Vec2;
use crate::render::{fill_rect, to_sdl_rect};
use crate::text::{CHAR_HEIGHT, draw_centered_text};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Text(TextKey),
    Fixed(&'static str),
}

impl ButtonLabel {
    pub fn resolve(self, language: Language) -> &'static str {
        match self {
            ButtonLabel::Text(key) => i18n::text(language, key),
            ButtonLabel::Fixed(label) => label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ButtonStyle {
    pub base_color: Color,
    pub hover_color: Color,
    pub text_color: Color,
    pub text_scale: u32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        ButtonStyle {
            base_color: Color::RGB(70, 130, 180),
            hover_color: Color::RGB(100, 149, 237),
            text_color: Color::RGB(255, 255, 255),
            text_scale: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub label: ButtonLabel,
    style: ButtonStyle,
    hovered: bool,
}

impl Button {
    pub fn new(rect: Rect, label: ButtonLabel, style: ButtonStyle) -> Self {
        Button {
            rect,
            label,
            style,
            hovered: false,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(Vec2::new(x as f32, y as f32))
    }

    /// Updates hover state from the cursor position; returns the new state
    pub fn update_hover(&mut self, x: i32, y: i32) -> bool {
        self.hovered = self.contains(x, y);
        self.hovered
    }

    #[cfg(test)]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Draws the button; `outlined` adds a white frame (keyboard selection,
    /// active language)
    pub fn draw(&self, canvas: &mut Canvas<Window>, language: Language, outlined: bool) -> Result<(), String> {
        let color = if self.hovered {
            self.style.hover_color
        } else {
            self.style.base_color
        };
        fill_rect(canvas, &self.rect, color)?;

        if outlined {
            canvas.set_draw_color(Color::RGB(255, 255, 255));
            canvas.draw_rect(to_sdl_rect(&self.rect))?;
            canvas.draw_rect(to_sdl_rect(&self.rect.inflate(-2.0)))?;
        }

        let center = self.rect.center();
        let text_height = (CHAR_HEIGHT * self.style.text_scale) as i32;
        draw_centered_text(
            canvas,
            self.label.resolve(language),
            center.x.round() as i32,
            center.y.round() as i32 - text_height / 2,
            self.style.text_color,
            self.style.text_scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new(
            Rect::new(100.0, 50.0, 150.0, 50.0),
            ButtonLabel::Text(TextKey::Back),
            ButtonStyle::default(),
        )
    }

    #[test]
    fn test_hover_follows_cursor() {
        let mut button = button();
        assert!(button.update_hover(120, 60));
        assert!(button.is_hovered());
        assert!(!button.update_hover(99, 60));
        assert!(!button.is_hovered());
    }

    #[test]
    fn test_label_resolves_per_language() {
        let button = button();
        assert_eq!(button.label.resolve(Language::Pt), "Voltar");
        assert_eq!(button.label.resolve(Language::En), "Back");
        assert_eq!(ButtonLabel::Fixed("English").resolve(Language::Pt), "English");
    }
}
