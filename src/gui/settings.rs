//! Settings screen
//!
//! Volume slider, language buttons, credits and a Back button. Changes are
//! applied to the `AppContext` immediately; the host saves them on exit.
//!
//! Controls:
//! - drag the slider handle (or click the track) to set the volume
//! - Left/Right nudge the volume by 10%
//! - Back or Escape returns to the menu

use crate::app::{AppContext, ScreenId, Transition};
use crate::collision::Rect;
use crate::gui::button::{Button, ButtonLabel, ButtonStyle};
use crate::i18n::{self, Language, TextKey};
use crate::input::{InputEvent, Key};
use crate::math::Vec2;
use crate::render::fill_rect;
use crate::text::{draw_centered_text, draw_simple_text};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

const SLIDER_WIDTH: f32 = 200.0;
const SLIDER_HEIGHT: f32 = 20.0;
const SLIDER_Y: f32 = 200.0;
const HANDLE_WIDTH: f32 = 20.0;
const HANDLE_HEIGHT: f32 = 30.0;
const VOLUME_STEP: f32 = 0.1;

const BUTTON_WIDTH: f32 = 150.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_SPACING: f32 = 10.0;
const LANGUAGE_ROW_Y: f32 = 300.0;

const TEXT_COLOR: Color = Color::RGB(255, 255, 255);

pub struct SettingsScreen {
    slider: Rect,
    language_buttons: Vec<(Language, Button)>,
    back_button: Button,
    dragging: bool,
    width: f32,
}

impl SettingsScreen {
    pub fn new(width: f32, height: f32) -> Self {
        let style = ButtonStyle::default();
        let row_x = width / 2.0 - (BUTTON_WIDTH * 2.0 + BUTTON_SPACING) / 2.0;

        let language_buttons = Language::ALL
            .iter()
            .enumerate()
            .map(|(i, &language)| {
                let x = row_x + i as f32 * (BUTTON_WIDTH + BUTTON_SPACING);
                let rect = Rect::new(x, LANGUAGE_ROW_Y, BUTTON_WIDTH, BUTTON_HEIGHT);
                (language, Button::new(rect, ButtonLabel::Fixed(language.native_name()), style.clone()))
            })
            .collect();

        let back_rect = Rect::new((width - BUTTON_WIDTH) / 2.0, height - 100.0, BUTTON_WIDTH, BUTTON_HEIGHT);

        SettingsScreen {
            slider: Rect::new(width / 2.0 - SLIDER_WIDTH / 2.0, SLIDER_Y, SLIDER_WIDTH, SLIDER_HEIGHT),
            language_buttons,
            back_button: Button::new(back_rect, ButtonLabel::Text(TextKey::Back), style),
            dragging: false,
            width,
        }
    }

    #[cfg(test)]
    pub fn slider(&self) -> Rect {
        self.slider
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Slider handle position for a volume in `[0, 1]`
    pub fn handle_rect(&self, volume: f32) -> Rect {
        let travel = self.slider.w - HANDLE_WIDTH;
        Rect::new(
            self.slider.x + volume.clamp(0.0, 1.0) * travel,
            self.slider.y - (HANDLE_HEIGHT - SLIDER_HEIGHT) / 2.0,
            HANDLE_WIDTH,
            HANDLE_HEIGHT,
        )
    }

    /// Volume for a cursor x, with the handle centred under the cursor
    pub fn volume_at(&self, cursor_x: i32) -> f32 {
        let travel = self.slider.w - HANDLE_WIDTH;
        let handle_x = cursor_x as f32 - HANDLE_WIDTH / 2.0 - self.slider.x;
        (handle_x / travel).clamp(0.0, 1.0)
    }

    #[cfg(test)]
    pub fn language_button(&self, language: Language) -> Option<&Button> {
        self.language_buttons
            .iter()
            .find(|(l, _)| *l == language)
            .map(|(_, button)| button)
    }

    #[cfg(test)]
    pub fn back_button(&self) -> &Button {
        &self.back_button
    }

    pub fn enter(&mut self) {
        self.dragging = false;
    }

    pub fn handle_event(&mut self, context: &mut AppContext, event: &InputEvent) -> Transition {
        match *event {
            InputEvent::KeyDown(Key::Escape) => Transition::Switch(ScreenId::Menu),
            InputEvent::KeyDown(Key::Left) => {
                context.set_volume(step_volume(context.settings.volume(), -VOLUME_STEP));
                Transition::None
            }
            InputEvent::KeyDown(Key::Right) => {
                context.set_volume(step_volume(context.settings.volume(), VOLUME_STEP));
                Transition::None
            }
            InputEvent::MouseDown { x, y } => self.click(context, x, y),
            InputEvent::MouseUp => {
                self.dragging = false;
                Transition::None
            }
            InputEvent::MouseMove { x, y } => {
                for (_, button) in &mut self.language_buttons {
                    button.update_hover(x, y);
                }
                self.back_button.update_hover(x, y);
                if self.dragging {
                    context.set_volume(self.volume_at(x));
                }
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn click(&mut self, context: &mut AppContext, x: i32, y: i32) -> Transition {
        let point = Vec2::new(x as f32, y as f32);

        if self.handle_rect(context.settings.volume()).contains_point(point) {
            self.dragging = true;
        } else if self.slider.contains_point(point) {
            self.dragging = true;
            context.set_volume(self.volume_at(x));
        } else if let Some((language, _)) = self.language_buttons.iter().find(|(_, b)| b.contains(x, y)) {
            context.set_language(*language);
        } else if self.back_button.contains(x, y) {
            return Transition::Switch(ScreenId::Menu);
        }
        Transition::None
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, context: &AppContext) -> Result<(), String> {
        canvas.set_draw_color(Color::RGB(50, 50, 50));
        canvas.clear();

        let language = context.settings.language;
        let center_x = (self.width / 2.0) as i32;
        let label_x = self.slider.x as i32;

        draw_centered_text(canvas, i18n::text(language, TextKey::Settings), center_x, 40, TEXT_COLOR, 4)?;

        draw_simple_text(canvas, i18n::text(language, TextKey::Volume), label_x, 150, TEXT_COLOR, 3)?;
        fill_rect(canvas, &self.slider, Color::RGB(100, 100, 100))?;
        fill_rect(canvas, &self.handle_rect(context.settings.volume()), Color::RGB(200, 200, 200))?;
        let percent = format!("{}%", (context.settings.volume() * 100.0).round() as u32);
        draw_simple_text(
            canvas,
            &percent,
            (self.slider.right() + 20.0) as i32,
            self.slider.y as i32,
            TEXT_COLOR,
            2,
        )?;

        draw_simple_text(canvas, i18n::text(language, TextKey::Language), label_x, 250, TEXT_COLOR, 3)?;
        for (button_language, button) in &self.language_buttons {
            button.draw(canvas, language, *button_language == language)?;
        }

        draw_centered_text(canvas, i18n::text(language, TextKey::Credits), center_x, 400, TEXT_COLOR, 3)?;
        let credits = i18n::text(language, TextKey::CreditsText);
        for (i, line) in credits.lines().enumerate() {
            draw_centered_text(canvas, line, center_x, 450 + i as i32 * 30, TEXT_COLOR, 2)?;
        }

        self.back_button.draw(canvas, language, false)
    }
}

/// Adds `delta` to `volume`, snapping to one decimal place
fn step_volume(volume: f32, delta: f32) -> f32 {
    ((volume + delta) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> SettingsScreen {
        SettingsScreen::new(1280.0, 720.0)
    }

    fn center_of(rect: Rect) -> (i32, i32) {
        let c = rect.center();
        (c.x as i32, c.y as i32)
    }

    #[test]
    fn test_layout() {
        let screen = screen();
        assert_eq!(screen.slider(), Rect::new(540.0, 200.0, 200.0, 20.0));
        assert_eq!(
            screen.language_button(Language::Pt).unwrap().rect,
            Rect::new(485.0, 300.0, 150.0, 50.0)
        );
        assert_eq!(
            screen.language_button(Language::En).unwrap().rect,
            Rect::new(645.0, 300.0, 150.0, 50.0)
        );
        assert_eq!(screen.back_button().rect, Rect::new(565.0, 620.0, 150.0, 50.0));
    }

    #[test]
    fn test_handle_tracks_volume() {
        let screen = screen();
        assert_eq!(screen.handle_rect(0.0).x, 540.0);
        assert_eq!(screen.handle_rect(0.5).x, 630.0);
        assert_eq!(screen.handle_rect(1.0).right(), 740.0);
        assert_eq!(screen.handle_rect(0.5).y, 195.0);
    }

    #[test]
    fn test_dragging_sets_volume() {
        let mut screen = screen();
        let mut context = AppContext::default();
        let (x, y) = center_of(screen.handle_rect(context.settings.volume()));

        screen.handle_event(&mut context, &InputEvent::MouseDown { x, y });
        assert!(screen.is_dragging());

        screen.handle_event(&mut context, &InputEvent::MouseMove { x: 1000, y });
        assert_eq!(context.settings.volume(), 1.0);
        screen.handle_event(&mut context, &InputEvent::MouseMove { x: 550, y });
        assert_eq!(context.settings.volume(), 0.0);

        screen.handle_event(&mut context, &InputEvent::MouseUp);
        screen.handle_event(&mut context, &InputEvent::MouseMove { x: 1000, y });
        assert_eq!(context.settings.volume(), 0.0);
    }

    #[test]
    fn test_arrow_keys_step_volume() {
        let mut screen = screen();
        let mut context = AppContext::default();

        screen.handle_event(&mut context, &InputEvent::KeyDown(Key::Right));
        assert!((context.settings.volume() - 0.6).abs() < 1e-6);
        for _ in 0..10 {
            screen.handle_event(&mut context, &InputEvent::KeyDown(Key::Left));
        }
        assert_eq!(context.settings.volume(), 0.0);
    }

    #[test]
    fn test_language_buttons() {
        let mut screen = screen();
        let mut context = AppContext::default();
        let (x, y) = center_of(screen.language_button(Language::En).unwrap().rect);

        assert_eq!(screen.handle_event(&mut context, &InputEvent::MouseDown { x, y }), Transition::None);
        assert_eq!(context.settings.language, Language::En);
    }

    #[test]
    fn test_back_and_escape_return_to_menu() {
        let mut screen = screen();
        let mut context = AppContext::default();
        let (x, y) = center_of(screen.back_button().rect);

        assert_eq!(
            screen.handle_event(&mut context, &InputEvent::MouseDown { x, y }),
            Transition::Switch(ScreenId::Menu)
        );
        assert_eq!(
            screen.handle_event(&mut context, &InputEvent::KeyDown(Key::Escape)),
            Transition::Switch(ScreenId::Menu)
        );
    }
}
