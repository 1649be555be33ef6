//! Main menu screen
//!
//! Title plus three stacked buttons. The buttons work with the mouse (hover,
//! left click) and the keyboard (Up/Down to move the selection, Return to
//! activate). Hovering a button also moves the keyboard selection to it, so
//! the two never disagree.

use crate::app::{AppContext, ScreenId, Transition};
use crate::assets::Assets;
use crate::audio::{MusicTrack, SoundCue};
use crate::collision::Rect;
use crate::gui::button::{Button, ButtonLabel, ButtonStyle};
use crate::i18n::{self, TextKey};
use crate::input::{InputEvent, Key};
use crate::text::draw_centered_text;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 70.0;
const BUTTON_SPACING: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Settings,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::Start, MenuAction::Settings, MenuAction::Exit];

    fn label(self) -> TextKey {
        match self {
            MenuAction::Start => TextKey::StartGame,
            MenuAction::Settings => TextKey::Settings,
            MenuAction::Exit => TextKey::ExitGame,
        }
    }

    fn transition(self) -> Transition {
        match self {
            MenuAction::Start => Transition::Switch(ScreenId::Cutscene),
            MenuAction::Settings => Transition::Switch(ScreenId::Settings),
            MenuAction::Exit => Transition::Quit,
        }
    }
}

pub struct MenuScreen {
    buttons: Vec<(MenuAction, Button)>,
    selected_index: usize,
    width: f32,
    height: f32,
}

impl MenuScreen {
    /// Lays the buttons out for a `width` x `height` logical screen
    pub fn new(width: f32, height: f32) -> Self {
        let count = MenuAction::ALL.len() as f32;
        let total_height = BUTTON_HEIGHT * count + BUTTON_SPACING * (count - 1.0);
        // Centred, nudged down to leave room for the title
        let start_y = (height - total_height) / 2.0 + 50.0;
        let x = (width - BUTTON_WIDTH) / 2.0;

        let style = ButtonStyle {
            base_color: Color::RGB(0, 0, 0),
            text_scale: 3,
            ..Default::default()
        };

        let buttons = MenuAction::ALL
            .iter()
            .enumerate()
            .map(|(i, &action)| {
                let y = start_y + i as f32 * (BUTTON_HEIGHT + BUTTON_SPACING);
                let rect = Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);
                (action, Button::new(rect, ButtonLabel::Text(action.label()), style.clone()))
            })
            .collect();

        MenuScreen {
            buttons,
            selected_index: 0,
            width,
            height,
        }
    }

    pub fn selected(&self) -> MenuAction {
        self.buttons[self.selected_index].0
    }

    /// Move selection up (wraps to bottom)
    pub fn select_previous(&mut self) {
        if self.selected_index == 0 {
            self.selected_index = self.buttons.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down (wraps to top)
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.buttons.len();
    }

    #[cfg(test)]
    pub fn button_rect(&self, action: MenuAction) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, button)| button.rect)
    }

    pub fn enter(&mut self, context: &mut AppContext) {
        self.selected_index = 0;
        for (_, button) in &mut self.buttons {
            button.set_hovered(false);
        }
        context.sound_queue.push(SoundCue::Music(MusicTrack::Menu));
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Transition {
        match *event {
            InputEvent::KeyDown(Key::Up) => {
                self.select_previous();
                Transition::None
            }
            InputEvent::KeyDown(Key::Down) => {
                self.select_next();
                Transition::None
            }
            InputEvent::KeyDown(Key::Confirm) => self.selected().transition(),
            InputEvent::MouseMove { x, y } => {
                for (i, (_, button)) in self.buttons.iter_mut().enumerate() {
                    if button.update_hover(x, y) {
                        self.selected_index = i;
                    }
                }
                Transition::None
            }
            InputEvent::MouseDown { x, y } => self
                .buttons
                .iter()
                .find(|(_, button)| button.contains(x, y))
                .map_or(Transition::None, |(action, _)| action.transition()),
            _ => Transition::None,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, assets: &Assets, context: &AppContext) -> Result<(), String> {
        match &assets.menu_background {
            Some(background) => canvas.copy(background, None, None)?,
            None => {
                canvas.set_draw_color(Color::RGB(0, 0, 0));
                canvas.clear();
            }
        }

        let language = context.settings.language;
        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::GameTitle),
            (self.width / 2.0) as i32,
            (self.height / 4.0) as i32 - 28,
            Color::RGB(255, 255, 255),
            8,
        )?;

        for (i, (_, button)) in self.buttons.iter().enumerate() {
            button.draw(canvas, language, i == self.selected_index)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuScreen {
        MenuScreen::new(1280.0, 720.0)
    }

    fn click_point(rect: Rect) -> (i32, i32) {
        let center = rect.center();
        (center.x as i32, center.y as i32)
    }

    #[test]
    fn test_button_layout() {
        let menu = menu();
        assert_eq!(menu.button_rect(MenuAction::Start), Some(Rect::new(490.0, 285.0, 300.0, 70.0)));
        assert_eq!(menu.button_rect(MenuAction::Settings), Some(Rect::new(490.0, 375.0, 300.0, 70.0)));
        assert_eq!(menu.button_rect(MenuAction::Exit), Some(Rect::new(490.0, 465.0, 300.0, 70.0)));
    }

    #[test]
    fn test_keyboard_selection_wraps() {
        let mut menu = menu();
        assert_eq!(menu.selected(), MenuAction::Start);
        menu.handle_event(&InputEvent::KeyDown(Key::Up));
        assert_eq!(menu.selected(), MenuAction::Exit);
        menu.handle_event(&InputEvent::KeyDown(Key::Down));
        menu.handle_event(&InputEvent::KeyDown(Key::Down));
        assert_eq!(menu.selected(), MenuAction::Settings);
        assert_eq!(
            menu.handle_event(&InputEvent::KeyDown(Key::Confirm)),
            Transition::Switch(ScreenId::Settings)
        );
    }

    #[test]
    fn test_click_activates_button() {
        let mut menu = menu();
        let (x, y) = click_point(menu.button_rect(MenuAction::Exit).unwrap());
        assert_eq!(menu.handle_event(&InputEvent::MouseDown { x, y }), Transition::Quit);

        let (x, y) = click_point(menu.button_rect(MenuAction::Start).unwrap());
        assert_eq!(
            menu.handle_event(&InputEvent::MouseDown { x, y }),
            Transition::Switch(ScreenId::Cutscene)
        );
        assert_eq!(menu.handle_event(&InputEvent::MouseDown { x: 5, y: 5 }), Transition::None);
    }

    #[test]
    fn test_hover_moves_selection() {
        let mut menu = menu();
        let (x, y) = click_point(menu.button_rect(MenuAction::Exit).unwrap());
        menu.handle_event(&InputEvent::MouseMove { x, y });
        assert_eq!(menu.selected(), MenuAction::Exit);
    }

    #[test]
    fn test_enter_plays_menu_music_and_resets_selection() {
        let mut menu = menu();
        let mut context = AppContext::default();
        menu.select_next();
        menu.enter(&mut context);
        assert_eq!(menu.selected(), MenuAction::Start);
        assert_eq!(context.sound_queue, vec![SoundCue::Music(MusicTrack::Menu)]);
    }
}
