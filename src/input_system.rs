use crate::input::{InputEvent, InputSnapshot, Key};
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::mouse::MouseButton;

/// InputSystem translates SDL2 input into the game's own input types
///
/// This system decouples raw input (keyboard, mouse) from the screens. Each
/// frame the host loop calls:
/// 1. `poll_events()` for discrete events (key presses, clicks, quit)
/// 2. `snapshot()` for the keys currently held (movement, fire)
///
/// Keys with no meaning to the game are dropped here, so screens only ever
/// match on `Key`.
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    /// Drains pending SDL2 events and returns the ones the game cares about
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        events.push(InputEvent::KeyDown(key));
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => events.push(InputEvent::MouseDown { x, y }),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => events.push(InputEvent::MouseUp),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                _ => {}
            }
        }

        events
    }

    /// Samples held movement and fire keys
    pub fn snapshot(&self, keyboard_state: &KeyboardState) -> InputSnapshot {
        let held = |a: Scancode, b: Scancode| {
            keyboard_state.is_scancode_pressed(a) || keyboard_state.is_scancode_pressed(b)
        };

        InputSnapshot {
            left: held(Scancode::Left, Scancode::A),
            right: held(Scancode::Right, Scancode::D),
            up: held(Scancode::Up, Scancode::W),
            down: held(Scancode::Down, Scancode::S),
            fire: keyboard_state.is_scancode_pressed(Scancode::X),
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a physical key to a logical game key
pub fn map_keycode(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::Space => Key::Jump,
        Keycode::W | Keycode::Up => Key::Up,
        Keycode::S | Keycode::Down => Key::Down,
        Keycode::A | Keycode::Left => Key::Left,
        Keycode::D | Keycode::Right => Key::Right,
        Keycode::Return | Keycode::KpEnter => Key::Confirm,
        Keycode::Escape => Key::Escape,
        Keycode::R => Key::Restart,
        Keycode::F11 => Key::Fullscreen,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        assert_eq!(map_keycode(Keycode::Space), Some(Key::Jump));
        assert_eq!(map_keycode(Keycode::W), Some(Key::Up));
        assert_eq!(map_keycode(Keycode::Up), Some(Key::Up));
        assert!(map_keycode(Keycode::W).is_some_and(Key::is_jump));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_keycode(Keycode::Return), Some(Key::Confirm));
        assert_eq!(map_keycode(Keycode::R), Some(Key::Restart));
        assert_eq!(map_keycode(Keycode::F11), Some(Key::Fullscreen));
        assert_eq!(map_keycode(Keycode::Escape), Some(Key::Escape));
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(map_keycode(Keycode::Q), None);
    }
}
