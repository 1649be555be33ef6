//! Intro cutscene
//!
//! The intro is a slideshow of still frames found on disk at startup:
//!
//! ```text
//! assets/images/cutscene/frame_1.png
//! assets/images/cutscene/frame_2.png
//! ...
//! ```
//!
//! Numbering must be contiguous; the first gap ends the sequence. With no
//! frames the screen shows a short placeholder text and waits for a key.
//! Either way Space, Return, Escape or a click skips straight to gameplay.

use crate::app::{AppContext, ScreenId, Transition};
use crate::assets::Assets;
use crate::audio::SoundCue;
use crate::i18n::{self, TextKey};
use crate::input::InputEvent;
use crate::text::draw_centered_text;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::path::{Path, PathBuf};
use tracing::info;

pub const FRAME_DIR: &str = "assets/images/cutscene";

/// How long each slide stays on screen
pub const SLIDE_MS: u64 = 1000;

pub fn frame_path_in(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index}.png"))
}

/// Path of slide `index` (1-based) in the default frame directory
pub fn frame_path(index: usize) -> PathBuf {
    frame_path_in(Path::new(FRAME_DIR), index)
}

/// How the intro is presented, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStrategy {
    Slides { count: usize },
    Placeholder,
}

impl IntroStrategy {
    pub fn from_frame_count(count: usize) -> Self {
        if count == 0 {
            IntroStrategy::Placeholder
        } else {
            IntroStrategy::Slides { count }
        }
    }

    /// Counts `frame_1.png`, `frame_2.png`, ... in `dir` up to the first gap
    pub fn detect_in(dir: &Path) -> Self {
        let count = (1..).take_while(|&i| frame_path_in(dir, i).is_file()).count();
        let strategy = Self::from_frame_count(count);
        info!(?strategy, dir = %dir.display(), "selected intro strategy");
        strategy
    }

    pub fn detect() -> Self {
        Self::detect_in(Path::new(FRAME_DIR))
    }

    pub fn frame_count(self) -> usize {
        match self {
            IntroStrategy::Slides { count } => count,
            IntroStrategy::Placeholder => 0,
        }
    }
}

pub struct CutsceneScreen {
    strategy: IntroStrategy,
    current: usize,
    slide_started: u64,
}

impl CutsceneScreen {
    pub fn new(strategy: IntroStrategy) -> Self {
        CutsceneScreen {
            strategy,
            current: 0,
            slide_started: 0,
        }
    }

    /// Index of the slide on screen (0-based)
    #[cfg(test)]
    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn enter(&mut self, context: &mut AppContext, now: u64) {
        self.current = 0;
        self.slide_started = now;
        context.sound_queue.push(SoundCue::StopMusic { fade_ms: 0 });
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Transition {
        match event {
            InputEvent::KeyDown(key) if key.is_skip() => Transition::Switch(ScreenId::Gameplay),
            InputEvent::MouseDown { .. } => Transition::Switch(ScreenId::Gameplay),
            _ => Transition::None,
        }
    }

    /// Advances the slideshow; finishing the last slide starts gameplay
    pub fn update(&mut self, now: u64) -> Transition {
        let IntroStrategy::Slides { count } = self.strategy else {
            return Transition::None;
        };

        if now.saturating_sub(self.slide_started) > SLIDE_MS {
            self.current += 1;
            self.slide_started = now;
            if self.current >= count {
                return Transition::Switch(ScreenId::Gameplay);
            }
        }
        Transition::None
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, assets: &Assets, context: &AppContext) -> Result<(), String> {
        canvas.set_draw_color(Color::RGB(0, 0, 0));
        canvas.clear();

        let (width, height) = canvas.logical_size();
        let language = context.settings.language;

        match assets.cutscene_frames.get(self.current) {
            Some(frame) => canvas.copy(frame, None, None)?,
            None => {
                draw_centered_text(
                    canvas,
                    i18n::text(language, TextKey::GameTitle),
                    width as i32 / 2,
                    height as i32 / 2 - 40,
                    Color::RGB(255, 255, 255),
                    5,
                )?;
            }
        }

        draw_centered_text(
            canvas,
            i18n::text(language, TextKey::SkipHint),
            width as i32 / 2,
            height as i32 - 60,
            Color::RGB(200, 200, 200),
            2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("charm_guerra_cutscene_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_detect_counts_until_first_gap() {
        let dir = temp_dir("gap");
        for i in [1, 2, 4] {
            fs::write(frame_path_in(&dir, i), b"").unwrap();
        }

        assert_eq!(IntroStrategy::detect_in(&dir), IntroStrategy::Slides { count: 2 });
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_detect_without_frames_is_placeholder() {
        let dir = temp_dir("empty");
        assert_eq!(IntroStrategy::detect_in(&dir), IntroStrategy::Placeholder);
        assert_eq!(IntroStrategy::Placeholder.frame_count(), 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_slides_advance_then_start_gameplay() {
        let mut context = AppContext::default();
        let mut screen = CutsceneScreen::new(IntroStrategy::Slides { count: 2 });
        screen.enter(&mut context, 0);
        assert_eq!(context.sound_queue, vec![SoundCue::StopMusic { fade_ms: 0 }]);

        assert_eq!(screen.update(1000), Transition::None);
        assert_eq!(screen.current_slide(), 0);
        assert_eq!(screen.update(1001), Transition::None);
        assert_eq!(screen.current_slide(), 1);
        assert_eq!(screen.update(2002), Transition::Switch(ScreenId::Gameplay));
    }

    #[test]
    fn test_placeholder_waits_for_skip() {
        let mut context = AppContext::default();
        let mut screen = CutsceneScreen::new(IntroStrategy::Placeholder);
        screen.enter(&mut context, 0);

        assert_eq!(screen.update(60_000), Transition::None);
        assert_eq!(screen.handle_event(&InputEvent::KeyDown(Key::Left)), Transition::None);
        assert_eq!(
            screen.handle_event(&InputEvent::KeyDown(Key::Jump)),
            Transition::Switch(ScreenId::Gameplay)
        );
        assert_eq!(
            screen.handle_event(&InputEvent::MouseDown { x: 5, y: 5 }),
            Transition::Switch(ScreenId::Gameplay)
        );
    }
}
