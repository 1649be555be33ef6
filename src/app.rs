//! Application context and screen management
//!
//! `App` owns every screen and knows which one is active. Each frame the host
//! loop feeds it input events, one `update` and one `draw`; all of them go to
//! the active screen only. Screens answer with a `Transition`, which is the
//! only way to change screens or quit.
//!
//! Process-wide state (volume, language, queued sounds) lives in
//! `AppContext`, which is passed by reference into every screen call.
//!
//! ```text
//! Menu --Start--> Cutscene --done/skip--> Gameplay --ship--> BossFight
//!  ^ |                                      |                  |
//!  | +--Settings--> Settings --Back--+      +--Esc-------------+--Esc / victory--> Menu
//!  +---------------------------------+
//! ```

use crate::assets::Assets;
use crate::audio::{MusicTrack, SoundCue};
use crate::config::GameConfig;
use crate::cutscene::{CutsceneScreen, IntroStrategy};
use crate::gameplay::{GameMode, GameplayOutcome, GameplayState};
use crate::gui::{MenuScreen, SettingsScreen};
use crate::i18n::Language;
use crate::input::{InputEvent, InputSnapshot};
use crate::settings::Settings;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// State shared by all screens
#[derive(Debug, Default)]
pub struct AppContext {
    pub settings: Settings,
    /// Sounds requested this frame, drained by the host into the mixer
    pub sound_queue: Vec<SoundCue>,
    pub quit_requested: bool,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        AppContext {
            settings,
            ..Default::default()
        }
    }

    /// Sets the master volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
        debug!(volume = self.settings.volume(), "volume changed");
    }

    pub fn set_language(&mut self, language: Language) {
        if self.settings.language != language {
            info!(?language, "language changed");
            self.settings.language = language;
        }
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_queue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Menu,
    Settings,
    Cutscene,
    Gameplay,
    BossFight,
}

/// What a screen asks the app to do after handling input or updating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Switch(ScreenId),
    Quit,
}

/// A `GameplayState` plugged into the screen system
pub struct GameplayScreen {
    state: GameplayState,
}

impl GameplayScreen {
    pub fn new(mode: GameMode, config: GameConfig) -> Self {
        Self::with_state(GameplayState::new(mode, config))
    }

    pub fn with_state(state: GameplayState) -> Self {
        GameplayScreen { state }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameplayState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameplayState {
        &mut self.state
    }

    fn music(&self) -> MusicTrack {
        match self.state.mode() {
            GameMode::Scrolling => MusicTrack::Level,
            GameMode::BossFight => MusicTrack::Boss,
        }
    }

    pub fn enter(&mut self, context: &mut AppContext, now: u64) {
        self.state.reset(now);
        context.sound_queue.push(SoundCue::Music(self.music()));
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: u64) -> Transition {
        match event {
            InputEvent::KeyDown(key) => outcome_transition(self.state.handle_key(*key, now)),
            _ => Transition::None,
        }
    }

    pub fn update(&mut self, context: &mut AppContext, input: &InputSnapshot, now: u64) -> Transition {
        let outcome = self.state.update(input, now);
        context.sound_queue.extend(self.state.drain_sound_cues());
        outcome_transition(outcome)
    }
}

fn outcome_transition(outcome: GameplayOutcome) -> Transition {
    match outcome {
        GameplayOutcome::Continue => Transition::None,
        GameplayOutcome::EnterBossFight => Transition::Switch(ScreenId::BossFight),
        GameplayOutcome::ReturnToMenu => Transition::Switch(ScreenId::Menu),
    }
}

/// Every kind of screen the app can show
pub enum Screen {
    Menu(MenuScreen),
    Settings(SettingsScreen),
    Cutscene(CutsceneScreen),
    Gameplay(GameplayScreen),
}

impl Screen {
    /// Called every time the screen becomes active; re-initializes it
    pub fn enter(&mut self, context: &mut AppContext, now: u64) {
        match self {
            Screen::Menu(menu) => menu.enter(context),
            Screen::Settings(settings) => settings.enter(),
            Screen::Cutscene(cutscene) => cutscene.enter(context, now),
            Screen::Gameplay(gameplay) => gameplay.enter(context, now),
        }
    }

    pub fn handle_event(&mut self, context: &mut AppContext, event: &InputEvent, now: u64) -> Transition {
        match self {
            Screen::Menu(menu) => menu.handle_event(event),
            Screen::Settings(settings) => settings.handle_event(context, event),
            Screen::Cutscene(cutscene) => cutscene.handle_event(event),
            Screen::Gameplay(gameplay) => gameplay.handle_event(event, now),
        }
    }

    pub fn update(&mut self, context: &mut AppContext, input: &InputSnapshot, now: u64) -> Transition {
        match self {
            Screen::Menu(_) | Screen::Settings(_) => Transition::None,
            Screen::Cutscene(cutscene) => cutscene.update(now),
            Screen::Gameplay(gameplay) => gameplay.update(context, input, now),
        }
    }

    pub fn draw(
        &self,
        canvas: &mut Canvas<Window>,
        assets: &Assets,
        context: &AppContext,
        now: u64,
    ) -> Result<(), String> {
        match self {
            Screen::Menu(menu) => menu.draw(canvas, assets, context),
            Screen::Settings(settings) => settings.draw(canvas, context),
            Screen::Cutscene(cutscene) => cutscene.draw(canvas, assets, context),
            Screen::Gameplay(gameplay) => gameplay.state.draw(canvas, assets, context.settings.language, now),
        }
    }
}

/// Screen registry plus the active-screen selector
pub struct App {
    context: AppContext,
    screens: HashMap<ScreenId, Screen>,
    active: Option<ScreenId>,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        App {
            context,
            screens: HashMap::new(),
            active: None,
        }
    }

    /// Registers all five screens and opens the menu
    pub fn with_default_screens(context: AppContext, config: &GameConfig, intro: IntroStrategy, now: u64) -> Self {
        let width = config.level.screen_width;
        let height = config.level.screen_height;

        let mut app = App::new(context);
        app.register(ScreenId::Menu, Screen::Menu(MenuScreen::new(width, height)));
        app.register(ScreenId::Settings, Screen::Settings(SettingsScreen::new(width, height)));
        app.register(ScreenId::Cutscene, Screen::Cutscene(CutsceneScreen::new(intro)));
        app.register(
            ScreenId::Gameplay,
            Screen::Gameplay(GameplayScreen::new(GameMode::Scrolling, config.clone())),
        );
        app.register(
            ScreenId::BossFight,
            Screen::Gameplay(GameplayScreen::new(GameMode::BossFight, config.clone())),
        );
        app.switch_to(ScreenId::Menu, now);
        app
    }

    pub fn register(&mut self, id: ScreenId, screen: Screen) {
        self.screens.insert(id, screen);
    }

    /// Makes `id` the active screen and enters it.
    ///
    /// Unregistered ids are logged and ignored; the current screen stays.
    pub fn switch_to(&mut self, id: ScreenId, now: u64) -> bool {
        let Some(screen) = self.screens.get_mut(&id) else {
            warn!(?id, "switch to unregistered screen ignored");
            return false;
        };
        info!(from = ?self.active, to = ?id, "switching screen");
        screen.enter(&mut self.context, now);
        self.active = Some(id);
        true
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<ScreenId> {
        self.active
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    #[cfg(test)]
    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(&id)
    }

    pub fn is_running(&self) -> bool {
        !self.context.quit_requested
    }

    fn apply(&mut self, transition: Transition, now: u64) {
        match transition {
            Transition::None => {}
            Transition::Switch(id) => {
                self.switch_to(id, now);
            }
            Transition::Quit => {
                info!("quit requested");
                self.context.quit_requested = true;
            }
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: u64) {
        if *event == InputEvent::Quit {
            self.apply(Transition::Quit, now);
            return;
        }
        let Some(screen) = self.active.and_then(|id| self.screens.get_mut(&id)) else {
            return;
        };
        let transition = screen.handle_event(&mut self.context, event, now);
        self.apply(transition, now);
    }

    pub fn update(&mut self, input: &InputSnapshot, now: u64) {
        let Some(screen) = self.active.and_then(|id| self.screens.get_mut(&id)) else {
            return;
        };
        let transition = screen.update(&mut self.context, input, now);
        self.apply(transition, now);
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, assets: &Assets, now: u64) -> Result<(), String> {
        match self.active.and_then(|id| self.screens.get(&id)) {
            Some(screen) => screen.draw(canvas, assets, &self.context, now),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::state::PlayPhase;
    use crate::input::Key;

    fn app() -> App {
        App::with_default_screens(
            AppContext::default(),
            &GameConfig::default(),
            IntroStrategy::Placeholder,
            0,
        )
    }

    fn gameplay(app: &App, id: ScreenId) -> &GameplayState {
        match app.screen(id) {
            Some(Screen::Gameplay(screen)) => screen.state(),
            _ => panic!("{id:?} is not a gameplay screen"),
        }
    }

    #[test]
    fn test_starts_on_menu_with_music() {
        let mut app = app();
        assert_eq!(app.active(), Some(ScreenId::Menu));
        assert_eq!(
            app.context_mut().drain_sounds(),
            vec![SoundCue::Music(MusicTrack::Menu)]
        );
    }

    #[test]
    fn test_unregistered_screen_is_ignored() {
        let mut app = App::new(AppContext::default());
        app.register(ScreenId::Menu, Screen::Menu(MenuScreen::new(1280.0, 720.0)));
        assert!(app.switch_to(ScreenId::Menu, 0));

        assert!(!app.switch_to(ScreenId::BossFight, 0));
        assert_eq!(app.active(), Some(ScreenId::Menu));
    }

    #[test]
    fn test_menu_start_goes_through_intro_to_gameplay() {
        let mut app = app();
        app.handle_event(&InputEvent::KeyDown(Key::Confirm), 10);
        assert_eq!(app.active(), Some(ScreenId::Cutscene));

        app.handle_event(&InputEvent::KeyDown(Key::Escape), 20);
        assert_eq!(app.active(), Some(ScreenId::Gameplay));
        assert!(app.context_mut().drain_sounds().contains(&SoundCue::Music(MusicTrack::Level)));
    }

    #[test]
    fn test_escape_from_gameplay_returns_to_menu() {
        let mut app = app();
        app.switch_to(ScreenId::Gameplay, 0);
        app.handle_event(&InputEvent::KeyDown(Key::Escape), 5);
        assert_eq!(app.active(), Some(ScreenId::Menu));
    }

    #[test]
    fn test_loading_finishes_in_boss_fight() {
        let mut app = app();
        app.switch_to(ScreenId::Gameplay, 0);
        if let Some(Screen::Gameplay(screen)) = app.screens.get_mut(&ScreenId::Gameplay) {
            screen.state_mut().phase = PlayPhase::Loading { since: 100 };
        }

        app.update(&InputSnapshot::default(), 3200);
        assert_eq!(app.active(), Some(ScreenId::BossFight));
        assert!(gameplay(&app, ScreenId::BossFight).boss().is_some());
        assert!(app.context_mut().drain_sounds().contains(&SoundCue::Music(MusicTrack::Boss)));
    }

    #[test]
    fn test_reentering_gameplay_resets_it() {
        let mut app = app();
        app.switch_to(ScreenId::Gameplay, 0);
        if let Some(Screen::Gameplay(screen)) = app.screens.get_mut(&ScreenId::Gameplay) {
            screen.state_mut().trigger_game_over();
        }
        app.switch_to(ScreenId::Menu, 10);
        app.switch_to(ScreenId::Gameplay, 20);
        assert_eq!(gameplay(&app, ScreenId::Gameplay).phase(), PlayPhase::Playing);
    }

    #[test]
    fn test_quit_event_stops_the_app() {
        let mut app = app();
        assert!(app.is_running());
        app.handle_event(&InputEvent::Quit, 0);
        assert!(!app.is_running());
    }

    #[test]
    fn test_context_volume_and_language() {
        let mut context = AppContext::default();
        context.set_volume(1.4);
        assert_eq!(context.settings.volume(), 1.0);
        context.set_language(Language::En);
        assert_eq!(context.settings.language, Language::En);
    }
}
