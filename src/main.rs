use sdl2::pixels::Color;
use sdl2::video::FullscreenType;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod assets;
mod audio;
mod boss;
mod camera;
mod collectible;
mod collision;
mod combat;
mod config;
mod cutscene;
mod enemy;
mod error;
mod gameplay;
mod gui;
mod i18n;
mod input;
mod input_system;
mod map;
mod math;
mod particles;
mod player;
mod render;
mod settings;
mod stats;
mod text;
mod ui;

use app::{App, AppContext};
use assets::Assets;
use audio::AudioSystem;
use config::GameConfig;
use cutscene::IntroStrategy;
use input::{InputEvent, Key};
use input_system::InputSystem;
use settings::SettingsStore;

// Logical resolution; SDL2 scales it to the window
const GAME_WIDTH: u32 = 1280;
const GAME_HEIGHT: u32 = 720;
const TARGET_FPS: u32 = 90;

const CONFIG_PATH: &str = "assets/config/gameplay.json";

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("charm_guerra=info")),
        )
        .init();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;
    let timer = sdl_context.timer()?;
    let _audio_subsystem = match sdl_context.audio() {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!("audio subsystem unavailable: {e}");
            None
        }
    };

    let window = video_subsystem
        .window("Charm Guerra", GAME_WIDTH, GAME_HEIGHT)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Set logical size so every screen lays out in 1280x720
    canvas.set_logical_size(GAME_WIDTH, GAME_HEIGHT).map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;
    let input_system = InputSystem::new();

    let store = match SettingsStore::user_default() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("settings will not persist: {e}");
            None
        }
    };
    let settings = store.as_ref().map(SettingsStore::load_or_default).unwrap_or_default();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let intro = IntroStrategy::detect();
    let assets = Assets::load(&texture_creator, intro.frame_count());
    let mut audio = AudioSystem::new(settings.volume());

    let mut app = App::with_default_screens(AppContext::new(settings), &config, intro, timer.ticks64());
    info!("game started");

    while app.is_running() {
        let now = timer.ticks64();

        for event in input_system.poll_events(&mut event_pump) {
            if event == InputEvent::KeyDown(Key::Fullscreen) {
                let window = canvas.window_mut();
                let next = match window.fullscreen_state() {
                    FullscreenType::Off => FullscreenType::Desktop,
                    _ => FullscreenType::Off,
                };
                if let Err(e) = window.set_fullscreen(next) {
                    warn!("could not toggle fullscreen: {e}");
                }
                continue;
            }
            app.handle_event(&event, now);
        }

        let input = input_system.snapshot(&event_pump.keyboard_state());
        app.update(&input, now);

        for cue in app.context_mut().drain_sounds() {
            audio.play(cue);
        }
        audio.set_volume(app.context().settings.volume());

        canvas.set_draw_color(Color::RGB(0, 0, 0));
        canvas.clear();
        app.draw(&mut canvas, &assets, now)?;
        canvas.present();

        // Cap frame rate
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / TARGET_FPS));
    }

    if let Some(store) = store {
        match store.save(&app.context().settings) {
            Ok(path) => info!(path = %path.display(), "settings saved"),
            Err(e) => warn!("could not save settings: {e}"),
        }
    }

    Ok(())
}
