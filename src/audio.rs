//! Sound effects and background music
//!
//! Screens and the simulation never call the mixer. They push `SoundCue`s,
//! which the host loop drains once per frame and hands to `AudioSystem::play`.
//! When the audio device or a file is unavailable the game keeps running
//! silently; every failure is logged once at `warn!`.

use sdl2::mixer::{self, AUDIO_S16LSB, Channel, Chunk, DEFAULT_CHANNELS, InitFlag, Music, Sdl2MixerContext};
use std::collections::HashMap;
use tracing::{debug, warn};

const SHOT_SOUND: &str = "assets/sounds/laser_shot.wav";
const MIXER_CHANNELS: i32 = 16;

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Level,
    Boss,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 3] = [MusicTrack::Menu, MusicTrack::Level, MusicTrack::Boss];

    pub fn path(self) -> &'static str {
        match self {
            MusicTrack::Menu => "assets/sounds/menu_music.mp3",
            MusicTrack::Level => "assets/sounds/level_music.mp3",
            MusicTrack::Boss => "assets/sounds/boss_music.mp3",
        }
    }
}

/// A request to make a sound, queued by screens and played by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PlayerShot,
    /// Start looping `track` (no-op if it is already playing)
    Music(MusicTrack),
    /// Stop the music, fading out over `fade_ms` (0 stops at once)
    StopMusic { fade_ms: u32 },
}

/// Converts a `[0, 1]` volume to the mixer's `0..=128` scale
pub fn to_mixer_volume(volume: f32) -> i32 {
    let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    (volume * mixer::MAX_VOLUME as f32).round() as i32
}

pub struct AudioSystem {
    _context: Option<Sdl2MixerContext>,
    enabled: bool,
    shot: Option<Chunk>,
    tracks: HashMap<MusicTrack, Music<'static>>,
    current_track: Option<MusicTrack>,
    volume: f32,
}

impl AudioSystem {
    /// Opens the audio device and loads every sound.
    ///
    /// Never fails: without a device the returned system is silent.
    pub fn new(volume: f32) -> Self {
        let context = match mixer::init(InitFlag::MP3 | InitFlag::OGG) {
            Ok(context) => Some(context),
            Err(e) => {
                warn!("mixer codecs unavailable ({e}); compressed music may not play");
                None
            }
        };

        if let Err(e) = mixer::open_audio(44_100, AUDIO_S16LSB, DEFAULT_CHANNELS, 1_024) {
            warn!("could not open audio device ({e}); sound disabled");
            return AudioSystem::silent(context, volume);
        }
        mixer::allocate_channels(MIXER_CHANNELS);

        let shot = match Chunk::from_file(SHOT_SOUND) {
            Ok(chunk) => Some(chunk),
            Err(e) => {
                warn!(path = SHOT_SOUND, "could not load sound effect: {e}");
                None
            }
        };

        let mut tracks = HashMap::new();
        for track in MusicTrack::ALL {
            match Music::from_file(track.path()) {
                Ok(music) => {
                    tracks.insert(track, music);
                }
                Err(e) => warn!(path = track.path(), "could not load music: {e}"),
            }
        }

        let mut system = AudioSystem {
            _context: context,
            enabled: true,
            shot,
            tracks,
            current_track: None,
            volume: -1.0,
        };
        system.set_volume(volume);
        system
    }

    fn silent(context: Option<Sdl2MixerContext>, volume: f32) -> Self {
        AudioSystem {
            _context: context,
            enabled: false,
            shot: None,
            tracks: HashMap::new(),
            current_track: None,
            volume,
        }
    }

    /// Applies a master volume in `[0, 1]` to music and effects
    pub fn set_volume(&mut self, volume: f32) {
        if !self.enabled || volume == self.volume {
            return;
        }
        self.volume = volume;
        let level = to_mixer_volume(volume);
        Music::set_volume(level);
        if let Some(shot) = self.shot.as_mut() {
            shot.set_volume(level);
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        if !self.enabled {
            return;
        }

        match cue {
            SoundCue::PlayerShot => {
                if let Some(shot) = &self.shot {
                    // All channels busy just drops the shot
                    if let Err(e) = Channel::all().play(shot, 0) {
                        debug!("shot sound skipped: {e}");
                    }
                }
            }
            SoundCue::Music(track) => {
                if self.current_track == Some(track) && Music::is_playing() {
                    return;
                }
                self.current_track = Some(track);
                match self.tracks.get(&track) {
                    Some(music) => {
                        if let Err(e) = music.play(-1) {
                            warn!(?track, "could not play music: {e}");
                        }
                    }
                    None => Music::halt(),
                }
            }
            SoundCue::StopMusic { fade_ms } => {
                self.current_track = None;
                if fade_ms == 0 {
                    Music::halt();
                } else if let Err(e) = Music::fade_out(fade_ms as i32) {
                    debug!("music fade skipped: {e}");
                }
            }
        }
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        if self.enabled {
            Music::halt();
            self.tracks.clear();
            self.shot = None;
            mixer::close_audio();
        }
    }
}
