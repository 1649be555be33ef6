//! Texture loading
//!
//! Every image is optional. A missing or undecodable file is logged once and
//! the screens draw a flat-colour shape in its place, so the game runs from
//! an empty `assets/` directory.

use crate::cutscene::frame_path;
use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::path::Path;
use tracing::{debug, warn};

const IMAGE_DIR: &str = "assets/images";

pub struct Assets<'a> {
    pub menu_background: Option<Texture<'a>>,
    pub level_background: Option<Texture<'a>>,
    pub arena_background: Option<Texture<'a>>,
    pub ship: Option<Texture<'a>>,
    pub player: Option<Texture<'a>>,
    pub enemy: Option<Texture<'a>>,
    pub heart_drop: Option<Texture<'a>>,
    pub ammo_box: Option<Texture<'a>>,
    pub full_heart: Option<Texture<'a>>,
    pub empty_heart: Option<Texture<'a>>,
    pub ammo_symbol: Option<Texture<'a>>,
    pub cutscene_frames: Vec<Texture<'a>>,
}

/// Loads one texture, logging and returning `None` on failure
pub fn load_texture<'a>(creator: &'a TextureCreator<WindowContext>, path: &Path) -> Option<Texture<'a>> {
    match creator.load_texture(path) {
        Ok(texture) => {
            debug!(path = %path.display(), "loaded texture");
            Some(texture)
        }
        Err(e) => {
            warn!(path = %path.display(), "could not load texture, using a flat colour: {e}");
            None
        }
    }
}

impl<'a> Assets<'a> {
    /// Loads every texture the screens use plus `cutscene_frames` intro slides
    pub fn load(creator: &'a TextureCreator<WindowContext>, cutscene_frames: usize) -> Self {
        let image = |name: &str| load_texture(creator, &Path::new(IMAGE_DIR).join(name));

        let frames = (1..=cutscene_frames)
            .filter_map(|index| load_texture(creator, &frame_path(index)))
            .collect();

        Assets {
            menu_background: image("background_menu.png"),
            level_background: image("game_background.png"),
            arena_background: image("fundo_nave.png"),
            ship: image("nave.png"),
            player: image("player.png"),
            enemy: image("enemie.png"),
            heart_drop: image("heart_drop.png"),
            ammo_box: image("caixa_de_balas.png"),
            full_heart: image("suit_hearts.png"),
            empty_heart: image("suit_hearts_broken.png"),
            ammo_symbol: image("municao_simbolo.png"),
            cutscene_frames: frames,
        }
    }
}
