// Gameplay module - the side-scrolling level and the boss arena
//
// This module contains:
// - state.rs: GameplayState, its play phases and input handling
// - level.rs: trench generation, ship trigger and boss arena setup
// - update.rs: the per-frame simulation step
// - render.rs: drawing the world, HUD and overlays
//
// Everything except render.rs is free of SDL2 types.

pub mod level;
pub mod render;
pub mod state;
pub mod update;

pub use state::{GameMode, GameplayOutcome, GameplayState};
