//! HUD components
//!
//! Stateless, procedurally drawn pieces of the in-game HUD. They hold only
//! style; the values to show are passed to `render` every frame.
//!
//! - [`HealthBar`] - the boss health bar

pub mod health_bar;

pub use health_bar::{HealthBar, HealthBarStyle};
