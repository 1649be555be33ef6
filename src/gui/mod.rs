//! Screen-space GUI
//!
//! The menu and settings screens, built from a shared [`Button`](button::Button) widget.
//! Everything here uses logical screen coordinates (1280x720); SDL2 maps
//! mouse positions into that space because the canvas has a logical size.
//!
//! # Available Components
//!
//! - [`Button`](button::Button) - hoverable, clickable text button
//! - [`MenuScreen`] - title and Start / Settings / Exit
//! - [`SettingsScreen`] - volume slider, language choice, credits

pub mod button;
pub mod menu;
pub mod settings;

pub use menu::MenuScreen;
pub use settings::SettingsScreen;
