//! GUI module - egui-based settings editor

pub mod components;
pub mod constants;
pub mod dialog;
pub mod editor_state;
mod settings_window;

pub use settings_window::run_settings_editor;
