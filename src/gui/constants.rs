//! GUI-specific constants for layout and status colors

use egui;

/// Settings window dimensions (fixed size)
pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 300.0;

/// Form layout, in window coordinates
pub const MARGIN_TOP: f32 = 25.0;
pub const LABEL_X: f32 = 20.0;
pub const LABEL_TEXT_OFFSET_Y: f32 = 8.0;
pub const FIELD_X: f32 = 140.0;
pub const FIELD_WIDTH: f32 = 240.0;
pub const FIELD_HEIGHT: f32 = 30.0;
pub const ROW_SPACING: f32 = 50.0;
pub const ITEM_SPACING: f32 = 10.0;

pub const BROWSE_BUTTON_WIDTH: f32 = 90.0;
pub const SAVE_BUTTON_POS: [f32; 2] = [200.0, 200.0];
pub const SAVE_BUTTON_SIZE: [f32; 2] = [100.0, 40.0];
pub const STATUS_Y: f32 = 255.0;

pub const LABEL_FONT_SIZE: f32 = 16.0;

/// Input limits per field
pub const IMAGE_CHAR_LIMIT: usize = 512;
pub const NUMBER_CHAR_LIMIT: usize = 64;

/// Status colors
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Extensions offered by the Browse dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];
