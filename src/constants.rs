//! Application-wide constants
//!
//! Magic numbers and string literals shared between the tray, the peek
//! window and the settings editor.

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "arlopeeker";

    /// Settings file name
    pub const FILENAME: &str = "config.json";
}

/// Values used when no usable config file exists
pub mod defaults {
    /// Image shipped next to the executable
    pub const IMAGE: &str = "assets/photo.png";

    /// Total peek runtime in seconds
    pub const DURATION_SECS: f64 = 3.0;

    /// Slide speed multiplier
    pub const SPEED: f64 = 1.5;
}

/// Peek animation constants
pub mod peek {
    /// Fixed simulation and repaint rate
    pub const TARGET_FPS: u64 = 60;

    /// Pixels moved per frame for a speed of 1.0
    pub const STEP_PER_SPEED: f32 = 5.0;

    /// Bounding box the displayed image is scaled down into
    pub const MAX_IMAGE_SIZE: f32 = 600.0;

    /// Vertical offset of the image inside the peek window
    pub const IMAGE_TOP_OFFSET: f32 = 100.0;

    /// Screen position of the peek window's top-left corner (left edge)
    pub const WINDOW_X: f32 = 0.0;
    pub const WINDOW_Y: f32 = 100.0;
}

/// Tray presentation
pub mod tray {
    pub const ID: &str = "arlo-peeker";
    pub const TITLE: &str = "ArloPeeker";
    pub const TOOLTIP: &str = "Arlo Peeker";

    /// Themed icon used when the embedded pixmap fails to decode
    pub const FALLBACK_ICON_NAME: &str = "face-smile";
}

/// Command-line flags used when spawning child windows
pub mod cli {
    pub const PEEK: &str = "--peek";
    pub const SETTINGS: &str = "--settings";
    pub const IMAGE: &str = "--image";
    pub const DURATION: &str = "--duration";
    pub const SPEED: &str = "--speed";
}
