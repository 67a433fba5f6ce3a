//! The persisted settings record

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::constants::defaults;

/// Image, duration and speed used for every peek
///
/// Fields missing from the file fall back to their defaults individually,
/// so a hand-edited config with only `"image"` still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to a PNG/JPEG/BMP image. Existence is checked when a peek starts.
    #[serde(default = "default_image")]
    pub image: String,

    /// Total peek runtime in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Multiplier for the per-frame slide distance
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_image() -> String {
    defaults::IMAGE.to_string()
}

fn default_duration() -> f64 {
    defaults::DURATION_SECS
}

fn default_speed() -> f64 {
    defaults::SPEED
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image: default_image(),
            duration: default_duration(),
            speed: default_speed(),
        }
    }
}

impl Settings {
    /// Total runtime as a `Duration`. Values that cannot be represented
    /// (negative, NaN) become zero, which ends the peek on its first frame.
    pub fn total_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration).unwrap_or(Duration::ZERO)
    }

    /// Replace values that would make the animation meaningless
    /// Called after loading from disk
    pub fn validate_and_clamp(&mut self) {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            warn!(duration = self.duration, using = defaults::DURATION_SECS, "duration must be a positive number, using default");
            self.duration = defaults::DURATION_SECS;
        }

        if !self.speed.is_finite() || self.speed <= 0.0 {
            warn!(speed = self.speed, using = defaults::SPEED, "speed must be a positive number, using default");
            self.speed = defaults::SPEED;
        }
    }

    /// Apply one-off command-line overrides
    /// Empty images and non-positive numbers leave the stored value in place
    pub fn with_overrides(mut self, image: Option<&str>, duration: Option<f64>, speed: Option<f64>) -> Self {
        if let Some(image) = image.filter(|i| !i.is_empty()) {
            self.image = image.to_string();
        }
        if let Some(duration) = duration.filter(|d| *d > 0.0) {
            self.duration = duration;
        }
        if let Some(speed) = speed.filter(|s| *s > 0.0) {
            self.speed = speed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bundled_values() {
        let settings = Settings::default();
        assert_eq!(settings.image, "assets/photo.png");
        assert_eq!(settings.duration, 3.0);
        assert_eq!(settings.speed, 1.5);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"image":"cat.png"}"#).unwrap();
        assert_eq!(settings.image, "cat.png");
        assert_eq!(settings.duration, 3.0);
        assert_eq!(settings.speed, 1.5);
    }

    #[test]
    fn test_validate_replaces_non_positive_values() {
        let mut settings = Settings {
            image: "cat.png".to_string(),
            duration: -1.0,
            speed: 0.0,
        };
        settings.validate_and_clamp();
        assert_eq!(settings.duration, 3.0);
        assert_eq!(settings.speed, 1.5);
        assert_eq!(settings.image, "cat.png");
    }

    #[test]
    fn test_validate_keeps_valid_values() {
        let mut settings = Settings {
            image: "cat.png".to_string(),
            duration: 0.5,
            speed: 12.0,
        };
        settings.validate_and_clamp();
        assert_eq!(settings.duration, 0.5);
        assert_eq!(settings.speed, 12.0);
    }

    #[test]
    fn test_overrides_only_apply_meaningful_values() {
        let base = Settings::default();

        let unchanged = base.clone().with_overrides(Some(""), Some(0.0), Some(-2.0));
        assert_eq!(unchanged, base);

        let changed = base.with_overrides(Some("dog.jpg"), Some(5.0), Some(2.0));
        assert_eq!(changed.image, "dog.jpg");
        assert_eq!(changed.duration, 5.0);
        assert_eq!(changed.speed, 2.0);
    }

    #[test]
    fn test_total_duration_of_invalid_value_is_zero() {
        let settings = Settings {
            duration: -3.0,
            ..Settings::default()
        };
        assert_eq!(settings.total_duration(), Duration::ZERO);

        let settings = Settings {
            duration: 1.5,
            ..Settings::default()
        };
        assert_eq!(settings.total_duration(), Duration::from_millis(1500));
    }
}
