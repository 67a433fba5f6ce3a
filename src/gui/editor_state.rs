//! Interaction state of the settings form, independent of rendering
//!
//! Focus is an explicit state machine: [`next_focus`] maps the previous
//! focus and one input event to the next focus. At most one field is
//! focused at any time.

use egui::{Pos2, Rect};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use super::constants::{FIELD_HEIGHT, FIELD_WIDTH, FIELD_X, IMAGE_CHAR_LIMIT, MARGIN_TOP, NUMBER_CHAR_LIMIT, ROW_SPACING};
use super::dialog::BrowseOutcome;
use crate::config::{ConfigStore, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Image,
    Duration,
    Speed,
}

impl Field {
    /// Top-to-bottom form order
    pub const ALL: [Field; 3] = [Field::Image, Field::Duration, Field::Speed];

    pub fn label(self) -> &'static str {
        match self {
            Field::Image => "Image Path:",
            Field::Duration => "Duration (sec):",
            Field::Speed => "Speed:",
        }
    }

    pub fn char_limit(self) -> usize {
        match self {
            Field::Image => IMAGE_CHAR_LIMIT,
            Field::Duration | Field::Speed => NUMBER_CHAR_LIMIT,
        }
    }

    /// Text box rectangle in window coordinates
    pub fn rect(self) -> Rect {
        let row = match self {
            Field::Image => 0.0,
            Field::Duration => 1.0,
            Field::Speed => 2.0,
        };
        Rect::from_min_size(
            egui::pos2(FIELD_X, MARGIN_TOP + row * ROW_SPACING),
            egui::vec2(FIELD_WIDTH, FIELD_HEIGHT),
        )
    }

    fn next(self) -> Field {
        match self {
            Field::Image => Field::Duration,
            Field::Duration => Field::Speed,
            Field::Speed => Field::Image,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Image => "image",
            Field::Duration => "duration",
            Field::Speed => "speed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusEvent {
    /// Primary button pressed at a window position
    PointerPressed(Pos2),
    /// Tab
    FocusNext,
    /// Escape
    ClearFocus,
}

/// Field under `pos`, if any
pub fn hit_test(pos: Pos2) -> Option<Field> {
    Field::ALL.into_iter().find(|field| field.rect().contains(pos))
}

pub fn next_focus(previous: Option<Field>, event: FocusEvent) -> Option<Field> {
    match event {
        FocusEvent::PointerPressed(pos) => hit_test(pos),
        FocusEvent::FocusNext => Some(previous.map_or(Field::Image, Field::next)),
        FocusEvent::ClearFocus => None,
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{field} must be a number, got {input:?}")]
    NotANumber { field: Field, input: String },
    #[error("{field} must be a positive number, got {value}")]
    OutOfRange { field: Field, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Values committed; the window should close
    Committed,
    /// Input rejected; nothing written
    Rejected(FormError),
}

/// Text buffers and focus of one settings window
#[derive(Debug, Clone)]
pub struct EditorState {
    image: String,
    duration: String,
    speed: String,
    focus: Option<Field>,
    status: Option<String>,
}

impl EditorState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            image: settings.image.clone(),
            duration: format!("{:.2}", settings.duration),
            speed: format!("{:.2}", settings.speed),
            focus: Some(Field::Image),
            status: None,
        }
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn is_focused(&self, field: Field) -> bool {
        self.focus == Some(field)
    }

    pub fn apply(&mut self, event: FocusEvent) {
        self.focus = next_focus(self.focus, event);
    }

    pub fn buffer(&self, field: Field) -> &str {
        match field {
            Field::Image => &self.image,
            Field::Duration => &self.duration,
            Field::Speed => &self.speed,
        }
    }

    pub fn buffer_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Image => &mut self.image,
            Field::Duration => &mut self.duration,
            Field::Speed => &mut self.speed,
        }
    }

    /// Last rejected save, shown under the form
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn apply_browse(&mut self, outcome: BrowseOutcome) {
        match outcome {
            BrowseOutcome::Selected(path) => {
                info!(path = %path, "Image selected");
                self.image = path;
            }
            BrowseOutcome::Cancelled => info!("File dialog cancelled"),
            BrowseOutcome::Failed(reason) => warn!(reason = %reason, "File dialog error"),
        }
    }

    /// Parse the buffers into a settings record
    pub fn parse(&self) -> Result<Settings, FormError> {
        Ok(Settings {
            image: self.image.clone(),
            duration: parse_positive(Field::Duration, &self.duration)?,
            speed: parse_positive(Field::Speed, &self.speed)?,
        })
    }

    /// Validate, commit into `settings` and persist through `store`
    ///
    /// A failed write is logged but still commits: the in-memory settings
    /// keep the new values.
    pub fn save(&mut self, settings: &mut Settings, store: &ConfigStore) -> SaveOutcome {
        match self.parse() {
            Ok(parsed) => {
                *settings = parsed;
                if let Err(err) = store.save(settings) {
                    error!(error = ?err, "Failed to save config");
                }
                self.status = None;
                SaveOutcome::Committed
            }
            Err(err) => {
                error!(error = %err, "Invalid input, settings not saved");
                self.status = Some(err.to_string());
                SaveOutcome::Rejected(err)
            }
        }
    }
}

fn parse_positive(field: Field, input: &str) -> Result<f64, FormError> {
    let value: f64 = input.trim().parse().map_err(|_| FormError::NotANumber {
        field,
        input: input.to_string(),
    })?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FormError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn center(field: Field) -> Pos2 {
        field.rect().center()
    }

    fn state() -> EditorState {
        EditorState::from_settings(&Settings::default())
    }

    #[test]
    fn test_initial_state_formats_numbers_and_focuses_image() {
        let state = state();
        assert_eq!(state.buffer(Field::Image), "assets/photo.png");
        assert_eq!(state.buffer(Field::Duration), "3.00");
        assert_eq!(state.buffer(Field::Speed), "1.50");
        assert_eq!(state.focus(), Some(Field::Image));
    }

    #[test]
    fn test_hit_test_maps_rows_to_fields() {
        assert_eq!(hit_test(egui::pos2(150.0, 30.0)), Some(Field::Image));
        assert_eq!(hit_test(egui::pos2(150.0, 80.0)), Some(Field::Duration));
        assert_eq!(hit_test(egui::pos2(370.0, 150.0)), Some(Field::Speed));
        // label column and the gaps between rows
        assert_eq!(hit_test(egui::pos2(20.0, 30.0)), None);
        assert_eq!(hit_test(egui::pos2(150.0, 65.0)), None);
    }

    #[test]
    fn test_clicking_second_field_moves_focus() {
        let mut state = state();
        state.apply(FocusEvent::PointerPressed(center(Field::Duration)));
        assert_eq!(state.focus(), Some(Field::Duration));

        state.apply(FocusEvent::PointerPressed(center(Field::Speed)));
        assert!(!state.is_focused(Field::Duration));
        assert!(state.is_focused(Field::Speed));
        assert_eq!(Field::ALL.iter().filter(|f| state.is_focused(**f)).count(), 1);
    }

    #[test]
    fn test_click_outside_clears_focus() {
        let mut state = state();
        state.apply(FocusEvent::PointerPressed(egui::pos2(250.0, 220.0)));
        assert_eq!(state.focus(), None);
        assert!(Field::ALL.iter().all(|f| !state.is_focused(*f)));
    }

    #[test]
    fn test_tab_cycles_and_escape_clears() {
        assert_eq!(next_focus(None, FocusEvent::FocusNext), Some(Field::Image));
        assert_eq!(next_focus(Some(Field::Image), FocusEvent::FocusNext), Some(Field::Duration));
        assert_eq!(next_focus(Some(Field::Speed), FocusEvent::FocusNext), Some(Field::Image));
        assert_eq!(next_focus(Some(Field::Duration), FocusEvent::ClearFocus), None);
    }

    #[test]
    fn test_browse_outcomes() {
        let mut state = state();
        state.apply_browse(BrowseOutcome::Cancelled);
        assert_eq!(state.buffer(Field::Image), "assets/photo.png");

        state.apply_browse(BrowseOutcome::Failed("non-UTF-8 path".to_string()));
        assert_eq!(state.buffer(Field::Image), "assets/photo.png");

        state.apply_browse(BrowseOutcome::Selected("/tmp/arlo.png".to_string()));
        assert_eq!(state.buffer(Field::Image), "/tmp/arlo.png");
    }

    #[test]
    fn test_parse_accepts_surrounding_whitespace() {
        let mut state = state();
        *state.buffer_mut(Field::Duration) = " 4.5 ".to_string();
        *state.buffer_mut(Field::Speed) = "2".to_string();

        let parsed = state.parse().unwrap();
        assert_eq!(parsed.duration, 4.5);
        assert_eq!(parsed.speed, 2.0);
    }

    #[test]
    fn test_parse_rejects_non_numbers_and_non_positive() {
        let mut state = state();
        *state.buffer_mut(Field::Speed) = "fast".to_string();
        assert_eq!(
            state.parse(),
            Err(FormError::NotANumber { field: Field::Speed, input: "fast".to_string() })
        );

        *state.buffer_mut(Field::Speed) = "1".to_string();
        *state.buffer_mut(Field::Duration) = "-2".to_string();
        assert_eq!(
            state.parse(),
            Err(FormError::OutOfRange { field: Field::Duration, value: -2.0 })
        );

        *state.buffer_mut(Field::Duration) = "inf".to_string();
        assert!(matches!(state.parse(), Err(FormError::OutOfRange { .. })));
    }

    #[test]
    fn test_rejected_save_leaves_disk_and_settings_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let mut settings = Settings::default();
        store.save(&settings).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let mut state = EditorState::from_settings(&settings);
        *state.buffer_mut(Field::Image) = "other.png".to_string();
        *state.buffer_mut(Field::Duration) = "three".to_string();

        let outcome = state.save(&mut settings, &store);
        assert!(matches!(outcome, SaveOutcome::Rejected(FormError::NotANumber { field: Field::Duration, .. })));
        assert_eq!(settings, Settings::default());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert!(state.status().is_some_and(|s| s.contains("duration")));
    }

    #[test]
    fn test_successful_save_commits_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let mut settings = Settings::default();

        let mut state = EditorState::from_settings(&settings);
        *state.buffer_mut(Field::Image) = "arlo.jpg".to_string();
        *state.buffer_mut(Field::Duration) = "5".to_string();
        *state.buffer_mut(Field::Speed) = "0.75".to_string();

        assert_eq!(state.save(&mut settings, &store), SaveOutcome::Committed);
        let expected = Settings {
            image: "arlo.jpg".to_string(),
            duration: 5.0,
            speed: 0.75,
        };
        assert_eq!(settings, expected);
        assert_eq!(store.load(), expected);
        assert_eq!(state.status(), None);
    }

    #[test]
    fn test_save_commits_even_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = ConfigStore::at(blocker.join("config.json"));

        let mut settings = Settings::default();
        let mut state = EditorState::from_settings(&settings);
        *state.buffer_mut(Field::Speed) = "4".to_string();

        assert_eq!(state.save(&mut settings, &store), SaveOutcome::Committed);
        assert_eq!(settings.speed, 4.0);
    }
}
