//! Settings window implemented with egui/eframe

use anyhow::{anyhow, Result};
use eframe::{egui, NativeOptions};
use std::sync::mpsc;
use tracing::{debug, info};

use super::components::settings_editor::{self, FormAction};
use super::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use super::dialog;
use super::editor_state::{EditorState, FocusEvent, SaveOutcome};
use crate::config::{ConfigStore, Settings};

struct SettingsApp {
    store: ConfigStore,
    settings: Settings,
    state: EditorState,
    committed: mpsc::Sender<Settings>,
    saved: bool,
}

impl SettingsApp {
    fn new(store: ConfigStore, committed: mpsc::Sender<Settings>) -> Self {
        let settings = store.load();
        let state = EditorState::from_settings(&settings);
        Self {
            store,
            settings,
            state,
            committed,
            saved: false,
        }
    }

    /// Translate this frame's raw input into focus transitions
    fn process_focus_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| {
            let mut events = Vec::new();
            if i.pointer.primary_pressed() {
                if let Some(pos) = i.pointer.press_origin() {
                    events.push(FocusEvent::PointerPressed(pos));
                }
            }
            if i.key_pressed(egui::Key::Tab) {
                events.push(FocusEvent::FocusNext);
            }
            if i.key_pressed(egui::Key::Escape) {
                events.push(FocusEvent::ClearFocus);
            }
            events
        });

        for event in events {
            let before = self.state.focus();
            self.state.apply(event);
            if self.state.focus() != before {
                debug!(from = ?before, to = ?self.state.focus(), "Focus changed");
            }
        }
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            if !self.saved {
                info!("Settings window closed without saving");
            }
            return;
        }

        self.process_focus_input(ctx);

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| settings_editor::ui(ui, &mut self.state))
            .inner;

        match action {
            FormAction::Browse => {
                // Blocks this window until the dialog resolves
                let outcome = dialog::browse_for_image();
                self.state.apply_browse(outcome);
            }
            FormAction::Save => {
                if self.state.save(&mut self.settings, &self.store) == SaveOutcome::Committed {
                    info!(image = %self.settings.image, duration = self.settings.duration, speed = self.settings.speed, "Settings saved");
                    self.saved = true;
                    // Receiver lives until run_settings_editor returns
                    let _ = self.committed.send(self.settings.clone());
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
            FormAction::None => {}
        }
    }
}

/// Open the settings window and block until it closes
///
/// Returns the committed settings, which hold the user's edit even when
/// writing the config file failed. `None` means the window was closed
/// without saving.
pub fn run_settings_editor(store: ConfigStore) -> Result<Option<Settings>> {
    info!(path = %store.path().display(), "Opening settings editor");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false)
            .with_title("ArloPeeker Settings"),
        ..Default::default()
    };

    let (committed_tx, committed_rx) = mpsc::channel();
    eframe::run_native(
        "ArloPeeker Settings",
        options,
        Box::new(|_cc| Ok(Box::new(SettingsApp::new(store, committed_tx)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings window: {err}"))?;

    Ok(committed_rx.try_iter().last())
}
