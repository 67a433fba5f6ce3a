//! Settings form component: three text fields plus Browse and Save

use eframe::egui;

use crate::gui::constants::*;
use crate::gui::editor_state::{EditorState, Field};

/// Button pressed this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Browse,
    Save,
}

/// Renders the form at fixed window positions
///
/// Only the focused field is interactive; focus itself is decided by the
/// caller through [`EditorState::apply`] before this runs.
pub fn ui(ui: &mut egui::Ui, state: &mut EditorState) -> FormAction {
    let mut action = FormAction::None;
    let label_color = ui.visuals().weak_text_color();

    for field in Field::ALL {
        let rect = field.rect();

        ui.painter().text(
            egui::pos2(LABEL_X, rect.min.y + LABEL_TEXT_OFFSET_Y),
            egui::Align2::LEFT_TOP,
            field.label(),
            egui::FontId::proportional(LABEL_FONT_SIZE),
            label_color,
        );

        let focused = state.is_focused(field);
        let mut response = ui.put(
            rect,
            egui::TextEdit::singleline(state.buffer_mut(field))
                .char_limit(field.char_limit())
                .interactive(focused),
        );
        if field == Field::Image {
            response = response.on_hover_text(state.buffer(Field::Image));
        }
        if focused && !response.has_focus() {
            response.request_focus();
        }

        if field == Field::Image {
            let browse_rect = egui::Rect::from_min_size(
                egui::pos2(rect.max.x + ITEM_SPACING, rect.min.y),
                egui::vec2(BROWSE_BUTTON_WIDTH, FIELD_HEIGHT),
            );
            if ui.put(browse_rect, egui::Button::new("Browse")).clicked() {
                action = FormAction::Browse;
            }
        }
    }

    let save_rect = egui::Rect::from_min_size(SAVE_BUTTON_POS.into(), SAVE_BUTTON_SIZE.into());
    if ui.put(save_rect, egui::Button::new("Save")).clicked() {
        action = FormAction::Save;
    }

    if let Some(status) = state.status() {
        ui.painter().text(
            egui::pos2(LABEL_X, STATUS_Y),
            egui::Align2::LEFT_TOP,
            status,
            egui::FontId::proportional(LABEL_FONT_SIZE - 2.0),
            STATUS_ERROR,
        );
    }

    action
}
