//! Form input widgets. Each one reads the current value and pushes a
//! `FormMessage` into the outbox when the user changes it; none of them
//! mutate the draft directly.

use eframe::egui;
use form_core::{FormMessage, RatingPickerState, RATING_FACES};
use shared::domain::{Rating, RatingField, ReferralSource, TextField};

const INPUT_HEIGHT: f32 = 30.0;
const RATING_GLYPH_SIZE: f32 = 28.0;

pub fn field_label(ui: &mut egui::Ui, label: &str) {
    ui.label(egui::RichText::new(label).strong());
}

pub fn text_field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    field: TextField,
    current: &str,
    outbox: &mut Vec<FormMessage>,
) {
    field_label(ui, label);
    let mut value = current.to_string();
    let edit = egui::TextEdit::singleline(&mut value)
        .id_salt(field.wire_name())
        .hint_text(hint)
        .desired_width(f32::INFINITY);
    let response = ui.add_sized([ui.available_width(), INPUT_HEIGHT], edit);

    if response.changed() {
        outbox.push(FormMessage::SetText { field, value });
    }
    // Enter in a single-line input submits the form.
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        outbox.push(FormMessage::Submit);
    }
    ui.add_space(6.0);
}

pub fn text_area(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    field: TextField,
    current: &str,
    outbox: &mut Vec<FormMessage>,
) {
    field_label(ui, label);
    let mut value = current.to_string();
    let response = ui.add(
        egui::TextEdit::multiline(&mut value)
            .id_salt(field.wire_name())
            .hint_text(hint)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        outbox.push(FormMessage::SetText { field, value });
    }
    ui.add_space(6.0);
}

pub fn source_select(ui: &mut egui::Ui, current: ReferralSource, outbox: &mut Vec<FormMessage>) {
    field_label(ui, "How did you hear about us?");
    let mut selected = current;
    egui::ComboBox::from_id_salt("source_select")
        .selected_text(selected.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for source in ReferralSource::ALL {
                ui.selectable_value(&mut selected, source, source.label());
            }
        });

    if selected != current {
        outbox.push(FormMessage::SetText {
            field: TextField::Source,
            value: selected.as_wire().to_string(),
        });
    }
    ui.add_space(6.0);
}

/// Five clickable faces. Hover state lives in `state`, owned by the caller.
pub fn rating_picker(
    ui: &mut egui::Ui,
    field: RatingField,
    selected: Option<Rating>,
    state: &mut RatingPickerState,
    outbox: &mut Vec<FormMessage>,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 10.0;
        let mut hovered = None;

        for (index, face) in RATING_FACES.iter().enumerate() {
            let mut glyph = egui::RichText::new(face.glyph).size(RATING_GLYPH_SIZE);
            if let Some([r, g, b]) = state.color(index, selected) {
                glyph = glyph.color(egui::Color32::from_rgb(r, g, b));
            }

            let response = ui
                .add(egui::Label::new(glyph).sense(egui::Sense::click()))
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text(face.label);

            if response.hovered() {
                hovered = Some(index);
            }
            if response.clicked() {
                outbox.extend(state.click(field, index));
            }
        }

        if state.hovered() != hovered {
            state.set_hovered(hovered);
            ui.ctx().request_repaint();
        }
    });
}
