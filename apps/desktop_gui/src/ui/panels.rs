use eframe::egui;
use form_core::{FormMessage, RatingPickerState};
use shared::domain::{FeedbackRecord, RatingField, ReferralSource, TextField};

use crate::ui::{theme, widgets};

const TERMS_LABEL: &str =
    "I agree to the Terms and Conditions and acknowledge the Privacy Policy.";

const RECORD_COLUMNS: [&str; 7] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Source",
    "Feedback",
    "Actions",
];

/// Read-only inputs for the form pane.
pub struct FormPanelProps<'a> {
    pub draft: &'a FeedbackRecord,
    pub is_editing: bool,
    pub submit_label: &'a str,
}

/// Widget state owned by the form pane itself.
#[derive(Debug, Default)]
pub struct FormPanelState {
    pub registration_picker: RatingPickerState,
    pub navigation_picker: RatingPickerState,
    // Shown on the form; submission does not require it.
    pub terms_acknowledged: bool,
}

pub fn form_panel(
    ui: &mut egui::Ui,
    props: FormPanelProps<'_>,
    state: &mut FormPanelState,
    outbox: &mut Vec<FormMessage>,
) {
    let draft = props.draft;

    ui.heading("User Registration Feedback");
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        widgets::text_field(
            &mut columns[0],
            "First Name",
            "Enter your first name",
            TextField::FirstName,
            &draft.first_name,
            outbox,
        );
        widgets::text_field(
            &mut columns[1],
            "Last Name",
            "Enter your last name",
            TextField::LastName,
            &draft.last_name,
            outbox,
        );
    });

    widgets::text_field(
        ui,
        "Email Address",
        "Enter your email",
        TextField::Email,
        &draft.email,
        outbox,
    );
    widgets::text_field(
        ui,
        "Phone Number",
        "Enter your phone number",
        TextField::Phone,
        &draft.phone,
        outbox,
    );
    widgets::source_select(ui, draft.source, outbox);

    ui.add_space(6.0);
    widgets::field_label(ui, "Rate your experience");
    ui.columns(2, |columns| {
        widgets::field_label(&mut columns[0], "Registration Process");
        widgets::rating_picker(
            &mut columns[0],
            RatingField::Registration,
            draft.registration_rating,
            &mut state.registration_picker,
            outbox,
        );
        widgets::field_label(&mut columns[1], "Website Navigation");
        widgets::rating_picker(
            &mut columns[1],
            RatingField::Navigation,
            draft.navigation_rating,
            &mut state.navigation_picker,
            outbox,
        );
    });
    ui.add_space(6.0);

    widgets::text_area(
        ui,
        "Feedback",
        "Please provide any feedback you have about your experience",
        TextField::Feedback,
        &draft.feedback,
        outbox,
    );

    ui.checkbox(&mut state.terms_acknowledged, TERMS_LABEL);
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let submit = egui::Button::new(egui::RichText::new(props.submit_label).strong());
        if ui.add(submit).clicked() {
            outbox.push(FormMessage::Submit);
        }
        if props.is_editing && ui.button("Cancel").clicked() {
            outbox.push(FormMessage::CancelEdit);
        }
    });
}

fn source_cell(source: ReferralSource) -> &'static str {
    match source {
        ReferralSource::Unset => "",
        other => other.label(),
    }
}

pub fn records_panel(
    ui: &mut egui::Ui,
    records: &[FeedbackRecord],
    edit_index: Option<usize>,
    outbox: &mut Vec<FormMessage>,
) {
    ui.heading("Feedback Records");
    ui.add_space(12.0);

    if records.is_empty() {
        ui.weak("No feedback has been submitted yet.");
        return;
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("feedback_records_table")
                .striped(true)
                .num_columns(RECORD_COLUMNS.len())
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    for title in RECORD_COLUMNS {
                        ui.label(egui::RichText::new(title).strong());
                    }
                    ui.end_row();

                    for (index, record) in records.iter().enumerate() {
                        let editing = edit_index == Some(index);
                        let cells = [
                            record.first_name.as_str(),
                            record.last_name.as_str(),
                            record.email.as_str(),
                            record.phone.as_str(),
                            source_cell(record.source),
                            record.feedback.as_str(),
                        ];
                        for cell in cells {
                            let text = egui::RichText::new(cell);
                            ui.label(if editing { text.italics() } else { text });
                        }

                        ui.horizontal(|ui| {
                            let edit = egui::Button::new(
                                egui::RichText::new("Edit").color(egui::Color32::BLACK),
                            )
                            .fill(theme::INFO_FILL);
                            if ui.add(edit).clicked() {
                                outbox.push(FormMessage::BeginEdit(index));
                            }

                            let delete = egui::Button::new(
                                egui::RichText::new("Delete").color(egui::Color32::WHITE),
                            )
                            .fill(theme::DANGER_FILL);
                            if ui.add(delete).clicked() {
                                outbox.push(FormMessage::Delete(index));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
}
