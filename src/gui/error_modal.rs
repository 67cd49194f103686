use eframe::egui;

use crate::core::SentimentError;

#[derive(Default, Clone)]
struct ErrorReport {
    title: String,
    message: String,
    details: Option<String>,
}

/// Blocking alert for failures that have no inline slot, such as exports.
pub struct ErrorModal {
    open: bool,
    report: ErrorReport,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self { open: false, report: ErrorReport::default() }
    }

    pub fn show_error(&mut self, title: impl Into<String>, error: &SentimentError) {
        self.report = ErrorReport {
            title: title.into(),
            message: error.inline_message(),
            details: Some(format!("{error:?}")),
        };
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(450.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").size(24.0).color(ui.visuals().error_fg_color));
                ui.label(egui::RichText::new(&self.report.title).size(18.0).strong());
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new(&self.report.message).size(14.0));

            if let Some(details) = &self.report.details {
                ui.add_space(10.0);
                ui.collapsing("รายละเอียด", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(4)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(15.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("ตกลง").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
            self.report = ErrorReport::default();
        }
    }
}

impl Default for ErrorModal {
    fn default() -> Self {
        Self::new()
    }
}
