use eframe::egui;

use crate::{
    core::{
        session::{
            confidence_bars,
            FlowState,
            TextSession,
        },
        tasks::TaskManager,
        PredictionResult,
    },
    gui::theme::{
        rgb,
        Theme,
    },
};

pub fn text_panel(
    ui: &mut egui::Ui,
    session: &mut TextSession,
    task_manager: &TaskManager,
    theme: &Theme,
) {
    ui.heading(theme.heading(ui.ctx(), "วิเคราะห์อารมณ์จากข้อความ"));
    ui.add_space(6.0);

    ui.add(
        egui::TextEdit::multiline(&mut session.input)
            .hint_text("พิมพ์ข้อความภาษาไทยที่นี่...")
            .desired_rows(5)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    let loading = session.state().is_loading();
    ui.horizontal(|ui| {
        if ui.add_enabled(!loading, egui::Button::new("วิเคราะห์")).clicked() {
            match session.begin_submit() {
                Ok(text) => task_manager.predict_text(text),
                Err(e) => tracing::debug!("Submit ignored: {}", e),
            }
        }
        if loading {
            ui.add(egui::Spinner::new());
            ui.label("กำลังวิเคราะห์...");
        }
    });

    ui.add_space(10.0);

    match session.state() {
        FlowState::Success(result) => result_card(ui, result, theme),
        FlowState::Error(message) => {
            ui.colored_label(theme.red(ui.ctx()), message);
        }
        FlowState::Idle | FlowState::Loading => {}
    }
}

fn result_card(ui: &mut egui::Ui, result: &PredictionResult, theme: &Theme) {
    egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(12)).show(ui, |ui| {
        ui.set_width(ui.available_width());

        egui::Grid::new("text_result_grid").num_columns(2).spacing([10.0, 6.0]).show(ui, |ui| {
            ui.label(theme.heading(ui.ctx(), "ข้อความ:"));
            ui.label(&result.text);
            ui.end_row();

            ui.label(theme.heading(ui.ctx(), "อารมณ์:"));
            ui.label(theme.bold(ui.ctx(), &result.sentiment.to_string()));
            ui.end_row();

            if let Some(summary) = &result.summary {
                ui.label(theme.heading(ui.ctx(), "สรุป:"));
                ui.label(summary);
                ui.end_row();
            }
        });

        ui.add_space(8.0);
        ui.label(theme.heading(ui.ctx(), "ความมั่นใจ:"));

        for bar in confidence_bars(result) {
            ui.horizontal(|ui| {
                ui.add_sized([120.0, 18.0], egui::Label::new(&bar.label));
                ui.add(
                    egui::ProgressBar::new((bar.percent / 100.0) as f32)
                        .fill(rgb(bar.color))
                        .text(bar.formatted()),
                );
            });
        }
    });
}
