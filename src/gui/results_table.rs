use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::{
    core::table::{
        TableView,
        TABLE_HEADERS,
    },
    gui::theme::Theme,
};

pub fn results_table(ui: &mut egui::Ui, view: &TableView, theme: &Theme) {
    ui.label(egui::RichText::new(view.info()).color(theme.muted(ui.ctx())));
    ui.add_space(4.0);

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);
    let rows = view.result_rows();
    let table_width = ui.available_width();

    TableBuilder::new(ui)
        .id_salt("results_table")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(240.0).clip(true))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .max_scroll_height(420.0)
        .header(25.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), title));
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let result = rows[row.index()];
                row.col(|ui| {
                    ui.label(&result.text).on_hover_text(&result.text);
                });
                row.col(|ui| {
                    ui.label(&result.sentiment);
                });
                row.col(|ui| {
                    ui.label(&result.confidence);
                });
            });
        });

    // Spans all three columns, so it sits outside the column grid.
    if let Some(message) = view.placeholder() {
        egui::Frame::new().fill(ui.visuals().faint_bg_color).inner_margin(egui::Margin::same(6)).show(
            ui,
            |ui| {
                ui.set_width(table_width);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(message).italics());
                });
            },
        );
    }
}
