use std::f32::consts::{
    FRAC_PI_2,
    TAU,
};

use eframe::egui::{
    self,
    Color32,
    Pos2,
    Shape,
    Stroke,
};
use egui_plot::{
    Bar,
    BarChart,
    Plot,
};

use crate::{
    core::{
        charts::{
            ChartInstance,
            ChartKind,
        },
        models::format_percent,
    },
    gui::theme::rgb,
};

const EMPTY_PIE: Color32 = Color32::from_gray(160);
const SLICE_STEP: f32 = 0.05;

pub fn chart(ui: &mut egui::Ui, instance: &ChartInstance) {
    ui.vertical(|ui| {
        ui.set_width(instance.size.width as f32);
        ui.strong(&instance.spec.title);
        match instance.spec.kind {
            ChartKind::Pie => pie(ui, instance),
            ChartKind::Bar => bars(ui, instance),
        }
    });
}

fn pie(ui: &mut egui::Ui, instance: &ChartInstance) {
    let spec = &instance.spec;
    let legend_height = 22.0 * spec.points.len() as f32;
    let side = (instance.size.height as f32 - legend_height).min(instance.size.width as f32);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = side * 0.45;
    let total = spec.total();

    if total <= 0.0 {
        painter.circle_filled(center, radius, EMPTY_PIE);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "ไม่มีข้อมูล",
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );
    } else {
        // Clockwise from twelve o'clock, same as the exported image.
        let mut start = -FRAC_PI_2;
        for point in &spec.points {
            let sweep = (point.value / total) as f32 * TAU;
            slice(&painter, center, radius, start, sweep, rgb(point.color));
            start += sweep;
        }
    }

    for point in &spec.points {
        let share = if total > 0.0 { point.value / total * 100.0 } else { 0.0 };
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("■").color(rgb(point.color)));
            ui.label(format!("{}: {} ({})", point.label, point.value, format_percent(share)));
        });
    }
}

/// Triangle fan, so slices wider than half the pie stay convex.
fn slice(painter: &egui::Painter, center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) {
    let at = |angle: f32| center + radius * egui::vec2(angle.cos(), angle.sin());
    let steps = (sweep / SLICE_STEP).ceil().max(1.0) as usize;
    let step = sweep / steps as f32;

    for i in 0..steps {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        painter.add(Shape::convex_polygon(vec![center, at(a0), at(a1)], fill, Stroke::NONE));
    }
}

fn bars(ui: &mut egui::Ui, instance: &ChartInstance) {
    let spec = &instance.spec;
    let labels: Vec<String> = spec.points.iter().map(|p| p.label.clone()).collect();
    let chart_bars: Vec<Bar> = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(i as f64, p.value).width(0.6).fill(rgb(p.color)).name(&p.label)
        })
        .collect();

    let (min, max) = spec.value_range.unwrap_or((0.0, 100.0));

    Plot::new(format!("confidence_chart_{}", instance.id))
        .width(instance.size.width as f32)
        .height(instance.size.height as f32 - 24.0)
        .include_y(min)
        .include_y(max)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_formatter(|mark, _| format!("{}%", mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(spec.series_label.clone(), chart_bars));
        });
}
