use std::path::PathBuf;

use eframe::egui;

use crate::{
    core::{
        charts::{
            ChartSize,
            ChartSlot,
            DEFAULT_CHART_SIZE,
        },
        filter::ClassFilter,
        session::{
            BatchRequest,
            BatchSession,
        },
        tasks::TaskManager,
    },
    gui::{
        chart_view::chart,
        results_table::results_table,
        theme::Theme,
    },
};

const CHART_GAP: f32 = 16.0;
const MIN_CHART_WIDTH: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    File,
    YouTube,
    Pasted,
}

impl SourceKind {
    const ALL: [SourceKind; 3] = [SourceKind::File, SourceKind::YouTube, SourceKind::Pasted];

    fn title(&self) -> &'static str {
        match self {
            SourceKind::File => "ไฟล์ (.csv / .txt)",
            SourceKind::YouTube => "ลิงก์ YouTube",
            SourceKind::Pasted => "วางข้อความ",
        }
    }
}

/// Everything the user typed or picked for the next batch request.
#[derive(Debug, Default)]
pub struct BatchInputs {
    pub source: SourceKind,
    pub file: Option<PathBuf>,
    pub youtube_url: String,
    pub pasted: String,
    pub export_status: Option<String>,
}

impl BatchInputs {
    pub fn select_file(&mut self, path: PathBuf) {
        self.source = SourceKind::File;
        self.file = Some(path);
    }

    /// `None` until the selected source has something to send.
    pub fn request(&self) -> Option<BatchRequest> {
        match self.source {
            SourceKind::File => self.file.clone().map(BatchRequest::File),
            SourceKind::YouTube => {
                let url = self.youtube_url.trim();
                (!url.is_empty()).then(|| BatchRequest::YouTube(url.to_string()))
            }
            SourceKind::Pasted => {
                let texts: Vec<String> = self
                    .pasted
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                (!texts.is_empty()).then_some(BatchRequest::Texts(texts))
            }
        }
    }
}

pub fn is_supported_upload(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "csv" | "txt"))
        .unwrap_or(false)
}

pub enum BatchAction {
    ExportTable,
    ExportImages,
}

pub fn batch_panel(
    ui: &mut egui::Ui,
    session: &mut BatchSession,
    inputs: &mut BatchInputs,
    task_manager: &TaskManager,
    theme: &Theme,
) -> Option<BatchAction> {
    ui.heading(theme.heading(ui.ctx(), "วิเคราะห์อารมณ์จากไฟล์"));
    ui.add_space(6.0);

    source_controls(ui, inputs);
    ui.add_space(6.0);

    let loading = session.is_loading();
    let request = inputs.request();
    ui.horizontal(|ui| {
        let can_submit = !loading && request.is_some();
        if ui.add_enabled(can_submit, egui::Button::new("อัปโหลดและวิเคราะห์")).clicked() {
            if let Some(request) = request {
                match session.begin_submit() {
                    Ok(()) => {
                        inputs.export_status = None;
                        task_manager.predict_batch(request);
                    }
                    Err(e) => tracing::debug!("Submit ignored: {}", e),
                }
            }
        }
        if loading {
            ui.add(egui::Spinner::new());
            ui.label("กำลังวิเคราะห์ไฟล์...");
        }
    });

    ui.add_space(10.0);

    if let Some(message) = session.state().error() {
        ui.colored_label(theme.red(ui.ctx()), message);
        return None;
    }

    let metadata = session.metadata_line()?;
    results_section(ui, session, inputs, theme, metadata)
}

fn source_controls(ui: &mut egui::Ui, inputs: &mut BatchInputs) {
    ui.horizontal(|ui| {
        for kind in SourceKind::ALL {
            ui.radio_value(&mut inputs.source, kind, kind.title());
        }
    });

    match inputs.source {
        SourceKind::File => {
            ui.horizontal(|ui| {
                if ui.button("เลือกไฟล์…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("ข้อความ", &["csv", "txt"])
                        .pick_file()
                    {
                        inputs.select_file(path);
                    }
                }
                match &inputs.file {
                    Some(path) => ui.label(path.display().to_string()),
                    None => ui.weak("ยังไม่ได้เลือกไฟล์"),
                };
            });
        }
        SourceKind::YouTube => {
            ui.add(
                egui::TextEdit::singleline(&mut inputs.youtube_url)
                    .hint_text("https://www.youtube.com/watch?v=...")
                    .desired_width(f32::INFINITY),
            );
        }
        SourceKind::Pasted => {
            ui.add(
                egui::TextEdit::multiline(&mut inputs.pasted)
                    .hint_text("หนึ่งข้อความต่อหนึ่งบรรทัด")
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
        }
    }
}

fn results_section(
    ui: &mut egui::Ui,
    session: &mut BatchSession,
    inputs: &mut BatchInputs,
    theme: &Theme,
    metadata: String,
) -> Option<BatchAction> {
    let mut action = None;

    ui.label(egui::RichText::new(metadata).color(theme.muted(ui.ctx())));
    ui.add_space(6.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        for line in session.stats().summary_lines() {
            ui.label(line);
        }
    });
    ui.add_space(10.0);

    let available = ui.available_width();
    let side_by_side = available >= MIN_CHART_WIDTH * 2.0 + CHART_GAP;
    let width = if side_by_side { (available - CHART_GAP) / 2.0 } else { available };
    if session.resize_charts(ChartSize {
        width: width.max(MIN_CHART_WIDTH) as u32,
        height: DEFAULT_CHART_SIZE.height,
    }) {
        tracing::debug!("Charts resized to {}px", width as u32);
    }

    let charts = session.charts();
    let draw_charts = |ui: &mut egui::Ui| {
        for slot in ChartSlot::ALL {
            if let Some(instance) = charts.get(slot) {
                chart(ui, instance);
            }
        }
    };
    if side_by_side {
        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = CHART_GAP;
            draw_charts(ui);
        });
    } else {
        ui.vertical(draw_charts);
    }

    ui.add_space(10.0);
    ui.separator();
    filter_controls(ui, session);
    ui.add_space(6.0);

    results_table(ui, &session.table(), theme);
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if ui.button("ดาวน์โหลดตาราง (CSV)").clicked() {
            action = Some(BatchAction::ExportTable);
        }
        if ui.button("ดาวน์โหลดกราฟ (PNG)").clicked() {
            action = Some(BatchAction::ExportImages);
        }
        if let Some(status) = &inputs.export_status {
            ui.colored_label(theme.green(ui.ctx()), status);
        }
    });

    action
}

fn filter_controls(ui: &mut egui::Ui, session: &mut BatchSession) {
    let filtered = !session.criteria().is_unfiltered();
    let mut reset = false;
    let criteria = session.criteria_mut();

    ui.horizontal_wrapped(|ui| {
        ui.label("อารมณ์:");
        egui::ComboBox::from_id_salt("class_filter")
            .selected_text(criteria.class.label())
            .show_ui(ui, |ui| {
                for option in ClassFilter::OPTIONS {
                    ui.selectable_value(&mut criteria.class, option, option.label());
                }
            });

        ui.add_space(8.0);
        ui.label("คำค้นหา:");
        ui.add(
            egui::TextEdit::singleline(&mut criteria.keyword)
                .hint_text("ค้นหาในข้อความ")
                .desired_width(180.0),
        );

        ui.add_space(8.0);
        ui.label("ความมั่นใจขั้นต่ำ:");
        ui.add(
            egui::Slider::new(&mut criteria.min_confidence_percent, 0.0..=100.0)
                .step_by(1.0)
                .suffix("%"),
        );

        ui.add_space(8.0);
        reset = ui.add_enabled(filtered, egui::Button::new("ล้างตัวกรอง")).clicked();
    });

    if reset {
        session.reset_filter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pasted_lines_skip_blanks() {
        let inputs = BatchInputs {
            source: SourceKind::Pasted,
            pasted: "ดีมาก\n\n  แย่มาก  \n".to_string(),
            ..Default::default()
        };
        assert_eq!(
            inputs.request(),
            Some(BatchRequest::Texts(vec!["ดีมาก".to_string(), "แย่มาก".to_string()]))
        );
    }

    #[test]
    fn test_nothing_to_send() {
        let mut inputs = BatchInputs::default();
        assert_eq!(inputs.request(), None);

        inputs.source = SourceKind::YouTube;
        inputs.youtube_url = "   ".to_string();
        assert_eq!(inputs.request(), None);
    }

    #[test]
    fn test_dropped_file_switches_source() {
        let mut inputs = BatchInputs { source: SourceKind::Pasted, ..Default::default() };
        inputs.select_file(PathBuf::from("/tmp/comments.csv"));
        assert_eq!(inputs.request(), Some(BatchRequest::File(PathBuf::from("/tmp/comments.csv"))));
    }

    #[test]
    fn test_supported_uploads() {
        assert!(is_supported_upload(std::path::Path::new("a.CSV")));
        assert!(is_supported_upload(std::path::Path::new("a.txt")));
        assert!(!is_supported_upload(std::path::Path::new("a.xlsx")));
    }
}
