mod modals;

use std::{
    fs,
    mem,
    sync::Arc,
    time::Duration,
};

use eframe::egui::{
    self,
    Id,
};
use modals::Modals;

use super::{
    batch_panel::{
        batch_panel,
        is_supported_upload,
        BatchAction,
        BatchInputs,
    },
    settings::{
        data::SETTINGS_FILE,
        SettingsData,
    },
    text_panel::text_panel,
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::TopBar,
    Tab,
};
use crate::{
    core::{
        http::SentimentClient,
        session::{
            BatchSession,
            TextSession,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
        SentimentError,
    },
    persistence::save_json,
};

/// Thai-capable fonts shipped with common desktops, tried in order.
const THAI_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
    "/usr/share/fonts/truetype/tlwg/Loma.ttf",
    "/System/Library/Fonts/Supplemental/Thonburi.ttc",
    "/System/Library/Fonts/Thonburi.ttc",
    "C:\\Windows\\Fonts\\LeelawUI.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
];

const LOADING_REPAINT: Duration = Duration::from_millis(100);

pub struct SentimentApp {
    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub active_tab: Tab,
    pub theme: Theme,
    pub batch_inputs: BatchInputs,

    // Flows
    pub text: TextSession,
    pub batch: BatchSession,

    // Modals
    pub modals: Modals,

    task_manager: TaskManager,
}

impl SentimentApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
    ) -> Result<Self, SentimentError> {
        let client = SentimentClient::new(settings_data.api_base_url.clone())?;
        let task_manager = TaskManager::new(client)?;

        let app = Self {
            settings_data,
            active_tab: Tab::default(),
            theme: Theme::dracula(),
            batch_inputs: BatchInputs::default(),
            text: TextSession::new(),
            batch: BatchSession::new(),
            modals: Modals::default(),
            task_manager,
        };

        app.setup_fonts(cc);
        set_theme(&cc.egui_ctx, &app.theme);
        apply_dark_mode(&cc.egui_ctx, app.settings_data.dark_mode);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        Ok(app)
    }

    fn setup_fonts(&self, cc: &eframe::CreationContext<'_>) {
        let Some((path, bytes)) =
            THAI_FONT_CANDIDATES.iter().find_map(|path| fs::read(path).ok().map(|b| (*path, b)))
        else {
            tracing::warn!("No Thai font found; Thai text may render as boxes");
            return;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert("thai".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));

        // Default fonts keep Latin and symbols; Thai fills in what they lack.
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push("thai".to_owned());
        }

        cc.egui_ctx.set_fonts(fonts);
        tracing::info!("Loaded Thai font from {}", path);
    }
}

impl eframe::App for SentimentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();

        for result in task_results {
            self.handle_task_result(result);
        }

        let busy = self.text.state().is_loading() || self.batch.is_loading();
        if busy {
            ctx.request_repaint_after(LOADING_REPAINT);
        }

        self.handle_file_drops(ctx);
        self.draw_file_drop_overlay(ctx);

        TopBar::show(
            ctx,
            &mut self.active_tab,
            &mut self.modals.service_settings,
            &self.settings_data,
            busy,
        );
        self.sync_dark_mode(ctx);

        let mut batch_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                match self.active_tab {
                    Tab::Text => text_panel(ui, &mut self.text, &self.task_manager, &self.theme),
                    Tab::Batch => {
                        batch_action = batch_panel(
                            ui,
                            &mut self.batch,
                            &mut self.batch_inputs,
                            &self.task_manager,
                            &self.theme,
                        );
                    }
                }
            });
        });

        if let Some(action) = batch_action {
            self.handle_batch_action(action);
        }

        self.modals.error.show(ctx);

        if let Some(settings) = self.modals.service_settings.show(ctx) {
            self.apply_settings(settings);
        }
    }
}

impl SentimentApp {
    fn handle_task_result(&mut self, result: TaskResult) {
        tracing::debug!("Task finished: {}", result.task_type());
        match result {
            TaskResult::TextPrediction(outcome) => self.text.complete(outcome),
            TaskResult::BatchPrediction { request, result } => {
                self.batch.complete(&request, result);
            }
        }
    }

    fn handle_batch_action(&mut self, action: BatchAction) {
        let dir = self.settings_data.export_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            self.modals.error.show_error("ไม่สามารถสร้างโฟลเดอร์ส่งออก", &SentimentError::from(e));
            return;
        }

        match action {
            BatchAction::ExportTable => match self.batch.export_table(&dir) {
                Ok(path) => {
                    self.batch_inputs.export_status =
                        Some(format!("บันทึกตารางแล้ว: {}", path.display()));
                }
                Err(e) => {
                    tracing::error!("Table export failed: {}", e);
                    self.modals.error.show_error("ส่งออกตารางไม่สำเร็จ", &e);
                }
            },
            BatchAction::ExportImages => match self.batch.export_images(&dir) {
                Ok(paths) => {
                    self.batch_inputs.export_status =
                        Some(format!("บันทึกกราฟ {} ไฟล์ใน {}", paths.len(), dir.display()));
                }
                Err(e) => {
                    tracing::error!("Chart export failed: {}", e);
                    self.modals.error.show_error("ส่งออกกราฟไม่สำเร็จ", &e);
                }
            },
        }
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        if settings.api_base_url != self.settings_data.api_base_url {
            match SentimentClient::new(settings.api_base_url.clone()) {
                Ok(client) => self.task_manager.set_client(client),
                Err(e) => {
                    self.modals.error.show_error("ตั้งค่าบริการไม่สำเร็จ", &e);
                    return;
                }
            }
        }

        self.settings_data = settings;
        self.save_settings();
    }

    /// The top bar switch changes egui's theme directly; mirror it into settings.
    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            tracing::error!("Failed to save settings: {}", e);
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        if dropped.is_empty() {
            return;
        }

        if let Some(path) =
            dropped.iter().filter_map(|f| f.path.as_deref()).find(|p| is_supported_upload(p))
        {
            tracing::info!("File dropped: {}", path.display());
            self.batch_inputs.select_file(path.to_path_buf());
            self.active_tab = Tab::Batch;
        }
    }

    fn draw_file_drop_overlay(&self, ctx: &egui::Context) {
        let any_valid_hovered = ctx.input(|i| {
            i.raw.hovered_files.iter().filter_map(|f| f.path.as_deref()).any(is_supported_upload)
        });
        if !any_valid_hovered {
            return;
        }

        let size = egui::vec2(300.0, 120.0);

        egui::Modal::new(Id::new("file_drop_overlay")).show(ctx, |ui| {
            ui.set_max_size(size);
            ui.set_min_size(size);

            ui.centered_and_justified(|ui| {
                ui.heading("📥  วางไฟล์เพื่อวิเคราะห์");
            });
        });
    }
}
