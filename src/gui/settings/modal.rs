use eframe::egui;

use super::data::{
    validate_api_url,
    SettingsData,
};

pub struct ServiceSettingsModal {
    open: bool,
    temp: SettingsData,
    original: SettingsData,
    status: Option<String>,
}

impl ServiceSettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            temp: SettingsData::default(),
            original: SettingsData::default(),
            status: None,
        }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.temp = current_settings.clone();
        self.original = current_settings;
        self.status = None;
        self.open = true;
    }

    fn is_dirty(&self) -> bool {
        self.temp != self.original
    }

    /// Returns the new settings once the user saves valid ones.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("service_settings_modal")).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading("ตั้งค่าบริการ");
            ui.add_space(10.0);

            egui::Grid::new("service_settings_grid").num_columns(2).spacing([10.0, 6.0]).show(
                ui,
                |ui| {
                    ui.label("ที่อยู่ API:");
                    ui.text_edit_singleline(&mut self.temp.api_base_url);
                    ui.end_row();

                    ui.label("โฟลเดอร์ส่งออก:");
                    ui.horizontal(|ui| {
                        ui.label(self.temp.export_dir().display().to_string());
                        if ui.button("เลือก…").clicked() {
                            if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                                self.temp.export_dir = Some(folder);
                            }
                        }
                    });
                    ui.end_row();
                },
            );

            if let Err(message) = validate_api_url(&self.temp.api_base_url) {
                ui.colored_label(egui::Color32::RED, format!("⚠ {message}"));
            }

            if let Some(status) = &self.status {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::LIGHT_BLUE, "ℹ");
                    ui.label(status);
                });
            }

            ui.add_space(5.0);
            ui.separator();

            let is_dirty = self.is_dirty();
            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("บันทึกการตั้งค่า")).clicked();
                let cancel_clicked = ui.button("ยกเลิก").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("คืนค่าเริ่มต้น").clicked();
                });

                if save_clicked {
                    match validate_api_url(&self.temp.api_base_url) {
                        Ok(()) => {
                            self.temp.api_base_url = self.temp.api_base_url.trim().to_string();
                            self.original = self.temp.clone();
                            result = Some(self.temp.clone());
                            ui.close();
                        }
                        Err(message) => self.status = Some(message),
                    }
                } else if cancel_clicked {
                    self.temp = self.original.clone();
                    ui.close();
                } else if reset_clicked {
                    self.temp = SettingsData {
                        dark_mode: self.temp.dark_mode,
                        ..SettingsData::default()
                    };
                    self.status = None;
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for ServiceSettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
