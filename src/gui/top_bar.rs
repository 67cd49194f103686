use eframe::egui::{
    self,
    containers,
};

use crate::gui::{
    settings::{
        ServiceSettingsModal,
        SettingsData,
    },
    Tab,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        active_tab: &mut Tab,
        settings_modal: &mut ServiceSettingsModal,
        current_settings: &SettingsData,
        busy: bool,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("ไฟล์", |ui| {
                    if ui.button("ออก").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("ตั้งค่า", |ui| {
                    if ui.button("บริการวิเคราะห์").clicked() {
                        settings_modal.open_settings(current_settings.clone());
                    }
                });

                ui.separator();
                for tab in Tab::ALL {
                    ui.selectable_value(active_tab, tab, tab.title());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_service_indicator(ui, &current_settings.api_base_url, busy);
                });
            });
        });
    }

    fn show_service_indicator(ui: &mut egui::Ui, api_base_url: &str, busy: bool) {
        let (color, tooltip) = if busy {
            (egui::Color32::from_rgb(230, 180, 40), "กำลังส่งคำขอ")
        } else {
            (egui::Color32::from_rgb(0, 200, 0), "พร้อม")
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
            ui.small(api_base_url).on_hover_text(tooltip);
        });
    }
}
