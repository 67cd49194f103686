pub mod app;
pub mod batch_panel;
pub mod chart_view;
pub mod error_modal;
pub mod results_table;
pub mod settings;
pub mod text_panel;
pub mod theme;
pub mod top_bar;

pub use app::SentimentApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Text,
    Batch,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Text, Tab::Batch];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Text => "วิเคราะห์ข้อความ",
            Tab::Batch => "วิเคราะห์ไฟล์",
        }
    }
}
