use eframe::egui;
use thai_sentiment_desk::{
    gui::{
        settings::{
            data::SETTINGS_FILE,
            SettingsData,
        },
        SentimentApp,
    },
    persistence::load_json_or_default,
};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    tracing::info!("Using prediction service at {}", settings.api_base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("วิเคราะห์อารมณ์ภาษาไทย")
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "thai-sentiment-desk",
        options,
        Box::new(|cc| Ok(Box::new(SentimentApp::new(cc, settings)?))),
    )
}
