use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::http::DEFAULT_API_BASE_URL;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub api_base_url: String,
    /// Where exports land. Falls back to the user's download folder.
    pub export_dir: Option<PathBuf>,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_string(), export_dir: None, dark_mode: true }
    }
}

impl SettingsData {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn validate_api_url(url: &str) -> Result<(), String> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| format!("ที่อยู่ไม่ถูกต้อง: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("ไม่รองรับโปรโทคอล: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_url() {
        assert!(validate_api_url("http://localhost:8000").is_ok());
        assert!(validate_api_url(" https://sentiment.example.com ").is_ok());
        assert!(validate_api_url("localhost:8000").is_err());
        assert!(validate_api_url("ftp://host").is_err());
    }

    #[test]
    fn test_validation_messages_are_thai() {
        assert_eq!(validate_api_url("ftp://host"), Err("ไม่รองรับโปรโทคอล: ftp".to_string()));
        let message = validate_api_url("not a url").unwrap_err();
        assert!(message.starts_with("ที่อยู่ไม่ถูกต้อง: "), "{message}");
    }

    #[test]
    fn test_explicit_export_dir_wins() {
        let settings =
            SettingsData { export_dir: Some(PathBuf::from("/tmp/out")), ..Default::default() };
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/out"));
    }
}
