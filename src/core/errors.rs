use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Image error: {0}")]
    Image(Box<image::ImageError>),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    /// The service answered with a non-success status.
    #[error("HTTP Error! Status: {status}, ข้อความ: {detail}")]
    Service { status: u16, detail: String },

    #[error("Unknown sentiment label: {0}")]
    UnknownLabel(String),

    #[error("A request is already in flight")]
    Busy,

    #[error("No charts to export yet")]
    NoCharts,

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("SentimentError: {0}")]
    Custom(String),
}

impl SentimentError {
    /// Message shown inline in place of results.
    pub fn inline_message(&self) -> String {
        format!("เกิดข้อผิดพลาด: {}", self)
    }
}

impl From<std::io::Error> for SentimentError {
    fn from(error: std::io::Error) -> Self {
        SentimentError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for SentimentError {
    fn from(error: reqwest::Error) -> Self {
        SentimentError::Reqwest(Box::new(error))
    }
}

impl From<csv::Error> for SentimentError {
    fn from(error: csv::Error) -> Self {
        SentimentError::Csv(Box::new(error))
    }
}

impl From<image::ImageError> for SentimentError {
    fn from(error: image::ImageError) -> Self {
        SentimentError::Image(Box::new(error))
    }
}
