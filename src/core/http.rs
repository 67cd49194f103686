use std::path::Path;

use reqwest::{
    header::USER_AGENT,
    multipart::{
        Form,
        Part,
    },
    Client,
    Response,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::{
    models::{
        BatchResponse,
        ErrorBody,
        PredictionResult,
    },
    SentimentError,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client for the `/sentiment` routes of the prediction service.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: Client,
    base_url: String,
}

pub fn http_client() -> Result<Client, SentimentError> {
    Client::builder()
        .build()
        .map_err(|e| SentimentError::Custom(format!("HTTP client build failed: {e}")))
}

impl SentimentClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SentimentError> {
        Ok(Self::with_client(http_client()?, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/sentiment/{}", self.base_url, route)
    }

    /// Forwards `text` as-is; the service decides whether it is acceptable.
    pub async fn predict_text(&self, text: &str) -> Result<PredictionResult, SentimentError> {
        self.post_json("predict", &serde_json::json!({ "text": text })).await
    }

    pub async fn predict_file(&self, path: &Path) -> Result<Vec<PredictionResult>, SentimentError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SentimentError::FailedToLoadFile(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            SentimentError::FailedToLoadFile(format!("{}: {}", path.display(), e))
        })?;

        self.predict_file_bytes(file_name, bytes).await
    }

    pub async fn predict_file_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Vec<PredictionResult>, SentimentError> {
        let mime = mime_for(&file_name);
        tracing::info!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("predict_file"))
            .header(USER_AGENT, user_agent())
            .multipart(form)
            .send()
            .await?;

        Ok(decode::<BatchResponse>(response).await?.result)
    }

    pub async fn predict_multiple(
        &self,
        texts: &[String],
    ) -> Result<Vec<PredictionResult>, SentimentError> {
        let body = serde_json::json!({ "texts": texts });
        Ok(self.post_json::<BatchResponse>("predict_multiple", &body).await?.result)
    }

    pub async fn predict_youtube(&self, url: &str) -> Result<Vec<PredictionResult>, SentimentError> {
        let body = serde_json::json!({ "url": url });
        Ok(self.post_json::<BatchResponse>("youtube", &body).await?.result)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        route: &str,
        body: &impl Serialize,
    ) -> Result<T, SentimentError> {
        let response = self
            .client
            .post(self.endpoint(route))
            .header(USER_AGENT, user_agent())
            .json(body)
            .send()
            .await?;

        decode(response).await
    }
}

fn user_agent() -> String {
    format!("thai-sentiment-desk/{} (+reqwest)", env!("CARGO_PKG_VERSION"))
}

fn mime_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SentimentError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.detail)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string());
        tracing::warn!("Service returned {}: {}", status, detail);
        return Err(SentimentError::Service { status: status.as_u16(), detail });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_supported_uploads() {
        assert_eq!(mime_for("comments.CSV"), "text/csv");
        assert_eq!(mime_for("lines.txt"), "text/plain");
        assert_eq!(mime_for("archive"), "application/octet-stream");
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = SentimentClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint("predict"), "http://localhost:8000/sentiment/predict");
    }
}
