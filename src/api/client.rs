//! Analysis Service Client
//!
//! Issues the single multipart upload per analysis and maps the response
//! into an [`AnalysisReport`]. One drug goes to the single-analysis
//! endpoint, two or more to the batch endpoint; the caller's mode toggle is
//! irrelevant here. There is no retry, timeout, or cancellation; a request,
//! once sent, resolves exactly once.

use crate::models::{AnalysisReport, BatchResult, SingleResult};
use crate::vcf::SelectedFile;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status. `detail` is the backend's JSON `detail` field, or
    /// a synthesized "Request failed (status N)" when the body has none.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// Connectivity failure; reqwest's own message carries the phrase the
    /// normalizer matches on.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse analysis response: {0}")]
    Decode(String),

    #[error("Unable to read file: {0}")]
    Io(String),
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Run one analysis request for the given file and drug tokens, already
    /// validated and normalized by the caller.
    pub async fn analyze(
        &self,
        file: &SelectedFile,
        drugs: &[String],
    ) -> Result<AnalysisReport, ApiError> {
        if drugs.len() == 1 {
            self.analyze_single(file, &drugs[0])
                .await
                .map(AnalysisReport::Single)
        } else {
            self.analyze_batch(file, drugs).await.map(AnalysisReport::Batch)
        }
    }

    async fn analyze_single(
        &self,
        file: &SelectedFile,
        drug: &str,
    ) -> Result<SingleResult, ApiError> {
        let url = format!("{}/analyze", self.base_url);
        debug!(%url, drug, file = %file.name, "sending single analysis request");
        let form = self.upload_form(file).await?.text("drug", drug.to_string());
        let body = self.send(&url, form).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn analyze_batch(
        &self,
        file: &SelectedFile,
        drugs: &[String],
    ) -> Result<BatchResult, ApiError> {
        let url = format!("{}/analyze/batch", self.base_url);
        debug!(%url, drugs = drugs.len(), file = %file.name, "sending batch analysis request");
        let form = self
            .upload_form(file)
            .await?
            .text("drugs", drugs.join(","));
        let body = self.send(&url, form).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn upload_form(&self, file: &SelectedFile) -> Result<Form, ApiError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ApiError::Io(e.to_string()))?;
        let part = Part::bytes(bytes).file_name(file.name.clone());
        Ok(Form::new().part("vcf", part))
    }

    async fn send(&self, url: &str, form: Form) -> Result<String, ApiError> {
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis request rejected");
            return Err(backend_error(status.as_u16(), &body));
        }
        Ok(body)
    }
}

/// Extract the backend's `detail` field from a failure body, or synthesize a
/// message from the status code.
fn backend_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(String::from))
        .unwrap_or_else(|| format!("Request failed (status {status})"));
    ApiError::Backend { status, detail }
}
