use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Placeholder identifier when the acknowledgment carries none
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Acknowledgment body returned by the transcription endpoint
#[derive(Debug, Deserialize)]
pub struct UploadAck {
    pub request_id: Option<String>,
}

/// A confirmed text/address pair ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub text: String,
    pub address: String,
}

/// Transport for recordings and finalized requests
#[async_trait::async_trait]
pub trait UploadClient: Send + Sync {
    /// Upload a WAV recording; returns the acknowledged request identifier
    async fn upload_recording(&self, wav: Vec<u8>) -> Result<String>;

    /// Submit the confirmed request to the backend
    async fn submit_request(&self, request: &ServiceRequest) -> Result<()>;
}

/// HTTP transport: one multipart POST per recording, JSON on finalize
pub struct HttpUploadClient {
    client: reqwest::Client,
    transcribe_url: String,
    submit_url: Option<String>,
}

impl HttpUploadClient {
    pub fn new(transcribe_url: String, submit_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            transcribe_url,
            submit_url,
        }
    }
}

#[async_trait::async_trait]
impl UploadClient for HttpUploadClient {
    async fn upload_recording(&self, wav: Vec<u8>) -> Result<String> {
        let request_tag = uuid::Uuid::new_v4().to_string();

        info!(
            "Uploading recording to {} ({} bytes, x-request-id={})",
            self.transcribe_url,
            wav.len(),
            request_tag
        );

        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .context("Failed to build multipart body")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.transcribe_url)
            .header("x-request-id", request_tag.as_str())
            .multipart(form)
            .send()
            .await
            .context("Upload request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Upload failed: {} {}", status, body);
        }

        let ack: UploadAck = response
            .json()
            .await
            .context("Failed to parse upload acknowledgment")?;

        let request_id = ack
            .request_id
            .unwrap_or_else(|| UNKNOWN_REQUEST_ID.to_string());

        info!("Upload acknowledged: request_id={}", request_id);

        Ok(request_id)
    }

    async fn submit_request(&self, request: &ServiceRequest) -> Result<()> {
        // Finalize stays display-only unless a submit endpoint is configured
        let url = match &self.submit_url {
            Some(url) => url,
            None => return Ok(()),
        };

        info!("Submitting confirmed request to {}", url);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Submit request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Submit failed: {} {}", status, body);
        }

        Ok(())
    }
}
