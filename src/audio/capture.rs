use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Configuration for a capture backend
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Size of each encoded chunk handed to the recorder
    pub chunk_bytes: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            chunk_bytes: 32 * 1024,
        }
    }
}

/// Source of recorded audio
#[derive(Debug, Clone)]
pub enum CaptureSource {
    /// Live microphone input (requires a platform backend)
    Microphone,
    /// Encoded audio file, streamed in chunks (console use and testing)
    File(PathBuf),
}

/// Audio capture backend trait
///
/// A backend emits encoded audio chunks in capture order and closes the
/// channel when the stream ends or `stop` is called.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Start capturing audio
    ///
    /// Returns a channel receiver that will receive encoded chunks
    async fn start(&mut self) -> Result<mpsc::Receiver<Vec<u8>>>;

    /// Stop capturing audio
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Capture backend factory
pub struct CaptureBackendFactory;

impl CaptureBackendFactory {
    /// Create a capture backend for the requested source
    pub fn create(
        source: CaptureSource,
        config: CaptureConfig,
    ) -> Result<Box<dyn CaptureBackend>> {
        match source {
            CaptureSource::Microphone => {
                // The denial path of the widget's permission prompt
                anyhow::bail!("Microphone capture is not available on this build")
            }
            CaptureSource::File(path) => Ok(Box::new(FileCapture::new(path, config))),
        }
    }
}

/// File-based capture backend
///
/// Streams an encoded audio file in fixed-size chunks, standing in for a
/// live microphone. The channel closes once the whole file has been sent.
pub struct FileCapture {
    path: PathBuf,
    config: CaptureConfig,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl FileCapture {
    pub fn new(path: PathBuf, config: CaptureConfig) -> Self {
        Self {
            path,
            config,
            task: None,
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for FileCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<Vec<u8>>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read audio file: {}", self.path.display()))?;

        info!(
            "Capturing from file: {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );

        let chunk_bytes = self.config.chunk_bytes.max(1);
        let (tx, rx) = mpsc::channel(100);

        let task = tokio::spawn(async move {
            for chunk in bytes.chunks(chunk_bytes) {
                if tx.send(chunk.to_vec()).await.is_err() {
                    break;
                }
            }
            // tx drops here; the closed channel ends the recording
        });
        self.task = Some(task);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Capture task panicked: {}", e);
            }
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    fn name(&self) -> &str {
        "file"
    }
}
