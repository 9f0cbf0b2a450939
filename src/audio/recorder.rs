use tokio::sync::mpsc;
use tracing::info;

/// Accumulates encoded capture chunks in arrival order
///
/// Receives chunks from a capture backend until the channel closes, then
/// hands back a single concatenated blob for decoding.
pub struct Recorder {
    chunks: Vec<Vec<u8>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Drain the receiver until the backend closes the channel
    pub async fn record(&mut self, mut chunk_rx: mpsc::Receiver<Vec<u8>>) {
        info!("Recording started");

        while let Some(chunk) = chunk_rx.recv().await {
            self.chunks.push(chunk);
        }

        info!(
            "Recording complete: {} chunks, {} bytes",
            self.chunks.len(),
            self.byte_len()
        );
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// Concatenate the accumulated chunks into one encoded blob
    pub fn into_blob(self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.byte_len());
        for chunk in self.chunks {
            blob.extend_from_slice(&chunk);
        }
        blob
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}
