use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an intake session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (used in playback copy filenames)
    pub session_id: String,

    /// Directory where playback copies of uploaded recordings are written
    pub recordings_path: PathBuf,

    /// Sample rate of uploaded recordings (the transcription service expects 16kHz)
    pub sample_rate: u32,

    /// Size of the encoded chunks the capture backend emits
    pub capture_chunk_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("intake-{}", uuid::Uuid::new_v4()),
            recordings_path: PathBuf::from("recordings"),
            sample_rate: crate::audio::TARGET_SAMPLE_RATE,
            capture_chunk_bytes: 32 * 1024,
        }
    }
}
