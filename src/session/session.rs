use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::SessionConfig;
use super::entry::ChatEntry;
use crate::audio::{
    decode_blob, encode_wav, to_mono_at_rate, CaptureBackend, CaptureBackendFactory,
    CaptureConfig, CaptureSource, Recorder,
};
use crate::conversation::{Conversation, Effect, Event, Phase};
use crate::upload::{ServiceRequest, UploadClient};

const ADDRESS_PROMPT: &str =
    "Please provide the address for this request (e.g. 12 Oak Street, apt. 5):";
const ADDRESS_RETRY_PROMPT: &str = "Please enter the address again:";
const CONFIRMATION_HINT: &str =
    "Please answer \"yes\" to confirm or \"edit\" to change the address.";

/// A capture in progress: the backend plus the accumulating recorder task
struct ActiveRecording {
    backend: Box<dyn CaptureBackend>,
    task: JoinHandle<Vec<u8>>,
}

/// An intake session: one conversation, its transcript, and the voice pipeline
///
/// Owns the conversation state machine and the injected transport; capture
/// backends are created per recording. All mutation happens through `&mut
/// self` from a single driver loop, so there is nothing to lock.
pub struct IntakeSession {
    config: SessionConfig,
    conversation: Conversation,
    uploader: Box<dyn UploadClient>,
    active: Option<ActiveRecording>,
    transcript: Vec<ChatEntry>,
    recording_index: usize,
}

impl IntakeSession {
    pub fn new(config: SessionConfig, uploader: Box<dyn UploadClient>) -> Self {
        info!("Creating intake session: {}", config.session_id);

        Self {
            config,
            conversation: Conversation::new(),
            uploader,
            active: None,
            transcript: Vec::new(),
            recording_index: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.conversation.phase()
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Route one line of citizen input according to the dialogue phase.
    ///
    /// The same path serves typed submissions and Enter presses; there is
    /// no separate submit control to diverge from.
    pub async fn handle_input(&mut self, line: &str) -> Vec<ChatEntry> {
        let event = match self.conversation.phase() {
            Phase::AwaitingAddress => Event::Address(line.to_string()),
            Phase::AwaitingConfirmation => match line.trim().to_lowercase().as_str() {
                "yes" | "y" | "confirm" => Event::Confirm,
                "edit" | "e" => Event::Edit,
                _ => return self.push(ChatEntry::service(CONFIRMATION_HINT)),
            },
            Phase::Idle | Phase::Finalized => Event::Message(line.to_string()),
        };

        let effects = self.conversation.apply(event);
        self.render_effects(effects).await
    }

    /// Start capturing from `source`.
    ///
    /// A capture denial (e.g. no microphone backend) surfaces as an alert
    /// entry and the session stays idle.
    pub async fn start_recording(&mut self, source: CaptureSource) -> Vec<ChatEntry> {
        if self.active.is_some() {
            return self.push(ChatEntry::service("Already recording."));
        }

        let capture_config = CaptureConfig {
            chunk_bytes: self.config.capture_chunk_bytes,
        };

        let mut backend = match CaptureBackendFactory::create(source, capture_config) {
            Ok(backend) => backend,
            Err(e) => {
                return self.push(ChatEntry::alert(format!("Recording unavailable: {:#}", e)))
            }
        };

        let chunk_rx = match backend.start().await {
            Ok(rx) => rx,
            Err(e) => {
                return self.push(ChatEntry::alert(format!("Audio capture failed: {:#}", e)))
            }
        };

        let task = tokio::spawn(async move {
            let mut recorder = Recorder::new();
            recorder.record(chunk_rx).await;
            recorder.into_blob()
        });

        info!("Capture started ({})", backend.name());
        self.active = Some(ActiveRecording { backend, task });

        Vec::new()
    }

    /// Stop the active capture and run the voice pipeline:
    /// blob -> decode -> resample -> WAV -> playback copy -> upload ->
    /// synthetic token into the conversation.
    pub async fn stop_recording(&mut self) -> Vec<ChatEntry> {
        let ActiveRecording { mut backend, task } = match self.active.take() {
            Some(active) => active,
            None => return Vec::new(),
        };

        if let Err(e) = backend.stop().await {
            warn!("Capture backend failed to stop cleanly: {:#}", e);
        }

        let blob = match task.await {
            Ok(blob) => blob,
            Err(e) => return self.push(ChatEntry::service(format!("Recording failed: {}", e))),
        };

        if blob.is_empty() {
            return self.push(ChatEntry::service("The recording was empty."));
        }

        // Decode and resample; a failure discards the recording
        let wav = match self.render_wav(blob) {
            Ok(wav) => wav,
            Err(e) => {
                return self.push(ChatEntry::service(format!(
                    "Audio processing error: {:#}",
                    e
                )))
            }
        };

        let mut entries = Vec::new();

        // Playback copy so the citizen can audit what is being sent
        match self.write_playback_copy(&wav) {
            Ok(path) => {
                entries.extend(
                    self.push(ChatEntry::service(format!(
                        "Recording ready: {}",
                        path.display()
                    ))),
                );
            }
            Err(e) => warn!("Failed to write playback copy: {:#}", e),
        }

        match self.uploader.upload_recording(wav).await {
            Ok(request_id) => {
                // The acknowledgment re-enters the dialogue as if typed
                let effects = self
                    .conversation
                    .apply(Event::Message(format!("ID: {}", request_id)));
                entries.extend(self.render_effects(effects).await);
            }
            Err(e) => {
                entries.extend(self.push(ChatEntry::service(format!("{:#}", e))));
            }
        }

        entries
    }

    fn render_wav(&self, blob: Vec<u8>) -> Result<Vec<u8>> {
        let raw = decode_blob(blob)?;
        let samples = to_mono_at_rate(&raw, self.config.sample_rate);
        encode_wav(&samples, self.config.sample_rate)
    }

    fn write_playback_copy(&mut self, wav: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.recordings_path)
            .context("Failed to create recordings directory")?;

        let path = self.config.recordings_path.join(format!(
            "{}-rec-{:03}.wav",
            self.config.session_id, self.recording_index
        ));
        self.recording_index += 1;

        fs::write(&path, wav)
            .with_context(|| format!("Failed to write recording: {}", path.display()))?;

        Ok(path)
    }

    async fn render_effects(&mut self, effects: Vec<Effect>) -> Vec<ChatEntry> {
        let mut entries = Vec::new();

        for effect in effects {
            match effect {
                Effect::EchoCitizen(text) => {
                    entries.extend(self.push(ChatEntry::citizen(text)));
                }
                Effect::PromptAddress { retry } => {
                    let prompt = if retry {
                        ADDRESS_RETRY_PROMPT
                    } else {
                        ADDRESS_PROMPT
                    };
                    entries.extend(self.push(ChatEntry::service(prompt)));
                }
                Effect::ShowConfirmation { text, address } => {
                    entries.extend(self.push(ChatEntry::service(format!(
                        "You are submitting:\n\"{}\"\nAddress: {}\n\nIs everything correct? (yes / edit)",
                        text, address
                    ))));
                }
                Effect::ShowCompletion { text, address } => {
                    entries.extend(self.push(ChatEntry::service(format!(
                        "Request registered!\n\nText: \"{}\"\nAddress: {}\n\nThank you for your report.",
                        text, address
                    ))));

                    let request = ServiceRequest { text, address };
                    if let Err(e) = self.uploader.submit_request(&request).await {
                        entries.extend(
                            self.push(ChatEntry::service(format!("Submission failed: {:#}", e))),
                        );
                    }
                }
                Effect::InlineError(message) => {
                    entries.extend(self.push(ChatEntry::service(message)));
                }
            }
        }

        entries
    }

    fn push(&mut self, entry: ChatEntry) -> Vec<ChatEntry> {
        self.transcript.push(entry.clone());
        vec![entry]
    }
}
