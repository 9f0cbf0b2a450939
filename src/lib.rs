pub mod audio;
pub mod config;
pub mod conversation;
pub mod session;
pub mod upload;

pub use audio::{
    CaptureBackend, CaptureBackendFactory, CaptureConfig, CaptureSource, FileCapture, RawAudio,
    Recorder,
};
pub use config::Config;
pub use conversation::{Conversation, Effect, Event, Phase};
pub use session::{ChatEntry, IntakeSession, Role, SessionConfig};
pub use upload::{HttpUploadClient, ServiceRequest, UploadAck, UploadClient};
