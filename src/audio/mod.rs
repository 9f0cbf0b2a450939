pub mod capture;
pub mod decode;
pub mod recorder;
pub mod resample;
pub mod wav;

pub use capture::{CaptureBackend, CaptureBackendFactory, CaptureConfig, CaptureSource, FileCapture};
pub use decode::{decode_blob, RawAudio};
pub use recorder::Recorder;
pub use resample::{downmix_to_mono, resample, to_mono_at_rate};
pub use wav::{encode_wav, sample_to_i16, TARGET_SAMPLE_RATE};
