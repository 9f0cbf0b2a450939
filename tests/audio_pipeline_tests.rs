// Integration tests for the voice pipeline
//
// These tests verify that a captured encoded blob decodes, resamples to
// 16kHz mono, and re-encodes into an uploadable WAV.

use anyhow::Result;
use civic_intake::audio::{
    decode_blob, encode_wav, to_mono_at_rate, CaptureBackend, CaptureConfig, FileCapture,
    Recorder,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_test_wav(
    dir: &TempDir,
    name: &str,
    sample_rate: u32,
    channels: u16,
    frames: usize,
) -> Result<PathBuf> {
    let path = dir.path().join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec)?;
    for i in 0..frames {
        let sample = ((i as f32 * 0.05).sin() * 12000.0) as i16;
        for _ in 0..channels {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    Ok(path)
}

#[tokio::test]
async fn test_file_capture_streams_whole_file_in_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_test_wav(&temp_dir, "capture.wav", 16000, 1, 1600)?;
    let expected = std::fs::read(&path)?;

    let mut backend = FileCapture::new(path, CaptureConfig { chunk_bytes: 256 });
    let chunk_rx = backend.start().await?;

    let mut recorder = Recorder::new();
    recorder.record(chunk_rx).await;
    backend.stop().await?;

    assert!(recorder.chunk_count() > 1, "Small chunks should split the file");
    assert_eq!(recorder.byte_len(), expected.len());
    assert_eq!(recorder.into_blob(), expected);

    Ok(())
}

#[tokio::test]
async fn test_pipeline_produces_16khz_mono_wav() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // 0.1s of 32kHz stereo input
    let path = write_test_wav(&temp_dir, "stereo32k.wav", 32000, 2, 3200)?;

    let mut backend = FileCapture::new(path, CaptureConfig::default());
    let chunk_rx = backend.start().await?;
    let mut recorder = Recorder::new();
    recorder.record(chunk_rx).await;
    backend.stop().await?;

    let raw = decode_blob(recorder.into_blob())?;
    assert_eq!(raw.sample_rate, 32000);
    assert_eq!(raw.channels, 2);
    assert_eq!(raw.samples.len(), 6400, "Interleaved stereo frames");

    let samples = to_mono_at_rate(&raw, 16000);
    assert_eq!(samples.len(), 1600, "Halved rate, collapsed channels");

    let wav = encode_wav(&samples, 16000)?;
    let reader = hound::WavReader::new(std::io::Cursor::new(wav))?;
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 16000);
    assert_eq!(reader.len(), 1600);

    Ok(())
}

#[tokio::test]
async fn test_pipeline_passthrough_for_16khz_mono() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_test_wav(&temp_dir, "mono16k.wav", 16000, 1, 800)?;

    let mut backend = FileCapture::new(path, CaptureConfig::default());
    let chunk_rx = backend.start().await?;
    let mut recorder = Recorder::new();
    recorder.record(chunk_rx).await;
    backend.stop().await?;

    let raw = decode_blob(recorder.into_blob())?;
    let samples = to_mono_at_rate(&raw, 16000);

    assert_eq!(samples.len(), raw.samples.len());

    Ok(())
}

#[test]
fn test_decode_rejects_garbage() {
    let result = decode_blob(vec![0x42; 256]);
    assert!(result.is_err(), "Arbitrary bytes should not decode");
}

#[test]
fn test_decode_reports_duration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_test_wav(&temp_dir, "second.wav", 16000, 1, 16000)?;

    let raw = decode_blob(std::fs::read(path)?)?;
    assert!((raw.duration_seconds() - 1.0).abs() < 0.01);

    Ok(())
}

#[tokio::test]
async fn test_file_capture_missing_file_fails() {
    let mut backend = FileCapture::new(
        PathBuf::from("/nonexistent/recording.ogg"),
        CaptureConfig::default(),
    );

    assert!(backend.start().await.is_err());
    assert!(!backend.is_capturing());
}
