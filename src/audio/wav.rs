use anyhow::{Context, Result};
use std::io::Cursor;

/// Sample rate the transcription service expects
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Convert a normalized f32 sample to 16-bit signed PCM.
///
/// Input is clamped to [-1, 1]. Negative values scale by 0x8000 and
/// non-negative values by 0x7FFF, so both endpoints hit the full i16 range.
pub fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 0x8000 as f32) as i16
    } else {
        (clamped * 0x7FFF as f32) as i16
    }
}

/// Encode mono samples as a complete PCM WAV byte buffer.
///
/// Produces the standard layout: 44-byte RIFF/WAVE header (16-byte `fmt `
/// chunk, `data` chunk sized to 2 x sample count) followed by little-endian
/// 16-bit samples.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::with_capacity(44 + samples.len() * 2);
    {
        let cursor = Cursor::new(&mut buffer);
        let mut writer =
            hound::WavWriter::new(cursor, spec).context("Failed to create WAV writer")?;

        for &sample in samples {
            writer
                .write_sample(sample_to_i16(sample))
                .context("Failed to write sample to WAV buffer")?;
        }

        writer.finalize().context("Failed to finalize WAV buffer")?;
    }

    Ok(buffer)
}
