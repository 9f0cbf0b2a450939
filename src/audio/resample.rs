use super::decode::RawAudio;

/// Average interleaved channels down to a single mono stream.
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let width = channels as usize;
    samples
        .chunks_exact(width)
        .map(|frame| frame.iter().sum::<f32>() / width as f32)
        .collect()
}

/// Resample mono audio from `source_rate` to `target_rate` by linear
/// interpolation.
pub fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let position = i as f64 * ratio;
        let index = position as usize;
        let frac = (position - index as f64) as f32;

        let sample = if index + 1 < samples.len() {
            samples[index] * (1.0 - frac) + samples[index + 1] * frac
        } else if index < samples.len() {
            samples[index]
        } else {
            0.0
        };
        output.push(sample);
    }

    output
}

/// Collapse decoded audio to mono at `target_rate`.
///
/// The offline-render step of the pipeline: whatever the capture produced,
/// the upload payload is mono at the transcription rate.
pub fn to_mono_at_rate(raw: &RawAudio, target_rate: u32) -> Vec<f32> {
    let mono = downmix_to_mono(&raw.samples, raw.channels);
    resample(&mono, raw.sample_rate, target_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(downmix_to_mono(&samples, 1), samples);
    }

    #[test]
    fn test_downmix_stereo_averages() {
        let samples = vec![1.0, 0.0, -1.0, -1.0, 0.5, 0.25];
        let mono = downmix_to_mono(&samples, 2);
        assert_eq!(mono.len(), 3);
        assert!((mono[0] - 0.5).abs() < 1e-6);
        assert!((mono[1] + 1.0).abs() < 1e-6);
        assert!((mono[2] - 0.375).abs() < 1e-6);
    }

    #[test]
    fn test_resample_identity() {
        let samples = vec![0.5, -0.5, 0.25];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn test_resample_halves_32k_input() {
        let samples: Vec<f32> = (0..3200).map(|i| (i % 100) as f32 / 100.0).collect();
        let out = resample(&samples, 32000, 16000);
        assert_eq!(out.len(), 1600);
    }

    #[test]
    fn test_resample_doubles_8k_input() {
        let samples: Vec<f32> = (0..800).map(|i| i as f32 / 800.0).collect();
        let out = resample(&samples, 8000, 16000);
        assert_eq!(out.len(), 1600);
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample(&[], 48000, 16000).is_empty());
    }

    #[test]
    fn test_resample_interpolates_between_samples() {
        // Upsampling a ramp: interpolated points stay on the ramp
        let samples = vec![0.0, 1.0];
        let out = resample(&samples, 8000, 16000);
        assert_eq!(out.len(), 4);
        assert!((out[0] - 0.0).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }
}
