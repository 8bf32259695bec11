//! Per-file acoustic descriptors.
//!
//! All frame-wise measures share one fixed windowing convention: frame
//! length 2048 samples, hop 512 samples. The numeric results depend on
//! this pair, so it is a fixed convention of the catalog format, not a
//! tunable.

use anyhow::{bail, Result};

use super::decode::AudioData;

const FRAME_LEN: usize = 2048;
const HOP_LEN: usize = 512;

/// Substituted for an exactly-zero denominator in the per-frame balance.
const SILENCE_EPS: f64 = 1e-10;

/// The four descriptors stored per file.
#[derive(Clone, Debug)]
pub struct TrackFeatures {
    /// Mean frame RMS over the whole signal (linear).
    pub rms_mean: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Static left/right skew in [-1, 1]; positive = right-heavy.
    pub stereo_balance: f64,
    /// Fluctuation of the left/right balance over time, in [0, 1].
    pub stereo_movement: f64,
}

/// Compute all descriptors for one decoded file.
///
/// An empty buffer has no analysis frames and yields a NaN mean RMS; that
/// is reported as an error for the file rather than written to the catalog.
pub fn analyze(audio: &AudioData) -> Result<TrackFeatures> {
    let rms_mean = rms_mean(audio);
    if !rms_mean.is_finite() {
        bail!("no analysis frames (buffer is empty)");
    }

    Ok(TrackFeatures {
        rms_mean,
        duration: duration(audio),
        stereo_balance: stereo_balance(audio),
        stereo_movement: stereo_movement(audio),
    })
}

/// Mean frame RMS of the signal, channels downmixed by per-index mean.
pub fn rms_mean(audio: &AudioData) -> f64 {
    let mono = downmix(audio);
    mean(&frame_rms(&mono))
}

/// Exact signal length in seconds: per-channel sample count / sample rate.
pub fn duration(audio: &AudioData) -> f64 {
    let frames = audio.frames();
    if frames == 0 {
        return 0.0;
    }
    frames as f64 / audio.sample_rate as f64
}

/// Static stereo balance: (Rrms - Lrms) / (Rrms + Lrms), clamped to [-1, 1].
///
/// Mono and all-silent signals are centered (0.0). Channels beyond the
/// first two are ignored.
pub fn stereo_balance(audio: &AudioData) -> f64 {
    if audio.is_mono() || audio.frames() == 0 {
        return 0.0;
    }

    let left = mean(&frame_rms(&audio.channels[0]));
    let right = mean(&frame_rms(&audio.channels[1]));

    let total = left + right;
    if total == 0.0 {
        return 0.0;
    }

    ((right - left) / total).clamp(-1.0, 1.0)
}

/// Stereo movement: population standard deviation of the per-frame balance
/// series, clamped to [0, 1].
///
/// Mono signals do not move (0.0). Silent frames get a small epsilon
/// denominator instead of being skipped, so every frame contributes.
pub fn stereo_movement(audio: &AudioData) -> f64 {
    if audio.is_mono() || audio.frames() == 0 {
        return 0.0;
    }

    let left = frame_rms(&audio.channels[0]);
    let right = frame_rms(&audio.channels[1]);
    let balances = balance_series(&left, &right);

    std_dev(&balances).clamp(0.0, 1.0)
}

/// RMS per analysis frame. Windows start at hop multiples and the last
/// ones are truncated at the buffer end.
fn frame_rms(samples: &[f32]) -> Vec<f64> {
    let mut rms = Vec::new();
    let mut pos = 0;
    while pos < samples.len() {
        let end = (pos + FRAME_LEN).min(samples.len());
        let window = &samples[pos..end];
        let energy: f64 = window.iter().map(|&s| s as f64 * s as f64).sum();
        rms.push((energy / window.len() as f64).sqrt());
        pos += HOP_LEN;
    }
    rms
}

/// Instantaneous balance per frame index from the two per-frame RMS series.
fn balance_series(left: &[f64], right: &[f64]) -> Vec<f64> {
    left.iter()
        .zip(right.iter())
        .map(|(&l, &r)| {
            let total = if l + r == 0.0 { SILENCE_EPS } else { l + r };
            (r - l) / total
        })
        .collect()
}

fn downmix(audio: &AudioData) -> Vec<f32> {
    if audio.is_mono() {
        return audio.channels.first().cloned().unwrap_or_default();
    }

    let frames = audio.frames();
    let num_channels = audio.channels.len() as f32;
    (0..frames)
        .map(|i| {
            let sum: f32 = audio.channels.iter().map(|ch| ch[i]).sum();
            sum / num_channels
        })
        .collect()
}

/// Arithmetic mean; NaN for an empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
