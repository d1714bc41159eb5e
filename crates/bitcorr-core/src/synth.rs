//! # Multi-Tone Signal Synthesizer
//!
//! Generates the test input for the trigger: a sum of harmonically related
//! sines evaluated on a uniform time base.
//!
//! ```text
//! x(t) = Σ a_k · sin(2π · m_k · f0 · t)
//! ```
//!
//! The default tone set is `0.3·sin(2πt) + 0.4·sin(4πt) + 0.3·sin(6πt)`
//! sampled every 10 ms over `[0, 2)`.
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::synth::{MultiTone, TimeBase};
//!
//! let base = TimeBase::default();
//! let (times, signal) = MultiTone::default().synthesize(&base).unwrap();
//! assert_eq!(times.len(), 200);
//! assert_eq!(signal.len(), times.len());
//! ```

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{DspError, DspResult, Sample};

/// Upper bound on any synthesized buffer.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Uniform sample times over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBase {
    /// First sample time (s)
    pub start: f64,
    /// Exclusive end time (s)
    pub end: f64,
    /// Spacing between samples (s)
    pub step: f64,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 2.0,
            step: 0.01,
        }
    }
}

impl TimeBase {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Check that the range describes a finite, forward time base.
    pub fn validate(&self) -> DspResult<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(DspError::InvalidParameter(
                "time base bounds must be finite".to_string(),
            ));
        }
        if self.step <= 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.end < self.start {
            return Err(DspError::InvalidParameter(format!(
                "end {} is before start {}",
                self.end, self.start
            )));
        }
        let span = ((self.end - self.start) / self.step).ceil();
        if !span.is_finite() || span > MAX_SAMPLES as f64 {
            return Err(DspError::InvalidParameter(format!(
                "time base yields {} samples, limit is {}",
                span, MAX_SAMPLES
            )));
        }
        Ok(())
    }

    /// Number of samples: `ceil((end - start) / step)`.
    pub fn len(&self) -> usize {
        let span = (self.end - self.start) / self.step;
        if span <= 0.0 || !span.is_finite() {
            0
        } else {
            span.ceil() as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate the sample times.
    ///
    /// Each time is computed as `start + i * step` so that rounding error
    /// does not accumulate and the length always matches [`TimeBase::len`].
    pub fn generate(&self) -> DspResult<Vec<f64>> {
        self.validate()?;
        Ok((0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}

/// One sine component of a [`MultiTone`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// Peak amplitude
    pub amplitude: f64,
    /// Frequency as a multiple of the base frequency
    pub multiple: f64,
}

impl Harmonic {
    pub fn new(amplitude: f64, multiple: f64) -> Self {
        Self { amplitude, multiple }
    }
}

/// Sum of harmonically related sines with optional uniform noise.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiTone {
    base_freq_hz: f64,
    harmonics: Vec<Harmonic>,
    noise_level: f64,
}

impl Default for MultiTone {
    fn default() -> Self {
        Self::new(1.0, Self::default_harmonics())
    }
}

impl MultiTone {
    /// Create a tone set at `base_freq_hz`.
    pub fn new(base_freq_hz: f64, harmonics: Vec<Harmonic>) -> Self {
        Self {
            base_freq_hz,
            harmonics,
            noise_level: 0.0,
        }
    }

    /// The three-harmonic set 0.3 / 0.4 / 0.3 at 1×, 2×, 3×.
    pub fn default_harmonics() -> Vec<Harmonic> {
        vec![
            Harmonic::new(0.3, 1.0),
            Harmonic::new(0.4, 2.0),
            Harmonic::new(0.3, 3.0),
        ]
    }

    /// Add uniform noise in `[-level, level)` to noisy and sampled synthesis.
    pub fn with_noise(mut self, level: f64) -> Self {
        self.noise_level = level.max(0.0);
        self
    }

    pub fn base_freq_hz(&self) -> f64 {
        self.base_freq_hz
    }

    pub fn harmonics(&self) -> &[Harmonic] {
        &self.harmonics
    }

    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    /// Noise-free value at time `t` (seconds).
    #[inline]
    pub fn sample_at(&self, t: f64) -> Sample {
        let w = 2.0 * PI * self.base_freq_hz * t;
        self.harmonics
            .iter()
            .map(|h| h.amplitude * (h.multiple * w).sin())
            .sum()
    }

    /// Evaluate the tones over a time base, returning `(times, signal)`.
    pub fn synthesize(&self, base: &TimeBase) -> DspResult<(Vec<f64>, Vec<Sample>)> {
        let times = base.generate()?;
        let signal = times.iter().map(|&t| self.sample_at(t)).collect();
        Ok((times, signal))
    }

    /// Evaluate the tones over a time base, adding noise from `rng`.
    pub fn synthesize_noisy<R: Rng>(
        &self,
        base: &TimeBase,
        rng: &mut R,
    ) -> DspResult<(Vec<f64>, Vec<Sample>)> {
        let times = base.generate()?;
        let signal = times
            .iter()
            .map(|&t| self.add_noise(self.sample_at(t), rng))
            .collect();
        Ok((times, signal))
    }

    /// Evaluate `n` samples at `t = i / sample_rate`, adding noise from `rng`.
    pub fn synthesize_sampled<R: Rng>(
        &self,
        n: usize,
        sample_rate: f64,
        rng: &mut R,
    ) -> DspResult<Vec<Sample>> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(DspError::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        let signal = (0..n)
            .map(|i| self.add_noise(self.sample_at(i as f64 / sample_rate), rng))
            .collect();
        Ok(signal)
    }

    #[inline]
    fn add_noise<R: Rng>(&self, clean: Sample, rng: &mut R) -> Sample {
        if self.noise_level > 0.0 {
            clean + self.noise_level * rng.gen_range(-1.0..1.0)
        } else {
            clean
        }
    }
}

/// Buffer length used by the sampled pitch scenario: twice the smallest
/// power of two that holds one period.
///
/// Fails when the buffer would exceed [`MAX_SAMPLES`].
pub fn pitch_buffer_len(sample_rate: f64, frequency: f64) -> DspResult<usize> {
    let positive = |x: f64| x > 0.0 && x.is_finite();
    if !(positive(frequency) && positive(sample_rate)) {
        return Err(DspError::InvalidParameter(format!(
            "sample rate {} and frequency {} must be positive and finite",
            sample_rate, frequency
        )));
    }
    let too_long = || {
        DspError::InvalidParameter(format!(
            "pitch buffer for {} Hz at {} Hz exceeds {} samples",
            frequency, sample_rate, MAX_SAMPLES
        ))
    };
    let period = (sample_rate / frequency).ceil();
    if period > MAX_SAMPLES as f64 {
        return Err(too_long());
    }
    (period as usize)
        .max(1)
        .checked_next_power_of_two()
        .and_then(|p| p.checked_mul(2))
        .filter(|&len| len <= MAX_SAMPLES)
        .ok_or_else(too_long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_time_base() {
        let base = TimeBase::default();
        assert_eq!(base.len(), 200);
        let times = base.generate().unwrap();
        assert_eq!(times.len(), 200);
        assert_abs_diff_eq!(times[0], 0.0);
        assert_abs_diff_eq!(times[199], 1.99, epsilon = 1e-12);
    }

    #[test]
    fn test_length_is_ceil_of_span() {
        let ranges = [
            (0.0, 1.0, 0.1),
            (0.0, 1.0, 0.3),
            (-1.0, 1.5, 0.25),
            (0.5, 0.5, 0.1),
        ];
        for &(start, end, step) in &ranges {
            let base = TimeBase::new(start, end, step);
            let expected = ((end - start) / step).ceil() as usize;
            let (times, signal) = MultiTone::default().synthesize(&base).unwrap();
            assert_eq!(times.len(), expected, "range ({start}, {end}, {step})");
            assert_eq!(signal.len(), expected);
        }
    }

    #[test]
    fn test_invalid_time_base() {
        assert!(TimeBase::new(0.0, 1.0, 0.0).generate().is_err());
        assert!(TimeBase::new(0.0, 1.0, -0.1).generate().is_err());
        assert!(TimeBase::new(1.0, 0.0, 0.1).generate().is_err());
        assert!(TimeBase::new(0.0, f64::INFINITY, 0.1).generate().is_err());
    }

    #[test]
    fn test_oversized_time_base_rejected() {
        let base = TimeBase::new(0.0, 1.0, 1e-12);
        assert!(matches!(base.validate(), Err(DspError::InvalidParameter(_))));
        assert!(base.generate().is_err());
        assert!(TimeBase::new(-1e308, 1e308, 1.0).validate().is_err());
        assert!(TimeBase::new(0.0, MAX_SAMPLES as f64, 1.0).validate().is_ok());
    }

    #[test]
    fn test_default_tones() {
        let tone = MultiTone::default();
        assert_abs_diff_eq!(tone.sample_at(0.0), 0.0);
        // t = 0.25: 0.3·sin(π/2) + 0.4·sin(π) + 0.3·sin(3π/2) = 0
        assert_abs_diff_eq!(tone.sample_at(0.25), 0.0, epsilon = 1e-12);
        // t = 0.125: 0.3·sin(π/4) + 0.4·sin(π/2) + 0.3·sin(3π/4)
        let expected = 0.6 * (PI / 4.0).sin() + 0.4;
        assert_abs_diff_eq!(tone.sample_at(0.125), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_signal_bounded() {
        let (_, signal) = MultiTone::default().synthesize(&TimeBase::default()).unwrap();
        assert!(signal.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_sampled_matches_time_domain() {
        let tone = MultiTone::new(440.0, MultiTone::default_harmonics());
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = tone.synthesize_sampled(64, 44_100.0, &mut rng).unwrap();
        for (i, &s) in sampled.iter().enumerate() {
            assert_abs_diff_eq!(s, tone.sample_at(i as f64 / 44_100.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sampled_noise_is_bounded() {
        let tone = MultiTone::new(440.0, MultiTone::default_harmonics()).with_noise(0.1);
        let mut rng = StdRng::seed_from_u64(1);
        let noisy = tone.synthesize_sampled(512, 44_100.0, &mut rng).unwrap();
        let mut differs = false;
        for (i, &s) in noisy.iter().enumerate() {
            let clean = tone.sample_at(i as f64 / 44_100.0);
            assert!((s - clean).abs() <= 0.1 + 1e-12);
            differs |= s != clean;
        }
        assert!(differs);
    }

    #[test]
    fn test_pitch_buffer_len() {
        // 44100 / 440 ≈ 100.2 → 101 → 128 → 256
        assert_eq!(pitch_buffer_len(44_100.0, 440.0).unwrap(), 256);
        assert_eq!(pitch_buffer_len(20_000.0, 82.41).unwrap(), 512);
        assert!(pitch_buffer_len(44_100.0, 0.0).is_err());
    }

    #[test]
    fn test_pitch_buffer_len_bounded() {
        assert!(pitch_buffer_len(f64::INFINITY, 440.0).is_err());
        assert!(pitch_buffer_len(44_100.0, f64::NAN).is_err());
        assert!(pitch_buffer_len(1e25, 1.0).is_err());
        assert!(pitch_buffer_len(1e300, 1e-300).is_err());
        // Largest period that still fits: 2^23 samples → 2^24 buffer.
        assert_eq!(
            pitch_buffer_len((MAX_SAMPLES / 2) as f64, 1.0).unwrap(),
            MAX_SAMPLES
        );
        assert!(pitch_buffer_len((MAX_SAMPLES / 2 + 1) as f64, 1.0).is_err());
    }

    #[test]
    fn test_noisy_time_domain() {
        let base = TimeBase::default();
        let tone = MultiTone::default().with_noise(0.5);
        let (times, noisy) = tone
            .synthesize_noisy(&base, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(noisy.len(), 200);
        let mut differs = false;
        for (&t, &s) in times.iter().zip(&noisy) {
            assert!((s - tone.sample_at(t)).abs() <= 0.5 + 1e-12);
            differs |= s != tone.sample_at(t);
        }
        assert!(differs);

        let (_, again) = tone
            .synthesize_noisy(&base, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(noisy, again);

        // Without noise the RNG is never consulted.
        let (_, clean) = MultiTone::default()
            .synthesize_noisy(&base, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(clean, MultiTone::default().synthesize(&base).unwrap().1);
    }
}
