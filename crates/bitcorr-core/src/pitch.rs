//! Pitch Estimation from the Binary Shift Profile
//!
//! The shift profile of a periodic trigger sequence dips near the period.
//! The lag of the deepest dip gives the period to the nearest sample; the
//! distance between two interpolated upward zero crossings of the raw
//! signal, one at the start and one near that lag, refines it to a
//! fractional number of samples.
//!
//! ```text
//!   profile ──best_lag──► L
//!   signal  ──crossing(0)──► c1,  crossing(L - 1)──► c2
//!   period = c2 - c1,  f = fs / period
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::pitch::{cents_error, PitchEstimator};
//! use bitcorr_core::synth::MultiTone;
//! use rand::SeedableRng;
//!
//! let fs = 44_100.0;
//! let tone = MultiTone::new(440.0, MultiTone::default_harmonics());
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let signal = tone.synthesize_sampled(256, fs, &mut rng).unwrap();
//!
//! let est = PitchEstimator::default().analyze(&signal, fs).unwrap();
//! assert!(cents_error(est.frequency_hz, 440.0).abs() < 1.0);
//! ```

use crate::bitstream::Bitstream;
use crate::hamming_profile::Profile;
use crate::hysteresis::HysteresisTrigger;
use crate::types::{DspError, DspResult, Sample};

/// Result of a pitch estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate {
    /// Profile lag with the smallest distance (samples)
    pub lag: usize,
    /// Interpolated period (samples)
    pub period_samples: f64,
    /// Estimated frequency (Hz)
    pub frequency_hz: f64,
}

/// Fractional position of the first upward zero crossing after `from`.
///
/// Looks for the first `k > from` with `signal[k - 1] <= 0 < signal[k]` and
/// returns `k - 1 + (-signal[k - 1] / (signal[k] - signal[k - 1]))`.
pub fn upward_crossing(signal: &[Sample], from: usize) -> Option<f64> {
    (from + 1..signal.len()).find_map(|k| {
        let prev = signal[k - 1];
        let cur = signal[k];
        if prev <= 0.0 && cur > 0.0 {
            Some((k - 1) as f64 - prev / (cur - prev))
        } else {
            None
        }
    })
}

/// Error between two frequencies in cents.
pub fn cents_error(estimated: f64, actual: f64) -> f64 {
    1200.0 * (estimated / actual).log2()
}

/// Trigger + packed profile + crossing refinement.
#[derive(Debug, Clone, Default)]
pub struct PitchEstimator {
    trigger: HysteresisTrigger,
}

impl PitchEstimator {
    pub fn new(trigger: HysteresisTrigger) -> Self {
        Self { trigger }
    }

    /// Estimate from a signal and its precomputed shift profile.
    pub fn estimate(
        &self,
        signal: &[Sample],
        profile: &Profile,
        sample_rate: f64,
    ) -> DspResult<PitchEstimate> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(DspError::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        let lag = profile.best_lag().ok_or(DspError::NoPeriodFound)?;
        let first = upward_crossing(signal, 0).ok_or(DspError::NoPeriodFound)?;
        let second = upward_crossing(signal, lag - 1).ok_or(DspError::NoPeriodFound)?;
        let period_samples = second - first;
        if period_samples <= 0.0 {
            return Err(DspError::NoPeriodFound);
        }

        tracing::debug!(lag, first, second, period_samples, "pitch refined");

        Ok(PitchEstimate {
            lag,
            period_samples,
            frequency_hz: sample_rate / period_samples,
        })
    }

    /// Trigger the signal, build the packed profile and estimate.
    pub fn analyze(&mut self, signal: &[Sample], sample_rate: f64) -> DspResult<PitchEstimate> {
        let bits = self.trigger.process(signal);
        let profile = Bitstream::from_bits(&bits)?.autocorrelate()?;
        self.estimate(signal, &profile, sample_rate)
    }
}
