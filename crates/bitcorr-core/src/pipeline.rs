//! # Pipeline
//!
//! Runs the stages end to end from an [`AppConfig`]:
//!
//! ```text
//! TimeBase → MultiTone → HysteresisTrigger → BitBuffer::profile → PlotPanel ×3
//! ```
//!
//! and, separately, the sampled pitch scenario:
//!
//! ```text
//! MultiTone::synthesize_sampled → HysteresisTrigger → Bitstream::autocorrelate
//!     → PitchEstimator
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::config::AppConfig;
//! use bitcorr_core::pipeline::Pipeline;
//!
//! let output = Pipeline::new(AppConfig::default()).run().unwrap();
//! assert_eq!(output.signal.len(), 200);
//! assert_eq!(output.profile.len(), 100);
//! assert_eq!(output.panels().len(), 3);
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::hamming_profile::{BitBuffer, Profile};
use crate::hysteresis::rising_edges;
use crate::pitch::{cents_error, PitchEstimator};
use crate::plot::PlotPanel;
use crate::synth::{pitch_buffer_len, MultiTone};
use crate::types::{BitSequence, DspResult, Sample};

/// Every intermediate sequence of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub times: Vec<f64>,
    pub signal: Vec<Sample>,
    pub trigger: BitSequence,
    /// Un-duplicated shift profile
    pub profile: Profile,
}

impl PipelineOutput {
    /// Signal, trigger and duplicated-profile panels, top to bottom.
    pub fn panels(&self) -> [PlotPanel; 3] {
        [
            PlotPanel::signal(&self.times, &self.signal),
            PlotPanel::trigger(&self.times, &self.trigger),
            PlotPanel::profile(&self.profile.duplicated()),
        ]
    }
}

/// Outcome of the sampled pitch scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchReport {
    pub actual_hz: f64,
    pub estimated_hz: f64,
    pub cents: f64,
    pub lag: usize,
    pub buffer_len: usize,
}

/// Configured pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Synthesize, trigger and profile.
    pub fn run(&self) -> DspResult<PipelineOutput> {
        let span = tracing::debug_span!("pipeline");
        let _guard = span.enter();

        let synth = &self.config.synth;
        let mut rng = StdRng::seed_from_u64(synth.seed);
        let (times, signal) = synth
            .tone()
            .synthesize_noisy(&synth.time_base(), &mut rng)?;
        tracing::debug!(
            samples = signal.len(),
            noise_level = synth.noise_level,
            "signal synthesized"
        );

        let trigger = self.config.trigger.build().process(&signal);
        tracing::debug!(
            bits = trigger.len(),
            rising_edges = rising_edges(&trigger).len(),
            "trigger computed"
        );

        let profile = BitBuffer::new(trigger.clone())?.profile()?;
        tracing::debug!(
            offsets = profile.len(),
            max = profile.max(),
            best_lag = ?profile.best_lag(),
            "profile computed"
        );

        Ok(PipelineOutput {
            times,
            signal,
            trigger,
            profile,
        })
    }

    /// Estimate the pitch of the configured sampled tone.
    pub fn run_pitch(&self) -> DspResult<PitchReport> {
        let span = tracing::debug_span!("pitch");
        let _guard = span.enter();

        let cfg = &self.config.pitch;
        let buffer_len = pitch_buffer_len(cfg.sample_rate, cfg.frequency)?;
        let tone = MultiTone::new(cfg.frequency, self.config.synth.harmonics.clone())
            .with_noise(cfg.noise_level);
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let signal = tone.synthesize_sampled(buffer_len, cfg.sample_rate, &mut rng)?;

        let mut estimator = PitchEstimator::new(cfg.trigger.build());
        let estimate = estimator.analyze(&signal, cfg.sample_rate)?;
        let cents = cents_error(estimate.frequency_hz, cfg.frequency);

        tracing::info!(
            actual_hz = cfg.frequency,
            estimated_hz = estimate.frequency_hz,
            cents,
            "pitch estimated"
        );

        Ok(PitchReport {
            actual_hz: cfg.frequency,
            estimated_hz: estimate.frequency_hz,
            cents,
            lag: estimate.lag,
            buffer_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::Bitstream;
    use crate::plot::{PROFILE_Y_RANGE, SIGNAL_Y_RANGE, TRIGGER_Y_RANGE};
    use crate::types::DspError;

    #[test]
    fn test_default_run() {
        let output = Pipeline::default().run().unwrap();
        assert_eq!(output.times.len(), 200);
        assert_eq!(output.signal.len(), output.times.len());
        assert_eq!(output.trigger.len(), output.times.len());
        assert_eq!(output.profile.len(), 100);
        assert_eq!(output.profile.values()[0], 0);
        // Period of the 1 Hz tone is 100 samples; lag 99 is one sample short.
        assert_eq!(output.profile.values()[1], 6);
        assert_eq!(output.profile.values()[99], 6);
        assert_eq!(output.profile.max(), 70);
    }

    #[test]
    fn test_packed_path_agrees() {
        let output = Pipeline::default().run().unwrap();
        let packed = Bitstream::from_bits(&output.trigger)
            .unwrap()
            .autocorrelate()
            .unwrap();
        assert_eq!(packed, output.profile);
    }

    #[test]
    fn test_panels() {
        let output = Pipeline::default().run().unwrap();
        let [signal, trigger, profile] = output.panels();
        assert_eq!(signal.y_range, SIGNAL_Y_RANGE);
        assert_eq!(trigger.y_range, TRIGGER_Y_RANGE);
        assert_eq!(profile.y_range, PROFILE_Y_RANGE);
        assert_eq!(signal.points.len(), 200);
        assert_eq!(profile.points.len(), 200);
        assert!(profile.points.iter().all(|p| p[1] <= PROFILE_Y_RANGE.1));
    }

    #[test]
    fn test_odd_length_surfaces() {
        let mut config = AppConfig::default();
        config.synth.end = 1.99; // 199 samples
        let err = Pipeline::new(config).run().unwrap_err();
        assert_eq!(err, DspError::OddLength { len: 199 });
    }

    #[test]
    fn test_synth_noise_is_applied() {
        let clean = Pipeline::default().run().unwrap();
        let mut config = AppConfig::default();
        config.synth.noise_level = 0.5;
        let noisy = Pipeline::new(config.clone()).run().unwrap();
        assert_eq!(noisy.times, clean.times);
        assert_ne!(noisy.signal, clean.signal);
        for (n, c) in noisy.signal.iter().zip(&clean.signal) {
            assert!((n - c).abs() <= 0.5 + 1e-12);
        }
        // Same seed, same run.
        assert_eq!(Pipeline::new(config).run().unwrap(), noisy);
    }

    #[test]
    fn test_unbounded_pitch_is_an_error() {
        let mut config = AppConfig::default();
        config.pitch.sample_rate = f64::INFINITY;
        assert!(Pipeline::new(config).run_pitch().is_err());

        let mut config = AppConfig::default();
        config.pitch.sample_rate = 1e25;
        config.pitch.frequency = 1.0;
        assert!(matches!(
            Pipeline::new(config).run_pitch(),
            Err(DspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pitch_uses_its_own_trigger() {
        let mut config = AppConfig::default();
        config.trigger.low = -0.9;
        config.trigger.high = 0.9;
        // The display trigger never fires on this tone; the pitch trigger still does.
        let report = Pipeline::new(config).run_pitch().unwrap();
        assert_eq!(report.lag, 100);
    }

    #[test]
    fn test_pitch_report() {
        let report = Pipeline::default().run_pitch().unwrap();
        assert_eq!(report.buffer_len, 256);
        assert_eq!(report.lag, 100);
        assert!(report.cents.abs() < 5.0, "{report:?}");
    }
}
