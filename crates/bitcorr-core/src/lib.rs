//! # bitcorr Core DSP Library
//!
//! Binary zero-crossing autocorrelation: a multi-tone test signal is squared
//! up by a hysteresis trigger, and the resulting bit sequence is compared
//! with shifted windows of itself to expose its period.
//!
//! ## Signal Flow
//!
//! ```text
//! TimeBase → MultiTone → HysteresisTrigger → Hamming profile → plot panels
//!                                          ↘ Bitstream (packed) → PitchEstimator
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::prelude::*;
//!
//! let (_, signal) = MultiTone::default().synthesize(&TimeBase::default()).unwrap();
//! let bits = HysteresisTrigger::default().process(&signal);
//! let profile = cyclic_hamming_profile(&bits).unwrap();
//! assert_eq!(profile.values()[0], 0);
//! assert_eq!(profile.duplicated().len(), bits.len());
//! ```

pub mod bitstream;
pub mod config;
pub mod hamming_profile;
pub mod hysteresis;
pub mod observe;
pub mod pipeline;
pub mod pitch;
pub mod plot;
pub mod synth;
pub mod types;

// Re-export main types
pub use config::{AppConfig, ConfigError};
pub use pipeline::{Pipeline, PipelineOutput, PitchReport};
pub use types::{Bit, BitSequence, DspError, DspResult, Sample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bitstream::Bitstream;
    pub use crate::hamming_profile::{cyclic_hamming_profile, BitBuffer, Profile};
    pub use crate::hysteresis::{trigger_sequence, HysteresisTrigger};
    pub use crate::pitch::{PitchEstimate, PitchEstimator};
    pub use crate::plot::PlotPanel;
    pub use crate::synth::{Harmonic, MultiTone, TimeBase};
    pub use crate::types::{Bit, DspError, DspResult};
}
