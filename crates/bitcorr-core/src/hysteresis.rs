//! Hysteresis Trigger: Zero-crossing squarer with a dead band
//!
//! Converts a real-valued signal into a 0/1 trigger sequence. The output
//! goes LOW when the input falls strictly below `low` and HIGH when it rises
//! strictly above `high`; inputs inside `[low, high]` hold the previous
//! output. The state starts LOW.
//!
//! ```text
//!          s > high
//!   LOW ─────────────► HIGH
//!    ▲                   │
//!    └───────────────────┘
//!          s < low
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::hysteresis::HysteresisTrigger;
//!
//! let mut trig = HysteresisTrigger::default();
//! assert_eq!(trig.step(0.05), 0); // dead band, still LOW
//! assert_eq!(trig.step(0.2), 1);
//! assert_eq!(trig.step(-0.05), 1); // dead band, holds HIGH
//! assert_eq!(trig.step(-0.2), 0);
//! ```

use crate::types::{Bit, BitSequence, Sample};

/// Default lower trip point.
pub const DEFAULT_LOW: f64 = -0.1;
/// Default upper trip point.
pub const DEFAULT_HIGH: f64 = 0.1;

/// Two-threshold trigger holding a single bit of state.
#[derive(Debug, Clone)]
pub struct HysteresisTrigger {
    /// Below this → 0
    low: f64,
    /// Above this → 1
    high: f64,
    /// Current output
    state: bool,
}

impl Default for HysteresisTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_LOW, DEFAULT_HIGH)
    }
}

impl HysteresisTrigger {
    /// Create a trigger with the given trip points (swapped if reversed).
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low: low.min(high),
            high: low.max(high),
            state: false,
        }
    }

    /// Advance by one sample and return the output bit.
    #[inline]
    pub fn step(&mut self, s: Sample) -> Bit {
        if s < self.low {
            self.state = false;
        } else if s > self.high {
            self.state = true;
        }
        self.state as Bit
    }

    /// Run a fresh sweep over `input`.
    ///
    /// The state is reset first, so every call is independent of the last.
    pub fn process(&mut self, input: &[Sample]) -> BitSequence {
        self.reset();
        input.iter().map(|&s| self.step(s)).collect()
    }

    /// Current output bit.
    pub fn state(&self) -> Bit {
        self.state as Bit
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Return to LOW.
    pub fn reset(&mut self) {
        self.state = false;
    }
}

/// Trigger sequence for `input` using a fresh default (±0.1) trigger.
pub fn trigger_sequence(input: &[Sample]) -> BitSequence {
    HysteresisTrigger::default().process(input)
}

/// Indices where the trigger goes 0 → 1.
pub fn rising_edges(bits: &[Bit]) -> Vec<usize> {
    bits.windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] == 0 && w[1] == 1)
        .map(|(i, _)| i + 1)
        .collect()
}
