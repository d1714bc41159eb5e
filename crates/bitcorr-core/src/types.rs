//! Core types for the zero-crossing correlation pipeline
//!
//! The pipeline moves through three representations of the same signal:
//!
//! ```text
//!   Sample (f64) ──hysteresis──► Bit (u8, 0 or 1) ──XOR/count──► u32 distance
//! ```
//!
//! Bits are stored one per `u8` in the simple path so that windows can be
//! sliced and inspected directly; the packed path in [`crate::bitstream`]
//! stores 64 per word.

/// A real-valued signal sample
pub type Sample = f64;

/// A single trigger output, always 0 or 1
pub type Bit = u8;

/// Sequence of trigger bits, one per byte
pub type BitSequence = Vec<Bit>;

/// Result type for DSP operations
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur during DSP operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DspError {
    #[error("Bit sequence length {len} is odd; shift profiles need an even length")]
    OddLength { len: usize },

    #[error("Window [{start}, {start}+{len}) exceeds buffer of {available} bits")]
    WindowOutOfBounds {
        start: usize,
        len: usize,
        available: usize,
    },

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid bit value {value} at index {index}; expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No period found in signal")]
    NoPeriodFound,
}
