//! Cyclic Hamming Profile: shift self-similarity of a trigger sequence
//!
//! For a bit sequence of even length `2n`, compares the first half against
//! every window `bits[i..i + n]` for `i in 0..n` and records how many
//! positions differ. Offset 0 is always 0; offsets equal to the signal
//! period fall back towards 0, so the profile acts as a coarse binary
//! autocorrelation.
//!
//! ```text
//!   bits:      0 0 1 1 0 0 1 1
//!   reference: 0 0 1 1
//!   i = 1:       0 1 1 0        → 2 differ
//!   i = 2:         1 1 0 0      → 4 differ
//! ```
//!
//! Odd lengths are rejected with [`DspError::OddLength`] rather than
//! dropping the trailing bit.
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::hamming_profile::cyclic_hamming_profile;
//!
//! let profile = cyclic_hamming_profile(&[0, 0, 1, 1, 0, 0, 1, 1]).unwrap();
//! assert_eq!(profile.values(), &[0, 2, 4, 2]);
//! assert_eq!(profile.duplicated(), vec![0, 2, 4, 2, 0, 2, 4, 2]);
//! ```

use crate::types::{Bit, DspError, DspResult};

/// Owned, immutable bit buffer with bounds-checked windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<Bit>,
}

impl BitBuffer {
    /// Wrap a trigger sequence. Length must be even and every value 0 or 1.
    pub fn new(bits: Vec<Bit>) -> DspResult<Self> {
        if bits.len() % 2 != 0 {
            return Err(DspError::OddLength { len: bits.len() });
        }
        if let Some((index, &value)) = bits.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(DspError::InvalidBit { index, value });
        }
        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Half the buffer length: the window size and number of offsets.
    pub fn half_len(&self) -> usize {
        self.bits.len() / 2
    }

    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    /// The `len` bits starting at `start`.
    pub fn window(&self, start: usize, len: usize) -> DspResult<&[Bit]> {
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.bits.len())
            .ok_or(DspError::WindowOutOfBounds {
                start,
                len,
                available: self.bits.len(),
            })?;
        Ok(&self.bits[start..end])
    }

    /// The first half, against which every window is compared.
    pub fn reference(&self) -> &[Bit] {
        &self.bits[..self.half_len()]
    }

    /// Hamming profile over all `half_len()` offsets.
    pub fn profile(&self) -> DspResult<Profile> {
        let n = self.half_len();
        let reference = self.reference();
        let values = (0..n)
            .map(|offset| hamming_distance(reference, self.window(offset, n)?))
            .collect::<DspResult<Vec<u32>>>()?;
        Ok(Profile::new(values))
    }
}

/// Number of positions where `a` and `b` differ.
pub fn hamming_distance(a: &[Bit], b: &[Bit]) -> DspResult<u32> {
    if a.len() != b.len() {
        return Err(DspError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| ((x ^ y) & 1) as u32).sum())
}

/// Compute the shift profile of a trigger sequence.
pub fn cyclic_hamming_profile(bits: &[Bit]) -> DspResult<Profile> {
    BitBuffer::new(bits.to_vec())?.profile()
}

/// Hamming distance per shift offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    values: Vec<u32>,
}

impl Profile {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest distance, 0 for an empty profile.
    pub fn max(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// The profile concatenated with itself, for two-period display.
    pub fn duplicated(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.values.len() * 2);
        out.extend_from_slice(&self.values);
        out.extend_from_slice(&self.values);
        out
    }

    /// Earliest non-zero offset with the smallest distance.
    pub fn best_lag(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (lag, &v) in self.values.iter().enumerate().skip(1) {
            if best.map_or(true, |(_, b)| v < b) {
                best = Some((lag, v));
            }
        }
        best.map(|(lag, _)| lag)
    }
}

impl From<Profile> for Vec<u32> {
    fn from(p: Profile) -> Self {
        p.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_sequence() {
        let profile = cyclic_hamming_profile(&[0, 0, 1, 1, 0, 0, 1, 1]).unwrap();
        assert_eq!(profile.values(), &[0, 2, 4, 2]);
        assert_eq!(profile.duplicated(), vec![0, 2, 4, 2, 0, 2, 4, 2]);
    }

    #[test]
    fn test_all_zero() {
        let profile = cyclic_hamming_profile(&[0; 64]).unwrap();
        assert_eq!(profile.len(), 32);
        assert!(profile.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_alternating() {
        let n = 16;
        let bits: Vec<u8> = (0..2 * n).map(|i| (i % 2) as u8).collect();
        let profile = cyclic_hamming_profile(&bits).unwrap();
        assert_eq!(profile.values()[0], 0);
        // Every odd offset flips every bit; n - 1 is the largest odd offset.
        assert_eq!(profile.values()[n - 1], n as u32);
        for (i, &v) in profile.values().iter().enumerate() {
            assert_eq!(v, if i % 2 == 0 { 0 } else { n as u32 });
        }
    }

    #[test]
    fn test_odd_length_rejected() {
        assert_eq!(
            cyclic_hamming_profile(&[0, 1, 1]),
            Err(DspError::OddLength { len: 3 })
        );
    }

    #[test]
    fn test_invalid_bit_rejected() {
        assert_eq!(
            BitBuffer::new(vec![0, 1, 2, 0]),
            Err(DspError::InvalidBit { index: 2, value: 2 })
        );
    }

    #[test]
    fn test_empty_sequence() {
        let profile = cyclic_hamming_profile(&[]).unwrap();
        assert!(profile.is_empty());
        assert!(profile.duplicated().is_empty());
        assert_eq!(profile.best_lag(), None);
    }

    #[test]
    fn test_window_bounds() {
        let buf = BitBuffer::new(vec![0, 1, 0, 1]).unwrap();
        assert_eq!(buf.window(1, 3).unwrap(), &[1, 0, 1]);
        assert_eq!(buf.window(4, 0).unwrap(), &[] as &[u8]);
        assert_eq!(
            buf.window(2, 3),
            Err(DspError::WindowOutOfBounds {
                start: 2,
                len: 3,
                available: 4
            })
        );
        assert!(buf.window(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance(&[0, 1, 1, 0], &[1, 1, 0, 0]).unwrap(), 2);
        assert_eq!(hamming_distance(&[], &[]).unwrap(), 0);
        assert_eq!(
            hamming_distance(&[0, 1], &[0]),
            Err(DspError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_best_lag() {
        // Square wave with period 8 over 32 bits.
        let bits: Vec<u8> = (0..32).map(|i| ((i / 4) % 2) as u8).collect();
        let profile = cyclic_hamming_profile(&bits).unwrap();
        assert_eq!(profile.best_lag(), Some(8));
        assert_eq!(profile.values()[8], 0);
        assert_eq!(profile.max(), 16);
    }
}
