//! Packed Bitstream and Word-Parallel Shift Profile
//!
//! Stores trigger bits 64 per `u64` word (bit `i` in word `i / 64` at
//! position `i % 64`) and computes the same shift profile as
//! [`crate::hamming_profile`] a whole word at a time with `count_ones`.
//!
//! For offset `p` the window word `w` is assembled from two stored words:
//!
//! ```text
//!   k = (p + 64w) / 64,  s = p % 64
//!   window[w] = words[k] >> s | words[k + 1] << (64 - s)      (s != 0)
//! ```
//!
//! One zero guard word always follows the data so `k + 1` stays in range.
//! The last partial window word is masked to `n % 64` bits, so no bit at or
//! beyond the logical length is ever compared.
//!
//! ## Example
//!
//! ```rust
//! use bitcorr_core::bitstream::Bitstream;
//!
//! let stream = Bitstream::from_bits(&[0, 0, 1, 1, 0, 0, 1, 1]).unwrap();
//! assert!(stream.get(2));
//! assert_eq!(stream.autocorrelate().unwrap().values(), &[0, 2, 4, 2]);
//! ```

use crate::hamming_profile::Profile;
use crate::types::{Bit, DspError, DspResult};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-length bit sequence packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    words: Vec<u64>,
    len: usize,
}

impl Bitstream {
    /// All-zero stream of `len` bits.
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS) + 1],
            len,
        }
    }

    /// Pack a trigger sequence (values must be 0 or 1).
    pub fn from_bits(bits: &[Bit]) -> DspResult<Self> {
        let mut stream = Self::with_len(bits.len());
        for (index, &value) in bits.iter().enumerate() {
            match value {
                0 => {}
                1 => stream.words[index / WORD_BITS] |= 1 << (index % WORD_BITS),
                _ => return Err(DspError::InvalidBit { index, value }),
            }
        }
        Ok(stream)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Storage words, including the trailing guard word.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Set bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "bit index {} out of range for {}", i, self.len);
        let mask = 1u64 << (i % WORD_BITS);
        let word = &mut self.words[i / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Read bit `i`; bits past the end read as `false`.
    pub fn get(&self, i: usize) -> bool {
        i < self.len && (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Reset every bit to zero.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Unpack to one bit per byte.
    pub fn to_bits(&self) -> Vec<Bit> {
        (0..self.len).map(|i| self.get(i) as Bit).collect()
    }

    /// 64 bits starting at bit `start`. Bits past the storage read as zero.
    #[inline]
    fn word_at(&self, start: usize) -> u64 {
        let k = start / WORD_BITS;
        let s = start % WORD_BITS;
        let lo = self.words.get(k).copied().unwrap_or(0);
        if s == 0 {
            lo
        } else {
            let hi = self.words.get(k + 1).copied().unwrap_or(0);
            (lo >> s) | (hi << (WORD_BITS - s))
        }
    }

    /// Word-parallel shift profile; equal to
    /// [`crate::hamming_profile::cyclic_hamming_profile`] on the same bits.
    pub fn autocorrelate(&self) -> DspResult<Profile> {
        if self.len % 2 != 0 {
            return Err(DspError::OddLength { len: self.len });
        }
        let n = self.len / 2;
        let full_words = n / WORD_BITS;
        let tail_bits = n % WORD_BITS;
        let tail_mask = (1u64 << tail_bits).wrapping_sub(1);

        let values = (0..n)
            .map(|offset| {
                let mut count = 0u32;
                for w in 0..full_words {
                    let reference = self.words[w];
                    count += (reference ^ self.word_at(offset + w * WORD_BITS)).count_ones();
                }
                if tail_bits != 0 {
                    let reference = self.words[full_words] & tail_mask;
                    let window = self.word_at(offset + full_words * WORD_BITS) & tail_mask;
                    count += (reference ^ window).count_ones();
                }
                count
            })
            .collect();
        Ok(Profile::new(values))
    }
}
