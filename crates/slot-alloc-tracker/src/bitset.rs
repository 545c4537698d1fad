// Copyright (c) 2025 the slot-alloc contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Word-packed bit store for reservation state, one bit per slot.
///
/// Invariant: bits at positions `>= nbits` in the last word are always zero,
/// so forward scans never report a hit past the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ReservedBits {
    nbits: usize,
    words: Vec<u64>,
}

impl ReservedBits {
    const WORD_BITS: usize = u64::BITS as usize;

    #[inline]
    pub(crate) fn new(nbits: usize) -> Self {
        Self {
            nbits,
            words: vec![0u64; nbits.div_ceil(Self::WORD_BITS)],
        }
    }

    #[inline(always)]
    fn word_ix(bit: usize) -> usize {
        bit / Self::WORD_BITS
    }

    #[inline(always)]
    fn bit_off(bit: usize) -> usize {
        bit % Self::WORD_BITS
    }

    /// Ones strictly below bit position `end`.
    #[inline(always)]
    fn hi_mask(end: usize) -> u64 {
        if end == 0 {
            0
        } else if end >= Self::WORD_BITS {
            !0
        } else {
            (!0u64) >> (Self::WORD_BITS - end)
        }
    }

    /// Ones at and above bit position `start`.
    #[inline(always)]
    fn lo_mask(start: usize) -> u64 {
        if start >= Self::WORD_BITS {
            0
        } else {
            (!0u64) << start
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nbits
    }

    #[inline]
    pub(crate) fn test(&self, bit: usize) -> bool {
        debug_assert!(bit < self.nbits);
        (self.words[Self::word_ix(bit)] >> Self::bit_off(bit)) & 1 == 1
    }

    /// Sets `bit`; returns whether it was previously clear.
    #[inline]
    pub(crate) fn set(&mut self, bit: usize) -> bool {
        debug_assert!(bit < self.nbits);
        let word = &mut self.words[Self::word_ix(bit)];
        let mask = 1u64 << Self::bit_off(bit);
        let was_clear = *word & mask == 0;
        *word |= mask;
        was_clear
    }

    /// Clears `bit`; returns whether it was previously set.
    #[inline]
    pub(crate) fn clear(&mut self, bit: usize) -> bool {
        debug_assert!(bit < self.nbits);
        let word = &mut self.words[Self::word_ix(bit)];
        let mask = 1u64 << Self::bit_off(bit);
        let was_set = *word & mask != 0;
        *word &= !mask;
        was_set
    }

    pub(crate) fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    pub(crate) fn set_all(&mut self) {
        self.words.fill(!0u64);
        if let Some(last) = self.words.last_mut() {
            let last_bits = self.nbits % Self::WORD_BITS;
            if last_bits != 0 {
                *last &= Self::hi_mask(last_bits);
            }
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Lowest set bit at or above `from`.
    pub(crate) fn next_one(&self, from: usize) -> Option<usize> {
        if from >= self.nbits {
            return None;
        }
        let mut wi = Self::word_ix(from);
        let mut word = self.words[wi] & Self::lo_mask(Self::bit_off(from));
        loop {
            if word != 0 {
                // Tail bits past nbits are kept zero, so this is in range.
                return Some(wi * Self::WORD_BITS + word.trailing_zeros() as usize);
            }
            wi += 1;
            if wi == self.words.len() {
                return None;
            }
            word = self.words[wi];
        }
    }

    /// Highest set bit at or below `upto`.
    pub(crate) fn prev_one(&self, upto: usize) -> Option<usize> {
        debug_assert!(upto < self.nbits);
        let mut wi = Self::word_ix(upto);
        let mut word = self.words[wi] & Self::hi_mask(Self::bit_off(upto) + 1);
        loop {
            if word != 0 {
                let top = Self::WORD_BITS - 1 - word.leading_zeros() as usize;
                return Some(wi * Self::WORD_BITS + top);
            }
            if wi == 0 {
                return None;
            }
            wi -= 1;
            word = self.words[wi];
        }
    }

    /// Lowest clear bit at or above `from`.
    pub(crate) fn next_zero(&self, from: usize) -> Option<usize> {
        if from >= self.nbits {
            return None;
        }
        let mut wi = Self::word_ix(from);
        let mut word = !self.words[wi] & Self::lo_mask(Self::bit_off(from));
        loop {
            if word != 0 {
                let bit = wi * Self::WORD_BITS + word.trailing_zeros() as usize;
                // A hit past nbits can only come from the inverted tail of
                // the last word, which means nothing in range is clear.
                return (bit < self.nbits).then_some(bit);
            }
            wi += 1;
            if wi == self.words.len() {
                return None;
            }
            word = !self.words[wi];
        }
    }

    /// Highest clear bit at or below `upto`.
    pub(crate) fn prev_zero(&self, upto: usize) -> Option<usize> {
        debug_assert!(upto < self.nbits);
        let mut wi = Self::word_ix(upto);
        let mut word = !self.words[wi] & Self::hi_mask(Self::bit_off(upto) + 1);
        loop {
            if word != 0 {
                let top = Self::WORD_BITS - 1 - word.leading_zeros() as usize;
                return Some(wi * Self::WORD_BITS + top);
            }
            if wi == 0 {
                return None;
            }
            wi -= 1;
            word = !self.words[wi];
        }
    }
}
