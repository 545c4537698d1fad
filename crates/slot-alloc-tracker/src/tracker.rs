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

//! # Free-Index Tracker
//!
//! Tracks which indices in an inclusive span `[min, max]` are reserved and
//! which are free, one bit per slot. Queries that miss (out-of-range
//! argument, no free slot left, already-reserved target) return `false` or
//! `None`; they are ordinary negative results, not errors.

use crate::bitset::ReservedBits;
use slot_alloc_core::{
    index::{SlotCount, SlotIndex},
    span::SlotSpan,
};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// A free/reserved tracker over an inclusive index span.
///
/// The span is fixed at construction. Reservation state lives in a packed
/// bitset, and a free-slot tally is kept incrementally so [`free`] and
/// [`reserved`] are O(1). All searches walk the bitset a word at a time.
///
/// This is a plain value type: cloning copies the bitset, and concurrent
/// mutation needs external locking (find-then-reserve sequences are only
/// atomic through the `reserve_*` methods, which do both under one call).
///
/// [`free`]: FreeIndexTracker::free
/// [`reserved`]: FreeIndexTracker::reserved
///
/// # Examples
///
/// ```
/// use slot_alloc_core::index::SlotIndex;
/// use slot_alloc_tracker::FreeIndexTracker;
///
/// let mut tracker = FreeIndexTracker::new(SlotIndex::new(0), SlotIndex::new(9));
/// assert_eq!(tracker.reserve_first_free(), Some(SlotIndex::new(0)));
/// assert!(tracker.is_reserved(SlotIndex::new(0)));
/// assert_eq!(tracker.free().value(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeIndexTracker {
    span: SlotSpan,
    bits: ReservedBits,
    free: u64,
}

impl FreeIndexTracker {
    /// Creates a tracker over `[min, max]` with every slot free.
    ///
    /// `min <= max` is a contract precondition, checked with a
    /// `debug_assert`. (A swapped pair is normalized in release builds, but
    /// callers must not rely on that.)
    #[inline]
    pub fn new(min: SlotIndex, max: SlotIndex) -> Self {
        debug_assert!(
            min <= max,
            "FreeIndexTracker::new requires min <= max, got {min} and {max}"
        );
        Self::over(SlotSpan::new(min, max))
    }

    /// Creates a tracker over `span` with every slot free.
    ///
    /// # Panics
    ///
    /// Panics if the span is too wide for the bitset to be addressable.
    pub fn over(span: SlotSpan) -> Self {
        let nbits = usize::try_from(span.len().value())
            .expect("slot span too wide to back with a bitset");
        Self {
            span,
            bits: ReservedBits::new(nbits),
            free: span.len().value(),
        }
    }

    /// Creates a tracker over `[min, max]` with `initial` already reserved.
    ///
    /// The span expands to cover any initial reservation outside the given
    /// bounds; it never shrinks below them. Duplicate entries are harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::index::SlotIndex;
    /// use slot_alloc_tracker::FreeIndexTracker;
    ///
    /// let tracker = FreeIndexTracker::with_reserved(
    ///     SlotIndex::new(10),
    ///     SlotIndex::new(11),
    ///     [SlotIndex::new(5), SlotIndex::new(12)],
    /// );
    /// assert_eq!(tracker.minimum(), SlotIndex::new(5));
    /// assert_eq!(tracker.maximum(), SlotIndex::new(12));
    /// assert_eq!(tracker.len().value(), 8);
    /// ```
    pub fn with_reserved<I>(min: SlotIndex, max: SlotIndex, initial: I) -> Self
    where
        I: IntoIterator<Item = SlotIndex>,
    {
        let initial: Vec<SlotIndex> = initial.into_iter().collect();
        debug_assert!(
            min <= max || !initial.is_empty(),
            "FreeIndexTracker::with_reserved requires min <= max, got {min} and {max}"
        );
        let span = initial
            .iter()
            .fold(SlotSpan::new(min, max), |s, &x| s.expand_to(x));
        let mut tracker = Self::over(span);
        for x in initial {
            tracker.reserve(x);
        }
        tracker
    }

    /// The smallest trackable index.
    #[inline]
    pub fn minimum(&self) -> SlotIndex {
        self.span.min()
    }

    /// The largest trackable index.
    #[inline]
    pub fn maximum(&self) -> SlotIndex {
        self.span.max()
    }

    /// The tracked span `[min, max]`.
    #[inline]
    pub fn span(&self) -> SlotSpan {
        self.span
    }

    /// Total number of tracked slots, `max - min + 1`.
    #[inline]
    pub fn len(&self) -> SlotCount {
        self.span.len()
    }

    /// A span always covers at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of free slots. O(1).
    #[inline]
    pub fn free(&self) -> SlotCount {
        SlotCount::new(self.free)
    }

    /// Number of reserved slots. O(1).
    #[inline]
    pub fn reserved(&self) -> SlotCount {
        SlotCount::new(self.span.len().value() - self.free)
    }

    /// Whether every slot is reserved.
    #[inline]
    pub fn is_booked(&self) -> bool {
        self.free == 0
    }

    /// Whether `x` is reserved. Out-of-range indices are never reserved.
    #[inline]
    pub fn is_reserved(&self, x: SlotIndex) -> bool {
        match self.offset(x) {
            Some(off) => self.bits.test(off),
            None => false,
        }
    }

    /// Smallest reserved index, or `None` if nothing is reserved.
    #[inline]
    pub fn first_reserved(&self) -> Option<SlotIndex> {
        self.bits.next_one(0).map(|off| self.index_at(off))
    }

    /// Largest reserved index, or `None` if nothing is reserved.
    #[inline]
    pub fn last_reserved(&self) -> Option<SlotIndex> {
        self.bits
            .prev_one(self.bits.len() - 1)
            .map(|off| self.index_at(off))
    }

    /// Smallest free index, or `None` if fully booked.
    #[inline]
    pub fn first_free(&self) -> Option<SlotIndex> {
        self.bits.next_zero(0).map(|off| self.index_at(off))
    }

    /// Largest free index, or `None` if fully booked.
    #[inline]
    pub fn last_free(&self) -> Option<SlotIndex> {
        self.bits
            .prev_zero(self.bits.len() - 1)
            .map(|off| self.index_at(off))
    }

    /// Nearest free index `<= x`, scanning downward from `x` inclusive.
    ///
    /// `None` if no free index exists in `[min, x]`, or if `x` is outside
    /// the span.
    #[inline]
    pub fn previous_free(&self, x: SlotIndex) -> Option<SlotIndex> {
        let off = self.offset(x)?;
        self.bits.prev_zero(off).map(|o| self.index_at(o))
    }

    /// Nearest free index `>= x`, scanning upward from `x` inclusive.
    ///
    /// `None` if no free index exists in `[x, max]`, or if `x` is outside
    /// the span.
    #[inline]
    pub fn next_free(&self, x: SlotIndex) -> Option<SlotIndex> {
        let off = self.offset(x)?;
        self.bits.next_zero(off).map(|o| self.index_at(o))
    }

    /// Free index with the smallest absolute distance to `x`.
    ///
    /// If `x` itself is free it wins at distance zero. Ties between an
    /// upward and a downward candidate at equal distance go to the upward
    /// one, matching a symmetric outward scan that checks the upward side
    /// first at each step.
    pub fn nearest_free(&self, x: SlotIndex) -> Option<SlotIndex> {
        let off = self.offset(x)?;
        if !self.bits.test(off) {
            return Some(x);
        }
        let up = self.bits.next_zero(off);
        let down = self.bits.prev_zero(off);
        let chosen = match (up, down) {
            (Some(u), Some(d)) => {
                if u - off <= off - d {
                    u
                } else {
                    d
                }
            }
            (Some(u), None) => u,
            (None, Some(d)) => d,
            (None, None) => return None,
        };
        Some(self.index_at(chosen))
    }

    /// Reserves `x`. Returns `true` iff `x` was free and in range.
    pub fn reserve(&mut self, x: SlotIndex) -> bool {
        let Some(off) = self.offset(x) else {
            return false;
        };
        if !self.bits.set(off) {
            return false;
        }
        self.free -= 1;
        trace!(index = x.value(), "reserved slot");
        true
    }

    /// Releases `x`. Returns `true` iff `x` was reserved and in range.
    pub fn release(&mut self, x: SlotIndex) -> bool {
        let Some(off) = self.offset(x) else {
            return false;
        };
        if !self.bits.clear(off) {
            return false;
        }
        self.free += 1;
        trace!(index = x.value(), "released slot");
        true
    }

    /// Finds and reserves the smallest free index in one call.
    pub fn reserve_first_free(&mut self) -> Option<SlotIndex> {
        let off = self.bits.next_zero(0)?;
        Some(self.take(off))
    }

    /// Finds and reserves the largest free index in one call.
    pub fn reserve_last_free(&mut self) -> Option<SlotIndex> {
        let off = self.bits.prev_zero(self.bits.len() - 1)?;
        Some(self.take(off))
    }

    /// Finds and reserves the nearest free index `>= x` in one call.
    pub fn reserve_next_free(&mut self, x: SlotIndex) -> Option<SlotIndex> {
        let from = self.offset(x)?;
        let off = self.bits.next_zero(from)?;
        Some(self.take(off))
    }

    /// Finds and reserves the nearest free index `<= x` in one call.
    pub fn reserve_previous_free(&mut self, x: SlotIndex) -> Option<SlotIndex> {
        let upto = self.offset(x)?;
        let off = self.bits.prev_zero(upto)?;
        Some(self.take(off))
    }

    /// Finds and reserves the free index nearest to `x` in one call.
    ///
    /// Same tie-break as [`FreeIndexTracker::nearest_free`].
    pub fn reserve_nearest_free(&mut self, x: SlotIndex) -> Option<SlotIndex> {
        let found = self.nearest_free(x)?;
        let off = self
            .offset(found)
            .expect("nearest_free returned an in-span index");
        Some(self.take(off))
    }

    /// Reserves every slot. Returns whether any state changed.
    pub fn reserve_all(&mut self) -> bool {
        let changed = self.free != 0;
        self.bits.set_all();
        self.free = 0;
        if changed {
            debug!(span = %self.span, "reserved all slots");
        }
        changed
    }

    /// Frees every slot. Returns whether any state changed.
    pub fn release_all(&mut self) -> bool {
        let changed = self.free != self.span.len().value();
        self.bits.clear_all();
        self.free = self.span.len().value();
        if changed {
            debug!(span = %self.span, "released all slots");
        }
        changed
    }

    /// Iterates free indices in ascending order.
    #[inline]
    pub fn iter_free(&self) -> SlotIter<'_> {
        SlotIter {
            bits: &self.bits,
            span: self.span,
            cursor: 0,
            reserved: false,
        }
    }

    /// Iterates reserved indices in ascending order.
    #[inline]
    pub fn iter_reserved(&self) -> SlotIter<'_> {
        SlotIter {
            bits: &self.bits,
            span: self.span,
            cursor: 0,
            reserved: true,
        }
    }

    /// External index to bit offset; `None` outside the span.
    #[inline]
    fn offset(&self, x: SlotIndex) -> Option<usize> {
        // Span widths are checked against usize at construction, so any
        // in-span offset fits.
        self.span.offset_of(x).map(|off| off as usize)
    }

    #[inline]
    fn index_at(&self, off: usize) -> SlotIndex {
        self.span.index_at(off as u64)
    }

    /// Reserves a known-free offset and returns its external index.
    #[inline]
    fn take(&mut self, off: usize) -> SlotIndex {
        let was_clear = self.bits.set(off);
        debug_assert!(was_clear, "take() called on a reserved offset");
        self.free -= 1;
        let ix = self.index_at(off);
        trace!(index = ix.value(), "reserved slot");
        ix
    }
}

impl Default for FreeIndexTracker {
    /// A tracker over `[0, 1]` with both slots free.
    #[inline]
    fn default() -> Self {
        Self::new(SlotIndex::new(0), SlotIndex::new(1))
    }
}

impl std::fmt::Display for FreeIndexTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FreeIndexTracker({}, free {}/{})",
            self.span,
            self.free,
            self.span.len().value()
        )
    }
}

/// Ascending iterator over the free or reserved indices of a tracker.
#[derive(Debug, Clone)]
pub struct SlotIter<'a> {
    bits: &'a ReservedBits,
    span: SlotSpan,
    cursor: usize,
    reserved: bool,
}

impl Iterator for SlotIter<'_> {
    type Item = SlotIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let found = if self.reserved {
            self.bits.next_one(self.cursor)
        } else {
            self.bits.next_zero(self.cursor)
        }?;
        self.cursor = found + 1;
        Some(self.span.index_at(found as u64))
    }
}

impl FusedIterator for SlotIter<'_> {}
