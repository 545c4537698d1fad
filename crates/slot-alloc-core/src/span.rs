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

//! # Slot Spans
//!
//! An inclusive span of slot indices `[min, max]`, the addressable universe
//! of a tracker. Unlike a half-open interval, both bounds are valid indices;
//! a span is therefore never empty and always covers at least one slot.

use crate::index::{SlotCount, SlotIndex};
use std::cmp::Ordering;
use std::iter::FusedIterator;

/// An inclusive span `[min, max]` of slot indices.
///
/// Both endpoints are part of the span, so `SlotSpan::new(a, a)` covers
/// exactly one slot. Construction normalizes swapped bounds.
///
/// # Examples
///
/// ```
/// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
///
/// let span = SlotSpan::new(SlotIndex::new(5), SlotIndex::new(9));
/// assert_eq!(span.min(), SlotIndex::new(5));
/// assert_eq!(span.max(), SlotIndex::new(9));
/// assert!(span.contains(SlotIndex::new(9)));
/// assert!(!span.contains(SlotIndex::new(10)));
/// assert_eq!(span.len().value(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotSpan {
    min: SlotIndex,
    max: SlotIndex,
}

impl SlotSpan {
    /// Creates a new inclusive span covering `a` and `b`.
    ///
    /// If `b < a` the bounds are swapped, so the span is always well-formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
    ///
    /// let span = SlotSpan::new(SlotIndex::new(9), SlotIndex::new(5));
    /// assert_eq!(span.min(), SlotIndex::new(5));
    /// assert_eq!(span.max(), SlotIndex::new(9));
    /// ```
    #[inline]
    pub fn new(a: SlotIndex, b: SlotIndex) -> Self {
        let (min, max) = match a.cmp(&b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self { min, max }
    }

    /// The smallest index in the span (inclusive).
    #[inline]
    pub const fn min(&self) -> SlotIndex {
        self.min
    }

    /// The largest index in the span (inclusive).
    #[inline]
    pub const fn max(&self) -> SlotIndex {
        self.max
    }

    /// Number of slots covered, `max - min + 1`.
    ///
    /// # Panics
    ///
    /// Panics if the width does not fit in a `u64`, which only happens for
    /// the span `[0, u64::MAX]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
    ///
    /// let span = SlotSpan::new(SlotIndex::new(5), SlotIndex::new(50));
    /// assert_eq!(span.len().value(), 46);
    /// ```
    #[inline]
    pub fn len(&self) -> SlotCount {
        let width = self.max.value() - self.min.value();
        SlotCount::new(width.checked_add(1).expect("overflow in SlotSpan::len"))
    }

    /// Checks whether `x` lies within the span (both bounds inclusive).
    #[inline]
    pub fn contains(&self, x: SlotIndex) -> bool {
        x >= self.min && x <= self.max
    }

    /// Maps an external index to its zero-based offset within the span.
    ///
    /// Returns `None` if `x` is outside the span. This is the single place
    /// where external indices are translated to bit positions, so boundary
    /// behavior can be pinned down directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
    ///
    /// let span = SlotSpan::new(SlotIndex::new(5), SlotIndex::new(50));
    /// assert_eq!(span.offset_of(SlotIndex::new(5)), Some(0));
    /// assert_eq!(span.offset_of(SlotIndex::new(50)), Some(45));
    /// assert_eq!(span.offset_of(SlotIndex::new(4)), None);
    /// assert_eq!(span.offset_of(SlotIndex::new(51)), None);
    /// ```
    #[inline]
    pub fn offset_of(&self, x: SlotIndex) -> Option<u64> {
        self.contains(x).then(|| x.value() - self.min.value())
    }

    /// Maps a zero-based offset back to the external index `min + offset`.
    ///
    /// The inverse of [`SlotSpan::offset_of`] for in-span offsets.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
    ///
    /// let span = SlotSpan::new(SlotIndex::new(5), SlotIndex::new(50));
    /// assert_eq!(span.index_at(0), SlotIndex::new(5));
    /// assert_eq!(span.index_at(45), SlotIndex::new(50));
    /// ```
    #[inline]
    pub fn index_at(&self, offset: u64) -> SlotIndex {
        self.min + SlotCount::new(offset)
    }

    /// Returns the smallest span covering both `self` and `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_alloc_core::{index::SlotIndex, span::SlotSpan};
    ///
    /// let span = SlotSpan::new(SlotIndex::new(10), SlotIndex::new(11));
    /// let grown = span.expand_to(SlotIndex::new(5)).expand_to(SlotIndex::new(12));
    /// assert_eq!(grown, SlotSpan::new(SlotIndex::new(5), SlotIndex::new(12)));
    /// ```
    #[inline]
    pub fn expand_to(&self, x: SlotIndex) -> Self {
        Self {
            min: self.min.min(x),
            max: self.max.max(x),
        }
    }

    /// Iterates all indices in the span in ascending order.
    #[inline]
    pub fn iter(&self) -> SpanIter {
        SpanIter {
            next: Some(self.min),
            max: self.max,
        }
    }
}

impl std::fmt::Display for SlotSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min.value(), self.max.value())
    }
}

impl IntoIterator for &SlotSpan {
    type Item = SlotIndex;
    type IntoIter = SpanIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the indices of a [`SlotSpan`].
#[derive(Clone, Debug)]
pub struct SpanIter {
    next: Option<SlotIndex>,
    max: SlotIndex,
}

impl Iterator for SpanIter {
    type Item = SlotIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = (current < self.max).then(|| current + SlotCount::one());
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(next) => {
                let remaining = self.max.value() - next.value();
                match usize::try_from(remaining) {
                    Ok(r) if r < usize::MAX => (r + 1, Some(r + 1)),
                    _ => (usize::MAX, None),
                }
            }
        }
    }
}

impl FusedIterator for SpanIter {}
