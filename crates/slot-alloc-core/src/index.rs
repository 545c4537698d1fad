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

use num_traits::{CheckedAdd, CheckedSub, SaturatingAdd, SaturatingSub, Zero};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// An absolute slot index as seen by callers.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct SlotIndex(u64);

impl std::fmt::Display for SlotIndex {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotIndex({})", self.0)
    }
}

impl From<u64> for SlotIndex {
    #[inline]
    fn from(v: u64) -> Self {
        SlotIndex(v)
    }
}

impl SlotIndex {
    #[inline]
    pub const fn new(v: u64) -> Self {
        SlotIndex(v)
    }

    #[inline]
    pub const fn zero() -> Self {
        SlotIndex(0)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, count: SlotCount) -> Option<Self> {
        self.0.checked_add(count.0).map(SlotIndex)
    }

    #[inline]
    pub fn checked_sub(self, count: SlotCount) -> Option<Self> {
        self.0.checked_sub(count.0).map(SlotIndex)
    }

    #[inline]
    pub fn saturating_add(self, count: SlotCount) -> Self {
        SlotIndex(self.0.saturating_add(count.0))
    }

    #[inline]
    pub fn saturating_sub(self, count: SlotCount) -> Self {
        SlotIndex(self.0.saturating_sub(count.0))
    }

    /// Absolute distance between two indices, as a count of slots.
    #[inline]
    pub const fn distance_to(self, other: Self) -> SlotCount {
        SlotCount(self.0.abs_diff(other.0))
    }
}

impl Add<SlotCount> for SlotIndex {
    type Output = SlotIndex;

    #[inline]
    fn add(self, rhs: SlotCount) -> Self::Output {
        SlotIndex(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SlotIndex + SlotCount"),
        )
    }
}

impl Add<SlotIndex> for SlotCount {
    type Output = SlotIndex;

    #[inline]
    fn add(self, rhs: SlotIndex) -> Self::Output {
        rhs + self
    }
}

impl Sub<SlotCount> for SlotIndex {
    type Output = SlotIndex;

    #[inline]
    fn sub(self, rhs: SlotCount) -> Self::Output {
        SlotIndex(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in SlotIndex - SlotCount"),
        )
    }
}

impl Sub<SlotIndex> for SlotIndex {
    type Output = SlotCount;

    #[inline]
    fn sub(self, rhs: SlotIndex) -> Self::Output {
        self.distance_to(rhs)
    }
}

impl AddAssign<SlotCount> for SlotIndex {
    #[inline]
    fn add_assign(&mut self, rhs: SlotCount) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in SlotIndex += SlotCount");
    }
}

impl SubAssign<SlotCount> for SlotIndex {
    #[inline]
    fn sub_assign(&mut self, rhs: SlotCount) {
        self.0 = self
            .0
            .checked_sub(rhs.0)
            .expect("underflow in SlotIndex -= SlotCount");
    }
}

/// A number of slots (a range width or a free/reserved tally).
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct SlotCount(u64);

impl std::fmt::Display for SlotCount {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotCount({})", self.0)
    }
}

impl From<u64> for SlotCount {
    #[inline]
    fn from(v: u64) -> Self {
        SlotCount(v)
    }
}

impl SlotCount {
    #[inline]
    pub const fn new(v: u64) -> Self {
        SlotCount(v)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn one() -> Self {
        Self(1)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SlotCount)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(SlotCount)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        SlotCount(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        SlotCount(self.0.saturating_sub(rhs.0))
    }
}

impl Zero for SlotCount {
    #[inline]
    fn zero() -> Self {
        SlotCount::new(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for SlotCount {
    type Output = SlotCount;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        SlotCount(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SlotCount + SlotCount"),
        )
    }
}

impl CheckedAdd for SlotCount {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SlotCount)
    }
}

impl SaturatingAdd for SlotCount {
    #[inline]
    fn saturating_add(&self, rhs: &Self) -> Self {
        SlotCount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for SlotCount {
    type Output = SlotCount;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        SlotCount(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in SlotCount - SlotCount"),
        )
    }
}

impl CheckedSub for SlotCount {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(SlotCount)
    }
}

impl SaturatingSub for SlotCount {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        SlotCount(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for SlotCount {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in SlotCount += SlotCount");
    }
}

impl SubAssign for SlotCount {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_sub(rhs.0)
            .expect("underflow in SlotCount -= SlotCount");
    }
}

impl Sum for SlotCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a SlotCount> for SlotCount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}
