// Copyright (c) 2025 Felix Kahle.
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

use num_traits::{CheckedAdd, CheckedSub, SaturatingSub, Zero};
use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Capacity units consumed on a vehicle.
///
/// One ordinary motorcycle occupies one unit; larger references occupy their
/// equivalence weight. Arithmetic panics on overflow, mirroring the checked
/// operators used for other quantities in this workspace.
#[repr(transparent)]
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Load(u32);

impl Load {
    pub const ONE: Load = Load(1);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Load(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// `true` when the load is strictly heavier than a single ordinary unit.
    #[inline]
    pub const fn is_special(self) -> bool {
        self.0 > 1
    }

    #[inline]
    pub fn fits_in(self, capacity: Load) -> bool {
        self <= capacity
    }

    /// Smallest integer load that reaches `fraction` of `self`.
    ///
    /// Used for minimum-fill thresholds: with a capacity of 10 and a fraction
    /// of 0.95 the result is 10, because 9 units would only reach 90%.
    /// Fractions are clamped to `[0, 1]`.
    #[inline]
    pub fn ceil_fraction(self, fraction: f64) -> Load {
        const EPS: f64 = 1e-9;
        let fraction = fraction.clamp(0.0, 1.0);
        let raw = (f64::from(self.0) * fraction - EPS).ceil();
        if raw <= 0.0 {
            Load::zero()
        } else {
            Load((raw as u32).min(self.0))
        }
    }

    /// Fraction of `capacity` this load occupies, in `[0, inf)`.
    #[inline]
    pub fn utilization_of(self, capacity: Load) -> f64 {
        if capacity.is_zero() {
            return 0.0;
        }
        f64::from(self.0) / f64::from(capacity.0)
    }
}

impl std::fmt::Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Load({})", self.0)
    }
}

impl From<u32> for Load {
    #[inline]
    fn from(v: u32) -> Self {
        Load(v)
    }
}

impl From<Load> for u32 {
    #[inline]
    fn from(v: Load) -> Self {
        v.0
    }
}

impl Zero for Load {
    #[inline]
    fn zero() -> Self {
        Load(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Load {
    type Output = Load;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Load(self.0.checked_add(rhs.0).expect("error in Load + Load"))
    }
}

impl AddAssign for Load {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.checked_add(rhs.0).expect("error in Load += Load");
    }
}

impl Sub for Load {
    type Output = Load;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Load(self.0.checked_sub(rhs.0).expect("error in Load - Load"))
    }
}

impl SubAssign for Load {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.checked_sub(rhs.0).expect("error in Load -= Load");
    }
}

impl CheckedAdd for Load {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Load)
    }
}

impl CheckedSub for Load {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Load)
    }
}

impl SaturatingSub for Load {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        Load(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Load {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Load::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Load> for Load {
    fn sum<I: Iterator<Item = &'a Load>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn ld(v: u32) -> Load {
        Load::new(v)
    }

    #[test]
    fn test_arithmetic_and_sum() {
        assert_eq!(ld(3) + ld(4), ld(7));
        assert_eq!(ld(7) - ld(4), ld(3));
        let mut x = ld(2);
        x += ld(5);
        x -= ld(1);
        assert_eq!(x, ld(6));
        let total: Load = [ld(1), ld(2), ld(6)].iter().sum();
        assert_eq!(total, ld(9));
    }

    #[test]
    #[should_panic(expected = "error in Load - Load")]
    fn test_sub_underflow_panics() {
        let _ = ld(1) - ld(2);
    }

    #[test]
    fn test_checked_ops() {
        assert_eq!(ld(1).checked_sub(&ld(2)), None);
        assert_eq!(ld(u32::MAX).checked_add(&ld(1)), None);
        assert_eq!(ld(1).saturating_sub(&ld(5)), ld(0));
    }

    #[test]
    fn test_is_special() {
        assert!(!ld(0).is_special());
        assert!(!ld(1).is_special());
        assert!(ld(2).is_special());
        assert!(ld(12).is_special());
    }

    #[test]
    fn test_ceil_fraction_rounds_up_to_whole_units() {
        // 95% of 10 is 9.5, which can only be met by 10 whole units.
        assert_eq!(ld(10).ceil_fraction(0.95), ld(10));
        assert_eq!(ld(10).ceil_fraction(0.90), ld(9));
        assert_eq!(ld(20).ceil_fraction(0.95), ld(19));
        assert_eq!(ld(40).ceil_fraction(0.90), ld(36));
        assert_eq!(ld(7).ceil_fraction(0.0), ld(0));
        assert_eq!(ld(7).ceil_fraction(1.0), ld(7));
    }

    #[test]
    fn test_ceil_fraction_clamps_out_of_range() {
        assert_eq!(ld(10).ceil_fraction(-0.5), ld(0));
        assert_eq!(ld(10).ceil_fraction(3.0), ld(10));
    }

    #[test]
    fn test_utilization() {
        assert_eq!(ld(5).utilization_of(ld(10)), 0.5);
        assert_eq!(ld(5).utilization_of(ld(0)), 0.0);
    }

    #[test]
    fn test_fits_in() {
        assert!(ld(5).fits_in(ld(5)));
        assert!(!ld(6).fits_in(ld(5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ld(4)), "Load(4)");
    }
}
