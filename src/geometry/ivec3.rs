//! `IVec3`: a small integer triple with elementwise arithmetic.
//!
//! Grid origins, extents and offsets are all expressed as cell counts along
//! the three axes. `IVec3` gives them one shared vocabulary: elementwise
//! `+`/`-`, scalar `*`, floor division and euclidean remainder, plus
//! all-axes comparison predicates.
//!
//! Division and remainder use euclidean semantics (`div_euclid`,
//! `rem_euclid`), which coincide with floor division for the positive
//! divisors used throughout the crate, including for negative numerators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Rem, Sub};

/// Signed integer vector over the `(x, y, z)` axes.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
pub struct IVec3(pub [i64; 3]);

impl IVec3 {
    /// The zero triple.
    pub const ZERO: IVec3 = IVec3([0, 0, 0]);

    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        IVec3([x, y, z])
    }

    /// Same value on every axis.
    #[inline]
    pub const fn splat(v: i64) -> Self {
        IVec3([v, v, v])
    }

    #[inline]
    pub const fn x(self) -> i64 {
        self.0[0]
    }

    #[inline]
    pub const fn y(self) -> i64 {
        self.0[1]
    }

    #[inline]
    pub const fn z(self) -> i64 {
        self.0[2]
    }

    /// Apply `f` to each component.
    #[inline]
    pub fn map(self, f: impl Fn(i64) -> i64) -> Self {
        IVec3([f(self.0[0]), f(self.0[1]), f(self.0[2])])
    }

    /// Combine two vectors component by component.
    #[inline]
    pub fn zip_with(self, other: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        IVec3([
            f(self.0[0], other.0[0]),
            f(self.0[1], other.0[1]),
            f(self.0[2], other.0[2]),
        ])
    }

    /// True if `pred` holds on every axis.
    #[inline]
    pub fn all(self, pred: impl Fn(i64) -> bool) -> bool {
        self.0.iter().all(|&c| pred(c))
    }

    /// Elementwise `self >= other` on every axis.
    #[inline]
    pub fn all_ge(self, other: Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }

    /// Elementwise `self <= other` on every axis.
    #[inline]
    pub fn all_le(self, other: Self) -> bool {
        other.all_ge(self)
    }

    /// Every component divisible by two.
    #[inline]
    pub fn is_even(self) -> bool {
        (self % 2) == IVec3::ZERO
    }

    /// Product of the components, or `None` on overflow.
    #[inline]
    pub fn checked_product(self) -> Option<i64> {
        self.0[0].checked_mul(self.0[1])?.checked_mul(self.0[2])
    }

    /// Converts to a `usize` shape, or `None` if any component is negative.
    pub fn to_shape(self) -> Option<[usize; 3]> {
        Some([
            usize::try_from(self.0[0]).ok()?,
            usize::try_from(self.0[1]).ok()?,
            usize::try_from(self.0[2]).ok()?,
        ])
    }
}

impl From<[i64; 3]> for IVec3 {
    #[inline]
    fn from(v: [i64; 3]) -> Self {
        IVec3(v)
    }
}

impl From<IVec3> for [i64; 3] {
    #[inline]
    fn from(v: IVec3) -> Self {
        v.0
    }
}

impl Index<usize> for IVec3 {
    type Output = i64;

    #[inline]
    fn index(&self, axis: usize) -> &i64 {
        &self.0[axis]
    }
}

impl Add for IVec3 {
    type Output = IVec3;

    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add<i64> for IVec3 {
    type Output = IVec3;

    #[inline]
    fn add(self, rhs: i64) -> IVec3 {
        self.map(|a| a + rhs)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;

    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub<i64> for IVec3 {
    type Output = IVec3;

    #[inline]
    fn sub(self, rhs: i64) -> IVec3 {
        self.map(|a| a - rhs)
    }
}

impl Mul<i64> for IVec3 {
    type Output = IVec3;

    #[inline]
    fn mul(self, rhs: i64) -> IVec3 {
        self.map(|a| a * rhs)
    }
}

/// Floor division by a positive scalar.
impl Div<i64> for IVec3 {
    type Output = IVec3;

    #[inline]
    fn div(self, rhs: i64) -> IVec3 {
        self.map(|a| a.div_euclid(rhs))
    }
}

/// Non-negative remainder by a positive scalar.
impl Rem<i64> for IVec3 {
    type Output = IVec3;

    #[inline]
    fn rem(self, rhs: i64) -> IVec3 {
        self.map(|a| a.rem_euclid(rhs))
    }
}

impl fmt::Display for IVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}
