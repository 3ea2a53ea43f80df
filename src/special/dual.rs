//! Forward-mode dual numbers with three tangent directions.
//!
//! A [`Dual3`] carries a value together with its partial derivatives with
//! respect to the three incomplete beta arguments (a, b, x). Arithmetic
//! applies the sum, product and quotient rules to every tangent, so any
//! recurrence written over `Dual3` yields derivatives of exactly the
//! approximation it computes.
//!
//! The value channel uses the same floating-point operations as plain `T`
//! arithmetic, so a value-only pass and a dual pass agree bit-for-bit.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::FloatScalar;

/// Tangent index of the first shape parameter.
pub(crate) const DA: usize = 0;
/// Tangent index of the second shape parameter.
pub(crate) const DB: usize = 1;
/// Tangent index of the integration limit.
pub(crate) const DX: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Dual3<T> {
    pub(crate) v: T,
    pub(crate) d: [T; 3],
}

impl<T: FloatScalar> Dual3<T> {
    #[inline]
    pub(crate) fn new(v: T, d: [T; 3]) -> Self {
        Self { v, d }
    }

    /// A quantity that does not depend on (a, b, x).
    #[inline]
    pub(crate) fn constant(v: T) -> Self {
        Self { v, d: [T::zero(); 3] }
    }

    /// Divide value and tangents by a constant treated as having no derivative.
    #[inline]
    pub(crate) fn unscale(self, s: T) -> Self {
        Self {
            v: self.v / s,
            d: [self.d[0] / s, self.d[1] / s, self.d[2] / s],
        }
    }
}

impl<T: FloatScalar> Add for Dual3<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            d: [self.d[0] + rhs.d[0], self.d[1] + rhs.d[1], self.d[2] + rhs.d[2]],
        }
    }
}

impl<T: FloatScalar> Sub for Dual3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            v: self.v - rhs.v,
            d: [self.d[0] - rhs.d[0], self.d[1] - rhs.d[1], self.d[2] - rhs.d[2]],
        }
    }
}

impl<T: FloatScalar> Mul for Dual3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let d = |i: usize| self.d[i] * rhs.v + self.v * rhs.d[i];
        Self {
            v: self.v * rhs.v,
            d: [d(0), d(1), d(2)],
        }
    }
}

impl<T: FloatScalar> Div for Dual3<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let den = rhs.v * rhs.v;
        let d = |i: usize| (self.d[i] * rhs.v - self.v * rhs.d[i]) / den;
        Self {
            v: self.v / rhs.v,
            d: [d(0), d(1), d(2)],
        }
    }
}

impl<T: FloatScalar> Neg for Dual3<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            v: -self.v,
            d: [-self.d[0], -self.d[1], -self.d[2]],
        }
    }
}
