//! Digamma (psi) function for positive arguments.

use crate::FloatScalar;

/// B_{2k}/(2k) for k = 1..7, the coefficients of the asymptotic series
/// ψ(x) ≈ ln(x) − 1/(2x) − Σ B_{2k}/(2k · x^{2k}).
const ASYMPTOTIC: [f64; 7] = [
    1.0 / 12.0,
    -1.0 / 120.0,
    1.0 / 252.0,
    -1.0 / 240.0,
    1.0 / 132.0,
    -691.0 / 32760.0,
    1.0 / 12.0,
];

/// Below this the recurrence is driven up to it before the series is used.
const SHIFT_TO: f64 = 10.0;

/// Digamma function ψ(x) = d/dx ln Γ(x), for x > 0.
///
/// Shifts x into the asymptotic region with ψ(x) = ψ(x+1) − 1/x and then
/// sums seven terms of the Bernoulli series. The incomplete beta gradient
/// only ever needs ψ at shape parameters, so non-positive arguments
/// return NaN instead of going through the reflection formula.
///
/// # Example
///
/// ```
/// use betagrad::special::digamma;
///
/// // ψ(1) = −γ (Euler-Mascheroni constant)
/// let euler_mascheroni = 0.5772156649015329_f64;
/// assert!((digamma(1.0_f64) + euler_mascheroni).abs() < 1e-12);
/// assert!(digamma(0.0_f64).is_nan());
/// ```
pub fn digamma<T: FloatScalar>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();

    if !(x > zero) || x.is_infinite() {
        return if x == T::infinity() { x } else { T::nan() };
    }

    let mut acc = zero;
    let mut xx = x;
    let threshold = T::from(SHIFT_TO).unwrap();
    while xx < threshold {
        acc = acc - one / xx;
        xx = xx + one;
    }

    let half = T::from(0.5).unwrap();
    acc = acc + xx.ln() - half / xx;

    let inv_x2 = one / (xx * xx);
    let mut power = inv_x2;
    for &c in &ASYMPTOTIC {
        acc = acc - T::from(c).unwrap() * power;
        power = power * inv_x2;
    }
    acc
}
