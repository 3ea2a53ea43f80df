//! Regularized incomplete beta function I_x(a, b) and its gradient.
//!
//! Both the value and the gradient come out of a single continued-fraction
//! recurrence. The recurrence is written once, generic over a `Lane`:
//! plain `T` for value-only evaluation, `Dual3` when ∂/∂a, ∂/∂b and ∂/∂x
//! are wanted. The dual lane carries the closed-form partials of every
//! coefficient through the same updates. Its value channel stops at the
//! same depth as the value lane; the tangents keep going until they settle
//! too.

use core::ops::{Add, Div, Mul};

use crate::FloatScalar;
use super::SpecialError;
use super::beta_fn::lbeta;
use super::digamma_fn::digamma;
use super::dual::{Dual3, DA, DB, DX};

/// Running convergents are renormalised once |Q_m| leaves [LOW, HIGH].
const RESCALE_HIGH: f64 = 1e16;
const RESCALE_LOW: f64 = 1e-16;

/// Tangents of R_m pick up rounding from the quotient rule at every step,
/// so their settling test is this many times looser than the value's.
const TANGENT_SLACK: f64 = 64.0;

/// Precision settings for the continued fraction.
///
/// The three knobs are the entire tuning surface of the engine. The value
/// is immutable once built and is passed by reference to every call (or
/// stored in a distribution), so concurrent calls with different settings
/// never interact.
///
/// # Example
///
/// ```
/// use betagrad::special::{betainc_with, BetaIncSettings};
///
/// let settings = BetaIncSettings { max_approx: 1000, ..BetaIncSettings::default() };
/// let r = betainc_with(2.0_f64, 3.0, 0.5, &settings).unwrap();
/// assert!(r.converged);
/// assert!((r.value - 0.6875).abs() < 1e-13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaIncSettings<T> {
    /// Convergence tolerance on |R_m / R_{m−1} − 1|.
    pub epsilon: T,
    /// Minimum number of continued-fraction terms before convergence may be declared.
    pub min_approx: usize,
    /// Maximum number of continued-fraction terms.
    pub max_approx: usize,
}

impl<T: FloatScalar> Default for BetaIncSettings<T> {
    /// `epsilon = 1e-14` (never tighter than 16 ulp of `T`), `min_approx = 3`,
    /// `max_approx = 500`.
    fn default() -> Self {
        Self {
            epsilon: floored_epsilon(1e-14),
            min_approx: 3,
            max_approx: 500,
        }
    }
}

impl<T: FloatScalar> BetaIncSettings<T> {
    /// Lighter settings for bulk evaluation away from the tails:
    /// `epsilon = 1e-12`, `max_approx = 200`.
    pub fn fast() -> Self {
        Self {
            epsilon: floored_epsilon(1e-12),
            min_approx: 3,
            max_approx: 200,
        }
    }

    /// Check that the settings describe a usable iteration budget.
    ///
    /// # Errors
    ///
    /// [`SpecialError::InvalidSettings`] if `epsilon` is not a positive finite
    /// number, `max_approx` is zero, or `min_approx > max_approx`.
    pub fn validate(&self) -> Result<(), SpecialError> {
        if !(self.epsilon > T::zero())
            || !self.epsilon.is_finite()
            || self.max_approx == 0
            || self.min_approx > self.max_approx
        {
            return Err(SpecialError::InvalidSettings);
        }
        Ok(())
    }
}

fn floored_epsilon<T: FloatScalar>(target: f64) -> T {
    let floor = T::epsilon() * T::from(16.0).unwrap();
    T::from(target).unwrap().max(floor)
}

/// Value of I_x(a, b) with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaIncResult<T> {
    /// I_x(a, b).
    pub value: T,
    /// Continued-fraction terms evaluated (0 at x = 0 or x = 1).
    pub iterations: usize,
    /// `false` if `max_approx` was reached before the tolerance was met;
    /// `value` is then the best available estimate.
    pub converged: bool,
    /// Whether I_x(a, b) = 1 − I_{1−x}(b, a) was used.
    pub reflected: bool,
}

/// Value and gradient of I_x(a, b) with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaIncGrad<T> {
    /// I_x(a, b).
    pub value: T,
    /// ∂I/∂a.
    pub d_a: T,
    /// ∂I/∂b.
    pub d_b: T,
    /// ∂I/∂x. Infinite at x = 0 when a < 1 and at x = 1 when b < 1.
    pub d_x: T,
    /// Continued-fraction terms evaluated (0 at x = 0 or x = 1). Never fewer
    /// than the value-only evaluation uses; with an integer shape the
    /// partials usually need more terms than the value.
    pub iterations: usize,
    /// `false` if `max_approx` was reached before the value and all three
    /// partials met the tolerance.
    pub converged: bool,
    /// Whether I_x(a, b) = 1 − I_{1−x}(b, a) was used.
    pub reflected: bool,
}

impl<T: FloatScalar> BetaIncResult<T> {
    fn exact(value: T) -> Self {
        Self { value, iterations: 0, converged: true, reflected: false }
    }
}

impl<T: FloatScalar> BetaIncGrad<T> {
    pub(crate) fn exact(value: T, d_x: T) -> Self {
        Self {
            value,
            d_a: T::zero(),
            d_b: T::zero(),
            d_x,
            iterations: 0,
            converged: true,
            reflected: false,
        }
    }
}

/// Regularized incomplete beta function I_x(a, b) with default settings.
///
/// I_x(a, b) = B(x; a, b) / B(a, b) where B(x; a, b) = ∫₀ˣ t^{a−1}(1−t)^{b−1} dt.
///
/// Domain: a > 0, b > 0, 0 ≤ x ≤ 1 (all finite). A fraction that does not
/// converge within the default budget still returns its best estimate; use
/// [`betainc_with`] to observe that.
///
/// # Example
///
/// ```
/// use betagrad::special::betainc;
///
/// // I_0(a, b) = 0 and I_1(a, b) = 1
/// assert_eq!(betainc(2.0_f64, 3.0, 0.0).unwrap(), 0.0);
/// assert_eq!(betainc(2.0_f64, 3.0, 1.0).unwrap(), 1.0);
///
/// // I_{0.5}(1, 1) = 0.5 (uniform distribution)
/// assert!((betainc(1.0_f64, 1.0, 0.5).unwrap() - 0.5).abs() < 1e-14);
/// ```
pub fn betainc<T: FloatScalar>(a: T, b: T, x: T) -> Result<T, SpecialError> {
    Ok(betainc_with(a, b, x, &BetaIncSettings::default())?.value)
}

/// I_x(a, b) with explicit precision settings and convergence diagnostics.
///
/// # Errors
///
/// [`SpecialError::DomainError`] for inputs outside the domain,
/// [`SpecialError::InvalidSettings`] for unusable settings.
pub fn betainc_with<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> Result<BetaIncResult<T>, SpecialError> {
    check_domain(a, b, x)?;
    settings.validate()?;
    Ok(evaluate(a, b, x, settings))
}

/// I_x(a, b) and its partial derivatives with default settings.
///
/// # Example
///
/// ```
/// use betagrad::special::betainc_grad;
///
/// // I_x(1, 1) = x, so ∂I/∂x = 1
/// let g = betainc_grad(1.0_f64, 1.0, 0.3).unwrap();
/// assert!((g.value - 0.3).abs() < 1e-14);
/// assert!((g.d_x - 1.0).abs() < 1e-12);
/// ```
pub fn betainc_grad<T: FloatScalar>(a: T, b: T, x: T) -> Result<BetaIncGrad<T>, SpecialError> {
    betainc_grad_with(a, b, x, &BetaIncSettings::default())
}

/// I_x(a, b) and ∂I/∂a, ∂I/∂b, ∂I/∂x with explicit precision settings.
///
/// The derivatives are those of the truncated fraction actually evaluated,
/// so `value` is bit-identical to [`betainc_with`] under the same settings.
///
/// At x = 0 the shape derivatives are 0 and ∂I/∂x is the beta density at 0:
/// 0 for a > 1, b for a = 1, +∞ for a < 1. x = 1 mirrors this with the
/// roles of a and b exchanged.
///
/// # Errors
///
/// Same as [`betainc_with`].
pub fn betainc_grad_with<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> Result<BetaIncGrad<T>, SpecialError> {
    check_domain(a, b, x)?;
    settings.validate()?;
    Ok(evaluate_grad(a, b, x, settings))
}

/// Value-only evaluation of already-validated arguments.
pub(crate) fn evaluate<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> BetaIncResult<T> {
    if x == T::zero() {
        return BetaIncResult::exact(T::zero());
    }
    if x == T::one() {
        return BetaIncResult::exact(T::one());
    }

    let e = interior::<T, T>(a, b, x, settings);
    BetaIncResult {
        value: e.value,
        iterations: e.iterations,
        converged: e.converged,
        reflected: e.reflected,
    }
}

/// Gradient evaluation of already-validated arguments.
pub(crate) fn evaluate_grad<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> BetaIncGrad<T> {
    if x == T::zero() {
        return BetaIncGrad::exact(T::zero(), edge_density(a, b));
    }
    if x == T::one() {
        return BetaIncGrad::exact(T::one(), edge_density(b, a));
    }

    let e = interior::<T, Dual3<T>>(a, b, x, settings);
    BetaIncGrad {
        value: e.value.v,
        d_a: e.value.d[DA],
        d_b: e.value.d[DB],
        d_x: e.value.d[DX],
        iterations: e.iterations,
        converged: e.converged,
        reflected: e.reflected,
    }
}

pub(crate) fn check_domain<T: FloatScalar>(a: T, b: T, x: T) -> Result<(), SpecialError> {
    let zero = T::zero();
    if !(a > zero) || !(b > zero) || !a.is_finite() || !b.is_finite() {
        return Err(SpecialError::DomainError);
    }
    if !(x >= zero && x <= T::one()) {
        return Err(SpecialError::DomainError);
    }
    Ok(())
}

/// Beta(p, q) density at the endpoint where t^{p−1} vanishes or blows up.
fn edge_density<T: FloatScalar>(p: T, q: T) -> T {
    let one = T::one();
    if p > one {
        T::zero()
    } else if p == one {
        // 1 / B(1, q) = q
        q
    } else {
        T::infinity()
    }
}

// ---------------------------------------------------------------------------
// Recurrence lanes
// ---------------------------------------------------------------------------

/// Number type the recurrence runs over.
trait Lane<T: FloatScalar>: Copy + Add<Output = Self> + Mul<Output = Self> + Div<Output = Self> {
    fn constant(v: T) -> Self;

    fn value(self) -> T;

    /// Divide by a renormalisation constant that carries no derivative.
    fn unscale(self, s: T) -> Self;

    /// Partial numerator d_m of the fraction.
    fn coefficient(m: usize, a: T, b: T, x: T) -> Self;

    /// K = x^a (1−x)^b / (a·B(a, b)).
    fn prefactor(a: T, b: T, x: T) -> Self;

    /// Map J(b, a, 1−x) to 1 − J, expressed in the caller's (a, b, x).
    fn reflect(self) -> Self;

    /// Whether the tangents carried from `prev` to `next` have stopped moving
    /// relative to `eps`. Always true for a lane without tangents.
    fn settled(prev: Self, next: Self, eps: T) -> bool;

    /// Replace the value channel, keeping any tangents.
    fn with_value(self, v: T) -> Self;
}

impl<T: FloatScalar> Lane<T> for T {
    #[inline]
    fn constant(v: T) -> Self {
        v
    }

    #[inline]
    fn value(self) -> T {
        self
    }

    #[inline]
    fn unscale(self, s: T) -> Self {
        self / s
    }

    #[inline]
    fn coefficient(m: usize, a: T, b: T, x: T) -> Self {
        cf_coefficient(m, a, b, x)
    }

    fn prefactor(a: T, b: T, x: T) -> Self {
        ln_prefactor(a, b, x).exp()
    }

    #[inline]
    fn reflect(self) -> Self {
        T::one() - self
    }

    #[inline]
    fn settled(_prev: Self, _next: Self, _eps: T) -> bool {
        true
    }

    #[inline]
    fn with_value(self, v: T) -> Self {
        v
    }
}

impl<T: FloatScalar> Lane<T> for Dual3<T> {
    #[inline]
    fn constant(v: T) -> Self {
        Dual3::constant(v)
    }

    #[inline]
    fn value(self) -> T {
        self.v
    }

    #[inline]
    fn unscale(self, s: T) -> Self {
        Dual3::unscale(self, s)
    }

    fn coefficient(m: usize, a: T, b: T, x: T) -> Self {
        cf_coefficient_partials(m, a, b, x)
    }

    fn prefactor(a: T, b: T, x: T) -> Self {
        let one = T::one();
        let k = ln_prefactor(a, b, x).exp();
        let psi_ab = digamma(a + b);
        Dual3::new(
            k,
            [
                k * (x.ln() - one / a - digamma(a) + psi_ab),
                k * ((-x).ln_1p() - digamma(b) + psi_ab),
                k * (a / x - b / (one - x)),
            ],
        )
    }

    fn reflect(self) -> Self {
        // I(a, b, x) = 1 − J(b, a, 1 − x): swap the shape slots, negate them,
        // and the two sign flips on x cancel.
        Dual3::new(T::one() - self.v, [-self.d[DB], -self.d[DA], self.d[DX]])
    }

    fn settled(prev: Self, next: Self, eps: T) -> bool {
        // Tangents are measured against |R| as well, so a partial that is
        // zero in the limit does not demand exact cancellation.
        let tol = eps * T::from(TANGENT_SLACK).unwrap();
        let floor = next.v.abs() + T::min_positive_value();
        (0..3).all(|i| (next.d[i] - prev.d[i]).abs() <= tol * (next.d[i].abs() + floor))
    }

    #[inline]
    fn with_value(self, v: T) -> Self {
        Dual3::new(v, self.d)
    }
}

/// ln K computed entirely in log space.
fn ln_prefactor<T: FloatScalar>(a: T, b: T, x: T) -> T {
    a * x.ln() + b * (-x).ln_1p() - a.ln() - lbeta(a, b)
}

/// d_m of I_x(a,b) = K / (1 + d_1/(1 + d_2/(1 + …))).
///
/// d_{2k+1} = −(a+k)(a+b+k)x / ((a+2k)(a+2k+1)),
/// d_{2k}   =  k(b−k)x / ((a+2k−1)(a+2k)).
#[inline]
fn cf_coefficient<T: FloatScalar>(m: usize, a: T, b: T, x: T) -> T {
    let one = T::one();
    let k = T::from(m / 2).unwrap();
    let two_k = k + k;
    if m % 2 == 1 {
        -((a + k) * (a + b + k) * x) / ((a + two_k) * (a + two_k + one))
    } else {
        k * (b - k) * x / ((a + two_k - one) * (a + two_k))
    }
}

/// d_m with its closed-form partials. The value is `cf_coefficient` itself.
fn cf_coefficient_partials<T: FloatScalar>(m: usize, a: T, b: T, x: T) -> Dual3<T> {
    let one = T::one();
    let v = cf_coefficient(m, a, b, x);
    let k = T::from(m / 2).unwrap();
    let two_k = k + k;
    if m % 2 == 1 {
        let den = (a + two_k) * (a + two_k + one);
        let d_a = v * (one / (a + k) + one / (a + b + k) - one / (a + two_k) - one / (a + two_k + one));
        let d_b = -((a + k) * x) / den;
        let d_x = -((a + k) * (a + b + k)) / den;
        Dual3::new(v, [d_a, d_b, d_x])
    } else {
        let den = (a + two_k - one) * (a + two_k);
        let d_a = -(v * (one / (a + two_k - one) + one / (a + two_k)));
        let d_b = k * x / den;
        let d_x = k * (b - k) / den;
        Dual3::new(v, [d_a, d_b, d_x])
    }
}

// ---------------------------------------------------------------------------
// Continued fraction
// ---------------------------------------------------------------------------

/// Iterates of R = 1/(1 + d_1/(1 + d_2/(1 + …))) for one evaluation.
///
/// P and Q follow X_m = X_{m−1} + d_m·X_{m−2} from P_0 = 0, P_1 = 1,
/// Q_0 = Q_1 = 1, so that R_m = P_m / Q_m.
struct ConvergenceState<T, L> {
    p_prev: L,
    p: L,
    q_prev: L,
    q: L,
    /// R_m with its tangents.
    estimate: L,
    /// R at the step where the value met the tolerance. Later steps only
    /// refine the tangents.
    settled_value: Option<T>,
    iterations: usize,
    converged: bool,
}

impl<T: FloatScalar, L: Lane<T>> ConvergenceState<T, L> {
    fn new() -> Self {
        let one = T::one();
        Self {
            p_prev: L::constant(T::zero()),
            p: L::constant(one),
            q_prev: L::constant(one),
            q: L::constant(one),
            estimate: L::constant(one),
            settled_value: None,
            iterations: 0,
            converged: false,
        }
    }

    /// Fold in d_m. Returns delta = R_m / R_{m−1} and whether the tangents
    /// of R_m agree with those of R_{m−1} to `eps`.
    fn step(&mut self, d: L, eps: T) -> (T, bool) {
        let p_next = self.p + d * self.p_prev;
        let q_next = self.q + d * self.q_prev;
        self.p_prev = self.p;
        self.p = p_next;
        self.q_prev = self.q;
        self.q = q_next;
        self.iterations += 1;
        self.renormalize();

        let next = self.p / self.q;
        let delta = next.value() / self.estimate.value();
        let settled = L::settled(self.estimate, next, eps);
        self.estimate = next;
        (delta, settled)
    }

    /// Keep the convergents near unit magnitude. R_m and its derivatives
    /// are invariant under a common constant factor.
    fn renormalize(&mut self) {
        let scale = self.q.value().abs();
        let high = T::from(RESCALE_HIGH).unwrap();
        let low = T::from(RESCALE_LOW).unwrap();
        if scale > high || (scale < low && scale > T::zero()) {
            self.p_prev = self.p_prev.unscale(scale);
            self.p = self.p.unscale(scale);
            self.q_prev = self.q_prev.unscale(scale);
            self.q = self.q.unscale(scale);
        }
    }

    fn fraction(&self) -> L {
        match self.settled_value {
            Some(v) => self.estimate.with_value(v),
            None => self.estimate,
        }
    }
}

fn continued_fraction<T: FloatScalar, L: Lane<T>>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> ConvergenceState<T, L> {
    let one = T::one();
    let mut state = ConvergenceState::new();
    for m in 1..=settings.max_approx {
        let (delta, settled) = state.step(L::coefficient(m, a, b, x), settings.epsilon);
        if state.settled_value.is_none()
            && m >= settings.min_approx
            && (delta - one).abs() < settings.epsilon
        {
            state.settled_value = Some(state.estimate.value());
        }
        // With an integer shape some d_m is exactly zero, which freezes the
        // value while the tangents still depend on the remaining terms.
        if state.settled_value.is_some() && settled {
            state.converged = true;
            break;
        }
    }
    state
}

struct Interior<L> {
    value: L,
    iterations: usize,
    converged: bool,
    reflected: bool,
}

/// Evaluate for 0 < x < 1, reflecting above (a+1)/(a+b+2).
fn interior<T: FloatScalar, L: Lane<T>>(
    a: T,
    b: T,
    x: T,
    settings: &BetaIncSettings<T>,
) -> Interior<L> {
    let one = T::one();
    let two = one + one;
    let y = one - x;
    // When 1 − x rounds to 1 the reflected argument has lost x entirely.
    let reflected = x > (a + one) / (a + b + two) && y < one;
    let (p, q, z) = if reflected { (b, a, y) } else { (a, b, x) };

    let state = continued_fraction::<T, L>(p, q, z, settings);
    if !state.converged {
        log::debug!(
            "betainc: no convergence after {} terms (a={:?}, b={:?}, x={:?}, epsilon={:?})",
            state.iterations,
            a,
            b,
            x,
            settings.epsilon
        );
    }

    let raw = L::prefactor(p, q, z) * state.fraction();
    Interior {
        value: if reflected { raw.reflect() } else { raw },
        iterations: state.iterations,
        converged: state.converged,
        reflected,
    }
}
